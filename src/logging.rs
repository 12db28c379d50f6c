//! Install log and console reporting
//!
//! Every run writes a leveled log to `<log-dir>/dojo-install_<nanos>.log`.
//! The subscriber is built here and scoped around the install by `main`
//! with `tracing::subscriber::with_default`; nothing is installed globally.
//!
//! [`Reporter`] is the context handed to the acquisition functions. It
//! mirrors each message to the console (unless quiet) and to the log.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use console::Style;
use tracing::{error, info, trace, warn};
use tracing_subscriber::EnvFilter;

use crate::error::{self, Result};
use crate::progress::Spinner;

/// Default directory for install logs, relative to the working directory
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Environment variable overriding the log filter (e.g. `DOJO_LOG=debug`)
pub const LOG_ENV: &str = "DOJO_LOG";

const HELP_URL: &str = "https://github.com/mtesauro/godojo";
const RULE: &str =
    "==============================================================================";
const ERROR_RULE: &str =
    "##############################################################################";

/// Create the log directory if needed and open a fresh log file in it.
pub fn create_log_file(dir: &Path) -> Result<(PathBuf, File)> {
    std::fs::create_dir_all(dir).map_err(|e| error::fs::dir_create_failed(dir, e))?;

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let path = dir.join(format!("dojo-install_{nanos}.log"));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| error::fs::open_failed(&path, e))?;

    Ok((path, file))
}

/// Build the filter: `DOJO_LOG` when set, otherwise trace or info.
pub fn build_filter(trace: bool, directive: Option<&str>) -> EnvFilter {
    let default = if trace { "trace" } else { "info" };
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

/// Subscriber writing plain, timestamped lines into the log file.
pub fn file_subscriber(file: File, trace: bool) -> impl tracing::Subscriber + Send + Sync {
    let directive = std::env::var(LOG_ENV).ok();
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(build_filter(trace, directive.as_deref()))
        .finish()
}

/// Console and log output for one install run
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Print the installer banner
    pub fn banner(&self) {
        if self.quiet {
            return;
        }
        let style = Style::new().cyan().bold();
        for line in [
            r"        ____       ____          __     ____          _      ",
            r"       / __ \___  / __/__  _____/ /_   / __ \____    (_)___  ",
            r"      / / / / _ \/ /_/ _ \/ ___/ __/  / / / / __ \  / / __ \ ",
            r"     / /_/ /  __/ __/  __/ /__/ /_   / /_/ / /_/ / / / /_/ / ",
            r"    /_____/\___/_/  \___/\___/\__/  /_____/\____/_/ /\____/  ",
            r"                                               /___/         ",
        ] {
            println!("{}", style.apply_to(line));
        }
        println!();
        println!("  Welcome to the DefectDojo installer.");
        println!("  For more information on how an install is done, see:");
        println!("  {HELP_URL}");
        println!();
    }

    /// Section header, logged with a `SECTION:` prefix
    pub fn section(&self, message: &str) {
        if !self.quiet {
            println!();
            println!("{RULE}");
            println!("  {}", Style::new().bold().apply_to(message));
            println!("{RULE}");
            println!();
        }
        info!("SECTION: {message}");
    }

    pub fn status(&self, message: &str) {
        if !self.quiet {
            println!("{message}");
        }
        info!("{message}");
    }

    pub fn warning(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {message}", Style::new().yellow().bold().apply_to("WARNING:"));
        }
        warn!("{message}");
    }

    /// Blatant error block on the console, error line in the log
    pub fn error(&self, message: &str) {
        if !self.quiet {
            let red = Style::new().red().bold();
            eprintln!();
            eprintln!("{ERROR_RULE}");
            eprintln!("  {} {message}", red.apply_to("ERROR:"));
            eprintln!("{ERROR_RULE}");
            eprintln!();
        }
        error!("{message}");
    }

    /// Log-only detail, written when trace logging is on
    pub fn trace(&self, message: &str) {
        trace!("{message}");
    }

    /// Spinner for a long-running step; hidden when quiet
    pub fn spinner(&self, message: impl Into<String>) -> Spinner {
        Spinner::new(message, self.quiet)
    }
}
