//! CLI definitions using clap derive API

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};
use std::path::PathBuf;

use crate::config::{DEFAULT_CONFIG_FILE, InstallConfig, RUNTIME_CONFIG_FILE};
use crate::logging::DEFAULT_LOG_DIR;

/// DefectDojo installer
///
/// Acquires the DefectDojo source tree from a release archive or a git
/// checkout, as configured in dojoConfig.yml.
#[derive(Parser, Debug)]
#[command(
    name = "dojo-installer",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Installer front-end for DefectDojo",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  dojo-installer\n    \
                  dojo-installer --config /etc/dojo/dojoConfig.yml\n    \
                  dojo-installer --quiet --log-dir /var/log/dojo\n\n\
                  \x1b[1m\x1b[32mDocumentation:\x1b[0m\n    \
                  https://github.com/mtesauro/godojo"
)]
pub struct Cli {
    /// Configuration file
    #[arg(
        long,
        short = 'c',
        env = "DOJO_CONFIG",
        value_name = "FILE",
        default_value = DEFAULT_CONFIG_FILE
    )]
    pub config: PathBuf,

    /// Directory for install logs (created if missing)
    #[arg(long, value_name = "DIR", default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,

    /// Where to write the merged runtime configuration
    #[arg(long, value_name = "FILE", default_value = RUNTIME_CONFIG_FILE)]
    pub runtime_config: PathBuf,

    /// Suppress console output; the install log is still written
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Write trace-level detail to the install log
    #[arg(long)]
    pub trace: bool,
}

impl Cli {
    /// Apply flags on top of values read from the configuration file.
    ///
    /// Flags can only switch options on; an unset flag leaves the file's
    /// value alone.
    pub fn apply_overrides(&self, install: &mut InstallConfig) {
        if self.quiet {
            install.quiet = true;
        }
        if self.trace {
            install.trace = true;
        }
    }
}
