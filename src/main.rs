//! DefectDojo installer
//!
//! Loads dojoConfig.yml, opens the install log and acquires the DefectDojo
//! source tree into `Root/Source`, either from a tagged release archive or
//! from a git checkout of a commit or branch.

use clap::Parser;
use std::path::{Path, PathBuf};

mod acquire;
mod checkout;
mod cli;
mod common;
mod config;
mod error;
mod git;
mod logging;
mod progress;
mod release;

#[cfg(test)]
mod test_fixtures;

use cli::Cli;
use config::DojoConfig;
use error::Result;
use logging::Reporter;

/// Load the configuration file, apply CLI flags and validate the result
fn load_config(cli: &Cli) -> Result<DojoConfig> {
    let mut config = DojoConfig::load(&cli.config)?;
    cli.apply_overrides(&mut config.install);
    config.install.validate()?;
    Ok(config)
}

#[cfg(unix)]
fn is_root() -> bool {
    nix::unistd::Uid::effective().is_root()
}

#[cfg(not(unix))]
fn is_root() -> bool {
    true
}

/// Everything after logging is established
fn install(cli: &Cli, config: &DojoConfig, log_path: &Path) -> Result<PathBuf> {
    let reporter = Reporter::new(config.install.quiet);
    reporter.trace("Logging established, trace log begins here");

    reporter.banner();
    if !is_root() {
        reporter.warning(
            "This program should be run as root or with sudo; later install steps will fail otherwise",
        );
    }

    reporter.section("Starting the dojo install");
    reporter.status(&format!("Install log: {}", log_path.display()));

    reporter.trace("Writing out the runtime install configuration file");
    config.save(&cli.runtime_config)?;

    reporter.section("Downloading the source for DefectDojo");
    acquire::acquire(&config.install, &reporter)
        .inspect_err(|e| reporter.error(&format!("{:?} error: {e}", e.kind())))
}

fn run(cli: &Cli) -> Result<PathBuf> {
    let config = load_config(cli)?;

    let (log_path, file) = logging::create_log_file(&cli.log_dir)?;
    let subscriber = logging::file_subscriber(file, config.install.trace);

    tracing::subscriber::with_default(subscriber, || install(cli, &config, &log_path))
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{:?}", miette::Report::new(e));
        std::process::exit(1);
    }
}
