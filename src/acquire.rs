//! Acquisition dispatch
//!
//! Picks exactly one of the release archive or the source checkout from
//! `SourceInstall` and runs it. The choice is made once per run.

use std::fmt;
use std::path::PathBuf;

use crate::checkout::checkout_source;
use crate::config::InstallConfig;
use crate::error::Result;
use crate::logging::Reporter;
use crate::release::fetch_release;

/// Progress of one acquisition. `Start` moves through a fetch stage and an
/// unpack stage to `Done`; any error ends the run where it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Downloading,
    Cloning,
    Extracting,
    CheckingOut,
    Done,
}

impl Stage {
    /// Record the transition into this stage in the trace log
    pub fn enter(self, reporter: &Reporter) {
        reporter.trace(&format!("Acquisition stage: {self}"));
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Downloading => "downloading",
            Self::Cloning => "cloning",
            Self::Extracting => "extracting",
            Self::CheckingOut => "checking out",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Acquire the DefectDojo source into `Root/Source`.
///
/// Errors from the chosen acquirer are returned as they are.
pub fn acquire(config: &InstallConfig, reporter: &Reporter) -> Result<PathBuf> {
    Stage::Start.enter(reporter);
    reporter.trace(&format!(
        "Determining if this is a source or release install: SourceInstall is {}",
        config.source_install
    ));

    if config.source_install {
        reporter.trace("Dojo will be installed from source");
        checkout_source(config, reporter)
    } else {
        reporter.trace("Dojo will be installed from a release tarball");
        fetch_release(config, reporter)
    }
}
