//! Installer configuration (dojoConfig.yml) data structures
//!
//! The file keeps the installer settings under an `Install:` section with
//! PascalCase keys:
//!
//! ```yaml
//! Install:
//!   Root: /opt/dojo
//!   Source: django-DefectDojo
//!   Version: 1.2.3
//!   SourceInstall: false
//! ```
//!
//! Every key is optional; missing keys take the defaults below. The loaded
//! value is never mutated once acquisition starts.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{self, Result};

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "dojoConfig.yml";

/// Where the merged configuration is written after logging is set up
pub const RUNTIME_CONFIG_FILE: &str = "runtime-install-config.yml";

const DEFAULT_RELEASE_URL: &str = "https://github.com/DefectDojo/django-DefectDojo/archive/";
const DEFAULT_CLONE_URL: &str = "https://github.com/DefectDojo/django-DefectDojo.git";
const DEFAULT_PROJECT_NAME: &str = "django-DefectDojo";

/// Top-level configuration file
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DojoConfig {
    #[serde(rename = "Install", default)]
    pub install: InstallConfig,
}

/// Settings consumed by the acquisition core
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct InstallConfig {
    /// Base directory under which the source tree is placed
    pub root: PathBuf,

    /// Name of the final source directory under `root`
    pub source: String,

    /// Release tag, only used for archive installs
    pub version: String,

    /// Clone from git instead of downloading a release archive
    pub source_install: bool,

    /// Exact commit to check out; wins over `source_branch`
    pub source_commit: String,

    /// Branch to check out when no commit is configured
    pub source_branch: String,

    /// Suppress console output
    pub quiet: bool,

    /// Write trace-level lines to the install log
    pub trace: bool,

    /// Base URL release archives are downloaded from
    #[serde(rename = "ReleaseURL")]
    pub release_url: String,

    /// Repository URL used for source installs
    #[serde(rename = "CloneURL")]
    pub clone_url: String,

    /// Prefix of the top-level directory inside release archives
    pub project_name: String,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/opt/dojo"),
            source: "django-DefectDojo".to_string(),
            version: "1.5.4".to_string(),
            source_install: false,
            source_commit: String::new(),
            source_branch: "master".to_string(),
            quiet: false,
            trace: false,
            release_url: DEFAULT_RELEASE_URL.to_string(),
            clone_url: DEFAULT_CLONE_URL.to_string(),
            project_name: DEFAULT_PROJECT_NAME.to_string(),
        }
    }
}

/// True when `value` is one plain path component (no separators, `.` or `..`)
fn is_single_component(value: &str) -> bool {
    let mut components = Path::new(value).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !value.contains(['/', '\\'])
}

impl InstallConfig {
    /// Final location of the source tree, `Root/Source`
    pub fn source_path(&self) -> PathBuf {
        self.root.join(&self.source)
    }

    /// URL of the release archive for the configured version
    pub fn release_archive_url(&self) -> String {
        format!("{}{}.tar.gz", self.release_url, self.version)
    }

    /// Where the downloaded release archive is written
    pub fn release_archive_path(&self) -> PathBuf {
        self.root.join(format!("dojo-v{}.tar.gz", self.version))
    }

    /// Top-level directory a release archive unpacks to
    pub fn extracted_dir(&self) -> PathBuf {
        self.root.join(format!("{}-{}", self.project_name, self.version))
    }

    /// Check the values acquisition relies on.
    ///
    /// Commit/branch selection is left to the checkout itself so that the
    /// error surfaces where the choice is made.
    pub fn validate(&self) -> Result<()> {
        if self.root.as_os_str().is_empty() {
            return Err(error::config::invalid("Install.Root must not be empty"));
        }

        if !is_single_component(&self.source) {
            return Err(error::config::invalid(format!(
                "Install.Source must be a plain directory name, got '{}'",
                self.source
            )));
        }

        if !self.source_install {
            if self.version.trim().is_empty() {
                return Err(error::config::invalid(
                    "Install.Version is required for release installs",
                ));
            }
            // Version ends up in the archive file name and the extracted directory
            if !is_single_component(&self.version) {
                return Err(error::config::invalid(format!(
                    "Install.Version must not contain path separators, got '{}'",
                    self.version
                )));
            }
        }

        Ok(())
    }
}

impl DojoConfig {
    /// Serialize configuration to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(error::config::not_found(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| error::config::parse_failed(path.display().to_string(), e.to_string()))?;

        serde_yaml::from_str(&content)
            .map_err(|e| error::config::parse_failed(path.display().to_string(), e.to_string()))
    }

    /// Write the configuration as YAML
    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = self.to_yaml()?;
        std::fs::write(path, yaml).map_err(|e| error::fs::write_failed(path, e))
    }
}
