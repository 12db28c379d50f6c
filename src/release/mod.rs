//! Release archive acquisition
//!
//! Downloads `ReleaseURL + Version + ".tar.gz"` to `Root/dojo-v<Version>.tar.gz`,
//! extracts it into `Root` and renames `Root/<ProjectName>-<Version>` to
//! `Root/Source`. `Root/Source` only appears once extraction has finished.

mod download;
mod extract;

use std::path::PathBuf;

use crate::acquire::Stage;
use crate::common::fs;
use crate::config::InstallConfig;
use crate::error::{self, Result};
use crate::logging::Reporter;

pub use download::DOWNLOAD_TIMEOUT;

/// Download and unpack the configured release into `Root/Source`.
pub fn fetch_release(config: &InstallConfig, reporter: &Reporter) -> Result<PathBuf> {
    reporter.status("Downloading the configured release of DefectDojo");

    let url = config.release_archive_url();
    let archive = config.release_archive_path();
    let target = config.source_path();
    reporter.trace(&format!("Release download URL is {url}"));
    reporter.trace(&format!("File path to write tarball is {}", archive.display()));

    fs::ensure_target_free(&target)?;
    fs::create_dir_all(&config.root)?;

    Stage::Downloading.enter(reporter);
    reporter.trace(&format!(
        "HTTP timeout set to {} seconds for release download",
        DOWNLOAD_TIMEOUT.as_secs()
    ));
    let bytes = {
        let spinner = reporter.spinner(format!("Downloading {url}"));
        download::download(&url, &archive, &spinner)?
    };
    reporter.trace(&format!("Wrote {bytes} bytes to {}", archive.display()));

    Stage::Extracting.enter(reporter);
    let entries = extract::extract_tar_gz(&archive, &config.root)?;
    reporter.trace(&format!("Extracted {entries} archive entries into {}", config.root.display()));

    let extracted = config.extracted_dir();
    if !extracted.is_dir() {
        return Err(error::archive::layout_invalid(&extracted));
    }

    reporter.trace("Renaming source directory to the non-versioned name");
    fs::rename(&extracted, &target)?;

    Stage::Done.enter(reporter);
    reporter.status("Successfully downloaded and extracted the DefectDojo release file");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, InstallerError};
    use crate::test_fixtures::release_tarball;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn release_config(root: PathBuf, server: &MockServer) -> InstallConfig {
        InstallConfig {
            root,
            source: "dojo".to_string(),
            version: "1.2.3".to_string(),
            release_url: format!("{}/archive/", server.uri()),
            ..Default::default()
        }
    }

    async fn serve(server: &MockServer, body: Vec<u8>) {
        Mock::given(method("GET"))
            .and(path("/archive/1.2.3.tar.gz"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_fetch_release_renames_to_source() {
        let mock_server = MockServer::start().await;
        serve(
            &mock_server,
            release_tarball("django-DefectDojo-1.2.3", &[("manage.py", "print()")]),
        )
        .await;

        let temp = TempDir::new().unwrap();
        let root = temp.path().join("opt").join("dojo");
        let config = release_config(root.clone(), &mock_server);

        let source = fetch_release(&config, &Reporter::new(true)).unwrap();

        assert_eq!(source, root.join("dojo"));
        assert!(source.join("manage.py").is_file());
        assert!(root.join("dojo-v1.2.3.tar.gz").is_file());
        assert!(!root.join("django-DefectDojo-1.2.3").exists());
    }

    #[tokio::test]
    async fn test_fetch_release_wrong_top_level() {
        let mock_server = MockServer::start().await;
        serve(&mock_server, release_tarball("something-else", &[("a", "b")])).await;

        let temp = TempDir::new().unwrap();
        let config = release_config(temp.path().to_path_buf(), &mock_server);

        let err = fetch_release(&config, &Reporter::new(true)).unwrap_err();

        assert!(matches!(err, InstallerError::ArchiveLayoutInvalid { .. }));
        assert!(!temp.path().join("dojo").exists());
    }

    #[tokio::test]
    async fn test_fetch_release_missing_tag() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let temp = TempDir::new().unwrap();
        let config = release_config(temp.path().to_path_buf(), &mock_server);

        let err = fetch_release(&config, &Reporter::new(true)).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(!temp.path().join("dojo-v1.2.3.tar.gz").exists());
        assert!(!temp.path().join("dojo").exists());
    }

    #[tokio::test]
    async fn test_fetch_release_refuses_existing_source() {
        let mock_server = MockServer::start().await;
        serve(
            &mock_server,
            release_tarball("django-DefectDojo-1.2.3", &[("manage.py", "print()")]),
        )
        .await;

        let temp = TempDir::new().unwrap();
        let existing = temp.path().join("dojo");
        std::fs::create_dir(&existing).unwrap();
        std::fs::write(existing.join("keep.txt"), "mine").unwrap();
        let config = release_config(temp.path().to_path_buf(), &mock_server);

        let err = fetch_release(&config, &Reporter::new(true)).unwrap_err();

        assert!(matches!(err, InstallerError::TargetExists { .. }));
        // Nothing was downloaded
        assert!(mock_server.received_requests().await.unwrap().is_empty());
        assert_eq!(std::fs::read_to_string(existing.join("keep.txt")).unwrap(), "mine");
    }
}
