//! Release archive download over HTTP(S)

use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

use tempfile::NamedTempFile;

use crate::error::{self, Result};
use crate::progress::Spinner;

/// Overall deadline for one archive request, connect through last byte
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(20);

/// Download `url` to `dest`, returning the number of bytes written.
///
/// The body is streamed into a temporary file next to `dest` and only
/// renamed into place once complete, so a failed download leaves nothing
/// at `dest`.
pub fn download(url: &str, dest: &Path, spinner: &Spinner) -> Result<u64> {
    let agent = ureq::AgentBuilder::new().timeout(DOWNLOAD_TIMEOUT).build();

    let response = agent.get(url).call().map_err(|e| match e {
        ureq::Error::Status(code, _) => error::network::bad_status(url, code),
        ureq::Error::Transport(t) => error::network::request_failed(url, t.to_string()),
    })?;

    let status = response.status();
    if !(200..300).contains(&status) {
        return Err(error::network::bad_status(url, status));
    }

    if let Some(len) = response
        .header("content-length")
        .and_then(|s| s.parse().ok())
    {
        spinner.set_length(len);
    }

    let dir = dest.parent().unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir).map_err(|e| error::fs::create_failed(dest, e))?;

    let mut reader = response.into_reader();
    let mut buffer = [0u8; 8192];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| error::network::request_failed(url, e.to_string()))?;

        if bytes_read == 0 {
            break;
        }

        file.write_all(&buffer[..bytes_read])
            .map_err(|e| error::fs::write_failed(dest, e))?;

        total_bytes += bytes_read as u64;
        spinner.set_position(total_bytes);
    }

    file.flush().map_err(|e| error::fs::write_failed(dest, e))?;
    file.persist(dest)
        .map_err(|e| error::fs::write_failed(dest, e.error))?;

    Ok(total_bytes)
}
