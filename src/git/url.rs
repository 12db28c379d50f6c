//! URL normalization for libgit2

use std::borrow::Cow;

/// Rewrite clone URLs libgit2 handles poorly.
///
/// - SCP-style SSH (`git@host:path`) becomes `ssh://git@host/path`
/// - `file://relative` and backslash paths become `file:///...`
///
/// Everything else is returned untouched.
pub fn normalize_clone_url(url: &str) -> Cow<'_, str> {
    if let Some(rest) = url.strip_prefix("git@") {
        return match rest.split_once(':') {
            Some((host, path)) => {
                let path = path.trim_start_matches('/');
                Cow::Owned(format!("ssh://git@{host}/{path}"))
            }
            None => Cow::Borrowed(url),
        };
    }

    if let Some(after) = url.strip_prefix("file://") {
        if after.contains('\\') {
            let path = after.replace('\\', "/");
            return Cow::Owned(format!("file:///{}", path.trim_start_matches('/')));
        }
        if !after.is_empty() && !after.starts_with('/') {
            return Cow::Owned(format!("file:///{after}"));
        }
    }

    Cow::Borrowed(url)
}

/// Local URLs and paths clone without credential callbacks.
pub fn is_local(url: &str) -> bool {
    url.starts_with("file://") || std::path::Path::new(url).is_absolute()
}
