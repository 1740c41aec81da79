//! Request path resolution
//!
//! Maps a decoded request path onto a file beneath the served root. The
//! containment check runs on the lexically normalized path, so `..` segments
//! can never climb above the root regardless of how they were spelled.
//! Symlinks are not resolved before the check; one inside the root is followed
//! wherever it points.

use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::http::mime;

/// Document substituted when a request resolves to a directory
pub const DEFAULT_DOCUMENT: &str = "index.html";

/// A file that is ready to be streamed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFile {
    pub path: PathBuf,
    pub content_type: String,
    pub len: u64,
}

/// Outcome of resolving one request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Path normalizes to somewhere outside the root
    Forbidden,
    /// Nothing servable at that location
    NotFound,
    Found(StaticFile),
}

/// Drop the single leading `/` of a URI path and percent-decode the rest.
///
/// `%2e%2e` decodes to `..` here, before any containment check. On Unix the
/// decoded bytes become the path as-is, so file names that are not UTF-8 stay
/// reachable. Elsewhere a path that does not decode to UTF-8 yields `None`.
pub fn relative_path(uri_path: &str) -> Option<PathBuf> {
    let encoded = uri_path.strip_prefix('/').unwrap_or(uri_path);

    #[cfg(unix)]
    {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let bytes = urlencoding::decode_binary(encoded.as_bytes());
        Some(PathBuf::from(OsStr::from_bytes(&bytes)))
    }

    #[cfg(not(unix))]
    {
        urlencoding::decode(encoded)
            .ok()
            .map(|decoded| PathBuf::from(decoded.into_owned()))
    }
}

/// Join `relative` onto `root` and normalize it.
///
/// Returns `None` when the normalized path is not `root` or a descendant of it.
/// `root` must already be absolute and normalized.
pub fn confine(root: &Path, relative: &Path) -> Option<PathBuf> {
    // An absolute `relative` replaces root here and is caught by the check below
    let joined = root.join(relative);
    let candidate = joined.absolutize().ok()?.into_owned();

    candidate.starts_with(root).then_some(candidate)
}

/// Resolve a decoded, root-relative path to a servable file.
pub async fn resolve(root: &Path, relative: &Path) -> Resolution {
    let Some(mut candidate) = confine(root, relative) else {
        return Resolution::Forbidden;
    };

    if is_dir(&candidate).await {
        candidate.push(DEFAULT_DOCUMENT);
    }

    match fs::metadata(&candidate).await {
        Ok(meta) if !meta.is_dir() => Resolution::Found(StaticFile {
            content_type: mime::content_type_for(&candidate),
            len: meta.len(),
            path: candidate,
        }),
        _ => Resolution::NotFound,
    }
}

async fn is_dir(path: &Path) -> bool {
    fs::metadata(path).await.is_ok_and(|meta| meta.is_dir())
}
