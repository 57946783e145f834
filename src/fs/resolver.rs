//! Request path resolution
//!
//! Turns the path of a GET request into the thing the response writer
//! serves: a file, a generated listing, a redirect, or nothing.

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;

use crate::config::ServerConfig;
use crate::fs::autoindex;

/// Where a request path leads. Produced once per request, consumed once
/// by the response writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// Serve this regular file
    File(PathBuf),
    /// Serve a generated listing of this directory
    AutoIndex {
        /// The listed directory
        dir: PathBuf,
        /// The rendered HTML page
        listing: String,
    },
    /// Answer 301 with this Location
    Redirect(String),
    /// Answer 404
    NotFound,
}

/// Maps a request path to a [`ResolvedTarget`] under the configured web root.
///
/// Order matters: the path is percent-decoded, then checked for a
/// directory-without-slash redirect on the raw concatenation of root and
/// path, and only then lexically normalized. A directory request (trailing
/// slash) resolves to the index file, or to a generated listing when the
/// index is missing and auto-index is on, or to 404.
pub fn resolve(cfg: &ServerConfig, raw_path: &str) -> ResolvedTarget {
    let decoded = decode_path(raw_path);

    // Redirect check runs before sanitization and index resolution.
    let candidate = format!("{}{}", cfg.root.display(), decoded);
    if !decoded.ends_with('/') && Path::new(&candidate).is_dir() {
        return ResolvedTarget::Redirect(format!("{}/", decoded));
    }

    let path = normalize_path(&cfg.root, &decoded);

    if decoded.ends_with('/') {
        if !path.is_dir() {
            return ResolvedTarget::NotFound;
        }

        let index = path.join(&cfg.index);
        if index.is_file() {
            return ResolvedTarget::File(index);
        }

        if cfg.auto_index {
            return match autoindex::render_listing(&path, &decoded) {
                Ok(listing) => ResolvedTarget::AutoIndex { dir: path, listing },
                Err(_) => ResolvedTarget::NotFound,
            };
        }

        return ResolvedTarget::NotFound;
    }

    if path.is_file() {
        ResolvedTarget::File(path)
    } else {
        ResolvedTarget::NotFound
    }
}

/// Percent-decodes a request path.
///
/// Malformed escape sequences pass through as literal characters; decoded
/// bytes that are not UTF-8 are replaced.
pub fn decode_path(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// Joins a decoded request path onto the web root, resolving `.` and `..`
/// segments lexically.
///
/// `..` pops the previously pushed segment and is ignored at the root, so
/// the result never leaves the web root. On top of the structural pass, any
/// `../` the text still contains (entry names built out of dots, e.g.
/// `....//`) is stripped outright, so no `../` ever reaches the filesystem
/// layer.
pub fn normalize_path(root: &Path, decoded: &str) -> PathBuf {
    let mut out = root.to_path_buf();
    let mut depth = 0usize;

    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if depth > 0 {
                    out.pop();
                    depth -= 1;
                }
            }
            name => {
                out.push(name);
                depth += 1;
            }
        }
    }

    let mut text = out.to_string_lossy().into_owned();
    while let Some(pos) = text.find("../") {
        text.replace_range(pos..pos + 3, "");
    }

    PathBuf::from(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_clamps_at_root() {
        let root = Path::new("/srv/www");
        assert_eq!(
            normalize_path(root, "/../../etc/passwd"),
            PathBuf::from("/srv/www/etc/passwd")
        );
    }

    #[test]
    fn decode_handles_space_escape() {
        assert_eq!(decode_path("/a%20b.txt"), "/a b.txt");
    }
}
