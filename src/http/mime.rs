use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;

/// Content type used when classification finds nothing better.
pub const DEFAULT_MIME: &str = "text/html";

/// Extension-to-content-type table, built once at startup and shared
/// read-only by every connection task.
///
/// The built-in table covers common web types. An additional map file in
/// `mime.types` format (lines of `type ext ext…`, `#` starts a comment) can
/// extend or override it; a configured map file that cannot be read is a
/// startup failure.
pub struct MimeMap {
    types: HashMap<String, String>,
}

impl MimeMap {
    /// Builds the built-in table.
    pub fn new() -> Self {
        let mut types = HashMap::new();

        let builtin: &[(&str, &str)] = &[
            ("html", "text/html"),
            ("htm", "text/html"),
            ("css", "text/css"),
            ("js", "application/javascript"),
            ("json", "application/json"),
            ("xml", "application/xml"),
            ("txt", "text/plain"),
            ("md", "text/markdown"),
            ("png", "image/png"),
            ("jpg", "image/jpeg"),
            ("jpeg", "image/jpeg"),
            ("gif", "image/gif"),
            ("svg", "image/svg+xml"),
            ("ico", "image/x-icon"),
            ("webp", "image/webp"),
            ("woff", "font/woff"),
            ("woff2", "font/woff2"),
            ("ttf", "font/ttf"),
            ("otf", "font/otf"),
            ("pdf", "application/pdf"),
            ("zip", "application/zip"),
            ("tar", "application/x-tar"),
            ("gz", "application/gzip"),
            ("mp4", "video/mp4"),
            ("webm", "video/webm"),
            ("ogg", "video/ogg"),
            ("mp3", "audio/mpeg"),
            ("wav", "audio/wav"),
        ];

        for (ext, mime) in builtin {
            types.insert((*ext).to_string(), (*mime).to_string());
        }

        MimeMap { types }
    }

    /// Builds the built-in table extended by a `mime.types`-format file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let mut map = Self::new();

        let contents = fs::read_to_string(path)
            .with_context(|| format!("cannot read MIME map {}", path.display()))?;

        for line in contents.lines() {
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            let mut fields = line.split_whitespace();
            let mime = match fields.next() {
                Some(m) => m,
                None => continue,
            };
            for ext in fields {
                map.types.insert(ext.to_lowercase(), mime.to_string());
            }
        }

        Ok(map)
    }

    /// Content type for a resolved file path.
    ///
    /// Falls back to [`DEFAULT_MIME`] when the extension is unknown or the
    /// path has none.
    pub fn classify(&self, path: &Path) -> &str {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.types.get(&ext.to_lowercase()))
            .map(|mime| mime.as_str())
            .unwrap_or(DEFAULT_MIME)
    }
}

impl Default for MimeMap {
    fn default() -> Self {
        Self::new()
    }
}
