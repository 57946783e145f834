//! Generated directory listings

use std::fs;
use std::io;
use std::path::Path;

/// Renders the auto-index page for a directory.
///
/// Every entry becomes a link; directories get a `/` suffix on both the
/// href and the label. `.` and `..` never appear. Entries are sorted by
/// name so the same directory always renders the same page.
pub fn render_listing(dir: &Path, request_path: &str) -> io::Result<String> {
    let mut entries: Vec<(String, bool)> = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        entries.push((name, is_dir));
    }
    entries.sort();

    let mut page = String::new();
    page.push_str("<!doctype html>\r\n  <head>\r\n    <title>");
    page.push_str(request_path);
    page.push_str("</title>\r\n  </head>\r\n  <body>\r\n    <a href=\"..\">&lt;&lt;</a><h2>PATH: ");
    page.push_str(request_path);
    page.push_str("</h2>\r\n");

    for (name, is_dir) in &entries {
        let suffix = if *is_dir { "/" } else { "" };
        page.push_str("    <p><a href=\"");
        page.push_str(name);
        page.push_str(suffix);
        page.push_str("\">");
        page.push_str(name);
        page.push_str(suffix);
        page.push_str("</a></p>\r\n");
    }

    page.push_str("  </body>\r\n</html>");
    Ok(page)
}
