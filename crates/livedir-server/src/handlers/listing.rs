//! Directory listings for directories without an `index.html`.

use std::fmt::Write as _;
use std::io;
use std::path::Path;

use axum::http::header;
use axum::response::{IntoResponse, Response};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use super::resolve_path;
use crate::error::ServerError;

/// Characters left as-is in listing links: A-Z a-z 0-9 - . _ ~
const LINK_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// One row of a directory listing.
#[derive(Debug, PartialEq, Eq)]
struct ListingEntry {
    name: String,
    is_dir: bool,
}

/// Respond with a listing of the directory at the request path.
///
/// Used as the fallback of the static file service, so it also runs for
/// plain missing files; anything that is not a directory under the root
/// is a 404.
pub(crate) async fn directory_listing(root: &Path, uri_path: &str) -> Response {
    let Some(dir) = resolve_path(root, uri_path) else {
        return ServerError::NotFound(uri_path.to_owned()).into_response();
    };

    match tokio::fs::metadata(&dir).await {
        Ok(metadata) if metadata.is_dir() => {}
        _ => return ServerError::NotFound(uri_path.to_owned()).into_response(),
    }

    match read_entries(&dir).await {
        Ok(entries) => {
            let display_path = percent_decode_str(uri_path).decode_utf8_lossy();
            (
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                render_listing(&display_path, &entries),
            )
                .into_response()
        }
        Err(e) => ServerError::Io(e).into_response(),
    }
}

/// Read directory entries sorted case-insensitively by name.
async fn read_entries(dir: &Path) -> io::Result<Vec<ListingEntry>> {
    let mut entries = Vec::new();
    let mut read_dir = tokio::fs::read_dir(dir).await?;

    while let Some(entry) = read_dir.next_entry().await? {
        let is_dir = entry.file_type().await.is_ok_and(|t| t.is_dir());
        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
        });
    }

    entries.sort_by_cached_key(|e| e.name.to_lowercase());
    Ok(entries)
}

/// Render the listing page.
fn render_listing(display_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", escape_html(display_path));

    let mut html = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{title}</title>");
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<h1>{title}</h1>");
    html.push_str("<hr>\n<ul>\n");

    for entry in entries {
        let suffix = if entry.is_dir { "/" } else { "" };
        let _ = writeln!(
            html,
            "<li><a href=\"{}{suffix}\">{}{suffix}</a></li>",
            utf8_percent_encode(&entry.name, LINK_ENCODE_SET),
            escape_html(&entry.name),
        );
    }

    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
