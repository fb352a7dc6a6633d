//! HTML pages with an injected reload directive.
//!
//! Every `.html` response gets a `<meta http-equiv="refresh">` tag in front
//! of each `</head>`, so the browser re-requests the page on a fixed
//! interval and picks up edits without a manual reload.

use std::borrow::Cow;
use std::io;

use axum::http::{Method, header};
use axum::response::{IntoResponse, Response};

use super::resolve_path;
use crate::error::ServerError;
use crate::state::AppState;

/// Closing head tag the reload directive is inserted before.
const HEAD_CLOSE: &[u8] = b"</head>";

/// Build the reload directive for an interval in seconds.
pub(crate) fn reload_tag(interval: u32) -> Vec<u8> {
    format!(r#"<meta http-equiv="refresh" content="{interval}">"#).into_bytes()
}

/// Insert `tag` immediately before every `</head>` in `content`.
///
/// Content without `</head>` is returned borrowed and untouched. Matching is
/// byte-exact and case-sensitive, so non-UTF-8 pages pass through intact.
pub(crate) fn inject_reload_tag<'a>(content: &'a [u8], tag: &[u8]) -> Cow<'a, [u8]> {
    let mut injected: Option<Vec<u8>> = None;
    let mut last = 0;

    while let Some(offset) = find_head_close(&content[last..]) {
        let pos = last + offset;
        let out = injected.get_or_insert_with(|| Vec::with_capacity(content.len() + tag.len()));
        out.extend_from_slice(&content[last..pos]);
        out.extend_from_slice(tag);
        out.extend_from_slice(HEAD_CLOSE);
        last = pos + HEAD_CLOSE.len();
    }

    match injected {
        Some(mut out) => {
            out.extend_from_slice(&content[last..]);
            Cow::Owned(out)
        }
        None => Cow::Borrowed(content),
    }
}

fn find_head_close(haystack: &[u8]) -> Option<usize> {
    haystack
        .windows(HEAD_CLOSE.len())
        .position(|window| window == HEAD_CLOSE)
}

/// Serve an `.html` file with the reload directive injected.
pub(crate) async fn serve_html(
    state: &AppState,
    method: &Method,
    uri_path: &str,
) -> Result<Response, ServerError> {
    if *method != Method::GET && *method != Method::HEAD {
        return Err(ServerError::MethodNotAllowed);
    }

    let file_path = resolve_path(&state.root, uri_path)
        .ok_or_else(|| ServerError::NotFound(uri_path.to_owned()))?;

    let content = match tokio::fs::read(&file_path).await {
        Ok(content) => content,
        Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
            return Err(ServerError::NotFound(uri_path.to_owned()));
        }
        Err(e) => return Err(ServerError::Io(e)),
    };

    let body = inject_reload_tag(&content, &state.reload_tag).into_owned();

    tracing::debug!(
        path = %uri_path,
        bytes = body.len(),
        last_change = %state.last_modified.get(),
        "Served HTML with reload directive"
    );

    Ok(([(header::CONTENT_TYPE, "text/html")], body).into_response())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const TAG: &[u8] = br#"<meta http-equiv="refresh" content="1">"#;

    #[test]
    fn test_reload_tag_default_interval() {
        assert_eq!(reload_tag(1), TAG);
    }

    #[test]
    fn test_reload_tag_custom_interval() {
        assert_eq!(
            reload_tag(5),
            br#"<meta http-equiv="refresh" content="5">"#.to_vec()
        );
    }

    #[test]
    fn test_inject_single_head() {
        let page = b"<html><head><title>T</title></head><body>Hi</body></html>";
        let result = inject_reload_tag(page, TAG);
        assert_eq!(
            String::from_utf8_lossy(&result),
            r#"<html><head><title>T</title><meta http-equiv="refresh" content="1"></head><body>Hi</body></html>"#
        );
    }

    #[test]
    fn test_inject_every_head_occurrence() {
        let page = b"<head></head><p>x</p></head>";
        let result = inject_reload_tag(page, TAG);

        assert_eq!(result.len(), page.len() + 2 * TAG.len());
        let expected = [
            b"<head>".as_slice(),
            TAG,
            b"</head><p>x</p>",
            TAG,
            b"</head>",
        ]
        .concat();
        assert_eq!(result.into_owned(), expected);
    }

    #[test]
    fn test_no_head_borrows_unchanged() {
        let page = b"<p>fragment without head</p>";
        let result = inject_reload_tag(page, TAG);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(&*result, page.as_slice());
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let page = b"<HEAD></HEAD>";
        assert_eq!(&*inject_reload_tag(page, TAG), page.as_slice());
    }

    #[test]
    fn test_non_utf8_bytes_preserved() {
        let page = [b"<head>\xff\xfe".as_slice(), b"</head>"].concat();
        let result = inject_reload_tag(&page, TAG);
        assert_eq!(
            result.into_owned(),
            [b"<head>\xff\xfe".as_slice(), TAG, b"</head>"].concat()
        );
    }

    #[test]
    fn test_empty_content() {
        assert!(inject_reload_tag(b"", TAG).is_empty());
    }
}
