//! HTTP request handlers.

pub(crate) mod html;
pub(crate) mod listing;

use std::path::{Component, Path, PathBuf};

use percent_encoding::percent_decode_str;

/// Map a request path onto a file under `root`.
///
/// The path is percent-decoded first. Returns `None` when the decoded path
/// would leave `root` (`..`, absolute or prefixed components) or is not
/// valid UTF-8.
pub(crate) fn resolve_path(root: &Path, uri_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(uri_path).decode_utf8().ok()?;
    if decoded.contains('\0') {
        return None;
    }

    let mut resolved = root.to_path_buf();
    for component in Path::new(decoded.trim_start_matches('/')).components() {
        match component {
            Component::Normal(segment) => resolved.push(segment),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    Some(resolved)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_resolve_simple_file() {
        assert_eq!(
            resolve_path(Path::new("/srv/public"), "/index.html"),
            Some(PathBuf::from("/srv/public/index.html"))
        );
    }

    #[test]
    fn test_resolve_nested_and_decoded() {
        assert_eq!(
            resolve_path(Path::new("/srv/public"), "/css/my%20style.css"),
            Some(PathBuf::from("/srv/public/css/my style.css"))
        );
    }

    #[test]
    fn test_resolve_root() {
        assert_eq!(
            resolve_path(Path::new("/srv/public"), "/"),
            Some(PathBuf::from("/srv/public"))
        );
    }

    #[test]
    fn test_resolve_skips_current_dir() {
        assert_eq!(
            resolve_path(Path::new("/srv/public"), "/./a/./b.html"),
            Some(PathBuf::from("/srv/public/a/b.html"))
        );
    }

    #[test]
    fn test_resolve_rejects_parent_dir() {
        assert_eq!(resolve_path(Path::new("/srv/public"), "/../secret"), None);
        assert_eq!(resolve_path(Path::new("/srv/public"), "/a/../../secret"), None);
    }

    #[test]
    fn test_resolve_rejects_encoded_parent_dir() {
        assert_eq!(resolve_path(Path::new("/srv/public"), "/%2e%2e/secret"), None);
        assert_eq!(resolve_path(Path::new("/srv/public"), "/a/%2E%2E%2F%2E%2E/x"), None);
    }

    #[test]
    fn test_resolve_keeps_encoded_absolute_path_inside_root() {
        assert_eq!(
            resolve_path(Path::new("/srv/public"), "/%2Fetc/passwd"),
            Some(PathBuf::from("/srv/public/etc/passwd"))
        );
    }

    #[test]
    fn test_resolve_rejects_nul_and_invalid_utf8() {
        assert_eq!(resolve_path(Path::new("/srv/public"), "/a%00.html"), None);
        assert_eq!(resolve_path(Path::new("/srv/public"), "/%ff.html"), None);
    }
}
