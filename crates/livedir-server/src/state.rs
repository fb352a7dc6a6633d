//! Application state.
//!
//! Shared state for all request handlers.

use std::path::PathBuf;
use std::sync::Arc;

use crate::handlers::html;
use crate::timestamp::ChangeTimestamp;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Directory files are served from.
    pub(crate) root: PathBuf,
    /// Tag inserted before every `</head>` in HTML responses.
    pub(crate) reload_tag: Vec<u8>,
    /// Latest change recorded by the file watcher.
    pub(crate) last_modified: Arc<ChangeTimestamp>,
}

impl AppState {
    /// Create state serving `root` with a reload every `reload_interval` seconds.
    pub(crate) fn new(
        root: PathBuf,
        reload_interval: u32,
        last_modified: Arc<ChangeTimestamp>,
    ) -> Self {
        Self {
            root,
            reload_tag: html::reload_tag(reload_interval),
            last_modified,
        }
    }
}
