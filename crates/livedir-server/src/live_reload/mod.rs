//! Live reload support.
//!
//! Browsers reload through the refresh directive injected into HTML pages;
//! this module tracks when files under the root last changed.

mod watcher;

pub use watcher::FileWatcher;
