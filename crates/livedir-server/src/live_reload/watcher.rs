//! Recursive file watcher.
//!
//! Records the time of every file change under the root directory into a
//! shared [`ChangeTimestamp`] and logs the changed path.

use std::path::Path;
use std::sync::Arc;

use notify::event::{CreateKind, RemoveKind};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};

use crate::timestamp::ChangeTimestamp;

/// Capacity of the channel between the notify backend and the event task.
const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Watches a directory tree and records file changes.
///
/// The notify backend delivers events on its own thread; a tokio task
/// consumes them. Dropping the watcher closes the channel, which ends the
/// task.
pub struct FileWatcher {
    watcher: RecommendedWatcher,
    task: JoinHandle<()>,
}

impl FileWatcher {
    /// Start watching `root` recursively.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the watcher cannot be created or `root` cannot be
    /// watched (for example because it does not exist).
    pub fn start(root: &Path, last_modified: Arc<ChangeTimestamp>) -> Result<Self, notify::Error> {
        let (tx, mut rx) = mpsc::channel::<notify::Result<Event>>(EVENT_CHANNEL_CAPACITY);

        // Callback runs on the backend thread, outside the runtime
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let _ = tx.blocking_send(res);
        })?;
        watcher.watch(root, RecursiveMode::Recursive)?;

        let task = tokio::spawn(async move {
            while let Some(res) = rx.recv().await {
                match res {
                    Ok(event) => {
                        record_event(&event, &last_modified);
                    }
                    Err(e) => tracing::warn!(error = %e, "File watcher error"),
                }
            }
            tracing::debug!("File watcher event stream closed");
        });

        tracing::debug!(root = %root.display(), "File watcher started");

        Ok(Self { watcher, task })
    }

    /// Wait until the event task ends.
    ///
    /// The task only ends on its own if the backend goes away or the task
    /// panics, so while the server runs this resolving means live reload is
    /// broken.
    pub async fn finished(&mut self) -> Result<(), JoinError> {
        (&mut self.task).await
    }

    /// Stop watching and wait for the event task to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the event task panicked.
    pub async fn stop(self) -> Result<(), JoinError> {
        let Self { watcher, task } = self;
        drop(watcher);
        task.await
    }
}

/// Record a notify event. Returns the number of file paths recorded.
///
/// Only create, modify and remove events count; access events do not change
/// anything. Directory entries are skipped.
fn record_event(event: &Event, last_modified: &ChangeTimestamp) -> usize {
    if !is_change(&event.kind) {
        return 0;
    }

    let mut recorded = 0;
    for path in &event.paths {
        if is_directory(&event.kind, path) {
            continue;
        }

        last_modified.touch();
        tracing::info!(path = %path.display(), "File changed");
        recorded += 1;
    }
    recorded
}

/// Check whether an event kind describes a change to the tree.
fn is_change(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Any | EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

/// Check whether an event path refers to a directory.
///
/// Removed paths no longer exist on disk, so the event kind is trusted first.
fn is_directory(kind: &EventKind, path: &Path) -> bool {
    matches!(
        kind,
        EventKind::Create(CreateKind::Folder) | EventKind::Remove(RemoveKind::Folder)
    ) || path.is_dir()
}
