//! Configuration file watcher for hot reload.
//!
//! The parent directory is watched rather than the file itself: editors and
//! deploy tools often replace the file by rename, which would silently end a
//! watch on the old inode.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::parse_config;
use crate::config::schema::EdgeConfig;

/// Watches one config file and emits every new valid configuration.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<EdgeConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and a receiver for configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<EdgeConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching in a background thread.
    ///
    /// The returned watcher must be kept alive for events to keep flowing.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let file = self.path.clone();
        let dir = match file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let tx = self.update_tx;
        let last_applied = Mutex::new(std::fs::read_to_string(&file).ok());

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                let event = match res {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::error!(error = %e, "Config watch error");
                        return;
                    }
                };
                if !(event.kind.is_modify() || event.kind.is_create()) || !touches(&event, &file) {
                    return;
                }

                let content = match std::fs::read_to_string(&file) {
                    Ok(content) => content,
                    Err(e) => {
                        tracing::warn!(
                            path = ?file,
                            error = %e,
                            "Config file unreadable, keeping current configuration"
                        );
                        return;
                    }
                };

                // Mid-write truncation; a full write follows.
                if content.trim().is_empty() {
                    return;
                }

                let Ok(mut last) = last_applied.lock() else {
                    return;
                };
                if last.as_deref() == Some(content.as_str()) {
                    return;
                }

                match parse_config(&content) {
                    Ok(config) => {
                        tracing::info!(path = ?file, "Config file changed, reloading");
                        *last = Some(content);
                        let _ = tx.send(config);
                    }
                    Err(e) => {
                        tracing::error!(
                            path = ?file,
                            error = %e,
                            "Invalid config, keeping current configuration"
                        );
                    }
                }
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

fn touches(event: &Event, file: &Path) -> bool {
    let Some(name) = file.file_name() else {
        return false;
    };
    event.paths.iter().any(|p| p.file_name() == Some(name))
}
