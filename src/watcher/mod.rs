//! Re-render on save.
//!
//! Uses notify to watch the document's parent directory and reports a
//! change once events for the document have been quiet for a debounce
//! interval. Editors often save through a temporary file plus rename, so
//! directory-level events count as well.
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

/// Debounce used by `--watch`.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(150);

/// Watches one markdown document.
pub struct DocumentWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    watch_root: PathBuf,
    document: PathBuf,
    document_name: Option<OsString>,
    debounce: Duration,
    pending_since: Option<Instant>,
}

impl DocumentWatcher {
    /// Start watching `path`.
    ///
    /// # Errors
    /// Returns an error if the watcher cannot be created or the parent
    /// directory cannot be watched.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> notify::Result<Self> {
        // OS events carry canonical paths.
        let document = path
            .as_ref()
            .canonicalize()
            .unwrap_or_else(|_| path.as_ref().to_path_buf());
        let document_name = document.file_name().map(std::ffi::OsStr::to_os_string);
        let watch_root = watch_root_for(&document);

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&watch_root, RecursiveMode::NonRecursive)?;
        tracing::debug!(root = %watch_root.display(), "watching for changes");

        Ok(Self {
            _watcher: watcher,
            rx,
            watch_root,
            document,
            document_name,
            debounce,
            pending_since: None,
        })
    }

    pub fn document(&self) -> &Path {
        &self.document
    }

    /// Block until a debounced change is ready.
    ///
    /// Returns `false` if the event channel closed.
    pub fn wait_for_change(&mut self) -> bool {
        loop {
            let timeout = self
                .pending_since
                .map_or(Duration::from_secs(3600), |since| {
                    self.debounce.saturating_sub(since.elapsed())
                });
            match self.rx.recv_timeout(timeout) {
                Ok(event) => self.note(event),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return false,
            }
            if self.take_change_ready() {
                return true;
            }
        }
    }

    /// Drain pending events; true once a debounced change is ready.
    pub fn take_change_ready(&mut self) -> bool {
        while let Ok(event) = self.rx.try_recv() {
            self.note(event);
        }

        let Some(pending_since) = self.pending_since else {
            return false;
        };
        if pending_since.elapsed() >= self.debounce {
            self.pending_since = None;
            return true;
        }
        false
    }

    fn note(&mut self, event: notify::Result<Event>) {
        match event {
            Ok(ev) if self.is_relevant(&ev) => {
                crate::perf::log_event("watcher.change", format!("kind={:?}", ev.kind));
                self.pending_since = Some(Instant::now());
            }
            Ok(ev) => {
                crate::perf::log_event(
                    "watcher.irrelevant",
                    format!("kind={:?} paths={:?}", ev.kind, ev.paths),
                );
            }
            Err(err) => {
                tracing::warn!(%err, "file watcher error");
                crate::perf::log_event("watcher.error", format!("{err}"));
            }
        }
    }

    fn is_relevant(&self, event: &Event) -> bool {
        event.paths.iter().any(|path| {
            path == &self.watch_root
                || path == &self.document
                || self
                    .document_name
                    .as_ref()
                    .is_some_and(|name| path.file_name().is_some_and(|f| f == name))
        })
    }
}

fn watch_root_for(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
