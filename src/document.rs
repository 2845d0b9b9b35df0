//! Document lifecycle: new, load, save, save as.
//!
//! A document is the store's graph plus the file it came from and a
//! pending-changes flag. The flag is set by a store subscription, so edits
//! made through any collaborator (editor, another session, a direct
//! `replace`) mark the document dirty.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::DocumentConfig;
use crate::model::GraphData;
use crate::storage::{GraphStore, Subscription};
use crate::{Error, Result};

/// The open document of one application window.
pub struct DocumentSession {
    store: Arc<GraphStore>,
    config: DocumentConfig,
    path: Option<PathBuf>,
    pending: Arc<AtomicBool>,
    _subscription: Subscription,
}

impl DocumentSession {
    /// Open a fresh, empty, unsaved document in `store`.
    pub fn new(store: Arc<GraphStore>, config: DocumentConfig) -> Result<Self> {
        config.validate()?;
        let pending = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&pending);
        let subscription = store.subscribe(move || flag.store(true, Ordering::Release));

        let mut session = Self {
            store,
            config,
            path: None,
            pending,
            _subscription: subscription,
        };
        session.create();
        Ok(session)
    }

    /// Start over with an empty graph and no file.
    ///
    /// Unsaved changes are discarded; check
    /// [`has_pending_changes`](Self::has_pending_changes) first.
    pub fn create(&mut self) {
        self.store.replace(GraphData::new());
        self.path = None;
        self.pending.store(false, Ordering::Release);
    }

    /// Read `path` and make it the current document.
    ///
    /// The file is installed as-is. Contract violations are only logged;
    /// the simulator reports the ones it cannot work with.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let data = GraphData::from_json(&json)?;
        if let Err(e) = data.validate() {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "loaded graph violates the data contract"
            );
        }
        tracing::info!(
            path = %path.display(),
            nodes = data.nodes.len(),
            edges = data.edges.len(),
            "document loaded"
        );

        self.store.replace(data);
        self.path = Some(path.to_path_buf());
        self.pending.store(false, Ordering::Release);
        Ok(())
    }

    /// Write to the current file if anything changed.
    ///
    /// Returns whether a write happened. A document that was never saved has
    /// no file yet: use [`save_as`](Self::save_as).
    pub fn save(&mut self) -> Result<bool> {
        if !self.has_pending_changes() {
            return Ok(false);
        }
        let path = self.path.clone().ok_or(Error::NoDocumentPath)?;
        self.write(&path)?;
        Ok(true)
    }

    /// Write to `path` unconditionally and make it the current file.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.write(path)?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    fn write(&self, path: &Path) -> Result<()> {
        let data = self.store.data();
        std::fs::write(path, data.to_json_pretty()?)?;
        self.pending.store(false, Ordering::Release);
        tracing::info!(path = %path.display(), nodes = data.nodes.len(), "document saved");
        Ok(())
    }

    pub fn has_pending_changes(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn file_name(&self) -> Option<String> {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
    }

    /// Window title: `*` when dirty, then the file name, then the app name.
    pub fn title(&self) -> String {
        format!(
            "{}{} {}",
            if self.has_pending_changes() { "*" } else { "" },
            self.file_name().unwrap_or_default(),
            self.config.app_title
        )
    }

    /// `path` with the configured document extension, unless it already
    /// has one.
    pub fn with_extension(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.extension().is_some() {
            path.to_path_buf()
        } else {
            path.with_extension(&self.config.extension)
        }
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<GraphStore> {
        &self.store
    }
}

impl std::fmt::Debug for DocumentSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentSession")
            .field("path", &self.path)
            .field("pending", &self.has_pending_changes())
            .finish()
    }
}
