//! Host Document
//!
//! Models the page the gate runs in: its readiness, its renderable
//! content, and the one-way halt that the block action triggers.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

/// Document readiness, in the order a page moves through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

impl std::fmt::Display for ReadyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadyState::Loading => write!(f, "loading"),
            ReadyState::Interactive => write!(f, "interactive"),
            ReadyState::Complete => write!(f, "complete"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("document has been halted")]
    Halted,
}

/// The page hosting the gate.
///
/// Once [`Document::stop`] has been called the document is frozen:
/// writes and resource loads are refused for the rest of its lifetime.
pub struct Document {
    ready_tx: watch::Sender<ReadyState>,
    content: RwLock<String>,
    resources: RwLock<Vec<String>>,
    halted: AtomicBool,
}

impl Document {
    pub fn new(state: ReadyState, content: impl Into<String>) -> Self {
        let (ready_tx, _) = watch::channel(state);
        Self {
            ready_tx,
            content: RwLock::new(content.into()),
            resources: RwLock::new(Vec::new()),
            halted: AtomicBool::new(false),
        }
    }

    pub fn ready_state(&self) -> ReadyState {
        *self.ready_tx.borrow()
    }

    /// Advance the ready state. Readiness never moves backwards.
    pub fn set_ready_state(&self, state: ReadyState) {
        self.ready_tx.send_if_modified(|current| {
            if state > *current {
                tracing::trace!("document ready state {} -> {}", current, state);
                *current = state;
                true
            } else {
                false
            }
        });
    }

    /// Wait until the document is no longer loading.
    pub async fn wait_until_ready(&self) {
        let mut rx = self.ready_tx.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = rx.wait_for(|state| *state != ReadyState::Loading).await;
    }

    pub fn content(&self) -> String {
        self.content.read().clone()
    }

    /// Replace the whole renderable content.
    pub fn replace_content(&self, html: impl Into<String>) -> Result<(), DocumentError> {
        self.ensure_running()?;
        *self.content.write() = html.into();
        Ok(())
    }

    /// Append to the renderable content, as a running page script would.
    pub fn append(&self, html: &str) -> Result<(), DocumentError> {
        self.ensure_running()?;
        self.content.write().push_str(html);
        Ok(())
    }

    /// Start loading a sub-resource.
    pub fn load_resource(&self, url: &str) -> Result<(), DocumentError> {
        self.ensure_running()?;
        self.resources.write().push(url.to_string());
        Ok(())
    }

    pub fn loaded_resources(&self) -> Vec<String> {
        self.resources.read().clone()
    }

    /// Halt all further activity. Irreversible and idempotent.
    pub fn stop(&self) {
        if !self.halted.swap(true, Ordering::SeqCst) {
            tracing::debug!("document halted");
        }
    }

    pub fn is_halted(&self) -> bool {
        self.halted.load(Ordering::SeqCst)
    }

    fn ensure_running(&self) -> Result<(), DocumentError> {
        if self.is_halted() {
            Err(DocumentError::Halted)
        } else {
            Ok(())
        }
    }
}
