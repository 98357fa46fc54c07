// src/session.rs
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

/// Liveness of one open editor, shared by everything acting on its behalf.
/// Cloning yields a handle to the same session.
#[derive(Debug, Clone)]
pub struct EditorSession {
    token: CancellationToken,
}

impl EditorSession {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    pub fn is_live(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn close(&self) {
        self.token.cancel();
    }

    /// Resolves once the session is closed; immediately if it already is.
    pub fn closed(&self) -> WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}
