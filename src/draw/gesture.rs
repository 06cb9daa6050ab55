//! Ownership of the document-level drag listeners that keep a gesture alive
//! while the pointer is outside the canvas element.

use crate::draw::coords::PointerKind;
use std::rc::Rc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerToken(pub u64);

/// Host hook that registers move/up (or touchmove/touchend) listeners.
pub trait DragListeners {
    fn attach(&self, kind: PointerKind) -> ListenerToken;
    fn detach(&self, token: ListenerToken);
}

/// For hosts that route every pointer event to the engine anyway.
#[derive(Debug, Default)]
pub struct NoopListeners;

impl DragListeners for NoopListeners {
    fn attach(&self, _kind: PointerKind) -> ListenerToken {
        ListenerToken(0)
    }

    fn detach(&self, _token: ListenerToken) {}
}

/// Listener registration held for the duration of one gesture. Dropping the
/// session detaches exactly once.
pub struct GestureSession {
    listeners: Rc<dyn DragListeners>,
    token: ListenerToken,
    kind: PointerKind,
}

impl GestureSession {
    pub fn acquire(listeners: Rc<dyn DragListeners>, kind: PointerKind) -> Self {
        let token = listeners.attach(kind);
        debug!(?kind, token = token.0, "drag listeners attached");
        Self {
            listeners,
            token,
            kind,
        }
    }

    pub fn kind(&self) -> PointerKind {
        self.kind
    }
}

impl Drop for GestureSession {
    fn drop(&mut self) {
        self.listeners.detach(self.token);
        debug!(kind = ?self.kind, token = self.token.0, "drag listeners detached");
    }
}

impl std::fmt::Debug for GestureSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureSession")
            .field("token", &self.token)
            .field("kind", &self.kind)
            .finish()
    }
}
