//! Connection handle used by the router to reach a client.

use std::sync::Arc;

use lectern_proto::{Role, ServerMessage};
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::state::SessionState;

/// An item queued for a connection's writer task.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    /// A protocol frame to deliver.
    Frame(ServerMessage),
    /// Close the connection from the server side.
    Close,
}

/// Handle to one client connection.
///
/// Cloned freely; rooms hold clones of the handles attached to them. Sends
/// are fire-and-forget: a send to a connection whose task has exited is
/// silently dropped, never retried.
#[derive(Debug, Clone)]
pub struct ClientHandle {
    tx: mpsc::UnboundedSender<Outbound>,
    session: Arc<Mutex<SessionState>>,
}

impl ClientHandle {
    /// Wrap the outbound queue of a connection task.
    pub fn new(tx: mpsc::UnboundedSender<Outbound>) -> Self {
        Self {
            tx,
            session: Arc::new(Mutex::new(SessionState::default())),
        }
    }

    /// Queue a frame for delivery. Errors (closed connection) are ignored.
    pub fn send(&self, msg: ServerMessage) {
        let _ = self.tx.send(Outbound::Frame(msg));
    }

    /// Ask the connection task to close the socket.
    pub fn close(&self) {
        let _ = self.tx.send(Outbound::Close);
    }

    /// Whether the connection task is still draining its queue.
    pub fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }

    /// Snapshot of the current session attributes.
    pub fn session(&self) -> SessionState {
        self.session.lock().clone()
    }

    /// Record a successful join.
    pub fn attach(&self, identity: impl Into<String>, role: Role, room: impl Into<String>) {
        self.session.lock().attach(identity, role, room);
    }

    /// Reset the session to the unjoined state.
    pub fn clear_session(&self) {
        self.session.lock().clear();
    }
}
