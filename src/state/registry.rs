//! Process-wide room registry.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::RwLock;

use crate::state::Room;

/// Mapping from room name to room.
///
/// Rooms are created lazily on first reference and removed when the teacher
/// departs or when a sweep finds them vacant. Nothing else creates or
/// deletes entries; handlers go through [`Registry::resolve`] for every
/// message that names a room. Updates to different rooms never contend:
/// each room serializes its own mutations behind its `RwLock`.
#[derive(Debug, Default)]
pub struct Registry {
    rooms: DashMap<String, Arc<RwLock<Room>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The existing room, or a freshly created empty one. Never fails.
    pub fn resolve(&self, name: &str) -> Arc<RwLock<Room>> {
        self.rooms.entry(name.to_owned()).or_default().clone()
    }

    /// Delete the entry if present. Idempotent.
    pub fn remove(&self, name: &str) {
        self.rooms.remove(name);
    }

    /// Whether a room is currently registered.
    pub fn contains(&self, name: &str) -> bool {
        self.rooms.contains_key(name)
    }

    /// Drop the room if it holds neither a teacher nor students.
    ///
    /// Rooms created as a side effect of stray non-join traffic are
    /// collected here, right after the message that created them was
    /// handled. A room whose lock is held is left alone; the next sweep
    /// will see its final membership.
    pub fn sweep(&self, name: &str) {
        self.rooms.remove_if(name, |_, room| {
            room.try_read().map(|r| r.is_vacant()).unwrap_or(false)
        });
    }
}
