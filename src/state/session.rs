//! Per-connection session attributes.

use lectern_proto::Role;

/// The identity, role, and room of one connection.
///
/// All three fields are populated together by a successful join and cleared
/// together on leave or close. Only the session router transitions this
/// state; nothing else mutates it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// `"teacher"` or a generated `student<N>` token; `None` until joined.
    pub identity: Option<String>,
    /// Role established by the join; `None` until joined.
    pub role: Option<Role>,
    /// Room the connection is attached to; `None` until joined.
    pub room: Option<String>,
}

impl SessionState {
    /// Populate the session after a successful join.
    pub fn attach(&mut self, identity: impl Into<String>, role: Role, room: impl Into<String>) {
        self.identity = Some(identity.into());
        self.role = Some(role);
        self.room = Some(room.into());
    }

    /// Reset to the unjoined state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
