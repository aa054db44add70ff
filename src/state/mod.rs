//! Shared relay state: the room registry, per-room membership, and
//! per-connection session attributes.

mod client;
mod registry;
mod room;
mod session;

pub use client::{ClientHandle, Outbound};
pub use registry::Registry;
pub use room::{Room, Student};
pub use session::SessionState;
