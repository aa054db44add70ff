//! lecternd - classroom session relay.
//!
//! One teacher connection per named room broadcasts shared content to any
//! number of students and exchanges peer-negotiation frames with them
//! individually. The relay never inspects negotiation payloads; it routes
//! by role and target, best-effort, with no buffering or retries.

pub mod config;
pub mod handlers;
pub mod network;
pub mod state;
