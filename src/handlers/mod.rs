//! The session router.
//!
//! Interprets inbound frames, validates role preconditions against the
//! room named in the frame, mutates room state, and fans out or relays
//! outbound frames. Every frame that names a room resolves (and may
//! lazily create) that room before dispatch, whatever the sender's join
//! state; a room left vacant by the frame is swept right after.

mod content;
mod join;
mod leave;
mod signal;

pub use join::{ERR_NO_TEACHER, ERR_TEACHER_TAKEN};

use std::sync::Arc;

use lectern_proto::ClientMessage;

use crate::state::{ClientHandle, Registry};

/// Router context for one connection.
pub struct Context<'a> {
    /// Handle to the connection the frame arrived on.
    pub handle: &'a ClientHandle,
    /// The process-wide room registry.
    pub registry: &'a Arc<Registry>,
}

/// Route one inbound frame.
pub async fn dispatch(ctx: &Context<'_>, msg: ClientMessage) {
    let room_name = msg.room().to_owned();
    let room = ctx.registry.resolve(&room_name);

    match msg {
        ClientMessage::Join { payload, .. } => {
            join::handle(ctx, &room_name, &room, payload).await;
        }
        ClientMessage::Offer { payload, to, .. } => {
            signal::offer(ctx, &room, payload, to).await;
        }
        ClientMessage::Answer { payload, .. } => {
            signal::answer(ctx, &room, payload).await;
        }
        ClientMessage::Candidate { payload, to, .. } => {
            signal::candidate(ctx, &room, payload, to).await;
        }
        ClientMessage::Leave { .. } => {
            leave::handle(ctx, &room_name, &room).await;
        }
        ClientMessage::ContentUpdate { payload, .. } => {
            content::handle(ctx, &room, payload).await;
        }
    }

    ctx.registry.sweep(&room_name);
}

/// Transport-level close, treated exactly as a leave for the room the
/// connection last joined.
pub async fn disconnect(ctx: &Context<'_>) {
    leave::on_disconnect(ctx).await;
}
