//! Departure handling for explicit `leave` frames and transport closes.
//!
//! A student departure removes one membership entry and tells the teacher.
//! A teacher departure tears the room down: every open student is told
//! `teacher-left`, every student session is reset to unjoined, and the room
//! is deleted from the registry.

use std::sync::Arc;

use lectern_proto::{Role, ServerMessage};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::Context;
use crate::state::Room;

/// Explicit `leave` frame. Operates on the room named in the frame; a
/// second leave with an already-cleared role is a no-op.
pub(super) async fn handle(ctx: &Context<'_>, room_name: &str, room: &Arc<RwLock<Room>>) {
    let session = ctx.handle.session();
    match session.role {
        Some(Role::Student) => {
            if let Some(id) = session.identity {
                student_leave(ctx, room, &id).await;
            }
        }
        Some(Role::Teacher) => teacher_leave(ctx, room_name, room).await,
        None => {}
    }
}

/// Transport-level close, routed through the same paths as `leave` using
/// the connection's last known role and room.
pub(super) async fn on_disconnect(ctx: &Context<'_>) {
    let session = ctx.handle.session();

    let Some(room_name) = session.room else {
        ctx.handle.clear_session();
        return;
    };
    // The room may already be gone (teacher departed first); resolving here
    // would recreate it.
    if !ctx.registry.contains(&room_name) {
        ctx.handle.clear_session();
        return;
    }
    let room = ctx.registry.resolve(&room_name);

    match session.role {
        Some(Role::Student) => {
            if let Some(id) = session.identity {
                student_leave(ctx, &room, &id).await;
            }
        }
        Some(Role::Teacher) => teacher_leave(ctx, &room_name, &room).await,
        None => {}
    }

    ctx.handle.clear_session();
    ctx.registry.sweep(&room_name);
}

async fn student_leave(ctx: &Context<'_>, room: &Arc<RwLock<Room>>, id: &str) {
    let mut room = room.write().await;
    if room.remove_student(id).is_some() {
        if let Some(teacher) = room.live_teacher() {
            teacher.send(ServerMessage::StudentLeft { id: id.to_string() });
        }
        debug!(id = %id, "Student left");
    }
    drop(room);

    ctx.handle.clear_session();
}

async fn teacher_leave(ctx: &Context<'_>, room_name: &str, room: &Arc<RwLock<Room>>) {
    let mut guard = room.write().await;
    for (_, student) in guard.drain_students() {
        if student.handle.is_open() {
            student.handle.send(ServerMessage::TeacherLeft);
        }
        // Force students back to the unjoined state; their own close path
        // becomes a no-op afterwards.
        student.handle.clear_session();
    }
    guard.clear_teacher();
    drop(guard);

    ctx.registry.remove(room_name);
    ctx.handle.clear_session();

    info!(room = %room_name, "Teacher left, room closed");
}
