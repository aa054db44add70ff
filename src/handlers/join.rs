//! Join handling: precondition checks, identity assignment, confirmations.

use std::sync::Arc;

use lectern_proto::{JoinPayload, Role, ServerMessage, TEACHER_ID};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::Context;
use crate::state::Room;

/// Sent to a teacher joining a room whose teacher slot is live.
pub const ERR_TEACHER_TAKEN: &str =
    "Room already has a teacher. Please choose a different room name.";

/// Sent to a student joining a room with no live teacher.
pub const ERR_NO_TEACHER: &str = "No active teacher in the room. Please join a different room.";

/// Fallback display name for students that supply none.
const ANONYMOUS: &str = "Anonymous";

pub(super) async fn handle(
    ctx: &Context<'_>,
    room_name: &str,
    room: &Arc<RwLock<Room>>,
    payload: JoinPayload,
) {
    match payload.role {
        Role::Teacher => join_teacher(ctx, room_name, room).await,
        Role::Student => join_student(ctx, room_name, room, payload.name).await,
    }
}

async fn join_teacher(ctx: &Context<'_>, room_name: &str, room: &Arc<RwLock<Room>>) {
    let mut room = room.write().await;

    if room.live_teacher().is_some() {
        debug!(room = %room_name, "Rejected teacher join, slot occupied");
        ctx.handle.send(ServerMessage::Error {
            message: ERR_TEACHER_TAKEN.into(),
        });
        ctx.handle.close();
        return;
    }

    room.set_teacher(ctx.handle.clone());
    ctx.handle.attach(TEACHER_ID, Role::Teacher, room_name);
    ctx.handle.send(ServerMessage::joined_teacher(room.roster()));

    info!(room = %room_name, "Teacher joined");
}

async fn join_student(
    ctx: &Context<'_>,
    room_name: &str,
    room: &Arc<RwLock<Room>>,
    name: Option<String>,
) {
    let mut room = room.write().await;

    let Some(teacher) = room.live_teacher().cloned() else {
        debug!(room = %room_name, "Rejected student join, no live teacher");
        ctx.handle.send(ServerMessage::Error {
            message: ERR_NO_TEACHER.into(),
        });
        ctx.handle.close();
        return;
    };

    let name = name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| ANONYMOUS.to_string());

    let id = room.add_student(ctx.handle.clone(), name.clone());
    ctx.handle.attach(id.clone(), Role::Student, room_name);
    ctx.handle
        .send(ServerMessage::joined_student(id.clone(), name.clone()));
    teacher.send(ServerMessage::StudentJoined {
        id: id.clone(),
        name,
    });

    info!(room = %room_name, id = %id, "Student joined");
}
