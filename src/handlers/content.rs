//! Shared-content broadcast from the teacher to every open student.

use std::sync::Arc;

use lectern_proto::{ContentPayload, Role, ServerMessage};
use tokio::sync::RwLock;
use tracing::debug;

use super::Context;
use crate::state::Room;

pub(super) async fn handle(
    ctx: &Context<'_>,
    room: &Arc<RwLock<Room>>,
    payload: Option<ContentPayload>,
) {
    if ctx.handle.session().role != Some(Role::Teacher) {
        return;
    }
    let Some(payload) = payload else { return };

    let room = room.read().await;
    let mut delivered = 0usize;
    for (_, student) in room.students() {
        if student.handle.is_open() {
            student.handle.send(ServerMessage::ContentUpdate {
                payload: payload.clone(),
            });
            delivered += 1;
        }
    }

    debug!(students = delivered, "Content update broadcast");
}
