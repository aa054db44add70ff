//! Peer-negotiation relay: offer, answer, candidate.
//!
//! Payloads pass through verbatim; the relay only checks the sender's role
//! and the target's liveness. Any miss is silently dropped, never surfaced
//! to the sender.

use std::sync::Arc;

use lectern_proto::{Role, ServerMessage, TEACHER_ID};
use serde_json::Value;
use tokio::sync::RwLock;

use super::Context;
use crate::state::Room;

/// Teacher-to-student session description.
pub(super) async fn offer(
    ctx: &Context<'_>,
    room: &Arc<RwLock<Room>>,
    payload: Value,
    to: Option<String>,
) {
    if ctx.handle.session().role != Some(Role::Teacher) {
        return;
    }
    let Some(to) = to else { return };

    let room = room.read().await;
    if let Some(student) = room.student(&to) {
        if student.handle.is_open() {
            student.handle.send(ServerMessage::Offer {
                payload,
                from: TEACHER_ID.into(),
            });
        }
    }
}

/// Student-to-teacher session description, tagged with the student identity.
pub(super) async fn answer(ctx: &Context<'_>, room: &Arc<RwLock<Room>>, payload: Value) {
    let session = ctx.handle.session();
    if session.role != Some(Role::Student) {
        return;
    }
    let Some(from) = session.identity else { return };

    let room = room.read().await;
    if let Some(teacher) = room.live_teacher() {
        teacher.send(ServerMessage::Answer { payload, from });
    }
}

/// Network candidate. Teachers address a named student; students always
/// address the teacher.
pub(super) async fn candidate(
    ctx: &Context<'_>,
    room: &Arc<RwLock<Room>>,
    payload: Value,
    to: Option<String>,
) {
    let session = ctx.handle.session();
    match session.role {
        Some(Role::Teacher) => {
            let Some(to) = to else { return };
            let room = room.read().await;
            if let Some(student) = room.student(&to) {
                if student.handle.is_open() {
                    student.handle.send(ServerMessage::Candidate {
                        payload,
                        from: TEACHER_ID.into(),
                    });
                }
            }
        }
        Some(Role::Student) => {
            let Some(from) = session.identity else { return };
            let room = room.read().await;
            if let Some(teacher) = room.live_teacher() {
                teacher.send(ServerMessage::Candidate { payload, from });
            }
        }
        None => {}
    }
}
