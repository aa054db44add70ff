//! Wire protocol for the Lectern classroom relay.
//!
//! Every frame on the wire is a single UTF-8 JSON object tagged by a `type`
//! field. Client frames additionally carry the `room` they address; a frame
//! of known type without a `room` does not parse and is dropped by the
//! server. Peer-negotiation payloads (offer/answer/candidate) are opaque to
//! the relay and round-trip as raw [`serde_json::Value`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The identity assigned to the teacher connection of every room.
///
/// Students receive generated `student<N>` identities instead.
pub const TEACHER_ID: &str = "teacher";

/// Frame parse/encode errors.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The frame was not a known message shape.
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The role a connection claims when joining a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Student,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Teacher => f.write_str("teacher"),
            Self::Student => f.write_str("student"),
        }
    }
}

/// Payload of a `join` frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinPayload {
    /// Requested role.
    pub role: Role,
    /// Display name (students only). Absent or empty means anonymous.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Shared content pushed by the teacher to every student.
///
/// All three fields are forwarded verbatim and never validated. A field the
/// teacher left out is omitted from the broadcast frame; an explicit `null`
/// is kept and re-emitted as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentPayload {
    #[serde(
        rename = "contentType",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub content_type: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub link: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Value>,
}

/// Any value that appears on the wire, `null` included, parses to `Some`;
/// only a field that is absent altogether stays `None`.
fn present<'de, D>(de: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(de).map(Some)
}

/// One `{id, name}` pair in the roster sent to a joining teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: String,
    pub name: String,
}

/// Frames a client may send to the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Attach to a room as teacher or student.
    Join { room: String, payload: JoinPayload },
    /// Teacher-to-student session description, relayed verbatim.
    Offer {
        room: String,
        payload: Value,
        #[serde(default)]
        to: Option<String>,
    },
    /// Student-to-teacher session description, relayed verbatim.
    Answer { room: String, payload: Value },
    /// Network candidate, relayed toward the counterpart role.
    Candidate {
        room: String,
        payload: Value,
        #[serde(default)]
        to: Option<String>,
    },
    /// Detach from the room.
    Leave { room: String },
    /// Teacher broadcast of shared content to every student.
    ContentUpdate {
        room: String,
        #[serde(default)]
        payload: Option<ContentPayload>,
    },
}

impl ClientMessage {
    /// The room this frame addresses.
    pub fn room(&self) -> &str {
        match self {
            Self::Join { room, .. }
            | Self::Offer { room, .. }
            | Self::Answer { room, .. }
            | Self::Candidate { room, .. }
            | Self::Leave { room }
            | Self::ContentUpdate { room, .. } => room,
        }
    }
}

/// Frames the relay sends to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// Join confirmation. Teachers get the current roster; students get
    /// their assigned identity and display name.
    Joined {
        role: Role,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        students: Option<Vec<RosterEntry>>,
    },
    /// Join precondition failure; the connection is closed right after.
    Error { message: String },
    /// Roster delta delivered to the teacher.
    StudentJoined { id: String, name: String },
    /// Roster delta delivered to the teacher.
    StudentLeft { id: String },
    /// The teacher departed and the room is gone.
    TeacherLeft,
    /// Relayed session description, tagged with the sender identity.
    Offer { payload: Value, from: String },
    /// Relayed session description, tagged with the sender identity.
    Answer { payload: Value, from: String },
    /// Relayed network candidate, tagged with the sender identity.
    Candidate { payload: Value, from: String },
    /// Shared content broadcast from the teacher.
    ContentUpdate { payload: ContentPayload },
}

impl ServerMessage {
    /// Join confirmation for a teacher, carrying the roster in join order.
    pub fn joined_teacher(students: Vec<RosterEntry>) -> Self {
        Self::Joined {
            role: Role::Teacher,
            id: None,
            name: None,
            students: Some(students),
        }
    }

    /// Join confirmation for a student.
    pub fn joined_student(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Joined {
            role: Role::Student,
            id: Some(id.into()),
            name: Some(name.into()),
            students: None,
        }
    }
}

/// Parse one inbound text frame.
pub fn parse_frame(text: &str) -> Result<ClientMessage, ProtocolError> {
    Ok(serde_json::from_str(text)?)
}

/// Encode one outbound frame.
pub fn encode_frame(msg: &ServerMessage) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(msg)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_join_teacher() {
        let msg = parse_frame(r#"{"type":"join","room":"algebra","payload":{"role":"teacher"}}"#)
            .expect("valid join");
        assert_eq!(
            msg,
            ClientMessage::Join {
                room: "algebra".into(),
                payload: JoinPayload { role: Role::Teacher, name: None },
            }
        );
    }

    #[test]
    fn parse_join_student_with_name() {
        let msg = parse_frame(
            r#"{"type":"join","room":"algebra","payload":{"role":"student","name":"Ana"}}"#,
        )
        .expect("valid join");
        let ClientMessage::Join { payload, .. } = msg else {
            panic!("expected join");
        };
        assert_eq!(payload.role, Role::Student);
        assert_eq!(payload.name.as_deref(), Some("Ana"));
    }

    #[test]
    fn frame_without_room_is_rejected() {
        assert!(parse_frame(r#"{"type":"leave"}"#).is_err());
        assert!(parse_frame(r#"{"type":"offer","payload":{},"to":"student1"}"#).is_err());
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(parse_frame(r#"{"type":"shout","room":"algebra"}"#).is_err());
        assert!(parse_frame("not json").is_err());
    }

    #[test]
    fn candidate_to_is_optional() {
        let msg = parse_frame(r#"{"type":"candidate","room":"r","payload":{"sdpMid":"0"}}"#)
            .expect("valid candidate");
        let ClientMessage::Candidate { to, payload, .. } = msg else {
            panic!("expected candidate");
        };
        assert!(to.is_none());
        assert_eq!(payload, json!({"sdpMid": "0"}));
    }

    #[test]
    fn joined_teacher_shape() {
        let frame = encode_frame(&ServerMessage::joined_teacher(vec![RosterEntry {
            id: "student1".into(),
            name: "Ana".into(),
        }]))
        .expect("encode");
        let v: Value = serde_json::from_str(&frame).expect("json");
        assert_eq!(v["type"], "joined");
        assert_eq!(v["role"], "teacher");
        assert_eq!(v["students"][0]["id"], "student1");
        // Student-only fields must not leak into the teacher confirmation.
        assert!(v.get("id").is_none());
        assert!(v.get("name").is_none());
    }

    #[test]
    fn joined_student_shape() {
        let frame = encode_frame(&ServerMessage::joined_student("student2", "Anonymous"))
            .expect("encode");
        let v: Value = serde_json::from_str(&frame).expect("json");
        assert_eq!(v["type"], "joined");
        assert_eq!(v["role"], "student");
        assert_eq!(v["id"], "student2");
        assert_eq!(v["name"], "Anonymous");
        assert!(v.get("students").is_none());
    }

    #[test]
    fn teacher_left_is_bare() {
        let frame = encode_frame(&ServerMessage::TeacherLeft).expect("encode");
        assert_eq!(frame, r#"{"type":"teacher-left"}"#);
    }

    #[test]
    fn content_payload_omits_absent_fields() {
        let frame = encode_frame(&ServerMessage::ContentUpdate {
            payload: ContentPayload {
                content_type: Some(json!("notes")),
                link: None,
                notes: Some(json!("Hi")),
            },
        })
        .expect("encode");
        let v: Value = serde_json::from_str(&frame).expect("json");
        assert_eq!(v["type"], "content-update");
        assert_eq!(v["payload"]["contentType"], "notes");
        assert_eq!(v["payload"]["notes"], "Hi");
        assert!(v["payload"].get("link").is_none());
    }

    #[test]
    fn content_update_strips_unknown_payload_fields() {
        let msg = parse_frame(
            r#"{"type":"content-update","room":"r","payload":{"contentType":"link","link":"https://example.com","extra":1}}"#,
        )
        .expect("valid content-update");
        let ClientMessage::ContentUpdate { payload: Some(payload), .. } = msg else {
            panic!("expected content-update with payload");
        };
        assert_eq!(payload.link, Some(json!("https://example.com")));
        assert_eq!(payload.notes, None);
    }

    #[test]
    fn content_payload_keeps_explicit_null() {
        let msg = parse_frame(
            r#"{"type":"content-update","room":"r","payload":{"contentType":null,"notes":"Hi"}}"#,
        )
        .expect("valid content-update");
        let ClientMessage::ContentUpdate { payload: Some(payload), .. } = msg else {
            panic!("expected content-update with payload");
        };
        assert_eq!(payload.content_type, Some(Value::Null));
        assert_eq!(payload.link, None);

        let frame = encode_frame(&ServerMessage::ContentUpdate { payload }).expect("encode");
        let v: Value = serde_json::from_str(&frame).expect("json");
        assert!(v["payload"].get("contentType").is_some_and(Value::is_null));
        assert!(v["payload"].get("link").is_none());
        assert_eq!(v["payload"]["notes"], "Hi");
    }

    #[test]
    fn relayed_offer_is_tagged_with_sender() {
        let frame = encode_frame(&ServerMessage::Offer {
            payload: json!({"sdp": "v=0"}),
            from: TEACHER_ID.into(),
        })
        .expect("encode");
        let v: Value = serde_json::from_str(&frame).expect("json");
        assert_eq!(v["type"], "offer");
        assert_eq!(v["from"], "teacher");
        assert_eq!(v["payload"]["sdp"], "v=0");
    }
}
