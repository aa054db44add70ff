//! A named session grouping one teacher and any number of students.

use lectern_proto::RosterEntry;

use crate::state::ClientHandle;

/// A student attached to a room.
#[derive(Debug, Clone)]
pub struct Student {
    pub handle: ClientHandle,
    pub name: String,
}

/// Room membership and identity allocation.
///
/// Students are kept in join order; the roster sent to a joining teacher
/// preserves that order. The sequence counter starts at 1 and is never
/// reused within the room's lifetime, even after students leave.
#[derive(Debug)]
pub struct Room {
    teacher: Option<ClientHandle>,
    students: Vec<(String, Student)>,
    next_student_seq: u64,
}

impl Room {
    pub fn new() -> Self {
        Self {
            teacher: None,
            students: Vec::new(),
            next_student_seq: 1,
        }
    }

    /// The teacher handle, if one is attached and its connection is open.
    ///
    /// A dead teacher slot counts as absent, so a new teacher join silently
    /// replaces it.
    pub fn live_teacher(&self) -> Option<&ClientHandle> {
        self.teacher.as_ref().filter(|t| t.is_open())
    }

    /// Attach a teacher, replacing any stale handle.
    pub fn set_teacher(&mut self, handle: ClientHandle) {
        self.teacher = Some(handle);
    }

    /// Detach the teacher slot.
    pub fn clear_teacher(&mut self) {
        self.teacher = None;
    }

    /// Attach a student and allocate its `student<N>` identity.
    pub fn add_student(&mut self, handle: ClientHandle, name: String) -> String {
        let id = format!("student{}", self.next_student_seq);
        self.next_student_seq += 1;
        self.students.push((id.clone(), Student { handle, name }));
        id
    }

    /// Detach a student by identity.
    pub fn remove_student(&mut self, id: &str) -> Option<Student> {
        let pos = self.students.iter().position(|(sid, _)| sid == id)?;
        Some(self.students.remove(pos).1)
    }

    /// Look up a student by identity.
    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students
            .iter()
            .find(|(sid, _)| sid == id)
            .map(|(_, s)| s)
    }

    /// Students in join order.
    pub fn students(&self) -> impl Iterator<Item = (&str, &Student)> {
        self.students.iter().map(|(id, s)| (id.as_str(), s))
    }

    /// Remove and return every student, in join order.
    pub fn drain_students(&mut self) -> Vec<(String, Student)> {
        std::mem::take(&mut self.students)
    }

    /// Roster in join order, as sent to a joining teacher.
    pub fn roster(&self) -> Vec<RosterEntry> {
        self.students
            .iter()
            .map(|(id, s)| RosterEntry {
                id: id.clone(),
                name: s.name.clone(),
            })
            .collect()
    }

    /// True when neither a teacher nor any student is attached.
    pub fn is_vacant(&self) -> bool {
        self.teacher.is_none() && self.students.is_empty()
    }
}

impl Default for Room {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn open_handle() -> (ClientHandle, mpsc::UnboundedReceiver<crate::state::Outbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ClientHandle::new(tx), rx)
    }

    #[test]
    fn student_ids_are_monotonic_and_never_reused() {
        let mut room = Room::new();
        let (h1, _rx1) = open_handle();
        let (h2, _rx2) = open_handle();
        let (h3, _rx3) = open_handle();

        assert_eq!(room.add_student(h1, "Ana".into()), "student1");
        assert_eq!(room.add_student(h2, "Ben".into()), "student2");
        assert!(room.remove_student("student2").is_some());
        // The freed slot is not recycled.
        assert_eq!(room.add_student(h3, "Cem".into()), "student3");
    }

    #[test]
    fn roster_preserves_join_order() {
        let mut room = Room::new();
        let (h1, _rx1) = open_handle();
        let (h2, _rx2) = open_handle();
        room.add_student(h1, "Ana".into());
        room.add_student(h2, "Ben".into());

        let roster = room.roster();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].id, "student1");
        assert_eq!(roster[0].name, "Ana");
        assert_eq!(roster[1].id, "student2");
    }

    #[test]
    fn dead_teacher_slot_counts_as_absent() {
        let mut room = Room::new();
        let (handle, rx) = open_handle();
        room.set_teacher(handle);
        assert!(room.live_teacher().is_some());

        drop(rx);
        assert!(room.live_teacher().is_none());
    }

    #[test]
    fn vacancy_requires_no_teacher_and_no_students() {
        let mut room = Room::new();
        assert!(room.is_vacant());

        let (teacher, _trx) = open_handle();
        room.set_teacher(teacher);
        assert!(!room.is_vacant());

        let (student, _srx) = open_handle();
        room.add_student(student, "Ana".into());
        room.clear_teacher();
        assert!(!room.is_vacant());

        room.remove_student("student1");
        assert!(room.is_vacant());
    }
}
