//! Assignment model.
//!
//! An assignment occupies one grid cell, placing a faculty member and a
//! subject in a room. References to faculty and subject are plain keys;
//! referential integrity is kept by the engine's cascades.

use serde::{Deserialize, Serialize};

use super::{Day, Slot, TimeSlot};

/// A faculty-subject-room placement at one (day, time) cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub day: Day,
    pub time: TimeSlot,
    /// Referenced faculty id.
    pub faculty_id: String,
    /// Referenced subject code.
    pub subject_code: String,
    pub room: String,
}

impl Assignment {
    /// Creates an assignment at the given cell.
    pub fn new(
        slot: Slot,
        faculty_id: impl Into<String>,
        subject_code: impl Into<String>,
        room: impl Into<String>,
    ) -> Self {
        Self {
            day: slot.day,
            time: slot.time,
            faculty_id: faculty_id.into(),
            subject_code: subject_code.into(),
            room: room.into(),
        }
    }

    /// The cell this assignment occupies.
    #[inline]
    pub fn slot(&self) -> Slot {
        Slot::new(self.day, self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_slot() {
        let slot = Slot::new(Day::Tuesday, TimeSlot::TwoToThree);
        let a = Assignment::new(slot, "F1", "CS101", "R1");
        assert_eq!(a.slot(), slot);
        assert_eq!(a.faculty_id, "F1");
        assert_eq!(a.subject_code, "CS101");
        assert_eq!(a.room, "R1");
    }

    #[test]
    fn test_ignores_denormalized_names() {
        let json = r#"{
            "day": "Monday",
            "time": "9-10",
            "facultyId": "F1",
            "facultyName": "Dr. Lee",
            "subjectCode": "CS101",
            "subjectName": "Intro",
            "room": "R1"
        }"#;
        let a: Assignment = serde_json::from_str(json).unwrap();
        assert_eq!(a.slot(), Slot::new(Day::Monday, TimeSlot::NineToTen));
        assert_eq!(a.faculty_id, "F1");
    }
}
