//! Timetable domain models.
//!
//! Provides the record types held by the entity store and the fixed
//! vocabulary of the weekly grid.
//!
//! # Relationships
//!
//! | Record | Key | References |
//! |--------|-----|------------|
//! | Faculty | `id` | |
//! | Subject | `code` | |
//! | Assignment | `(day, time)` | `faculty_id`, `subject_code` |

mod assignment;
mod faculty;
mod slot;
mod subject;

pub use assignment::Assignment;
pub use faculty::Faculty;
pub use slot::{Day, Slot, TimeSlot, TOTAL_SLOTS};
pub use subject::Subject;
