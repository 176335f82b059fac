//! Integrity checks for persisted timetable state.
//!
//! A snapshot comes from outside the engine and may be stale or hand-edited.
//! [`validate_snapshot`] reports every problem it finds; [`repair`] returns a
//! snapshot that satisfies the store invariants:
//! - Unique faculty ids, subject codes and (day, time) cells
//! - Every assignment references an existing faculty and subject
//! - `workload` and `assigned_hours` equal the number of referencing assignments
//!
//! Also holds the field checks shared by the engine's operations.

use std::collections::{HashMap, HashSet};

use crate::error::ScheduleError;
use crate::models::{Slot, Subject};
use crate::store::Snapshot;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two records share the same key.
    DuplicateId,
    /// Two assignments occupy the same cell.
    DuplicateSlot,
    /// An assignment references a faculty that doesn't exist.
    InvalidFacultyReference,
    /// An assignment references a subject that doesn't exist.
    InvalidSubjectReference,
    /// A subject has a zero quota.
    InvalidQuota,
    /// A stored counter disagrees with the assignment collection.
    AggregateMismatch,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a snapshot.
///
/// Checks:
/// 1. No duplicate faculty ids or subject codes
/// 2. No subject with a zero quota
/// 3. At most one assignment per cell
/// 4. All assignment references point to existing records
/// 5. Stored workload / assigned hours match the assignment counts
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_snapshot(snapshot: &Snapshot) -> ValidationResult {
    let mut errors = Vec::new();

    let mut faculty_ids = HashSet::new();
    for f in &snapshot.faculty {
        if !faculty_ids.insert(f.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate faculty ID: {}", f.id),
            ));
        }
    }

    let mut subject_codes = HashSet::new();
    for s in &snapshot.subjects {
        if !subject_codes.insert(s.code.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate subject code: {}", s.code),
            ));
        }
        if s.hours_per_week == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidQuota,
                format!("Subject '{}' has zero hours per week", s.code),
            ));
        }
    }

    let mut cells = HashSet::new();
    for a in &snapshot.assignments {
        if !cells.insert(a.slot()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateSlot,
                format!("More than one assignment at {}", a.slot()),
            ));
        }
        if !faculty_ids.contains(a.faculty_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidFacultyReference,
                format!(
                    "Assignment at {} references unknown faculty '{}'",
                    a.slot(),
                    a.faculty_id
                ),
            ));
        }
        if !subject_codes.contains(a.subject_code.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSubjectReference,
                format!(
                    "Assignment at {} references unknown subject '{}'",
                    a.slot(),
                    a.subject_code
                ),
            ));
        }
    }

    let (workloads, hours) = reference_counts(snapshot);
    for f in &snapshot.faculty {
        let actual = workloads.get(f.id.as_str()).copied().unwrap_or(0);
        if f.workload != actual {
            errors.push(ValidationError::new(
                ValidationErrorKind::AggregateMismatch,
                format!(
                    "Faculty '{}' workload is {} but {} assignments reference it",
                    f.id, f.workload, actual
                ),
            ));
        }
    }
    for s in &snapshot.subjects {
        let actual = hours.get(s.code.as_str()).copied().unwrap_or(0);
        if s.assigned_hours != actual {
            errors.push(ValidationError::new(
                ValidationErrorKind::AggregateMismatch,
                format!(
                    "Subject '{}' assigned hours is {} but {} assignments reference it",
                    s.code, s.assigned_hours, actual
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Returns a snapshot that passes [`validate_snapshot`] (zero-quota subjects
/// aside, which are kept but can never be assigned).
///
/// Keeps the first record for each duplicate key and the first assignment
/// for each cell, drops assignments with dangling references, then
/// recomputes every counter from the surviving assignments. Record order is
/// otherwise preserved.
pub fn repair(snapshot: Snapshot) -> Snapshot {
    let Snapshot {
        faculty,
        subjects,
        assignments,
    } = snapshot;

    let mut seen = HashSet::new();
    let mut faculty: Vec<_> = faculty
        .into_iter()
        .filter(|f| seen.insert(f.id.clone()))
        .collect();

    let mut seen = HashSet::new();
    let mut subjects: Vec<_> = subjects
        .into_iter()
        .filter(|s| seen.insert(s.code.clone()))
        .collect();

    let faculty_ids: HashSet<String> = faculty.iter().map(|f| f.id.clone()).collect();
    let subject_codes: HashSet<String> = subjects.iter().map(|s| s.code.clone()).collect();
    let mut cells: HashSet<Slot> = HashSet::new();
    let assignments: Vec<_> = assignments
        .into_iter()
        .filter(|a| {
            faculty_ids.contains(&a.faculty_id)
                && subject_codes.contains(&a.subject_code)
                && cells.insert(a.slot())
        })
        .collect();

    let mut repaired = Snapshot {
        faculty: Vec::new(),
        subjects: Vec::new(),
        assignments,
    };
    let (workloads, hours) = reference_counts(&repaired);
    for f in &mut faculty {
        f.workload = workloads.get(f.id.as_str()).copied().unwrap_or(0);
    }
    for s in &mut subjects {
        s.assigned_hours = hours.get(s.code.as_str()).copied().unwrap_or(0);
    }
    repaired.faculty = faculty;
    repaired.subjects = subjects;
    repaired
}

/// Counts assignments per faculty id and per subject code.
fn reference_counts(snapshot: &Snapshot) -> (HashMap<&str, u32>, HashMap<&str, u32>) {
    let mut workloads: HashMap<&str, u32> = HashMap::new();
    let mut hours: HashMap<&str, u32> = HashMap::new();
    for a in &snapshot.assignments {
        *workloads.entry(a.faculty_id.as_str()).or_insert(0) += 1;
        *hours.entry(a.subject_code.as_str()).or_insert(0) += 1;
    }
    (workloads, hours)
}

/// Trims a required text field, rejecting it if empty.
pub(crate) fn required(field: &'static str, value: &str) -> Result<String, ScheduleError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ScheduleError::empty_field(field))
    } else {
        Ok(value.to_string())
    }
}

/// Checks a weekly quota: a positive integer that fits a `u32`.
pub fn check_quota(hours_per_week: i64) -> Result<u32, ScheduleError> {
    if hours_per_week <= 0 {
        return Err(ScheduleError::InvalidQuota {
            value: hours_per_week.to_string(),
        });
    }
    u32::try_from(hours_per_week).map_err(|_| ScheduleError::InvalidQuota {
        value: hours_per_week.to_string(),
    })
}

/// Parses a quota typed as text. Non-integers are `InvalidQuota`.
pub fn parse_quota(raw: &str) -> Result<u32, ScheduleError> {
    let raw = raw.trim();
    let value: i64 = raw.parse().map_err(|_| ScheduleError::InvalidQuota {
        value: raw.to_string(),
    })?;
    check_quota(value)
}

/// Rejects a new assignment for a subject already at its quota.
pub(crate) fn check_capacity(subject: &Subject) -> Result<(), ScheduleError> {
    if subject.is_at_quota() {
        Err(ScheduleError::QuotaExceeded {
            code: subject.code.clone(),
            name: subject.name.clone(),
            hours_per_week: subject.hours_per_week,
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::{Assignment, Day, Faculty, Subject, TimeSlot};

    fn at(day: Day, time: TimeSlot, faculty: &str, subject: &str) -> Assignment {
        Assignment::new(Slot::new(day, time), faculty, subject, "R1")
    }

    fn sample_snapshot() -> Snapshot {
        Snapshot {
            faculty: vec![
                Faculty::new("F1").with_name("Dr. Lee").with_workload(2),
                Faculty::new("F2").with_name("Dr. Kim").with_workload(1),
            ],
            subjects: vec![
                Subject::new("CS101", 3).with_assigned_hours(2),
                Subject::new("MATH1", 2).with_assigned_hours(1),
            ],
            assignments: vec![
                at(Day::Monday, TimeSlot::NineToTen, "F1", "CS101"),
                at(Day::Monday, TimeSlot::TenToEleven, "F2", "MATH1"),
                at(Day::Tuesday, TimeSlot::NineToTen, "F1", "CS101"),
            ],
        }
    }

    #[test]
    fn test_valid_snapshot() {
        assert!(validate_snapshot(&sample_snapshot()).is_ok());
        assert!(validate_snapshot(&Snapshot::default()).is_ok());
    }

    #[test]
    fn test_duplicate_faculty_id() {
        let mut snap = sample_snapshot();
        snap.faculty.push(Faculty::new("F1"));
        let errors = validate_snapshot(&snap).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("faculty")));
    }

    #[test]
    fn test_duplicate_slot() {
        let mut snap = sample_snapshot();
        snap.assignments
            .push(at(Day::Monday, TimeSlot::NineToTen, "F2", "MATH1"));
        let errors = validate_snapshot(&snap).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateSlot));
    }

    #[test]
    fn test_dangling_references() {
        let mut snap = sample_snapshot();
        snap.assignments
            .push(at(Day::Friday, TimeSlot::TwoToThree, "GHOST", "NOPE"));
        let errors = validate_snapshot(&snap).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidFacultyReference));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidSubjectReference));
    }

    #[test]
    fn test_aggregate_mismatch() {
        let mut snap = sample_snapshot();
        snap.faculty[0].workload = 7;
        let errors = validate_snapshot(&snap).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::AggregateMismatch);
    }

    #[test]
    fn test_zero_quota_reported() {
        let mut snap = sample_snapshot();
        snap.subjects.push(Subject::new("EMPTY", 0));
        let errors = validate_snapshot(&snap).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidQuota));
    }

    #[test]
    fn test_repair_restores_invariants() {
        let mut snap = sample_snapshot();
        snap.faculty.push(Faculty::new("F1").with_name("Impostor"));
        snap.subjects[1].assigned_hours = 9;
        snap.assignments
            .push(at(Day::Monday, TimeSlot::NineToTen, "F2", "MATH1"));
        snap.assignments
            .push(at(Day::Friday, TimeSlot::TwoToThree, "GHOST", "CS101"));

        let repaired = repair(snap);
        assert!(validate_snapshot(&repaired).is_ok());
        assert_eq!(repaired.faculty.len(), 2);
        assert_eq!(repaired.faculty[0].name, "Dr. Lee");
        assert_eq!(repaired.assignments.len(), 3);
        assert_eq!(repaired.subjects[1].assigned_hours, 1);
        assert_eq!(repaired.faculty[1].workload, 1);
    }

    #[test]
    fn test_repair_keeps_over_assignment() {
        let mut snap = sample_snapshot();
        snap.subjects[0].hours_per_week = 1;
        let repaired = repair(snap);
        assert_eq!(repaired.subjects[0].assigned_hours, 2);
        assert!(repaired.subjects[0].is_over_assigned());
    }

    #[test]
    fn test_parse_quota() {
        assert_eq!(parse_quota(" 4 ").unwrap(), 4);
        assert_eq!(parse_quota("0").unwrap_err().kind(), ErrorKind::InvalidQuota);
        assert_eq!(parse_quota("-2").unwrap_err().kind(), ErrorKind::InvalidQuota);
        assert_eq!(parse_quota("2.5").unwrap_err().kind(), ErrorKind::InvalidQuota);
        assert_eq!(parse_quota("abc").unwrap_err().kind(), ErrorKind::InvalidQuota);
        assert_eq!(
            check_quota(i64::from(u32::MAX) + 1).unwrap_err().kind(),
            ErrorKind::InvalidQuota
        );
    }

    #[test]
    fn test_required_trims() {
        assert_eq!(required("name", "  Dr. Lee ").unwrap(), "Dr. Lee");
        assert_eq!(
            required("name", "   ").unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
    }
}
