//! Entity store.
//!
//! Owns the three timetable collections. Insertion order is kept for
//! display. The store enforces nothing: callers check `contains_*` before
//! inserting and keep the derived counters in step.

use serde::{Deserialize, Serialize};

use crate::models::{Assignment, Faculty, Slot, Subject};

/// The three collections as one persisted unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub faculty: Vec<Faculty>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl Snapshot {
    /// Whether all three collections are empty.
    pub fn is_empty(&self) -> bool {
        self.faculty.is_empty() && self.subjects.is_empty() && self.assignments.is_empty()
    }
}

/// In-memory faculty, subject and assignment records.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    faculty: Vec<Faculty>,
    subjects: Vec<Subject>,
    assignments: Vec<Assignment>,
}

impl EntityStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a snapshot as-is. Run
    /// [`repair`](crate::validation::repair) first if the snapshot is untrusted.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            faculty: snapshot.faculty,
            subjects: snapshot.subjects,
            assignments: snapshot.assignments,
        }
    }

    /// Copies the current state into a snapshot.
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            faculty: self.faculty.clone(),
            subjects: self.subjects.clone(),
            assignments: self.assignments.clone(),
        }
    }

    pub fn into_snapshot(self) -> Snapshot {
        Snapshot {
            faculty: self.faculty,
            subjects: self.subjects,
            assignments: self.assignments,
        }
    }

    // ---- faculty ----

    pub fn faculty(&self) -> &[Faculty] {
        &self.faculty
    }

    pub fn faculty_by_id(&self, id: &str) -> Option<&Faculty> {
        self.faculty.iter().find(|f| f.id == id)
    }

    pub fn faculty_by_id_mut(&mut self, id: &str) -> Option<&mut Faculty> {
        self.faculty.iter_mut().find(|f| f.id == id)
    }

    pub fn contains_faculty(&self, id: &str) -> bool {
        self.faculty_by_id(id).is_some()
    }

    pub fn insert_faculty(&mut self, faculty: Faculty) {
        self.faculty.push(faculty);
    }

    pub fn remove_faculty(&mut self, id: &str) -> Option<Faculty> {
        let idx = self.faculty.iter().position(|f| f.id == id)?;
        Some(self.faculty.remove(idx))
    }

    pub fn faculty_count(&self) -> usize {
        self.faculty.len()
    }

    // ---- subjects ----

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn subject_by_code(&self, code: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.code == code)
    }

    pub fn subject_by_code_mut(&mut self, code: &str) -> Option<&mut Subject> {
        self.subjects.iter_mut().find(|s| s.code == code)
    }

    pub fn contains_subject(&self, code: &str) -> bool {
        self.subject_by_code(code).is_some()
    }

    pub fn insert_subject(&mut self, subject: Subject) {
        self.subjects.push(subject);
    }

    pub fn remove_subject(&mut self, code: &str) -> Option<Subject> {
        let idx = self.subjects.iter().position(|s| s.code == code)?;
        Some(self.subjects.remove(idx))
    }

    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }

    // ---- assignments ----

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn assignment_at(&self, slot: Slot) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.slot() == slot)
    }

    pub fn is_occupied(&self, slot: Slot) -> bool {
        self.assignment_at(slot).is_some()
    }

    /// Appends an assignment. The cell must be free.
    pub fn insert_assignment(&mut self, assignment: Assignment) {
        debug_assert!(!self.is_occupied(assignment.slot()));
        self.assignments.push(assignment);
    }

    pub fn remove_assignment_at(&mut self, slot: Slot) -> Option<Assignment> {
        let idx = self.assignments.iter().position(|a| a.slot() == slot)?;
        Some(self.assignments.remove(idx))
    }

    /// Removes and returns every assignment matching `pred`, keeping the
    /// order of the rest.
    pub fn remove_assignments_where<F>(&mut self, mut pred: F) -> Vec<Assignment>
    where
        F: FnMut(&Assignment) -> bool,
    {
        let (removed, kept): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.assignments).into_iter().partition(|a| pred(a));
        self.assignments = kept;
        removed
    }

    pub fn assignments_for_faculty(&self, faculty_id: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.faculty_id == faculty_id)
            .collect()
    }

    pub fn assignments_for_subject(&self, subject_code: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.subject_code == subject_code)
            .collect()
    }

    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }
}
