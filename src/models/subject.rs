//! Subject model.
//!
//! A subject carries a weekly hour quota. `assigned_hours` counts the grid
//! cells currently teaching it. The quota is checked only when an assignment
//! is created, so lowering `hours_per_week` later can leave a subject
//! over-assigned.

use serde::{Deserialize, Serialize};

/// A taught subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Unique subject code (e.g. "CS101").
    pub code: String,
    /// Display name.
    pub name: String,
    /// Weekly quota: the ceiling on assignments referencing this subject.
    pub hours_per_week: u32,
    /// Number of assignments referencing this subject (derived).
    #[serde(default)]
    pub assigned_hours: u32,
}

impl Subject {
    /// Creates a subject with no assigned hours.
    pub fn new(code: impl Into<String>, hours_per_week: u32) -> Self {
        Self {
            code: code.into(),
            name: String::new(),
            hours_per_week,
            assigned_hours: 0,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the assigned-hours counter. Used when rebuilding state.
    pub fn with_assigned_hours(mut self, hours: u32) -> Self {
        self.assigned_hours = hours;
        self
    }

    /// Whether no further assignment may be created for this subject.
    #[inline]
    pub fn is_at_quota(&self) -> bool {
        self.assigned_hours >= self.hours_per_week
    }

    /// Whether more hours are assigned than the quota allows.
    #[inline]
    pub fn is_over_assigned(&self) -> bool {
        self.assigned_hours > self.hours_per_week
    }

    /// Hours still available under the quota (0 when at or over quota).
    pub fn remaining_hours(&self) -> u32 {
        self.hours_per_week.saturating_sub(self.assigned_hours)
    }

    pub(crate) fn increment_assigned(&mut self) {
        self.assigned_hours += 1;
    }

    /// Floors at zero.
    pub(crate) fn decrement_assigned(&mut self) {
        self.assigned_hours = self.assigned_hours.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_builder() {
        let s = Subject::new("CS101", 3).with_name("Intro to CS");
        assert_eq!(s.code, "CS101");
        assert_eq!(s.name, "Intro to CS");
        assert_eq!(s.hours_per_week, 3);
        assert_eq!(s.assigned_hours, 0);
        assert_eq!(s.remaining_hours(), 3);
        assert!(!s.is_at_quota());
    }

    #[test]
    fn test_quota_states() {
        let full = Subject::new("A", 2).with_assigned_hours(2);
        assert!(full.is_at_quota());
        assert!(!full.is_over_assigned());

        let over = Subject::new("B", 1).with_assigned_hours(3);
        assert!(over.is_at_quota());
        assert!(over.is_over_assigned());
        assert_eq!(over.remaining_hours(), 0);
    }

    #[test]
    fn test_assigned_floor() {
        let mut s = Subject::new("A", 2);
        s.decrement_assigned();
        assert_eq!(s.assigned_hours, 0);
    }

    #[test]
    fn test_camel_case_fields() {
        let s = Subject::new("CS101", 4).with_name("CS");
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["hoursPerWeek"], 4);
        assert_eq!(json["assignedHours"], 0);
    }
}
