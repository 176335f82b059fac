//! Faculty model.
//!
//! A faculty member teaches assigned classes. `workload` counts the grid
//! cells currently assigned to this member and is maintained only by the
//! scheduling engine.

use serde::{Deserialize, Serialize};

/// A faculty member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    /// Unique, user-supplied identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Department name.
    pub department: String,
    /// Number of assignments referencing this faculty (derived).
    #[serde(default)]
    pub workload: u32,
}

impl Faculty {
    /// Creates a faculty member with zero workload.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            department: String::new(),
            workload: 0,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Sets the workload counter. Used when rebuilding state.
    pub fn with_workload(mut self, workload: u32) -> Self {
        self.workload = workload;
        self
    }

    pub(crate) fn increment_workload(&mut self) {
        self.workload += 1;
    }

    /// Floors at zero.
    pub(crate) fn decrement_workload(&mut self) {
        self.workload = self.workload.saturating_sub(1);
    }
}
