//! Timetable statistics and read-only views.
//!
//! Everything here is recomputed from the store on each call; nothing is
//! cached and nothing mutates.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Filled slots | Number of assignments (at most 30) |
//! | Fill ratio | Filled slots / 30 |
//! | Required hours | Sum of `hours_per_week` over subjects |
//! | Assigned hours | Sum of `assigned_hours` over subjects |
//! | Workload | Per faculty, in faculty order |

use crate::models::{Slot, Subject, TOTAL_SLOTS};
use crate::store::EntityStore;

/// Number of occupied grid cells.
pub fn filled_slot_count(store: &EntityStore) -> usize {
    store.assignment_count()
}

/// Sum of every subject's weekly quota.
pub fn total_required_hours(store: &EntityStore) -> u64 {
    store
        .subjects()
        .iter()
        .map(|s| u64::from(s.hours_per_week))
        .sum()
}

/// Sum of every subject's assigned hours.
pub fn total_assigned_hours(store: &EntityStore) -> u64 {
    store
        .subjects()
        .iter()
        .map(|s| u64::from(s.assigned_hours))
        .sum()
}

/// One faculty member's weekly load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadRow {
    pub name: String,
    pub department: String,
    /// Assigned hours per week.
    pub workload: u32,
}

/// One row per faculty member, in faculty order.
pub fn workload_report(store: &EntityStore) -> Vec<WorkloadRow> {
    store
        .faculty()
        .iter()
        .map(|f| WorkloadRow {
            name: f.name.clone(),
            department: f.department.clone(),
            workload: f.workload,
        })
        .collect()
}

/// Dashboard summary.
#[derive(Debug, Clone)]
pub struct DashboardStats {
    pub faculty_count: usize,
    pub subject_count: usize,
    pub filled_slots: usize,
    pub total_slots: usize,
    /// Filled / total slots (0.0..=1.0).
    pub fill_ratio: f64,
    pub required_hours: u64,
    pub assigned_hours: u64,
    pub workloads: Vec<WorkloadRow>,
}

impl DashboardStats {
    /// Computes the dashboard from current store state.
    pub fn calculate(store: &EntityStore) -> Self {
        let filled_slots = filled_slot_count(store);
        Self {
            faculty_count: store.faculty_count(),
            subject_count: store.subject_count(),
            filled_slots,
            total_slots: TOTAL_SLOTS,
            fill_ratio: filled_slots as f64 / TOTAL_SLOTS as f64,
            required_hours: total_required_hours(store),
            assigned_hours: total_assigned_hours(store),
            workloads: workload_report(store),
        }
    }
}

/// Quota status of a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaStatus {
    /// Fewer hours assigned than required.
    Pending,
    /// Exactly at quota.
    Complete,
    /// More hours assigned than the quota (after a quota was lowered).
    OverAssigned,
}

/// Per-subject quota progress.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectProgress {
    pub code: String,
    pub name: String,
    pub assigned_hours: u32,
    pub hours_per_week: u32,
    /// Assigned / required as a percentage; may exceed 100. Zero when the
    /// quota is zero.
    pub percent: f64,
    pub status: QuotaStatus,
}

impl SubjectProgress {
    fn of(subject: &Subject) -> Self {
        let percent = if subject.hours_per_week == 0 {
            0.0
        } else {
            f64::from(subject.assigned_hours) / f64::from(subject.hours_per_week) * 100.0
        };
        let status = if subject.is_over_assigned() {
            QuotaStatus::OverAssigned
        } else if subject.is_at_quota() {
            QuotaStatus::Complete
        } else {
            QuotaStatus::Pending
        };
        Self {
            code: subject.code.clone(),
            name: subject.name.clone(),
            assigned_hours: subject.assigned_hours,
            hours_per_week: subject.hours_per_week,
            percent,
            status,
        }
    }
}

/// Quota progress for every subject, in subject order.
pub fn subject_progress(store: &EntityStore) -> Vec<SubjectProgress> {
    store.subjects().iter().map(SubjectProgress::of).collect()
}

/// Subjects that can still take another assignment.
pub fn assignable_subjects(store: &EntityStore) -> Vec<&Subject> {
    store.subjects().iter().filter(|s| !s.is_at_quota()).collect()
}

/// Unoccupied cells in grid order.
pub fn free_slots(store: &EntityStore) -> Vec<Slot> {
    Slot::all().filter(|slot| !store.is_occupied(*slot)).collect()
}

/// Display data for one grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub slot: Slot,
    /// `None` for a free cell.
    pub class: Option<ClassView>,
}

/// An occupied cell with its references resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassView {
    pub subject_code: String,
    /// Empty if the faculty record is missing.
    pub faculty_name: String,
    pub room: String,
}

/// Every grid cell in day-major order.
pub fn timetable_grid(store: &EntityStore) -> Vec<GridCell> {
    Slot::all()
        .map(|slot| GridCell {
            slot,
            class: store.assignment_at(slot).map(|a| ClassView {
                subject_code: a.subject_code.clone(),
                faculty_name: store
                    .faculty_by_id(&a.faculty_id)
                    .map(|f| f.name.clone())
                    .unwrap_or_default(),
                room: a.room.clone(),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, Day, Faculty, TimeSlot};

    fn sample_store() -> EntityStore {
        let mut s = EntityStore::new();
        s.insert_faculty(
            Faculty::new("F1")
                .with_name("Dr. Lee")
                .with_department("CS")
                .with_workload(2),
        );
        s.insert_faculty(
            Faculty::new("F2")
                .with_name("Dr. Kim")
                .with_department("Math"),
        );
        s.insert_subject(Subject::new("CS101", 2).with_name("Intro").with_assigned_hours(2));
        s.insert_subject(Subject::new("MATH1", 4).with_name("Calc"));
        s.insert_subject(Subject::new("PHY1", 1).with_name("Physics").with_assigned_hours(3));
        s.insert_assignment(Assignment::new(
            Slot::new(Day::Monday, TimeSlot::NineToTen),
            "F1",
            "CS101",
            "R1",
        ));
        s.insert_assignment(Assignment::new(
            Slot::new(Day::Tuesday, TimeSlot::TenToEleven),
            "F1",
            "CS101",
            "R2",
        ));
        s
    }

    #[test]
    fn test_totals() {
        let s = sample_store();
        assert_eq!(filled_slot_count(&s), 2);
        assert_eq!(total_required_hours(&s), 7);
        assert_eq!(total_assigned_hours(&s), 5);
    }

    #[test]
    fn test_dashboard() {
        let stats = DashboardStats::calculate(&sample_store());
        assert_eq!(stats.faculty_count, 2);
        assert_eq!(stats.subject_count, 3);
        assert_eq!(stats.filled_slots, 2);
        assert_eq!(stats.total_slots, 30);
        assert!((stats.fill_ratio - 2.0 / 30.0).abs() < 1e-10);
        assert_eq!(stats.workloads.len(), 2);
    }

    #[test]
    fn test_empty_store() {
        let stats = DashboardStats::calculate(&EntityStore::new());
        assert_eq!(stats.filled_slots, 0);
        assert_eq!(stats.required_hours, 0);
        assert!((stats.fill_ratio - 0.0).abs() < 1e-10);
        assert!(stats.workloads.is_empty());
        assert_eq!(free_slots(&EntityStore::new()).len(), 30);
    }

    #[test]
    fn test_workload_order() {
        let rows = workload_report(&sample_store());
        assert_eq!(
            rows[0],
            WorkloadRow {
                name: "Dr. Lee".into(),
                department: "CS".into(),
                workload: 2
            }
        );
        assert_eq!(rows[1].name, "Dr. Kim");
        assert_eq!(rows[1].workload, 0);
    }

    #[test]
    fn test_subject_progress() {
        let rows = subject_progress(&sample_store());
        assert_eq!(rows[0].status, QuotaStatus::Complete);
        assert!((rows[0].percent - 100.0).abs() < 1e-10);
        assert_eq!(rows[1].status, QuotaStatus::Pending);
        assert!((rows[1].percent - 0.0).abs() < 1e-10);
        assert_eq!(rows[2].status, QuotaStatus::OverAssigned);
        assert!((rows[2].percent - 300.0).abs() < 1e-10);
    }

    #[test]
    fn test_assignable_subjects() {
        let store = sample_store();
        let codes: Vec<&str> = assignable_subjects(&store)
            .iter()
            .map(|s| s.code.as_str())
            .collect();
        assert_eq!(codes, vec!["MATH1"]);
    }

    #[test]
    fn test_grid() {
        let store = sample_store();
        let grid = timetable_grid(&store);
        assert_eq!(grid.len(), 30);
        let first = grid[0].class.as_ref().unwrap();
        assert_eq!(first.subject_code, "CS101");
        assert_eq!(first.faculty_name, "Dr. Lee");
        assert!(grid[1].class.is_none());
        // Tuesday 10-11 is index 6 + 1
        assert_eq!(grid[7].class.as_ref().unwrap().room, "R2");

        let free = free_slots(&store);
        assert_eq!(free.len(), 28);
        assert!(!free.contains(&Slot::new(Day::Monday, TimeSlot::NineToTen)));
    }
}
