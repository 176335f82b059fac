//! The single-owner scheduling engine.
//!
//! Each public operation runs in three phases: validate against the store,
//! mutate the store, then save and notify. Validation finishes before the
//! first mutation, so a rejected operation changes nothing and saves nothing.

use log::{debug, error, info, warn};

use crate::error::{Result, ScheduleError};
use crate::models::{Assignment, Faculty, Slot, Subject};
use crate::notify::{Notification, NotificationSink};
use crate::persistence::PersistenceGateway;
use crate::store::EntityStore;
use crate::validation::{check_capacity, check_quota, repair, required, validate_snapshot};

/// Applies timetable operations to an owned [`EntityStore`].
///
/// # Example
///
/// ```
/// use u_timetable::engine::SchedulingEngine;
/// use u_timetable::notify::RecordingSink;
/// use u_timetable::persistence::MemoryGateway;
///
/// let mut engine = SchedulingEngine::open(MemoryGateway::new(), RecordingSink::new());
/// engine.add_faculty("F1", "Dr. Lee", "CS").unwrap();
/// engine.add_subject("CS101", "Intro to CS", 2).unwrap();
/// engine.assign("Monday", "9-10", "F1", "CS101", "R1").unwrap();
///
/// assert_eq!(engine.store().faculty_by_id("F1").unwrap().workload, 1);
/// assert_eq!(engine.gateway().save_count(), 3);
/// ```
#[derive(Debug)]
pub struct SchedulingEngine<G, N> {
    store: EntityStore,
    gateway: G,
    sink: N,
}

impl<G: PersistenceGateway, N: NotificationSink> SchedulingEngine<G, N> {
    /// Loads state from `gateway` and repairs anything inconsistent in it.
    pub fn open(gateway: G, sink: N) -> Self {
        let snapshot = gateway.load();
        if let Err(errors) = validate_snapshot(&snapshot) {
            for e in &errors {
                warn!("timetable state: {}", e.message);
            }
            info!("repairing loaded timetable state ({} issues)", errors.len());
        }
        let store = EntityStore::from_snapshot(repair(snapshot));
        info!(
            "timetable engine ready: {} faculty, {} subjects, {} assignments",
            store.faculty_count(),
            store.subject_count(),
            store.assignment_count()
        );
        Self::with_store(store, gateway, sink)
    }

    /// Uses `store` as-is without loading.
    pub fn with_store(store: EntityStore, gateway: G, sink: N) -> Self {
        Self {
            store,
            gateway,
            sink,
        }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut N {
        &mut self.sink
    }

    pub fn into_parts(self) -> (EntityStore, G, N) {
        (self.store, self.gateway, self.sink)
    }

    // ======================== Faculty ========================

    /// Adds a faculty member with zero workload.
    pub fn add_faculty(&mut self, id: &str, name: &str, department: &str) -> Result<()> {
        let outcome = self.try_add_faculty(id, name, department);
        self.finish(outcome, "Faculty member added successfully")
    }

    fn try_add_faculty(&mut self, id: &str, name: &str, department: &str) -> Result<()> {
        let id = required("faculty id", id)?;
        let name = required("name", name)?;
        let department = required("department", department)?;
        if self.store.contains_faculty(&id) {
            return Err(ScheduleError::duplicate("faculty", id));
        }
        info!("adding faculty {id} ({name}, {department})");
        self.store.insert_faculty(
            Faculty::new(id)
                .with_name(name)
                .with_department(department),
        );
        Ok(())
    }

    /// Changes a faculty member's name and department.
    pub fn rename_faculty(&mut self, id: &str, new_name: &str, new_department: &str) -> Result<()> {
        let outcome = self.try_rename_faculty(id, new_name, new_department);
        self.finish(outcome, "Faculty member updated successfully")
    }

    fn try_rename_faculty(&mut self, id: &str, new_name: &str, new_department: &str) -> Result<()> {
        let name = required("name", new_name)?;
        let department = required("department", new_department)?;
        let id = id.trim();
        let faculty = self
            .store
            .faculty_by_id_mut(id)
            .ok_or_else(|| ScheduleError::not_found("faculty", id))?;
        faculty.name = name;
        faculty.department = department;
        Ok(())
    }

    /// Deletes a faculty member and every assignment referencing it.
    ///
    /// Returns the number of assignments removed. Deleting an unknown id is
    /// a silent no-op returning 0.
    pub fn delete_faculty(&mut self, id: &str) -> usize {
        let id = id.trim();
        if self.store.remove_faculty(id).is_none() {
            debug!("delete of unknown faculty {id} ignored");
            return 0;
        }
        let removed = self.store.remove_assignments_where(|a| a.faculty_id == id);
        for a in &removed {
            if let Some(subject) = self.store.subject_by_code_mut(&a.subject_code) {
                subject.decrement_assigned();
            }
        }
        info!(
            "deleted faculty {id} and {} of its assignments",
            removed.len()
        );
        self.succeed("Faculty member deleted successfully");
        removed.len()
    }

    // ======================== Subjects ========================

    /// Adds a subject with the given weekly quota and no assigned hours.
    pub fn add_subject(&mut self, code: &str, name: &str, hours_per_week: i64) -> Result<()> {
        let outcome = self.try_add_subject(code, name, hours_per_week);
        self.finish(outcome, "Subject added successfully")
    }

    fn try_add_subject(&mut self, code: &str, name: &str, hours_per_week: i64) -> Result<()> {
        let code = required("subject code", code)?;
        let name = required("name", name)?;
        let hours = check_quota(hours_per_week)?;
        if self.store.contains_subject(&code) {
            return Err(ScheduleError::duplicate("subject", code));
        }
        info!("adding subject {code} ({name}, {hours} h/week)");
        self.store
            .insert_subject(Subject::new(code, hours).with_name(name));
        Ok(())
    }

    /// Changes a subject's name and weekly quota.
    ///
    /// Existing assignments are kept even if they now exceed the quota; the
    /// subject simply accepts no new assignments until it drops below it.
    pub fn update_subject(&mut self, code: &str, new_name: &str, hours_per_week: i64) -> Result<()> {
        let outcome = self.try_update_subject(code, new_name, hours_per_week);
        self.finish(outcome, "Subject updated successfully")
    }

    fn try_update_subject(&mut self, code: &str, new_name: &str, hours_per_week: i64) -> Result<()> {
        let name = required("name", new_name)?;
        let hours = check_quota(hours_per_week)?;
        let code = code.trim();
        let subject = self
            .store
            .subject_by_code_mut(code)
            .ok_or_else(|| ScheduleError::not_found("subject", code))?;
        subject.name = name;
        subject.hours_per_week = hours;
        if subject.is_over_assigned() {
            warn!(
                "subject {code} now over-assigned: {} of {} hours",
                subject.assigned_hours, subject.hours_per_week
            );
        }
        Ok(())
    }

    /// Deletes a subject and every assignment referencing it.
    ///
    /// Returns the number of assignments removed. Deleting an unknown code
    /// is a silent no-op returning 0.
    pub fn delete_subject(&mut self, code: &str) -> usize {
        let code = code.trim();
        if self.store.remove_subject(code).is_none() {
            debug!("delete of unknown subject {code} ignored");
            return 0;
        }
        let removed = self
            .store
            .remove_assignments_where(|a| a.subject_code == code);
        for a in &removed {
            if let Some(faculty) = self.store.faculty_by_id_mut(&a.faculty_id) {
                faculty.decrement_workload();
            }
        }
        info!(
            "deleted subject {code} and {} of its assignments",
            removed.len()
        );
        self.succeed("Subject deleted successfully");
        removed.len()
    }

    // ======================== Assignments ========================

    /// Assigns a class to the cell named by `day` and `time` labels.
    ///
    /// Returns the assignment it replaced, if the cell was occupied.
    pub fn assign(
        &mut self,
        day: &str,
        time: &str,
        faculty_id: &str,
        subject_code: &str,
        room: &str,
    ) -> Result<Option<Assignment>> {
        let outcome = Slot::parse(day, time)
            .and_then(|slot| self.try_assign(slot, faculty_id, subject_code, room));
        self.finish(outcome, "Class assigned successfully")
    }

    /// Typed form of [`assign`](Self::assign).
    pub fn assign_slot(
        &mut self,
        slot: Slot,
        faculty_id: &str,
        subject_code: &str,
        room: &str,
    ) -> Result<Option<Assignment>> {
        let outcome = self.try_assign(slot, faculty_id, subject_code, room);
        self.finish(outcome, "Class assigned successfully")
    }

    fn try_assign(
        &mut self,
        slot: Slot,
        faculty_id: &str,
        subject_code: &str,
        room: &str,
    ) -> Result<Option<Assignment>> {
        let faculty_id = required("faculty", faculty_id)?;
        let subject_code = required("subject", subject_code)?;
        let room = required("room", room)?;

        if !self.store.contains_faculty(&faculty_id) {
            return Err(ScheduleError::not_found("faculty", faculty_id));
        }
        let subject = self
            .store
            .subject_by_code(&subject_code)
            .ok_or_else(|| ScheduleError::not_found("subject", subject_code.as_str()))?;
        check_capacity(subject)?;

        let replaced = self.release(slot);
        if let Some(old) = &replaced {
            debug!(
                "{slot}: replacing {}/{} in {}",
                old.subject_code, old.faculty_id, old.room
            );
        }
        info!("{slot}: assigning {subject_code}/{faculty_id} in {room}");

        if let Some(faculty) = self.store.faculty_by_id_mut(&faculty_id) {
            faculty.increment_workload();
        }
        if let Some(subject) = self.store.subject_by_code_mut(&subject_code) {
            subject.increment_assigned();
        }
        self.store
            .insert_assignment(Assignment::new(slot, faculty_id, subject_code, room));
        Ok(replaced)
    }

    /// Frees the cell named by `day` and `time` labels.
    ///
    /// A free cell is `NotFound` and leaves everything untouched, so calling
    /// this twice is safe.
    pub fn remove_assignment(&mut self, day: &str, time: &str) -> Result<Assignment> {
        let outcome = Slot::parse(day, time).and_then(|slot| self.try_remove(slot));
        self.finish(outcome, "Assignment removed successfully")
    }

    /// Typed form of [`remove_assignment`](Self::remove_assignment).
    pub fn remove_slot(&mut self, slot: Slot) -> Result<Assignment> {
        let outcome = self.try_remove(slot);
        self.finish(outcome, "Assignment removed successfully")
    }

    fn try_remove(&mut self, slot: Slot) -> Result<Assignment> {
        let removed = self
            .release(slot)
            .ok_or_else(|| ScheduleError::not_found("assignment", slot.to_string()))?;
        info!(
            "{slot}: removed {}/{}",
            removed.subject_code, removed.faculty_id
        );
        Ok(removed)
    }

    /// Removes every assignment. Returns how many were removed.
    pub fn clear_timetable(&mut self) -> usize {
        let removed = self.store.remove_assignments_where(|_| true);
        for a in &removed {
            if let Some(faculty) = self.store.faculty_by_id_mut(&a.faculty_id) {
                faculty.decrement_workload();
            }
            if let Some(subject) = self.store.subject_by_code_mut(&a.subject_code) {
                subject.decrement_assigned();
            }
        }
        info!("cleared {} assignments", removed.len());
        self.succeed("Timetable cleared successfully");
        removed.len()
    }

    /// Removes the assignment at `slot`, dropping its faculty and subject
    /// counters (floored at zero).
    fn release(&mut self, slot: Slot) -> Option<Assignment> {
        let old = self.store.remove_assignment_at(slot)?;
        if let Some(faculty) = self.store.faculty_by_id_mut(&old.faculty_id) {
            faculty.decrement_workload();
        }
        if let Some(subject) = self.store.subject_by_code_mut(&old.subject_code) {
            subject.decrement_assigned();
        }
        Some(old)
    }

    // ======================== Outcome ========================

    /// Saves on success, then reports the outcome to the sink.
    fn finish<T>(&mut self, outcome: Result<T>, success: &str) -> Result<T> {
        match &outcome {
            Ok(_) => self.succeed(success),
            Err(err) => {
                debug!("operation rejected: {err}");
                self.sink
                    .notify(&Notification::error(err.title(), err.to_string()));
            }
        }
        outcome
    }

    /// Saves the store and emits one notification: `success` if the save
    /// went through, a storage error otherwise. The mutation stands either way.
    fn succeed(&mut self, success: &str) {
        let snapshot = self.store.to_snapshot();
        let notification = match self.gateway.save(&snapshot) {
            Ok(()) => Notification::info("Success", success),
            Err(err) => {
                error!("failed to save timetable: {err}");
                Notification::error(
                    "Storage Error",
                    format!("{success}, but saving failed: {err}"),
                )
            }
        };
        self.sink.notify(&notification);
    }
}
