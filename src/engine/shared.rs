//! Thread-safe engine handle.

use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

use super::SchedulingEngine;
use crate::error::Result;
use crate::models::Assignment;
use crate::notify::NotificationSink;
use crate::persistence::PersistenceGateway;
use crate::report::DashboardStats;

/// A cloneable handle that serializes access to one [`SchedulingEngine`].
///
/// Every operation holds the lock from validation through save, so an
/// `assign` is one atomic transaction with respect to other handles.
#[derive(Debug)]
pub struct SharedEngine<G, N> {
    inner: Arc<Mutex<SchedulingEngine<G, N>>>,
}

impl<G, N> Clone for SharedEngine<G, N> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<G: PersistenceGateway, N: NotificationSink> SharedEngine<G, N> {
    pub fn new(engine: SchedulingEngine<G, N>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Locks the engine for a multi-step sequence.
    pub fn lock(&self) -> MutexGuard<'_, SchedulingEngine<G, N>> {
        self.inner.lock()
    }

    /// Runs `f` with exclusive access to the engine.
    pub fn with<R>(&self, f: impl FnOnce(&mut SchedulingEngine<G, N>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn assign(
        &self,
        day: &str,
        time: &str,
        faculty_id: &str,
        subject_code: &str,
        room: &str,
    ) -> Result<Option<Assignment>> {
        self.lock()
            .assign(day, time, faculty_id, subject_code, room)
    }

    pub fn remove_assignment(&self, day: &str, time: &str) -> Result<Assignment> {
        self.lock().remove_assignment(day, time)
    }

    /// Dashboard statistics computed under the lock.
    pub fn stats(&self) -> DashboardStats {
        DashboardStats::calculate(self.lock().store())
    }
}
