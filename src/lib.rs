//! Weekly class timetable engine.
//!
//! Tracks faculty members, subjects with weekly hour quotas, and a fixed
//! 5-day x 6-period grid in which each occupied cell assigns one faculty
//! member and one subject to a room.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Faculty`, `Subject`, `Assignment`, `Day`,
//!   `TimeSlot`, `Slot`
//! - **`store`**: `EntityStore`, the owner of all records, and `Snapshot`
//! - **`engine`**: `SchedulingEngine`, which validates and applies every
//!   mutation, and the lock-guarded `SharedEngine`
//! - **`report`**: Read-only dashboard statistics and grid views
//! - **`persistence`**: `PersistenceGateway` with in-memory and JSON file backends
//! - **`notify`**: `NotificationSink` for operation outcomes
//! - **`validation`**: Integrity checks and repair for loaded state
//!
//! # Invariants
//!
//! - At most one assignment per (day, time) cell
//! - Faculty `workload` and subject `assigned_hours` equal the number of
//!   assignments referencing them
//! - No assignment references a deleted faculty or subject
//! - A subject at or above its quota accepts no new assignment
//!
//! # Logging
//!
//! The crate logs through the `log` facade and never installs a logger.

pub mod engine;
pub mod error;
pub mod models;
pub mod notify;
pub mod persistence;
pub mod report;
pub mod store;
pub mod validation;

pub use error::{ErrorKind, PersistenceError, Result, ScheduleError};
