//! Scheduling engine.
//!
//! Validates and applies every mutation of the timetable.
//!
//! # Assignment rules
//!
//! 1. Day and time must name a grid cell; faculty, subject and room must be non-empty.
//! 2. Faculty and subject must exist.
//! 3. The subject must be below its weekly quota. This is checked before
//!    looking at the target cell, so re-assigning an at-quota subject to the
//!    cell it already holds is rejected too.
//! 4. An occupied cell is released first (its faculty and subject counters
//!    drop by one), then the new assignment is created.
//!
//! A cell holds at most one assignment, so a faculty member can never be
//! double-booked; no separate faculty conflict check exists.
//!
//! # Concurrency
//!
//! [`SchedulingEngine`] mutates through `&mut self`. Callers on several
//! threads go through [`SharedEngine`], which runs each operation under one
//! lock.

mod scheduling;
mod shared;

pub use scheduling::SchedulingEngine;
pub use shared::SharedEngine;
