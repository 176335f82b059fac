//! Weekly grid vocabulary.
//!
//! The grid is fixed: five teaching days and six one-hour periods. Periods
//! are opaque labels, not numeric ranges. There is a lunch gap between
//! `12-1` and `2-3`, so nothing may assume the periods are contiguous.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScheduleError;

/// Number of addressable cells in the weekly grid.
pub const TOTAL_SLOTS: usize = Day::ALL.len() * TimeSlot::ALL.len();

/// A teaching day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

/// A one-hour teaching period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeSlot {
    #[serde(rename = "9-10")]
    NineToTen,
    #[serde(rename = "10-11")]
    TenToEleven,
    #[serde(rename = "11-12")]
    ElevenToTwelve,
    #[serde(rename = "12-1")]
    TwelveToOne,
    #[serde(rename = "2-3")]
    TwoToThree,
    #[serde(rename = "3-4")]
    ThreeToFour,
}

/// One (day, time) cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    pub day: Day,
    pub time: TimeSlot,
}

impl Day {
    /// All days in display order.
    pub const ALL: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
        }
    }
}

impl TimeSlot {
    /// All periods in display order.
    pub const ALL: [TimeSlot; 6] = [
        TimeSlot::NineToTen,
        TimeSlot::TenToEleven,
        TimeSlot::ElevenToTwelve,
        TimeSlot::TwelveToOne,
        TimeSlot::TwoToThree,
        TimeSlot::ThreeToFour,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TimeSlot::NineToTen => "9-10",
            TimeSlot::TenToEleven => "10-11",
            TimeSlot::ElevenToTwelve => "11-12",
            TimeSlot::TwelveToOne => "12-1",
            TimeSlot::TwoToThree => "2-3",
            TimeSlot::ThreeToFour => "3-4",
        }
    }
}

impl Slot {
    /// Creates a slot.
    pub fn new(day: Day, time: TimeSlot) -> Self {
        Self { day, time }
    }

    /// Parses a slot from its day and time labels.
    ///
    /// Both labels are trimmed. An empty or unknown label is `InvalidInput`.
    pub fn parse(day: &str, time: &str) -> Result<Self, ScheduleError> {
        Ok(Self {
            day: day.trim().parse()?,
            time: time.trim().parse()?,
        })
    }

    /// Every cell of the grid, day-major (Monday 9-10, Monday 10-11, ...).
    pub fn all() -> impl Iterator<Item = Slot> {
        Day::ALL
            .into_iter()
            .flat_map(|day| TimeSlot::ALL.into_iter().map(move |time| Slot { day, time }))
    }
}

impl FromStr for Day {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ScheduleError::empty_field("day"));
        }
        Day::ALL
            .into_iter()
            .find(|d| d.label() == s)
            .ok_or_else(|| ScheduleError::invalid_input("day", format!("unknown day '{s}'")))
    }
}

impl FromStr for TimeSlot {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ScheduleError::empty_field("time"));
        }
        TimeSlot::ALL
            .into_iter()
            .find(|t| t.label() == s)
            .ok_or_else(|| {
                ScheduleError::invalid_input("time", format!("unknown time slot '{s}'"))
            })
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.time)
    }
}
