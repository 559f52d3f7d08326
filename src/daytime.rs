use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A wall-clock time of day. Hour 24 (with minute 0) is the end-of-day
/// marker used by day-part tables and exclusive band ends; `new` itself
/// only accepts hours on the clock.
#[must_use]
#[derive(
    Debug, Default, Eq, PartialEq, Hash, Copy, Clone, Ord, PartialOrd, Display, Serialize,
    Deserialize,
)]
#[display("{hour}:{minute:02}")]
pub struct DayTime {
    pub hour: u32,
    pub minute: u32,
}

impl DayTime {
    pub const END_OF_DAY: DayTime = DayTime { hour: 24, minute: 0 };

    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        if hour > 23 {
            return Err(Error::InvalidRange(format!("hour {hour} outside 0-23")));
        }
        if minute > 59 {
            return Err(Error::InvalidRange(format!("minute {minute} outside 0-59")));
        }
        Ok(Self { hour, minute })
    }
}

/// A day of the year as 0-based month plus day of month. Days are not
/// validated against the month length; they clamp when a range is built.
#[must_use]
#[derive(
    Debug, Default, Eq, PartialEq, Hash, Copy, Clone, Ord, PartialOrd, Display, Serialize,
    Deserialize,
)]
#[display("{month}-{day}")]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> Result<Self> {
        if month > 11 {
            return Err(Error::InvalidRange(format!("month {month} outside 0-11")));
        }
        if !(1..=31).contains(&day) {
            return Err(Error::InvalidRange(format!("day {day} outside 1-31")));
        }
        Ok(Self { month, day })
    }
}
