use crate::cond::ActiveRanges;
use crate::error::{Error, Result};
use crate::range::DateRange;
use crate::rangeset::RangeSet;
use crate::time::Time;

/// A day-of-month band, both endpoints included. A start day after the
/// end day wraps the band across the month boundary. Days beyond a
/// month's length clamp to its last day.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBetweenCond {
    pub start_day: u32,
    pub end_day: u32,
}

impl DayBetweenCond {
    pub fn new(start_day: u32, end_day: u32) -> Result<Self> {
        for day in [start_day, end_day] {
            if !(1..=31).contains(&day) {
                return Err(Error::InvalidRange(format!("day {day} outside 1-31")));
            }
        }
        Ok(Self { start_day, end_day })
    }

    fn wraps(&self) -> bool {
        self.end_day < self.start_day
    }

    /// The band whose start falls in the given month (0-based, may run
    /// outside [0,11]).
    fn range_from(&self, year: i32, month0: i32, t: Time) -> DateRange {
        let st = Time::from_ymd0(year, month0, self.start_day, t.tz());
        let en_month = month0 + i32::from(self.wraps());
        let en = Time::from_ymd0(year, en_month, self.end_day, t.tz()).add_days(1);
        DateRange::bounded(st, en)
    }
}

impl ActiveRanges for DayBetweenCond {
    fn last_active_range(&self, t: Time) -> Option<DateRange> {
        let back = i32::from(t.day() < self.start_day);
        Some(self.range_from(t.year(), t.month0() as i32 - back, t))
    }

    fn next_ranges(&self, t: Time) -> RangeSet {
        let fwd = i32::from(t.day() >= self.start_day);
        RangeSet::from_range(self.range_from(t.year(), t.month0() as i32 + fwd, t))
    }
}
