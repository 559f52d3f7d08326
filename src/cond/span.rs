use crate::cond::ActiveRanges;
use crate::error::{Error, Result};
use crate::range::DateRange;
use crate::rangeset::RangeSet;
use crate::time::Time;

/// A bucketed calendar span: a range of the declared length anchored to
/// the boundary of its smallest non-zero unit (seconds floor to the
/// second, minutes to the minute, and so on up to months, which floor to
/// the first of the month).
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpanCond {
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeSpanCond {
    pub fn new(months: i64, days: i64, hours: i64, minutes: i64, seconds: i64) -> Result<Self> {
        let units = [months, days, hours, minutes, seconds];
        if units.iter().any(|&u| u < 0) {
            return Err(Error::InvalidDuration("negative span component".to_owned()));
        }
        if units.iter().all(|&u| u == 0) {
            return Err(Error::InvalidDuration("span must have a positive unit".to_owned()));
        }
        Ok(Self { months, days, hours, minutes, seconds })
    }

    /// Floors `t` to the boundary of the smallest non-zero unit.
    fn bucket(&self, t: Time) -> Time {
        if self.seconds > 0 {
            t.floor_secs()
        } else if self.minutes > 0 {
            t.floor_mins()
        } else if self.hours > 0 {
            t.floor_hours()
        } else if self.days > 0 {
            t.day_start()
        } else {
            t.month_start()
        }
    }

    /// One step of the smallest non-zero unit.
    fn advance(&self, t: Time) -> Time {
        if self.seconds > 0 {
            t.add_secs(1)
        } else if self.minutes > 0 {
            t.add_mins(1)
        } else if self.hours > 0 {
            t.add_hours(1)
        } else if self.days > 0 {
            t.add_days(1)
        } else {
            t.add_months(1)
        }
    }

    fn span_from(&self, st: Time) -> DateRange {
        let en = st
            .add_months(self.months as i32)
            .add_days(self.days)
            .add_hours(self.hours)
            .add_mins(self.minutes)
            .add_secs(self.seconds);
        DateRange::bounded(st, en)
    }
}

impl ActiveRanges for TimeSpanCond {
    fn last_active_range(&self, t: Time) -> Option<DateRange> {
        Some(self.span_from(self.bucket(t)))
    }

    fn next_ranges(&self, t: Time) -> RangeSet {
        RangeSet::from_range(self.span_from(self.advance(self.bucket(t))))
    }
}
