use crate::cond::ActiveRanges;
use crate::daytime::DayTime;
use crate::error::{Error, Result};
use crate::range::DateRange;
use crate::rangeset::RangeSet;
use crate::time::Time;

/// A daily time-of-day band. The stored `end` is the last included
/// minute: exclusive authored ends subtract one minute (wrapping the
/// hour), and produced ranges end one minute past it. Bands whose start
/// is after their end wrap overnight into the next day.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBetweenCond {
    pub start: DayTime,
    pub end: DayTime,
    /// The authored inclusivity, kept for describers.
    pub inclusive: bool,
}

impl TimeBetweenCond {
    pub fn new(start: DayTime, end: DayTime, inclusive: bool) -> Result<Self> {
        if start.hour > 23 || start.minute > 59 {
            return Err(Error::InvalidRange(format!("band start {start} not a time of day")));
        }
        let end_ok = match end.hour {
            24 => end.minute == 0 && !inclusive,
            h => h <= 23 && end.minute <= 59,
        };
        if !end_ok {
            return Err(Error::InvalidRange(format!("band end {end} not a time of day")));
        }
        let end = if inclusive {
            end
        } else if end.minute == 0 {
            DayTime { hour: if end.hour == 0 { 23 } else { end.hour - 1 }, minute: 59 }
        } else {
            DayTime { hour: end.hour, minute: end.minute - 1 }
        };
        Ok(Self { start, end, inclusive })
    }

    fn overnight(&self) -> bool {
        self.end < self.start
    }

    /// The band anchored on the same day as `day`.
    fn range_on(&self, day: Time) -> DateRange {
        let base = day.day_start();
        let st = base.at_hm(self.start.hour, self.start.minute);
        let en_base = if self.overnight() { base.add_days(1) } else { base };
        let en = en_base.at_hm(self.end.hour, self.end.minute).add_mins(1);
        DateRange::bounded(st, en)
    }

    fn start_today(&self, t: Time) -> Time {
        t.at_hm(self.start.hour, self.start.minute)
    }
}

impl ActiveRanges for TimeBetweenCond {
    fn last_active_range(&self, t: Time) -> Option<DateRange> {
        let anchor = if t >= self.start_today(t) { t } else { t.add_days(-1) };
        Some(self.range_on(anchor))
    }

    fn next_ranges(&self, t: Time) -> RangeSet {
        let anchor = if t < self.start_today(t) { t } else { t.add_days(1) };
        RangeSet::from_range(self.range_on(anchor))
    }
}

/// A named daily band ("morning" and friends). Evaluation is the wrapped
/// band's; the name survives for describers.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPartCond {
    pub name: String,
    pub band: TimeBetweenCond,
}

impl DayPartCond {
    pub fn new(name: impl Into<String>, band: TimeBetweenCond) -> Self {
        Self { name: name.into(), band }
    }
}

impl ActiveRanges for DayPartCond {
    fn last_active_range(&self, t: Time) -> Option<DateRange> {
        self.band.last_active_range(t)
    }

    fn next_ranges(&self, t: Time) -> RangeSet {
        self.band.next_ranges(t)
    }
}
