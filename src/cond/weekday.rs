use crate::cond::ActiveRanges;
use crate::error::{Error, Result};
use crate::range::DateRange;
use crate::rangeset::RangeSet;
use crate::time::Time;

/// One whole day of the week, midnight to midnight. Index 0 = Sunday.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekDayCond {
    pub weekday: u32,
}

impl WeekDayCond {
    pub fn new(weekday: u32) -> Result<Self> {
        if weekday > 6 {
            return Err(Error::InvalidRange(format!("weekday {weekday} outside 0-6")));
        }
        Ok(Self { weekday })
    }
}

impl ActiveRanges for WeekDayCond {
    fn last_active_range(&self, t: Time) -> Option<DateRange> {
        let back = (t.weekday0() + 7 - self.weekday) % 7;
        let st = t.add_days(-i64::from(back)).day_start();
        Some(DateRange::bounded(st, st.add_days(1)))
    }

    fn next_ranges(&self, t: Time) -> RangeSet {
        let mut fwd = i64::from(self.weekday) - i64::from(t.weekday0());
        if fwd <= 0 {
            fwd += 7;
        }
        let st = t.add_days(fwd).day_start();
        RangeSet::from_range(DateRange::bounded(st, st.add_days(1)))
    }
}
