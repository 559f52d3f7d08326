use crate::cond::ActiveRanges;
use crate::error::{Error, Result};
use crate::range::DateRange;
use crate::rangeset::RangeSet;
use crate::time::Time;

/// "At least this long since the anchor": activates `delta_ms`
/// milliseconds after the cached anchor instant and never deactivates.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeDeltaCond {
    pub anchor: Time,
    pub delta_ms: i64,
}

impl TimeDeltaCond {
    pub fn new(anchor: Time, delta_ms: i64) -> Result<Self> {
        if delta_ms < 0 {
            return Err(Error::InvalidDuration(format!("negative delta: {delta_ms}ms")));
        }
        Ok(Self { anchor, delta_ms })
    }

    fn valid_from(&self) -> Time {
        self.anchor.add_millis(self.delta_ms)
    }
}

impl ActiveRanges for TimeDeltaCond {
    fn last_active_range(&self, t: Time) -> Option<DateRange> {
        let from = self.valid_from();
        (t >= from).then(|| DateRange::tail(from))
    }

    fn next_ranges(&self, t: Time) -> RangeSet {
        let from = self.valid_from();
        if t >= from { RangeSet::empty() } else { RangeSet::from_range(DateRange::tail(from)) }
    }
}
