use crate::cond::{ActiveRanges, Cond};
use crate::error::{Error, Result};
use crate::range::DateRange;
use crate::rangeset::RangeSet;
use crate::time::Time;

/// The n-th occurrence of the child at or after the cached anchor. This
/// is a one-shot condition: exactly one range, fixed once the anchor and
/// child are known.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NthCond {
    pub anchor: Time,
    pub n: u32,
    pub child: Box<Cond>,
}

impl NthCond {
    pub fn new(anchor: Time, n: u32, child: Cond) -> Result<Self> {
        if n < 1 {
            return Err(Error::InvalidRange("occurrence count must be at least 1".to_owned()));
        }
        Ok(Self { anchor, n, child: Box::new(child) })
    }

    /// Seeks forward occurrence by occurrence. `None` when the child's
    /// sequence terminates (runs out, or goes open-ended) before the
    /// n-th is reached.
    fn occurrence(&self) -> Option<DateRange> {
        // Starting a hair early admits an occurrence beginning exactly at
        // the anchor.
        let mut from = self.anchor.add_millis(-1);
        let mut found = None;
        for i in 1..=self.n {
            let first = self.child.next_ranges(from).first_range().copied()?;
            if i < self.n {
                from = first.en?;
            }
            found = Some(first);
        }
        found
    }
}

impl ActiveRanges for NthCond {
    fn last_active_range(&self, t: Time) -> Option<DateRange> {
        self.occurrence().filter(|r| r.st <= t)
    }

    fn next_ranges(&self, t: Time) -> RangeSet {
        match self.occurrence() {
            Some(r) if r.st > t => RangeSet::from_range(r),
            _ => RangeSet::empty(),
        }
    }
}
