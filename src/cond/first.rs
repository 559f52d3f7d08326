use crate::cond::{ActiveRanges, Cond};
use crate::range::DateRange;
use crate::rangeset::RangeSet;
use crate::time::Time;

/// Upcoming `a` ranges examined before giving up on a future match.
const UPCOMING_SCANS: usize = 64;

/// The first occurrence of `b` whose start is at or after the start of
/// `a` — "the first morning after the start of Monday". With
/// `inclusive` set, a `b` range starting exactly with `a` counts;
/// otherwise it must start strictly later.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstAfterStartCond {
    pub a: Box<Cond>,
    pub b: Box<Cond>,
    pub inclusive: bool,
}

impl FirstAfterStartCond {
    pub fn new(a: Cond, b: Cond, inclusive: bool) -> Self {
        Self { a: Box::new(a), b: Box::new(b), inclusive }
    }

    /// The first `b` range for an `a` range starting at `a_start`.
    fn first_b_after(&self, a_start: Time) -> Option<DateRange> {
        let from = if self.inclusive { a_start.add_millis(-1) } else { a_start };
        self.b.next_ranges(from).first_range().copied()
    }
}

impl ActiveRanges for FirstAfterStartCond {
    fn last_active_range(&self, t: Time) -> Option<DateRange> {
        let b_last = self.b.last_active_range(t)?;
        // Exclusive matching pins a `b` starting exactly with `a` to the
        // previous `a` cycle.
        let probe = if self.inclusive { b_last.st } else { b_last.st.add_millis(-1) };
        let a_last = self.a.last_active_range(probe)?;
        self.first_b_after(a_last.st)
    }

    fn next_ranges(&self, t: Time) -> RangeSet {
        // While inside `a`, its current cycle may still hold the answer.
        if let Some(a_cur) = self.a.last_active_range(t) {
            if a_cur.contains(t) {
                if let Some(found) = self.first_b_after(a_cur.st) {
                    if found.st > t {
                        return RangeSet::from_range(found);
                    }
                }
            }
        }
        // Otherwise walk a's upcoming cycles for the first match past t.
        let mut probe = t;
        for _ in 0..UPCOMING_SCANS {
            let upcoming = self.a.next_ranges(probe);
            let Some(last) = upcoming.last_range().copied() else {
                return RangeSet::empty();
            };
            for a in &upcoming {
                if let Some(found) = self.first_b_after(a.st) {
                    if found.st > t {
                        return RangeSet::from_range(found);
                    }
                }
            }
            match last.en {
                Some(en) if en > probe => probe = en,
                _ => return RangeSet::empty(),
            }
        }
        RangeSet::empty()
    }
}
