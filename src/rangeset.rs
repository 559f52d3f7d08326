use std::slice;

use crate::range::DateRange;
use crate::time::Time;

/// A canonical ordered set of date ranges: strictly sorted by start,
/// disjoint, and never touching (a range ending exactly where the next
/// starts is merged with it). At most one range is open-ended, and only
/// in the last position.
#[must_use]
#[derive(Debug, Default, Eq, PartialEq, Clone)]
pub struct RangeSet {
    ranges: Vec<DateRange>,
}

impl RangeSet {
    /// Canonicalises an arbitrary collection: empty ranges are dropped,
    /// the rest sorted by start and swept into merged form. An open-ended
    /// range absorbs everything after it.
    pub fn new(mut ranges: Vec<DateRange>) -> Self {
        ranges.retain(|r| !r.is_empty());
        ranges.sort_by_key(|r| r.st);
        Self::sweep(ranges)
    }

    pub const fn empty() -> Self {
        Self { ranges: Vec::new() }
    }

    pub fn from_range(r: DateRange) -> Self {
        Self::new(vec![r])
    }

    /// Merges a start-sorted list of non-empty ranges.
    fn sweep(sorted: Vec<DateRange>) -> Self {
        let mut out: Vec<DateRange> = Vec::with_capacity(sorted.len());
        for r in sorted {
            let Some(prev) = out.last_mut() else {
                out.push(r);
                continue;
            };
            match prev.en {
                // The open tail swallows every later range.
                None => break,
                Some(en) if r.st <= en => {
                    prev.en = r.en.map(|ren| ren.max(en));
                }
                Some(_) => out.push(r),
            }
        }
        Self { ranges: out }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn iter(&self) -> slice::Iter<'_, DateRange> {
        self.ranges.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[DateRange] {
        &self.ranges
    }

    /// The range enclosing `t`, if any.
    #[must_use]
    pub fn contains(&self, t: Time) -> Option<&DateRange> {
        let i = self.ranges.partition_point(|r| r.st <= t);
        let r = self.ranges[..i].last()?;
        r.contains(t).then_some(r)
    }

    pub fn first_range(&self) -> Option<&DateRange> {
        self.ranges.first()
    }

    pub fn last_range(&self) -> Option<&DateRange> {
        self.ranges.last()
    }

    #[must_use]
    pub fn first_start(&self) -> Option<Time> {
        self.ranges.first().map(|r| r.st)
    }

    /// The end of the final range; `None` when the set is empty or ends
    /// in the open tail.
    #[must_use]
    pub fn last_end(&self) -> Option<Time> {
        self.ranges.last().and_then(|r| r.en)
    }

    pub fn union(&self, other: &RangeSet) -> RangeSet {
        let mut merged = Vec::with_capacity(self.len() + other.len());
        let (mut a, mut b) = (self.ranges.iter().peekable(), other.ranges.iter().peekable());
        loop {
            let take_a = match (a.peek(), b.peek()) {
                (Some(x), Some(y)) => x.st <= y.st,
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (None, None) => break,
            };
            let it = if take_a { &mut a } else { &mut b };
            merged.push(*it.next().unwrap());
        }
        Self::sweep(merged)
    }

    /// Two-pointer sweep; an absent end acts as +∞, so the result is only
    /// open-ended where both operands are.
    pub fn intersection(&self, other: &RangeSet) -> RangeSet {
        let mut out = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.ranges.len() && j < other.ranges.len() {
            let (a, b) = (self.ranges[i], other.ranges[j]);
            let st = a.st.max(b.st);
            let en = match (a.en, b.en) {
                (Some(x), Some(y)) => Some(x.min(y)),
                (Some(x), None) | (None, Some(x)) => Some(x),
                (None, None) => None,
            };
            let piece = DateRange::new(st, en);
            if !piece.is_empty() {
                out.push(piece);
            }
            // Advance whichever range ends first; both when they tie.
            match (a.en, b.en) {
                (None, None) => break,
                (Some(_), None) => i += 1,
                (None, Some(_)) => j += 1,
                (Some(x), Some(y)) => {
                    if x <= y {
                        i += 1;
                    }
                    if y <= x {
                        j += 1;
                    }
                }
            }
        }
        // Pieces cut from canonical operands stay sorted and separated.
        Self { ranges: out }
    }
}

impl<'a> IntoIterator for &'a RangeSet {
    type Item = &'a DateRange;
    type IntoIter = slice::Iter<'a, DateRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}
