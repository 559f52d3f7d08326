use crate::cond::{ActiveRanges, Cond};
use crate::error::{Error, Result};
use crate::range::DateRange;
use crate::rangeset::RangeSet;
use crate::time::Time;

/// Extension steps allowed when enumerating one child's ranges across an
/// envelope.
const COVER_STEPS: usize = 4096;

/// Forward re-scans allowed while hunting the next simultaneous window.
const NEXT_SCANS: usize = 64;

/// Union of the children: active whenever any child is.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrCond {
    pub children: Vec<Cond>,
}

impl OrCond {
    pub fn new(children: Vec<Cond>) -> Result<Self> {
        if children.is_empty() {
            return Err(Error::EmptyCombinator);
        }
        Ok(Self { children })
    }
}

impl ActiveRanges for OrCond {
    fn last_active_range(&self, t: Time) -> Option<DateRange> {
        let lasts: Vec<_> = self.children.iter().filter_map(|c| c.last_active_range(t)).collect();
        // Every collected range starts at or before `t`, so the union's
        // final element is the governing one.
        RangeSet::new(lasts).last_range().copied()
    }

    fn next_ranges(&self, t: Time) -> RangeSet {
        self.children.iter().fold(RangeSet::empty(), |acc, c| acc.union(&c.next_ranges(t)))
    }
}

/// Intersection of the children: active only while every child is.
///
/// Both queries work on an envelope: the `[min start, max end)` bounding
/// box of the children's immediate ranges. Each child's ranges are
/// enumerated across the envelope and intersected, so differently-phased
/// periodic children ("monday" and "morning") line up without either
/// knowing about the other. Child order never affects the result.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndCond {
    pub children: Vec<Cond>,
}

impl AndCond {
    pub fn new(children: Vec<Cond>) -> Result<Self> {
        if children.is_empty() {
            return Err(Error::EmptyCombinator);
        }
        Ok(Self { children })
    }

    /// Envelope of the children's upcoming ranges after `probe`. Children
    /// with nothing upcoming still widen the envelope while their current
    /// range runs; a child that is finished for good collapses the whole
    /// conjunction. Returns `(earliest start, latest end, enumeration
    /// bound)`, the end being `None` when some child runs forever.
    fn next_envelope(&self, probe: Time) -> Option<(Time, Option<Time>, Time)> {
        let mut starts = Vec::new();
        let mut ends = Vec::new();
        for c in &self.children {
            let next = c.next_ranges(probe);
            match (next.first_range(), next.last_range()) {
                (Some(first), Some(last)) => {
                    starts.push(first.st);
                    ends.push(last.en);
                }
                _ => {
                    let cur = c.last_active_range(probe)?;
                    if cur.en.is_some_and(|en| en <= probe) {
                        return None;
                    }
                    ends.push(cur.en);
                }
            }
        }
        let earliest = starts.iter().copied().min()?;
        let latest = ends.iter().try_fold(earliest, |acc, en| en.map(|en| acc.max(en)));
        let bound = match latest {
            Some(en) => en,
            // Open envelope: enumerate at least past every first start.
            None => starts.iter().copied().max().unwrap_or(earliest),
        };
        Some((earliest, latest, bound))
    }

    fn intersect_within(&self, earliest: Time, latest: Option<Time>, bound: Time) -> RangeSet {
        let mut acc = RangeSet::from_range(DateRange::new(earliest, latest));
        for c in &self.children {
            acc = acc.intersection(&coverage(c, earliest, bound));
        }
        acc
    }
}

/// Every range of `cond` overlapping `[from, bound)`: the range active
/// just before `from`, extended forward by repeated `next_ranges`. The
/// frontier advances start by start, never past an unseen range, and
/// stops once it reaches `bound` or the ranges go open-ended.
fn coverage(cond: &Cond, from: Time, bound: Time) -> RangeSet {
    let probe = from.add_millis(-1);
    let mut acc = match cond.last_active_range(probe) {
        Some(r) => RangeSet::from_range(r),
        None => RangeSet::empty(),
    };
    let mut cursor = probe;
    for _ in 0..COVER_STEPS {
        if cursor >= bound || acc.last_range().is_some_and(|r| r.en.is_none()) {
            break;
        }
        let next = cond.next_ranges(cursor);
        let Some(first) = next.first_start() else {
            break;
        };
        acc = acc.union(&next);
        if first <= cursor {
            break;
        }
        cursor = first;
    }
    acc
}

impl ActiveRanges for AndCond {
    fn last_active_range(&self, t: Time) -> Option<DateRange> {
        // A child that has never activated means the conjunction never has.
        let mut lasts = Vec::with_capacity(self.children.len());
        for c in &self.children {
            lasts.push(c.last_active_range(t)?);
        }
        let mut earliest = lasts.iter().map(|r| r.st).min()?;
        let latest = lasts.iter().try_fold(earliest, |acc, r| r.en.map(|en| acc.max(en)));

        // Widen to the start of whatever each child had running at the
        // envelope start, so children whose period began before t's own
        // are seen whole. Queried at the fixed initial start, to keep the
        // result independent of child order.
        let base = earliest;
        for c in &self.children {
            if let Some(r) = c.last_active_range(base) {
                earliest = earliest.min(r.st);
            }
        }

        let bound = latest.unwrap_or(t);
        let acc = self.intersect_within(earliest, latest, bound);
        acc.iter().rfind(|r| r.st <= t).copied()
    }

    fn next_ranges(&self, t: Time) -> RangeSet {
        let mut probe = t;
        for _ in 0..NEXT_SCANS {
            let Some((earliest, latest, bound)) = self.next_envelope(probe) else {
                return RangeSet::empty();
            };
            let acc = self.intersect_within(earliest, latest, bound);
            let found = RangeSet::new(acc.iter().filter(|r| r.st > t).copied().collect());
            if !found.is_empty() {
                return found;
            }
            if bound <= probe {
                return RangeSet::empty();
            }
            probe = bound;
        }
        RangeSet::empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono_tz::UTC;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cond::daily::TimeBetweenCond;
    use crate::cond::delta::TimeDeltaCond;
    use crate::cond::monthly::DayBetweenCond;
    use crate::cond::weekday::WeekDayCond;
    use crate::daytime::DayTime;
    use crate::time::ymdhms;

    fn monday() -> Cond {
        WeekDayCond::new(1).unwrap().into()
    }

    fn work_hours() -> Cond {
        TimeBetweenCond::new(DayTime::new(9, 0).unwrap(), DayTime::new(17, 0).unwrap(), false)
            .unwrap()
            .into()
    }

    #[test]
    fn empty_combinators_are_rejected() {
        assert!(matches!(OrCond::new(vec![]), Err(Error::EmptyCombinator)));
        assert!(matches!(AndCond::new(vec![]), Err(Error::EmptyCombinator)));
    }

    #[test]
    fn single_child_identity() {
        let t = ymdhms(2025, 6, 18, 10, 0, 0, UTC);
        let child = work_hours();
        let or = OrCond::new(vec![child.clone()]).unwrap();
        let and = AndCond::new(vec![child.clone()]).unwrap();
        assert_eq!(or.last_active_range(t), child.last_active_range(t));
        assert_eq!(and.last_active_range(t), child.last_active_range(t));
        assert_eq!(or.next_ranges(t), child.next_ranges(t));
        assert_eq!(and.next_ranges(t), child.next_ranges(t));
    }

    #[test]
    fn or_reports_the_latest_started_child() {
        // Monday or Wednesday, queried on a Thursday.
        let or = OrCond::new(vec![monday(), WeekDayCond::new(3).unwrap().into()]).unwrap();
        let thu = ymdhms(2025, 6, 19, 8, 0, 0, UTC);
        assert_eq!(
            or.last_active_range(thu),
            Some(DateRange::bounded(
                ymdhms(2025, 6, 18, 0, 0, 0, UTC),
                ymdhms(2025, 6, 19, 0, 0, 0, UTC),
            ))
        );
        assert!(!or.contains(thu));
        // Next occurrence is the coming Monday, then Wednesday.
        let next = or.next_ranges(thu);
        assert_eq!(next.len(), 2);
        assert_eq!(next.first_start(), Some(ymdhms(2025, 6, 23, 0, 0, 0, UTC)));
    }

    #[test]
    fn or_merges_adjacent_days() {
        // Once both days have started, Sunday and Monday form one
        // continuous window.
        let or = OrCond::new(vec![WeekDayCond::new(0).unwrap().into(), monday()]).unwrap();
        let mon = ymdhms(2025, 6, 23, 12, 0, 0, UTC);
        assert_eq!(
            or.last_active_range(mon),
            Some(DateRange::bounded(
                ymdhms(2025, 6, 22, 0, 0, 0, UTC),
                ymdhms(2025, 6, 24, 0, 0, 0, UTC),
            ))
        );
        // Upcoming ranges merge the same way.
        let sat = ymdhms(2025, 6, 21, 12, 0, 0, UTC);
        assert_eq!(
            or.next_ranges(sat).as_slice(),
            &[DateRange::bounded(
                ymdhms(2025, 6, 22, 0, 0, 0, UTC),
                ymdhms(2025, 6, 24, 0, 0, 0, UTC),
            )]
        );
    }

    #[test]
    fn and_of_phase_different_periodics() {
        // 2025-06-16 is a Monday; 2025-06-18 a Wednesday.
        let and = AndCond::new(vec![monday(), work_hours()]).unwrap();
        let wed = ymdhms(2025, 6, 18, 10, 0, 0, UTC);
        assert_eq!(
            and.last_active_range(wed),
            Some(DateRange::bounded(
                ymdhms(2025, 6, 16, 9, 0, 0, UTC),
                ymdhms(2025, 6, 16, 17, 0, 0, UTC),
            ))
        );
        assert!(!and.contains(wed));
        assert_eq!(
            and.next_ranges(wed).first_range(),
            Some(&DateRange::bounded(
                ymdhms(2025, 6, 23, 9, 0, 0, UTC),
                ymdhms(2025, 6, 23, 17, 0, 0, UTC),
            ))
        );
    }

    #[test]
    fn and_before_todays_window_reports_last_week() {
        let and = AndCond::new(vec![monday(), work_hours()]).unwrap();
        // Monday 08:00, before the daily band opens.
        let mon = ymdhms(2025, 6, 16, 8, 0, 0, UTC);
        assert_eq!(
            and.last_active_range(mon),
            Some(DateRange::bounded(
                ymdhms(2025, 6, 9, 9, 0, 0, UTC),
                ymdhms(2025, 6, 9, 17, 0, 0, UTC),
            ))
        );
        assert_eq!(
            and.next_ranges(mon).first_range(),
            Some(&DateRange::bounded(
                ymdhms(2025, 6, 16, 9, 0, 0, UTC),
                ymdhms(2025, 6, 16, 17, 0, 0, UTC),
            ))
        );
    }

    #[test]
    fn and_while_both_active() {
        let and = AndCond::new(vec![monday(), work_hours()]).unwrap();
        let mon = ymdhms(2025, 6, 16, 10, 0, 0, UTC);
        assert!(and.contains(mon));
        assert_eq!(and.current_end(mon), Some(ymdhms(2025, 6, 16, 17, 0, 0, UTC)));
        assert_eq!(and.next_start(mon), Some(ymdhms(2025, 6, 23, 9, 0, 0, UTC)));
    }

    #[test]
    fn child_order_is_irrelevant() {
        let t = ymdhms(2025, 6, 18, 10, 0, 0, UTC);
        let ab = AndCond::new(vec![monday(), work_hours()]).unwrap();
        let ba = AndCond::new(vec![work_hours(), monday()]).unwrap();
        assert_eq!(ab.last_active_range(t), ba.last_active_range(t));
        assert_eq!(ab.next_ranges(t), ba.next_ranges(t));
    }

    #[test]
    fn and_with_open_ended_child() {
        let anchor = ymdhms(2025, 6, 10, 12, 0, 0, UTC);
        let delta: Cond = TimeDeltaCond::new(anchor, 86_400_000).unwrap().into();

        // Before the delay has run out, the conjunction has never held.
        let and = AndCond::new(vec![delta.clone(), monday()]).unwrap();
        let before = ymdhms(2025, 6, 11, 6, 0, 0, UTC);
        assert_eq!(and.last_active_range(before), None);
        // First joint window: the first Monday after June 11 12:00.
        assert_eq!(
            and.next_ranges(before).first_range(),
            Some(&DateRange::bounded(
                ymdhms(2025, 6, 16, 0, 0, 0, UTC),
                ymdhms(2025, 6, 17, 0, 0, 0, UTC),
            ))
        );

        // Once the delay is over, Mondays govern alone.
        let later = ymdhms(2025, 6, 23, 10, 0, 0, UTC);
        assert_eq!(
            and.last_active_range(later),
            Some(DateRange::bounded(
                ymdhms(2025, 6, 23, 0, 0, 0, UTC),
                ymdhms(2025, 6, 24, 0, 0, 0, UTC),
            ))
        );
        assert!(and.contains(later));
    }

    #[test]
    fn and_of_coprime_periods_rescans_forward() {
        // A weekday and a day-of-month band only coincide some months
        // out; the first pass's envelope will not reach it.
        let first_of_month: Cond = DayBetweenCond::new(1, 1).unwrap().into();
        let and = AndCond::new(vec![monday(), first_of_month]).unwrap();
        let t = ymdhms(2025, 6, 18, 10, 0, 0, UTC);
        // The next 1st falling on a Monday after 2025-06-18 is 2025-09-01.
        assert_eq!(
            and.next_ranges(t).first_range(),
            Some(&DateRange::bounded(
                ymdhms(2025, 9, 1, 0, 0, 0, UTC),
                ymdhms(2025, 9, 2, 0, 0, 0, UTC),
            ))
        );
    }

    #[test]
    fn and_of_two_open_tails() {
        let a = ymdhms(2025, 1, 1, 0, 0, 0, UTC);
        let and = AndCond::new(vec![
            Cond::from(TimeDeltaCond::new(a, 1000).unwrap()),
            Cond::from(TimeDeltaCond::new(a, 5000).unwrap()),
        ])
        .unwrap();
        let t = a.add_secs(10);
        assert_eq!(and.last_active_range(t), Some(DateRange::tail(a.add_secs(5))));
        assert!(and.next_ranges(t).is_empty());
        assert_eq!(and.next_ranges(a).first_range(), Some(&DateRange::tail(a.add_secs(5))));
    }
}
