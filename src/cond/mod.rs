pub mod combine;
pub mod daily;
pub mod delta;
pub mod first;
pub mod monthly;
pub mod nth;
pub mod span;
pub mod weekday;
pub mod yearly;

pub use crate::cond::combine::{AndCond, OrCond};
pub use crate::cond::daily::{DayPartCond, TimeBetweenCond};
pub use crate::cond::delta::TimeDeltaCond;
pub use crate::cond::first::FirstAfterStartCond;
pub use crate::cond::monthly::DayBetweenCond;
pub use crate::cond::nth::NthCond;
pub use crate::cond::span::TimeSpanCond;
pub use crate::cond::weekday::WeekDayCond;
pub use crate::cond::yearly::{DateBetweenCond, MonthBetweenCond};

use crate::range::DateRange;
use crate::rangeset::RangeSet;
use crate::time::Time;

/// The query contract every condition satisfies. All three queries are
/// pure; returned ranges are freshly constructed, never aliases of
/// condition state.
pub trait ActiveRanges {
    /// The most recent range whose start is at or before `t`, or `None`
    /// if the condition has not activated by `t`.
    fn last_active_range(&self, t: Time) -> Option<DateRange>;

    /// The upcoming ranges, all starting strictly after `t`. Primitives
    /// yield at most one; combinators may yield several. An exhausted
    /// condition yields the empty set.
    fn next_ranges(&self, t: Time) -> RangeSet;

    fn contains(&self, t: Time) -> bool {
        self.last_active_range(t).is_some_and(|r| r.contains(t))
    }

    fn next_start(&self, t: Time) -> Option<Time> {
        self.next_ranges(t).first_start()
    }

    /// The end of the last active range; `None` when there is none or it
    /// is open-ended.
    fn current_end(&self, t: Time) -> Option<Time> {
        self.last_active_range(t).and_then(|r| r.en)
    }
}

/// A condition over instants, as a tree of variants. Combinators own
/// their children; the whole tree is immutable after construction.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cond {
    TimeDelta(TimeDeltaCond),
    TimeBetween(TimeBetweenCond),
    DayPart(DayPartCond),
    WeekDay(WeekDayCond),
    DayBetween(DayBetweenCond),
    MonthBetween(MonthBetweenCond),
    DateBetween(DateBetweenCond),
    TimeSpan(TimeSpanCond),
    Or(OrCond),
    And(AndCond),
    Nth(NthCond),
    FirstAfterStart(FirstAfterStartCond),
}

impl ActiveRanges for Cond {
    fn last_active_range(&self, t: Time) -> Option<DateRange> {
        match self {
            Cond::TimeDelta(c) => c.last_active_range(t),
            Cond::TimeBetween(c) => c.last_active_range(t),
            Cond::DayPart(c) => c.last_active_range(t),
            Cond::WeekDay(c) => c.last_active_range(t),
            Cond::DayBetween(c) => c.last_active_range(t),
            Cond::MonthBetween(c) => c.last_active_range(t),
            Cond::DateBetween(c) => c.last_active_range(t),
            Cond::TimeSpan(c) => c.last_active_range(t),
            Cond::Or(c) => c.last_active_range(t),
            Cond::And(c) => c.last_active_range(t),
            Cond::Nth(c) => c.last_active_range(t),
            Cond::FirstAfterStart(c) => c.last_active_range(t),
        }
    }

    fn next_ranges(&self, t: Time) -> RangeSet {
        match self {
            Cond::TimeDelta(c) => c.next_ranges(t),
            Cond::TimeBetween(c) => c.next_ranges(t),
            Cond::DayPart(c) => c.next_ranges(t),
            Cond::WeekDay(c) => c.next_ranges(t),
            Cond::DayBetween(c) => c.next_ranges(t),
            Cond::MonthBetween(c) => c.next_ranges(t),
            Cond::DateBetween(c) => c.next_ranges(t),
            Cond::TimeSpan(c) => c.next_ranges(t),
            Cond::Or(c) => c.next_ranges(t),
            Cond::And(c) => c.next_ranges(t),
            Cond::Nth(c) => c.next_ranges(t),
            Cond::FirstAfterStart(c) => c.next_ranges(t),
        }
    }
}

impl Cond {
    /// Double-dispatch hook for external tree walks: calls exactly the
    /// visitor method for the active variant. Descending into combinator
    /// children is the visitor's own business.
    pub fn accept<V: Visitor + ?Sized>(&self, v: &mut V) {
        match self {
            Cond::TimeDelta(c) => v.visit_time_delta(c),
            Cond::TimeBetween(c) => v.visit_time_between(c),
            Cond::DayPart(c) => v.visit_day_part(c),
            Cond::WeekDay(c) => v.visit_week_day(c),
            Cond::DayBetween(c) => v.visit_day_between(c),
            Cond::MonthBetween(c) => v.visit_month_between(c),
            Cond::DateBetween(c) => v.visit_date_between(c),
            Cond::TimeSpan(c) => v.visit_time_span(c),
            Cond::Or(c) => v.visit_or(c),
            Cond::And(c) => v.visit_and(c),
            Cond::Nth(c) => v.visit_nth(c),
            Cond::FirstAfterStart(c) => v.visit_first_after_start(c),
        }
    }
}

/// Caller-supplied traversal callbacks; every method defaults to a no-op
/// so visitors only implement the variants they care about.
pub trait Visitor {
    fn visit_time_delta(&mut self, _c: &TimeDeltaCond) {}
    fn visit_time_between(&mut self, _c: &TimeBetweenCond) {}
    fn visit_day_part(&mut self, _c: &DayPartCond) {}
    fn visit_week_day(&mut self, _c: &WeekDayCond) {}
    fn visit_day_between(&mut self, _c: &DayBetweenCond) {}
    fn visit_month_between(&mut self, _c: &MonthBetweenCond) {}
    fn visit_date_between(&mut self, _c: &DateBetweenCond) {}
    fn visit_time_span(&mut self, _c: &TimeSpanCond) {}
    fn visit_or(&mut self, _c: &OrCond) {}
    fn visit_and(&mut self, _c: &AndCond) {}
    fn visit_nth(&mut self, _c: &NthCond) {}
    fn visit_first_after_start(&mut self, _c: &FirstAfterStartCond) {}
}

macro_rules! cond_from {
    ($($var:ident => $ty:ty),* $(,)?) => {$(
        impl From<$ty> for Cond {
            fn from(v: $ty) -> Self {
                Cond::$var(v)
            }
        }
    )*};
}

cond_from! {
    TimeDelta => TimeDeltaCond,
    TimeBetween => TimeBetweenCond,
    DayPart => DayPartCond,
    WeekDay => WeekDayCond,
    DayBetween => DayBetweenCond,
    MonthBetween => MonthBetweenCond,
    DateBetween => DateBetweenCond,
    TimeSpan => TimeSpanCond,
    Or => OrCond,
    And => AndCond,
    Nth => NthCond,
    FirstAfterStart => FirstAfterStartCond,
}
