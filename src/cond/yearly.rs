use crate::cond::ActiveRanges;
use crate::daytime::MonthDay;
use crate::error::{Error, Result};
use crate::range::DateRange;
use crate::rangeset::RangeSet;
use crate::time::Time;

/// A month band anchored to calendar years, both months included
/// (0-based). A start month after the end month wraps across New Year.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthBetweenCond {
    pub start_month: u32,
    pub end_month: u32,
}

impl MonthBetweenCond {
    pub fn new(start_month: u32, end_month: u32) -> Result<Self> {
        for month in [start_month, end_month] {
            if month > 11 {
                return Err(Error::InvalidRange(format!("month {month} outside 0-11")));
            }
        }
        Ok(Self { start_month, end_month })
    }

    fn wraps(&self) -> bool {
        self.end_month < self.start_month
    }

    fn range_from(&self, year: i32, t: Time) -> DateRange {
        let st = Time::from_ymd0(year, self.start_month as i32, 1, t.tz());
        let en_year = year + i32::from(self.wraps());
        let en = Time::from_ymd0(en_year, self.end_month as i32 + 1, 1, t.tz());
        DateRange::bounded(st, en)
    }
}

impl ActiveRanges for MonthBetweenCond {
    fn last_active_range(&self, t: Time) -> Option<DateRange> {
        let back = i32::from(t.month0() < self.start_month);
        Some(self.range_from(t.year() - back, t))
    }

    fn next_ranges(&self, t: Time) -> RangeSet {
        let fwd = i32::from(t.month0() >= self.start_month);
        RangeSet::from_range(self.range_from(t.year() + fwd, t))
    }
}

/// A calendar-date band anchored to calendar years, both days included.
/// An end date before the start date wraps across New Year; days beyond
/// a month's length clamp to its last day.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateBetweenCond {
    pub start: MonthDay,
    pub end: MonthDay,
}

impl DateBetweenCond {
    pub const fn new(start: MonthDay, end: MonthDay) -> Self {
        Self { start, end }
    }

    fn wraps(&self) -> bool {
        self.end < self.start
    }

    fn range_from(&self, year: i32, t: Time) -> DateRange {
        let st = Time::from_ymd0(year, self.start.month as i32, self.start.day, t.tz());
        let en_year = year + i32::from(self.wraps());
        let en = Time::from_ymd0(en_year, self.end.month as i32, self.end.day, t.tz()).add_days(1);
        DateRange::bounded(st, en)
    }
}

impl ActiveRanges for DateBetweenCond {
    fn last_active_range(&self, t: Time) -> Option<DateRange> {
        let back = i32::from((t.month0(), t.day()) < (self.start.month, self.start.day));
        Some(self.range_from(t.year() - back, t))
    }

    fn next_ranges(&self, t: Time) -> RangeSet {
        let fwd = i32::from((t.month0(), t.day()) >= (self.start.month, self.start.day));
        RangeSet::from_range(self.range_from(t.year() + fwd, t))
    }
}

#[cfg(test)]
mod tests {
    use chrono_tz::UTC;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::time::ymdhms;

    fn md(month: u32, day: u32) -> MonthDay {
        MonthDay::new(month, day).unwrap()
    }

    #[test]
    fn month_band_within_the_year() {
        // March through May.
        let c = MonthBetweenCond::new(2, 4).unwrap();
        let t = ymdhms(2024, 4, 10, 0, 0, 0, UTC);
        let expected = DateRange::bounded(
            ymdhms(2024, 3, 1, 0, 0, 0, UTC),
            ymdhms(2024, 6, 1, 0, 0, 0, UTC),
        );
        assert_eq!(c.last_active_range(t), Some(expected));
        assert!(c.contains(t));
        assert_eq!(c.next_start(t), Some(ymdhms(2025, 3, 1, 0, 0, 0, UTC)));

        let early = ymdhms(2024, 2, 1, 0, 0, 0, UTC);
        assert_eq!(
            c.last_active_range(early),
            Some(DateRange::bounded(
                ymdhms(2023, 3, 1, 0, 0, 0, UTC),
                ymdhms(2023, 6, 1, 0, 0, 0, UTC),
            ))
        );
        assert_eq!(c.next_start(early), Some(ymdhms(2024, 3, 1, 0, 0, 0, UTC)));
    }

    #[test]
    fn month_band_wrapping_new_year() {
        // November through January.
        let c = MonthBetweenCond::new(10, 0).unwrap();
        let dec = ymdhms(2024, 12, 15, 0, 0, 0, UTC);
        let expected = DateRange::bounded(
            ymdhms(2024, 11, 1, 0, 0, 0, UTC),
            ymdhms(2025, 2, 1, 0, 0, 0, UTC),
        );
        assert_eq!(c.last_active_range(dec), Some(expected));
        assert!(c.contains(ymdhms(2025, 1, 20, 0, 0, 0, UTC)));
        assert!(!c.contains(ymdhms(2025, 2, 1, 0, 0, 0, UTC)));
    }

    #[test]
    fn december_band_ends_at_new_year() {
        let c = MonthBetweenCond::new(11, 11).unwrap();
        let t = ymdhms(2024, 12, 15, 0, 0, 0, UTC);
        assert_eq!(c.current_end(t), Some(ymdhms(2025, 1, 1, 0, 0, 0, UTC)));
    }

    #[test]
    fn date_band_spanning_the_year() {
        // December 10 through February 5.
        let c = DateBetweenCond::new(md(11, 10), md(1, 5));
        let t = ymdhms(2024, 7, 15, 0, 0, 0, UTC);
        assert_eq!(
            c.last_active_range(t),
            Some(DateRange::bounded(
                ymdhms(2023, 12, 10, 0, 0, 0, UTC),
                ymdhms(2024, 2, 6, 0, 0, 0, UTC),
            ))
        );
        assert_eq!(
            c.next_ranges(t).as_slice(),
            &[DateRange::bounded(
                ymdhms(2024, 12, 10, 0, 0, 0, UTC),
                ymdhms(2025, 2, 6, 0, 0, 0, UTC),
            )]
        );
        assert!(!c.contains(t));
        assert!(c.contains(ymdhms(2024, 1, 20, 12, 0, 0, UTC)));
    }

    #[test]
    fn date_band_single_day() {
        let c = DateBetweenCond::new(md(6, 4), md(6, 4));
        let t = ymdhms(2024, 7, 4, 12, 0, 0, UTC);
        assert!(c.contains(t));
        assert_eq!(c.current_end(t), Some(ymdhms(2024, 7, 5, 0, 0, 0, UTC)));
        assert_eq!(c.next_start(t), Some(ymdhms(2025, 7, 4, 0, 0, 0, UTC)));
    }

    #[test]
    fn leap_day_band_clamps_off_years() {
        let c = DateBetweenCond::new(md(1, 29), md(1, 29));
        let t = ymdhms(2023, 2, 20, 0, 0, 0, UTC);
        // 2023 has no Feb 29; the band clamps to Feb 28.
        assert_eq!(
            c.next_ranges(t).as_slice(),
            &[DateRange::bounded(
                ymdhms(2023, 2, 28, 0, 0, 0, UTC),
                ymdhms(2023, 3, 1, 0, 0, 0, UTC),
            )]
        );
    }
}
