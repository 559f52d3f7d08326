use auto_ops::impl_op_ex;
use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Timelike,
};
use chrono_tz::Tz;
use derive_more::Display;

pub fn ymdhms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32, tz: Tz) -> Time {
    Time::new(tz.with_ymd_and_hms(year, month, day, hour, min, sec).unwrap())
}

/// Builds a date, clamping the day to the length of the month.
fn clamped_ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    for max in (28..=31).rev() {
        if let Some(d) = NaiveDate::from_ymd_opt(year, month, day.clamp(1, max)) {
            return d;
        }
    }
    panic!("bug: invalid date {year}-{month}-{day}");
}

/// A civil timestamp in the ambient calendar of its timezone. Arithmetic
/// is wall-clock: day and month steps keep the time of day, month steps
/// clamp the day to the target month's length. Millisecond resolution is
/// the contract; finer components are carried but never produced.
#[must_use]
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, Display, Ord, PartialOrd)]
#[display("{t}")]
pub struct Time {
    t: DateTime<Tz>,
}

/// Creation
impl Time {
    pub const fn new(t: DateTime<Tz>) -> Self {
        Self { t }
    }

    /// Attaches the timezone to a naive local datetime. Instants inside a
    /// DST gap resolve forward to the next representable minute; ambiguous
    /// instants take the earlier offset.
    pub fn from_local(d: NaiveDateTime, tz: Tz) -> Self {
        let mut d = d;
        loop {
            match tz.from_local_datetime(&d) {
                LocalResult::Single(t) => return Self::new(t),
                LocalResult::Ambiguous(min, _) => return Self::new(min),
                LocalResult::None => {}
            }
            d = (d + Duration::minutes(1)).with_second(0).unwrap();
        }
    }

    /// Midnight of the given date, with a 0-based month that may run
    /// outside [0,11] and rolls the year accordingly. The day clamps to
    /// the length of the resolved month.
    pub fn from_ymd0(year: i32, month0: i32, day: u32, tz: Tz) -> Self {
        let y = year + month0.div_euclid(12);
        let m = month0.rem_euclid(12) as u32 + 1;
        Self::from_local(clamped_ymd(y, m, day).and_time(NaiveTime::MIN), tz)
    }
}

/// Accessors
impl Time {
    #[must_use]
    pub fn tz(&self) -> Tz {
        self.t.timezone()
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.t.year()
    }

    #[must_use]
    pub fn month0(&self) -> u32 {
        self.t.month0()
    }

    #[must_use]
    pub fn day(&self) -> u32 {
        self.t.day()
    }

    #[must_use]
    pub fn hour(&self) -> u32 {
        self.t.hour()
    }

    #[must_use]
    pub fn minute(&self) -> u32 {
        self.t.minute()
    }

    #[must_use]
    pub fn second(&self) -> u32 {
        self.t.second()
    }

    /// Day of the week, 0 = Sunday .. 6 = Saturday.
    #[must_use]
    pub fn weekday0(&self) -> u32 {
        self.t.weekday().num_days_from_sunday()
    }

    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.t.timestamp_millis()
    }
}

/// Wall-clock arithmetic
impl Time {
    /// Moves to the given date keeping the time of day. If that time does
    /// not exist there (DST gap), takes the next minute that does; if it
    /// is ambiguous, keeps the current offset where possible.
    pub fn with_date(&self, d: NaiveDate) -> Self {
        let mut tod = self.t.time();
        loop {
            match self.tz().from_local_datetime(&d.and_time(tod)) {
                LocalResult::Single(t) => return Self::new(t),
                LocalResult::Ambiguous(min, max) => {
                    let keep = min.offset().fix() == self.t.offset().fix();
                    return Self::new(if keep { min } else { max });
                }
                LocalResult::None => {}
            }
            tod = (tod + Duration::minutes(1)).with_second(0).unwrap();
        }
    }

    pub fn add_millis(&self, ms: i64) -> Self {
        Self::new(self.t + Duration::milliseconds(ms))
    }

    pub fn add_secs(&self, secs: i64) -> Self {
        Self::new(self.t + Duration::seconds(secs))
    }

    pub fn add_mins(&self, mins: i64) -> Self {
        Self::new(self.t + Duration::minutes(mins))
    }

    pub fn add_hours(&self, hours: i64) -> Self {
        Self::new(self.t + Duration::hours(hours))
    }

    pub fn add_days(&self, days: i64) -> Self {
        self.with_date(self.t.date_naive() + Duration::days(days))
    }

    pub fn add_months(&self, months: i32) -> Self {
        let total = self.month0() as i32 + months;
        let y = self.year() + total.div_euclid(12);
        let m = total.rem_euclid(12) as u32 + 1;
        self.with_date(clamped_ymd(y, m, self.day()))
    }
}

/// Boundary anchors
impl Time {
    /// Midnight at the start of this day.
    pub fn day_start(&self) -> Self {
        Self::from_local(self.t.date_naive().and_time(NaiveTime::MIN), self.tz())
    }

    /// The given wall-clock time on this day. Hour 24 means midnight at
    /// the end of the day.
    pub fn at_hm(&self, hour: u32, minute: u32) -> Self {
        if hour >= 24 {
            return self.day_start().add_days(1).at_hm(hour - 24, minute);
        }
        let tod = NaiveTime::from_hms_opt(hour, minute, 0).unwrap();
        Self::from_local(self.t.date_naive().and_time(tod), self.tz())
    }

    pub fn floor_secs(&self) -> Self {
        Self::new(self.t.with_nanosecond(0).unwrap())
    }

    pub fn floor_mins(&self) -> Self {
        Self::new(self.t.with_second(0).unwrap().with_nanosecond(0).unwrap())
    }

    pub fn floor_hours(&self) -> Self {
        Self::new(self.t.with_minute(0).unwrap().with_second(0).unwrap().with_nanosecond(0).unwrap())
    }

    /// Midnight on the first of this month.
    pub fn month_start(&self) -> Self {
        Self::from_ymd0(self.year(), self.month0() as i32, 1, self.tz())
    }
}

impl From<DateTime<Tz>> for Time {
    fn from(v: DateTime<Tz>) -> Self {
        Self::new(v)
    }
}

impl From<Time> for DateTime<Tz> {
    fn from(v: Time) -> Self {
        v.t
    }
}

impl_op_ex!(+ |a: &Time, b: &Duration| -> Time { Time::new(a.t + *b) });
impl_op_ex!(-|a: &Time, b: &Duration| -> Time { Time::new(a.t - *b) });
impl_op_ex!(-|a: &Time, b: &Time| -> Duration { a.t - b.t });
