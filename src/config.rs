use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::daytime::{DayTime, MonthDay};

/// A day-part window `[start, end)` in wall-clock time; `end` may be
/// 24:00, meaning the end of the day.
#[must_use]
#[derive(Debug, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct DayTimeRange {
    pub start: DayTime,
    pub end: DayTime,
}

/// A month-day window as stored in configuration. Months here are
/// 1-based, unlike the 0-based months used everywhere else; the factory
/// normalises on lookup.
#[must_use]
#[derive(Debug, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct MonthDayRange {
    pub start: MonthDay,
    pub end: MonthDay,
}

/// One window per hemisphere; the hemisphere flag picks which applies.
#[must_use]
#[derive(Debug, Eq, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct SeasonWindows {
    pub northern: MonthDayRange,
    pub southern: MonthDayRange,
}

/// The locale tables consumed by the factory and the parser. Immutable
/// for the lifetime of condition creation; name lookups are
/// case-insensitive, with `weekday_numbers`, `day_parts` and `seasons`
/// keyed by lowercase names.
#[must_use]
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Config {
    pub week_starts_on_monday: bool,
    pub southern_hemisphere: bool,
    /// Index 0 = Sunday.
    pub day_names: [String; 7],
    pub month_names: [String; 12],
    pub short_month_names: [String; 12],
    pub day_parts: BTreeMap<String, DayTimeRange>,
    pub seasons: BTreeMap<String, SeasonWindows>,
    pub weekday_numbers: BTreeMap<String, u32>,
}

impl Config {
    /// Weekday index (0 = Sunday) for a configured name.
    #[must_use]
    pub fn weekday_number(&self, name: &str) -> Option<u32> {
        self.weekday_numbers.get(&name.to_ascii_lowercase()).copied()
    }

    /// 0-based month index for a full or short month name.
    #[must_use]
    pub fn month_number(&self, name: &str) -> Option<u32> {
        self.month_names
            .iter()
            .position(|m| m.eq_ignore_ascii_case(name))
            .or_else(|| self.short_month_names.iter().position(|m| m.eq_ignore_ascii_case(name)))
            .map(|i| i as u32)
    }

    #[must_use]
    pub fn day_part(&self, name: &str) -> Option<&DayTimeRange> {
        self.day_parts.get(&name.to_ascii_lowercase())
    }

    #[must_use]
    pub fn season(&self, name: &str) -> Option<&SeasonWindows> {
        self.seasons.get(&name.to_ascii_lowercase())
    }
}

const fn dt(hour: u32, minute: u32) -> DayTime {
    DayTime { hour, minute }
}

/// 1-based month, as the season tables are written.
const fn md(month: u32, day: u32) -> MonthDay {
    MonthDay { month, day }
}

const fn window(start: MonthDay, end: MonthDay) -> MonthDayRange {
    MonthDayRange { start, end }
}

impl Default for Config {
    fn default() -> Self {
        let day_parts = BTreeMap::from(
            [
                ("night", DayTimeRange { start: dt(0, 0), end: dt(6, 0) }),
                ("morning", DayTimeRange { start: dt(6, 0), end: dt(12, 0) }),
                ("afternoon", DayTimeRange { start: dt(12, 0), end: dt(18, 0) }),
                ("evening", DayTimeRange { start: dt(18, 0), end: DayTime::END_OF_DAY }),
            ]
            .map(|(k, v)| (k.to_owned(), v)),
        );

        // Solstice/equinox windows; each southern window is the northern
        // window of the opposite season.
        let spring = window(md(3, 20), md(6, 20));
        let summer = window(md(6, 21), md(9, 22));
        let autumn = window(md(9, 23), md(12, 20));
        let winter = window(md(12, 21), md(3, 19));
        let seasons = BTreeMap::from(
            [
                ("spring", SeasonWindows { northern: spring, southern: autumn }),
                ("summer", SeasonWindows { northern: summer, southern: winter }),
                ("autumn", SeasonWindows { northern: autumn, southern: spring }),
                ("fall", SeasonWindows { northern: autumn, southern: spring }),
                ("winter", SeasonWindows { northern: winter, southern: summer }),
            ]
            .map(|(k, v)| (k.to_owned(), v)),
        );

        let weekday_numbers = BTreeMap::from(
            [
                ("sunday", 0),
                ("sun", 0),
                ("monday", 1),
                ("mon", 1),
                ("tuesday", 2),
                ("tue", 2),
                ("wednesday", 3),
                ("wed", 3),
                ("thursday", 4),
                ("thu", 4),
                ("friday", 5),
                ("fri", 5),
                ("saturday", 6),
                ("sat", 6),
            ]
            .map(|(k, v)| (k.to_owned(), v)),
        );

        Self {
            week_starts_on_monday: true,
            southern_hemisphere: false,
            day_names: [
                "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
            ]
            .map(String::from),
            month_names: [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]
            .map(String::from),
            short_month_names: [
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]
            .map(String::from),
            day_parts,
            seasons,
            weekday_numbers,
        }
    }
}
