use crate::cond::{Cond, DateBetweenCond, DayPartCond, OrCond, TimeBetweenCond, WeekDayCond};
use crate::config::Config;
use crate::daytime::MonthDay;
use crate::error::{Error, Result};

/// Builds configured conditions from the name tables. Borrows the config
/// for the lifetime of condition creation.
#[must_use]
#[derive(Debug, Clone, Copy)]
pub struct Factory<'c> {
    config: &'c Config,
}

impl<'c> Factory<'c> {
    pub const fn new(config: &'c Config) -> Self {
        Self { config }
    }

    pub fn weekday(&self, name: &str) -> Result<Cond> {
        let n = self
            .config
            .weekday_number(name)
            .ok_or_else(|| Error::UnknownName(name.to_owned()))?;
        Ok(WeekDayCond::new(n)?.into())
    }

    pub fn weekend(&self) -> Result<Cond> {
        let days = if self.config.week_starts_on_monday { [6, 0] } else { [5, 6] };
        self.days_union(&days)
    }

    pub fn workday(&self) -> Result<Cond> {
        let days = if self.config.week_starts_on_monday { [1, 2, 3, 4, 5] } else { [0, 1, 2, 3, 4] };
        self.days_union(&days)
    }

    fn days_union(&self, days: &[u32]) -> Result<Cond> {
        let children = days
            .iter()
            .map(|&d| WeekDayCond::new(d).map(Cond::from))
            .collect::<Result<Vec<_>>>()?;
        Ok(OrCond::new(children)?.into())
    }

    pub fn day_part(&self, name: &str) -> Result<Cond> {
        let window =
            self.config.day_part(name).ok_or_else(|| Error::UnknownName(name.to_owned()))?;
        let band = TimeBetweenCond::new(window.start, window.end, false)?;
        Ok(DayPartCond::new(name.to_ascii_lowercase(), band).into())
    }

    pub fn season(&self, name: &str) -> Result<Cond> {
        let windows =
            self.config.season(name).ok_or_else(|| Error::UnknownName(name.to_owned()))?;
        let w = if self.config.southern_hemisphere { windows.southern } else { windows.northern };
        // Season tables carry 1-based months.
        let start = MonthDay::new(
            w.start
                .month
                .checked_sub(1)
                .ok_or_else(|| Error::InvalidRange("season month 0 in a 1-based table".to_owned()))?,
            w.start.day,
        )?;
        let end = MonthDay::new(
            w.end
                .month
                .checked_sub(1)
                .ok_or_else(|| Error::InvalidRange("season month 0 in a 1-based table".to_owned()))?,
            w.end.day,
        )?;
        Ok(DateBetweenCond::new(start, end).into())
    }
}

#[cfg(test)]
mod tests {
    use chrono_tz::UTC;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cond::ActiveRanges;
    use crate::time::ymdhms;

    #[test]
    fn weekday_lookup() {
        let cfg = Config::default();
        let f = Factory::new(&cfg);
        assert_eq!(f.weekday("Friday").unwrap(), Cond::WeekDay(WeekDayCond::new(5).unwrap()));
        assert_eq!(f.weekday("sat").unwrap(), Cond::WeekDay(WeekDayCond::new(6).unwrap()));
        assert!(matches!(f.weekday("someday"), Err(Error::UnknownName(_))));
    }

    #[test]
    fn weekend_follows_the_week_start() {
        let mut cfg = Config::default();
        let sat = ymdhms(2024, 3, 9, 12, 0, 0, UTC);
        let fri = ymdhms(2024, 3, 8, 12, 0, 0, UTC);
        let sun = ymdhms(2024, 3, 10, 12, 0, 0, UTC);

        let weekend = Factory::new(&cfg).weekend().unwrap();
        assert!(weekend.contains(sat));
        assert!(weekend.contains(sun));
        assert!(!weekend.contains(fri));

        cfg.week_starts_on_monday = false;
        let weekend = Factory::new(&cfg).weekend().unwrap();
        assert!(weekend.contains(fri));
        assert!(weekend.contains(sat));
        assert!(!weekend.contains(sun));
    }

    #[test]
    fn workday_follows_the_week_start() {
        let mut cfg = Config::default();
        let fri = ymdhms(2024, 3, 8, 12, 0, 0, UTC);
        let sun = ymdhms(2024, 3, 10, 12, 0, 0, UTC);
        let mon = ymdhms(2024, 3, 11, 12, 0, 0, UTC);

        let workday = Factory::new(&cfg).workday().unwrap();
        assert!(workday.contains(fri));
        assert!(workday.contains(mon));
        assert!(!workday.contains(sun));

        cfg.week_starts_on_monday = false;
        let workday = Factory::new(&cfg).workday().unwrap();
        assert!(workday.contains(sun));
        assert!(!workday.contains(fri));
    }

    #[test]
    fn day_part_keeps_its_name() {
        let cfg = Config::default();
        let c = Factory::new(&cfg).day_part("Morning").unwrap();
        let Cond::DayPart(part) = &c else { panic!("expected a day part") };
        assert_eq!(part.name, "morning");
        assert!(c.contains(ymdhms(2024, 3, 9, 8, 0, 0, UTC)));
        assert!(!c.contains(ymdhms(2024, 3, 9, 13, 0, 0, UTC)));
    }

    #[test]
    fn season_picks_the_hemisphere() {
        let mut cfg = Config::default();
        let july = ymdhms(2024, 7, 10, 12, 0, 0, UTC);
        let january = ymdhms(2024, 1, 10, 12, 0, 0, UTC);

        let summer = Factory::new(&cfg).season("summer").unwrap();
        assert!(summer.contains(july));
        assert!(!summer.contains(january));

        cfg.southern_hemisphere = true;
        let summer = Factory::new(&cfg).season("summer").unwrap();
        assert!(summer.contains(january));
        assert!(!summer.contains(july));
    }

    #[test]
    fn unknown_names_fail() {
        let cfg = Config::default();
        let f = Factory::new(&cfg);
        assert!(matches!(f.day_part("brunch"), Err(Error::UnknownName(_))));
        assert!(matches!(f.season("monsoon"), Err(Error::UnknownName(_))));
    }
}
