use std::fmt::Write;

use crate::cond::{
    AndCond, Cond, DateBetweenCond, DayBetweenCond, DayPartCond, FirstAfterStartCond,
    MonthBetweenCond, NthCond, OrCond, TimeBetweenCond, TimeDeltaCond, TimeSpanCond, Visitor,
    WeekDayCond,
};
use crate::config::Config;
use crate::daytime::{DayTime, MonthDay};

/// Renders a condition as a surface-syntax phrase. The output re-parses
/// to a structurally equal condition, given the same config and (for
/// `after`/`nth` forms) the same reference instant.
#[must_use]
pub fn describe(cond: &Cond, config: &Config) -> String {
    let mut d = Describer { config, out: String::new() };
    cond.accept(&mut d);
    d.out
}

struct Describer<'c> {
    config: &'c Config,
    out: String,
}

impl Describer<'_> {
    fn push_child(&mut self, c: &Cond) {
        // Same-kind nesting would be swallowed by the outer list, so
        // nested combinators go in parentheses.
        if matches!(c, Cond::Or(_) | Cond::And(_)) {
            self.out.push('(');
            c.accept(self);
            self.out.push(')');
        } else {
            c.accept(self);
        }
    }

    fn push_joined(&mut self, head: &str, sep: &str, children: &[Cond]) {
        self.out.push_str(head);
        self.out.push(' ');
        for (i, c) in children.iter().enumerate() {
            if i > 0 {
                let _ = write!(self.out, " {sep} ");
            }
            self.push_child(c);
        }
    }

    fn push_day_time(&mut self, t: DayTime) {
        let _ = write!(self.out, "{}:{:02}", t.hour, t.minute);
    }

    fn push_month_day(&mut self, d: MonthDay) {
        let month = self.config.month_names[d.month as usize].to_ascii_lowercase();
        let _ = write!(self.out, "{month} {}", d.day);
    }

    fn push_units(&mut self, parts: &[(i64, &str)]) {
        let mut first = true;
        for &(n, unit) in parts {
            if n == 0 {
                continue;
            }
            if !first {
                self.out.push_str(", ");
            }
            let _ = write!(self.out, "{n} {unit}");
            first = false;
        }
    }
}

impl Visitor for Describer<'_> {
    fn visit_time_delta(&mut self, c: &TimeDeltaCond) {
        let (days, rem) = (c.delta_ms / 86_400_000, c.delta_ms % 86_400_000);
        let (hours, rem) = (rem / 3_600_000, rem % 3_600_000);
        let (minutes, rem) = (rem / 60_000, rem % 60_000);
        let (seconds, millis) = (rem / 1000, rem % 1000);
        let mut parts = Vec::new();
        for (n, unit) in [(days, "days"), (hours, "hours"), (minutes, "minutes")] {
            if n > 0 {
                parts.push(format!("{n} {unit}"));
            }
        }
        if millis > 0 {
            parts.push(format!("{seconds}.{millis:03} seconds"));
        } else if seconds > 0 || parts.is_empty() {
            parts.push(format!("{seconds} seconds"));
        }
        let _ = write!(self.out, "after {}", parts.join(", "));
    }

    fn visit_time_between(&mut self, c: &TimeBetweenCond) {
        // Recover the authored end from the stored inclusive minute.
        let end = if c.inclusive {
            c.end
        } else {
            let (mut hour, mut minute) = (c.end.hour, c.end.minute + 1);
            if minute == 60 {
                (hour, minute) = (hour + 1, 0);
            }
            if hour == 24 {
                hour = 0;
            }
            DayTime { hour, minute }
        };
        self.out.push_str("daily from ");
        self.push_day_time(c.start);
        self.out.push_str(" to ");
        self.push_day_time(end);
        self.out.push_str(if c.inclusive { " inclusive" } else { " exclusive" });
    }

    fn visit_day_part(&mut self, c: &DayPartCond) {
        self.out.push_str(&c.name);
    }

    fn visit_week_day(&mut self, c: &WeekDayCond) {
        let name = self.config.day_names[c.weekday as usize].to_ascii_lowercase();
        self.out.push_str(&name);
    }

    fn visit_day_between(&mut self, c: &DayBetweenCond) {
        if c.start_day == c.end_day {
            let _ = write!(self.out, "monthly on day {}", c.start_day);
        } else {
            let _ = write!(self.out, "monthly from day {} to day {}", c.start_day, c.end_day);
        }
    }

    fn visit_month_between(&mut self, c: &MonthBetweenCond) {
        let start = self.config.month_names[c.start_month as usize].to_ascii_lowercase();
        if c.start_month == c.end_month {
            // The bare month name is the tersest named form.
            self.out.push_str(&start);
        } else {
            let end = self.config.month_names[c.end_month as usize].to_ascii_lowercase();
            let _ = write!(self.out, "yearly from month {start} to month {end}");
        }
    }

    fn visit_date_between(&mut self, c: &DateBetweenCond) {
        if c.start == c.end {
            self.out.push_str("yearly on date ");
            self.push_month_day(c.start);
        } else {
            self.out.push_str("yearly from date ");
            self.push_month_day(c.start);
            self.out.push_str(" to date ");
            self.push_month_day(c.end);
        }
    }

    fn visit_time_span(&mut self, c: &TimeSpanCond) {
        self.out.push_str("span of ");
        self.push_units(&[
            (c.months, "months"),
            (c.days, "days"),
            (c.hours, "hours"),
            (c.minutes, "minutes"),
            (c.seconds, "seconds"),
        ]);
    }

    fn visit_or(&mut self, c: &OrCond) {
        self.push_joined("either", "or", &c.children);
    }

    fn visit_and(&mut self, c: &AndCond) {
        self.push_joined("both", "and", &c.children);
    }

    fn visit_nth(&mut self, c: &NthCond) {
        let _ = write!(self.out, "nth {} ", c.n);
        self.push_child(&c.child);
    }

    fn visit_first_after_start(&mut self, c: &FirstAfterStartCond) {
        self.out.push_str("first ");
        self.push_child(&c.b);
        self.out.push_str(" after start of ");
        self.push_child(&c.a);
        self.out.push_str(if c.inclusive { " inclusive" } else { " exclusive" });
    }
}
