use strum::EnumString;

use crate::cond::{
    AndCond, Cond, DateBetweenCond, DayBetweenCond, FirstAfterStartCond, MonthBetweenCond,
    NthCond, OrCond, TimeBetweenCond, TimeDeltaCond, TimeSpanCond,
};
use crate::config::Config;
use crate::daytime::{DayTime, MonthDay};
use crate::error::{Error, Result};
use crate::factory::Factory;
use crate::time::Time;

/// Parses a condition phrase. Keywords are lowercase and case-sensitive;
/// configured names (weekdays, months, day parts, seasons) are not.
/// `reference` anchors the relative forms, `after …` and `nth …`.
pub fn parse(input: &str, reference: Time, config: &Config) -> Result<Cond> {
    let tokens = lex(input)?;
    let mut p = Parser { tokens, pos: 0, reference, config };
    let cond = p.cond()?;
    p.expect_end()?;
    Ok(cond)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    /// Digits with an optional fraction, kept as text.
    Number(String),
    Colon,
    Comma,
    Open,
    Close,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Word(w) => format!("'{w}'"),
            Token::Number(n) => format!("'{n}'"),
            Token::Colon => "':'".to_owned(),
            Token::Comma => "','".to_owned(),
            Token::Open => "'('".to_owned(),
            Token::Close => "')'".to_owned(),
        }
    }
}

fn lex(input: &str) -> Result<Vec<Token>> {
    let mut out = Vec::new();
    let mut chars = input.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            _ if c.is_whitespace() => {
                chars.next();
            }
            ':' => {
                chars.next();
                out.push(Token::Colon);
            }
            ',' => {
                chars.next();
                out.push(Token::Comma);
            }
            '(' => {
                chars.next();
                out.push(Token::Open);
            }
            ')' => {
                chars.next();
                out.push(Token::Close);
            }
            _ if c.is_ascii_digit() || c == '.' => {
                let mut text = String::new();
                while chars.peek().is_some_and(|c| c.is_ascii_digit()) {
                    text.push(chars.next().unwrap());
                }
                if chars.peek() == Some(&'.') {
                    text.push(chars.next().unwrap());
                    if !chars.peek().is_some_and(|c| c.is_ascii_digit()) {
                        return Err(Error::Parse(format!("dangling decimal point in '{text}'")));
                    }
                    while chars.peek().is_some_and(|c| c.is_ascii_digit()) {
                        text.push(chars.next().unwrap());
                    }
                }
                out.push(Token::Number(text));
            }
            _ if c.is_alphabetic() => {
                let mut text = String::new();
                while chars.peek().is_some_and(|c| c.is_alphabetic()) {
                    text.push(chars.next().unwrap());
                }
                out.push(Token::Word(text));
            }
            _ => return Err(Error::Parse(format!("unexpected character '{c}'"))),
        }
    }
    Ok(out)
}

#[derive(Debug, Clone, Copy, EnumString)]
#[strum(serialize_all = "lowercase")]
enum DeltaUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl DeltaUnit {
    const fn millis(self) -> i64 {
        match self {
            DeltaUnit::Seconds => 1000,
            DeltaUnit::Minutes => 60 * 1000,
            DeltaUnit::Hours => 60 * 60 * 1000,
            DeltaUnit::Days => 24 * 60 * 60 * 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, EnumString)]
#[strum(serialize_all = "lowercase")]
enum SpanUnit {
    Months,
    Days,
    Hours,
    Minutes,
    Seconds,
}

struct Parser<'c> {
    tokens: Vec<Token>,
    pos: usize,
    reference: Time,
    config: &'c Config,
}

/// Token plumbing
impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn eat(&mut self, tok: &Token) -> bool {
        if self.peek() == Some(tok) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn eat_word(&mut self, word: &str) -> bool {
        if matches!(self.peek(), Some(Token::Word(w)) if w == word) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn unexpected(&self, wanted: &str) -> Error {
        match self.peek() {
            Some(t) => Error::Parse(format!("expected {wanted}, found {}", t.describe())),
            None => Error::Parse(format!("expected {wanted}, found end of input")),
        }
    }

    fn expect_word(&mut self, word: &str) -> Result<()> {
        if self.eat_word(word) { Ok(()) } else { Err(self.unexpected(&format!("'{word}'"))) }
    }

    fn expect_end(&self) -> Result<()> {
        match self.peek() {
            None => Ok(()),
            Some(t) => Err(Error::Parse(format!("trailing input at {}", t.describe()))),
        }
    }

    fn integer(&mut self) -> Result<u32> {
        match self.peek() {
            Some(Token::Number(s)) if !s.contains('.') => {
                let n = s.parse()?;
                self.pos += 1;
                Ok(n)
            }
            _ => Err(self.unexpected("a number")),
        }
    }

    fn frac(&mut self) -> Result<f64> {
        match self.peek() {
            Some(Token::Number(s)) => {
                let n = s
                    .parse()
                    .map_err(|_| Error::Parse(format!("malformed number '{s}'")))?;
                self.pos += 1;
                Ok(n)
            }
            _ => Err(self.unexpected("a number")),
        }
    }

    fn word(&mut self, wanted: &str) -> Result<String> {
        match self.peek() {
            Some(Token::Word(w)) => {
                let w = w.clone();
                self.pos += 1;
                Ok(w)
            }
            _ => Err(self.unexpected(wanted)),
        }
    }

    fn inclusivity(&mut self) -> Result<bool> {
        if self.eat_word("inclusive") {
            Ok(true)
        } else if self.eat_word("exclusive") {
            Ok(false)
        } else {
            Err(self.unexpected("'inclusive' or 'exclusive'"))
        }
    }
}

/// Grammar productions
impl Parser<'_> {
    fn cond(&mut self) -> Result<Cond> {
        match self.peek() {
            Some(Token::Open) => {
                self.pos += 1;
                let c = self.cond()?;
                if self.eat(&Token::Close) { Ok(c) } else { Err(self.unexpected("')'")) }
            }
            Some(Token::Word(w)) => match w.as_str() {
                "either" => self.either(),
                "both" => self.both(),
                "after" => self.after(),
                "weekend" => {
                    self.pos += 1;
                    Factory::new(self.config).weekend()
                }
                "workday" => {
                    self.pos += 1;
                    Factory::new(self.config).workday()
                }
                "monthly" => self.monthly(),
                "yearly" => self.yearly(),
                "daily" => self.daily(),
                "first" => self.first_after_start(),
                "nth" => self.nth(),
                "span" => self.span(),
                _ => {
                    let w = w.clone();
                    self.pos += 1;
                    self.named(&w)
                }
            },
            _ => Err(self.unexpected("a condition")),
        }
    }

    fn either(&mut self) -> Result<Cond> {
        self.pos += 1;
        let mut children = vec![self.cond()?];
        self.expect_word("or")?;
        children.push(self.cond()?);
        while self.eat_word("or") {
            children.push(self.cond()?);
        }
        Ok(OrCond::new(children)?.into())
    }

    fn both(&mut self) -> Result<Cond> {
        self.pos += 1;
        let mut children = vec![self.cond()?];
        self.expect_word("and")?;
        children.push(self.cond()?);
        while self.eat_word("and") {
            children.push(self.cond()?);
        }
        Ok(AndCond::new(children)?.into())
    }

    fn after(&mut self) -> Result<Cond> {
        self.pos += 1;
        let mut total = 0.0;
        loop {
            let amount = self.frac()?;
            let unit = self.delta_unit()?;
            total += amount * unit.millis() as f64;
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        Ok(TimeDeltaCond::new(self.reference, total.round() as i64)?.into())
    }

    fn delta_unit(&mut self) -> Result<DeltaUnit> {
        let w = self.word("a duration unit")?;
        w.parse().map_err(|_| Error::Parse(format!("'{w}' is not a duration unit")))
    }

    fn span(&mut self) -> Result<Cond> {
        self.pos += 1;
        self.expect_word("of")?;
        let (mut months, mut days, mut hours, mut minutes, mut seconds) = (0, 0, 0, 0, 0);
        loop {
            let n = i64::from(self.integer()?);
            let w = self.word("a span unit")?;
            let unit: SpanUnit =
                w.parse().map_err(|_| Error::Parse(format!("'{w}' is not a span unit")))?;
            match unit {
                SpanUnit::Months => months += n,
                SpanUnit::Days => days += n,
                SpanUnit::Hours => hours += n,
                SpanUnit::Minutes => minutes += n,
                SpanUnit::Seconds => seconds += n,
            }
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        Ok(TimeSpanCond::new(months, days, hours, minutes, seconds)?.into())
    }

    fn monthly(&mut self) -> Result<Cond> {
        self.pos += 1;
        if self.eat_word("on") {
            self.expect_word("day")?;
            let d = self.integer()?;
            return Ok(DayBetweenCond::new(d, d)?.into());
        }
        let link = self.band_link()?;
        self.expect_word("day")?;
        let start = self.integer()?;
        self.expect_word(link)?;
        self.eat_word("day");
        let end = self.integer()?;
        Ok(DayBetweenCond::new(start, end)?.into())
    }

    fn yearly(&mut self) -> Result<Cond> {
        self.pos += 1;
        if self.eat_word("on") {
            if self.eat_word("month") {
                let m = self.month()?;
                return Ok(MonthBetweenCond::new(m, m)?.into());
            }
            if self.eat_word("date") {
                let d = self.month_day()?;
                return Ok(DateBetweenCond::new(d, d).into());
            }
            return Err(self.unexpected("'month' or 'date'"));
        }
        let link = self.band_link()?;
        if self.eat_word("month") {
            let start = self.month()?;
            self.expect_word(link)?;
            self.eat_word("month");
            let end = self.month()?;
            Ok(MonthBetweenCond::new(start, end)?.into())
        } else if self.eat_word("date") {
            let start = self.month_day()?;
            self.expect_word(link)?;
            self.eat_word("date");
            let end = self.month_day()?;
            Ok(DateBetweenCond::new(start, end).into())
        } else {
            Err(self.unexpected("'month' or 'date'"))
        }
    }

    fn daily(&mut self) -> Result<Cond> {
        self.pos += 1;
        let link = self.band_link()?;
        let start = self.day_time()?;
        self.expect_word(link)?;
        let end = self.day_time()?;
        let inclusive = self.inclusivity()?;
        Ok(TimeBetweenCond::new(start, end, inclusive)?.into())
    }

    /// `from … to …` or `between … and …`.
    fn band_link(&mut self) -> Result<&'static str> {
        if self.eat_word("from") {
            Ok("to")
        } else if self.eat_word("between") {
            Ok("and")
        } else {
            Err(self.unexpected("'from' or 'between'"))
        }
    }

    fn first_after_start(&mut self) -> Result<Cond> {
        self.pos += 1;
        let b = self.cond()?;
        self.expect_word("after")?;
        self.expect_word("start")?;
        self.expect_word("of")?;
        let a = self.cond()?;
        let inclusive = self.inclusivity()?;
        Ok(FirstAfterStartCond::new(a, b, inclusive).into())
    }

    fn nth(&mut self) -> Result<Cond> {
        self.pos += 1;
        let n = self.integer()?;
        let child = self.cond()?;
        Ok(NthCond::new(self.reference, n, child)?.into())
    }

    fn named(&mut self, name: &str) -> Result<Cond> {
        let factory = Factory::new(self.config);
        if self.config.day_part(name).is_some() {
            return factory.day_part(name);
        }
        if self.config.weekday_number(name).is_some() {
            return factory.weekday(name);
        }
        if self.config.season(name).is_some() {
            return factory.season(name);
        }
        if let Some(m) = self.config.month_number(name) {
            return Ok(MonthBetweenCond::new(m, m)?.into());
        }
        Err(Error::UnknownName(name.to_owned()))
    }

    /// A 1-based month, by name or number.
    fn month(&mut self) -> Result<u32> {
        match self.peek() {
            Some(Token::Number(_)) => {
                let n = self.integer()?;
                if !(1..=12).contains(&n) {
                    return Err(Error::InvalidRange(format!("month {n} outside 1-12")));
                }
                Ok(n - 1)
            }
            Some(Token::Word(_)) => {
                let w = self.word("a month name")?;
                self.config.month_number(&w).ok_or(Error::UnknownName(w))
            }
            _ => Err(self.unexpected("a month")),
        }
    }

    /// `march 5`, `5 of march`, or `5 of month 3`.
    fn month_day(&mut self) -> Result<MonthDay> {
        match self.peek() {
            Some(Token::Word(_)) => {
                let w = self.word("a month name")?;
                let month = self.config.month_number(&w).ok_or(Error::UnknownName(w))?;
                let day = self.integer()?;
                MonthDay::new(month, day)
            }
            Some(Token::Number(_)) => {
                let day = self.integer()?;
                self.eat_word("of");
                let month = if self.eat_word("month") {
                    let n = self.integer()?;
                    if !(1..=12).contains(&n) {
                        return Err(Error::InvalidRange(format!("month {n} outside 1-12")));
                    }
                    n - 1
                } else {
                    let w = self.word("a month name")?;
                    self.config.month_number(&w).ok_or(Error::UnknownName(w))?
                };
                MonthDay::new(month, day)
            }
            _ => Err(self.unexpected("a date")),
        }
    }

    /// `N[:N] [am|pm]`. AM keeps the hour, PM adds twelve; bare hours run
    /// on the 24-hour clock.
    fn day_time(&mut self) -> Result<DayTime> {
        let hour = self.integer()?;
        let minute = if self.eat(&Token::Colon) { self.integer()? } else { 0 };
        if self.eat_word("am") {
            if hour > 12 {
                return Err(Error::InvalidRange(format!("hour {hour}am outside 1-12")));
            }
            DayTime::new(hour, minute)
        } else if self.eat_word("pm") {
            if hour > 12 {
                return Err(Error::InvalidRange(format!("hour {hour}pm outside 1-12")));
            }
            let hour = hour + 12;
            if hour == 24 && minute == 0 {
                Ok(DayTime::END_OF_DAY)
            } else {
                DayTime::new(hour, minute)
            }
        } else {
            DayTime::new(hour, minute)
        }
    }
}
