use std::fmt;

use chrono::{Datelike, NaiveDate};

/// A birth date as entered on the form.
///
/// Eight ASCII digits in day/month/year order (`DDMMYYYY`) that form a real
/// calendar date are parsed; anything else is kept verbatim and has no age.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BirthDate {
    Parsed(NaiveDate),
    Raw(String),
}

impl BirthDate {
    pub fn parse(raw: &str) -> Self {
        Self::parse_ddmmyyyy(raw).map_or_else(
            || {
                tracing::debug!("birth date {raw:?} is not DDMMYYYY, keeping it as entered");
                BirthDate::Raw(raw.to_string())
            },
            BirthDate::Parsed,
        )
    }

    fn parse_ddmmyyyy(raw: &str) -> Option<NaiveDate> {
        if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let day = raw.get(0..2)?.parse().ok()?;
        let month = raw.get(2..4)?.parse().ok()?;
        let year = raw.get(4..8)?.parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            BirthDate::Parsed(date) => Some(*date),
            BirthDate::Raw(_) => None,
        }
    }

    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        self.date().map(|birth| age_on(birth, today))
    }
}

/// `DD.MM.YYYY` for parsed dates, the raw input otherwise.
impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BirthDate::Parsed(date) => {
                write!(f, "{:02}.{:02}.{}", date.day(), date.month(), date.year())
            }
            BirthDate::Raw(raw) => f.write_str(raw),
        }
    }
}

/// Whole years between `birth` and `today`, less one until this year's birthday.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let before_birthday = (today.month(), today.day()) < (birth.month(), birth.day());
    today.year() - birth.year() - i32::from(before_birthday)
}
