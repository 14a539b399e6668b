mod consts;
mod delta;
mod prelude;
mod types;

pub use consts::*;
pub use delta::{DeltaError, TimeDelta};
pub use types::{days_in_month, is_leap_year, is_valid_date};

use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

/// A validated day/month/year triple in the proleptic Gregorian calendar,
/// restricted to years `MIN_YEAR..=MAX_YEAR`.
///
/// Every constructor and setter checks the whole triple, so a value
/// obtained through the fallible API always names a real calendar day.
/// Date arithmetic (`+`/`+=` with a [`TimeDelta`]) intentionally skips
/// that check; the `AddAssign` impl documents the resulting edge cases.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{day}.{month}.{year}")]
pub struct CalendarDate {
    day: u8,
    month: u8,
    year: u16,
}

/// Error type for date construction, parsing, and setters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// The day/month/year triple is not a calendar date in the supported range.
    #[error("invalid date {day}.{month}.{year}")]
    InvalidDate {
        /// The rejected day.
        day: u8,
        /// The rejected month.
        month: u8,
        /// The rejected year.
        year: u16,
    },

    /// The input text did not yield exactly three in-range numeric fields.
    #[error("invalid date string {0:?} (expected day.month.year)")]
    InvalidFormat(String),
}

impl CalendarDate {
    /// Creates a date from a day, month, and year.
    ///
    /// # Errors
    /// Returns [`DateError::InvalidDate`] unless the triple satisfies
    /// [`is_valid_date`].
    pub fn new(day: u8, month: u8, year: u16) -> Result<Self, DateError> {
        if !is_valid_date(day, month, year) {
            return Err(DateError::InvalidDate { day, month, year });
        }
        Ok(Self { day, month, year })
    }

    /// Returns the day of month (1..=31).
    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Returns the month (1..=12).
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the year.
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Replaces the day, revalidating the whole triple against the current
    /// month and year.
    ///
    /// # Errors
    /// Returns [`DateError::InvalidDate`] and leaves the date unchanged if
    /// the new triple is invalid.
    pub fn set_day(&mut self, day: u8) -> Result<(), DateError> {
        *self = Self::new(day, self.month, self.year)?;
        Ok(())
    }

    /// Replaces the month, revalidating the whole triple against the
    /// current day and year.
    ///
    /// # Errors
    /// Returns [`DateError::InvalidDate`] and leaves the date unchanged if
    /// the new triple is invalid (e.g. day 31 moved into a 30-day month).
    pub fn set_month(&mut self, month: u8) -> Result<(), DateError> {
        *self = Self::new(self.day, month, self.year)?;
        Ok(())
    }

    /// Replaces the year, revalidating the whole triple against the
    /// current day and month.
    ///
    /// # Errors
    /// Returns [`DateError::InvalidDate`] and leaves the date unchanged if
    /// the new triple is invalid (e.g. Feb 29 moved into a common year).
    pub fn set_year(&mut self, year: u16) -> Result<(), DateError> {
        *self = Self::new(self.day, self.month, year)?;
        Ok(())
    }

    /// 1-based count of days from 1.1.1 up to and including this date.
    ///
    /// Whole years strictly before this one contribute their exact length
    /// (366 in leap years). Months already elapsed in the current year are
    /// counted with common-year lengths, so a leap day in the current year
    /// is not included even when the date lies past February.
    pub fn to_ordinal(&self) -> i64 {
        let whole_years = i64::from(self.year) - 1;
        let leap_years = whole_years / 4 - whole_years / 100 + whole_years / 400;
        let month_days: i64 = DAYS_IN_MONTH[1..self.month as usize]
            .iter()
            .copied()
            .map(i64::from)
            .sum();
        whole_years * 365 + leap_years + month_days + i64::from(self.day)
    }

    fn parse_u8(field: &str, original: &str) -> Result<u8, DateError> {
        field
            .parse::<u8>()
            .map_err(|_| DateError::InvalidFormat(original.to_owned()))
    }

    fn parse_u16(field: &str, original: &str) -> Result<u16, DateError> {
        field
            .parse::<u16>()
            .map_err(|_| DateError::InvalidFormat(original.to_owned()))
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    /// Parses `day.month.year` text.
    ///
    /// The input is split on [`DATE_SEPARATOR`] and any token that is not
    /// a plain run of ASCII digits (including empty and sign-prefixed
    /// tokens) is dropped before counting. Exactly three tokens must
    /// remain; they are read positionally as day, month, year and passed
    /// through [`CalendarDate::new`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s
            .split(DATE_SEPARATOR)
            .filter(|field| !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit()))
            .collect();

        match fields.as_slice() {
            &[day, month, year] => {
                let day = Self::parse_u8(day, s)?;
                let month = Self::parse_u8(month, s)?;
                let year = Self::parse_u16(year, s)?;
                Self::new(day, month, year)
            }
            _ => Err(DateError::InvalidFormat(s.to_owned())),
        }
    }
}

impl fmt::Debug for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CalendarDate({}, {}, {})", self.day, self.month, self.year)
    }
}

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalendarDate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month, self.day).cmp(&(other.year, other.month, other.day))
    }
}

impl Sub for CalendarDate {
    type Output = i64;

    /// Signed day difference `self - other`.
    fn sub(self, other: Self) -> i64 {
        self.to_ordinal() - other.to_ordinal()
    }
}

impl AddAssign<TimeDelta> for CalendarDate {
    /// Applies `delta` in three phases, in this order:
    ///
    /// 1. the year offset is added to the year field as-is;
    /// 2. the date advances one calendar day per unit of the day offset,
    ///    resetting to the 1st and carrying the month (and December into
    ///    the next year) whenever the day passes the end of the current
    ///    month;
    /// 3. the month advances one step per unit of the month offset with
    ///    the same December carry, without clamping the day.
    ///
    /// The result is not revalidated: phase 1 can leave Feb 29 in a common
    /// year until a day step corrects it, phase 3 can leave a day past the
    /// end of the target month, and the year can move beyond [`MAX_YEAR`].
    fn add_assign(&mut self, delta: TimeDelta) {
        self.year += delta.years();

        for _ in 0..delta.days() {
            if self.day < days_in_month(self.year, self.month) {
                self.day += 1;
            } else if self.month == DECEMBER {
                self.day = MIN_DAY;
                self.month = JANUARY;
                self.year += 1;
            } else {
                self.day = MIN_DAY;
                self.month += 1;
            }
        }

        for _ in 0..delta.months() {
            if self.month == DECEMBER {
                self.month = JANUARY;
                self.year += 1;
            } else {
                self.month += 1;
            }
        }
    }
}

impl Add<TimeDelta> for CalendarDate {
    type Output = Self;

    /// Returns `self + delta` as a new date; `self` is not mutated.
    fn add(mut self, delta: TimeDelta) -> Self {
        self += delta;
        self
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
