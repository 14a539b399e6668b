use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// A calendar-aware offset of whole days, months, and years.
///
/// A `TimeDelta` counts calendar slots rather than elapsed time: applied
/// to a date, each unit carries across month and year boundaries one step
/// at a time. All three fields are non-negative by construction.
///
/// Missing fields deserialize as zero, so `{"days": 10}` is a pure
/// ten-day offset.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, From, Into, Serialize, Deserialize)]
pub struct TimeDelta {
    #[serde(default)]
    days: u32,
    #[serde(default)]
    months: u32,
    #[serde(default)]
    years: u16,
}

/// Error type for time delta construction from signed values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeltaError {
    /// A field was given a negative value or one too large for its width.
    #[error("invalid {field}: {value} (must be a non-negative integer)")]
    InvalidValue {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: i64,
    },
}

impl TimeDelta {
    /// Creates a new delta from day, month, and year offsets.
    pub const fn new(days: u32, months: u32, years: u16) -> Self {
        Self {
            days,
            months,
            years,
        }
    }

    /// Creates a pure day offset.
    pub const fn from_days(days: u32) -> Self {
        Self::new(days, 0, 0)
    }

    /// Creates a pure month offset.
    pub const fn from_months(months: u32) -> Self {
        Self::new(0, months, 0)
    }

    /// Creates a pure year offset.
    pub const fn from_years(years: u16) -> Self {
        Self::new(0, 0, years)
    }

    /// Creates a delta from signed values, rejecting anything negative or
    /// too large for the field widths.
    ///
    /// # Errors
    /// Returns [`DeltaError::InvalidValue`] naming the offending field.
    pub fn try_new(days: i64, months: i64, years: i64) -> Result<Self, DeltaError> {
        Ok(Self {
            days: u32::try_from(days).map_err(|_| DeltaError::InvalidValue {
                field: "days",
                value: days,
            })?,
            months: u32::try_from(months).map_err(|_| DeltaError::InvalidValue {
                field: "months",
                value: months,
            })?,
            years: u16::try_from(years).map_err(|_| DeltaError::InvalidValue {
                field: "years",
                value: years,
            })?,
        })
    }

    /// Returns the day offset.
    #[inline]
    pub const fn days(self) -> u32 {
        self.days
    }

    /// Returns the month offset.
    #[inline]
    pub const fn months(self) -> u32 {
        self.months
    }

    /// Returns the year offset.
    #[inline]
    pub const fn years(self) -> u16 {
        self.years
    }

    /// Replaces the day offset; the other fields are untouched.
    pub fn set_days(&mut self, days: u32) {
        self.days = days;
    }

    /// Replaces the month offset; the other fields are untouched.
    pub fn set_months(&mut self, months: u32) {
        self.months = months;
    }

    /// Replaces the year offset; the other fields are untouched.
    pub fn set_years(&mut self, years: u16) {
        self.years = years;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_accessors() {
        let delta = TimeDelta::new(10, 2, 1);
        assert_eq!(delta.days(), 10);
        assert_eq!(delta.months(), 2);
        assert_eq!(delta.years(), 1);
    }

    #[test]
    fn test_default_is_zero() {
        let delta = TimeDelta::default();
        assert_eq!(delta.days(), 0);
        assert_eq!(delta.months(), 0);
        assert_eq!(delta.years(), 0);
    }

    #[test]
    fn test_single_field_constructors() {
        assert_eq!(TimeDelta::from_days(365), TimeDelta::new(365, 0, 0));
        assert_eq!(TimeDelta::from_months(12), TimeDelta::new(0, 12, 0));
        assert_eq!(TimeDelta::from_years(1), TimeDelta::new(0, 0, 1));
    }

    #[test]
    fn test_try_new_valid() {
        let delta = TimeDelta::try_new(100, 100, 100).expect("non-negative values should be accepted");
        assert_eq!(delta, TimeDelta::new(100, 100, 100));

        let zero = TimeDelta::try_new(0, 0, 0).expect("zero offsets should be accepted");
        assert_eq!(zero, TimeDelta::default());
    }

    #[test]
    fn test_try_new_negative_days() {
        let result = TimeDelta::try_new(-1, 1, 1);
        assert_eq!(
            result,
            Err(DeltaError::InvalidValue {
                field: "days",
                value: -1,
            })
        );
    }

    #[test]
    fn test_try_new_negative_months() {
        let result = TimeDelta::try_new(10, -5, 10);
        assert_eq!(
            result,
            Err(DeltaError::InvalidValue {
                field: "months",
                value: -5,
            })
        );
    }

    #[test]
    fn test_try_new_negative_years() {
        let result = TimeDelta::try_new(100, 100, -100);
        assert_eq!(
            result,
            Err(DeltaError::InvalidValue {
                field: "years",
                value: -100,
            })
        );
    }

    #[test]
    fn test_try_new_oversized_years() {
        let result = TimeDelta::try_new(0, 0, i64::from(u16::MAX) + 1);
        assert!(matches!(
            result,
            Err(DeltaError::InvalidValue { field: "years", .. })
        ));
    }

    #[test]
    fn test_setters_touch_one_field() {
        let mut delta = TimeDelta::new(1, 2, 3);

        delta.set_days(10);
        assert_eq!(delta, TimeDelta::new(10, 2, 3));

        delta.set_months(20);
        assert_eq!(delta, TimeDelta::new(10, 20, 3));

        delta.set_years(30);
        assert_eq!(delta, TimeDelta::new(10, 20, 30));
    }

    #[test]
    fn test_from_tuple() {
        let delta: TimeDelta = (365_u32, 12_u32, 1_u16).into();
        assert_eq!(delta, TimeDelta::new(365, 12, 1));

        let (days, months, years): (u32, u32, u16) = delta.into();
        assert_eq!((days, months, years), (365, 12, 1));
    }

    #[test]
    fn test_error_display() {
        let err = DeltaError::InvalidValue {
            field: "days",
            value: -1,
        };
        assert_eq!(
            err.to_string(),
            "invalid days: -1 (must be a non-negative integer)"
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let delta = TimeDelta::new(10, 2, 1);
        let json = serde_json::to_string(&delta).expect("failed to serialize delta");
        let parsed: TimeDelta = serde_json::from_str(&json).expect("failed to deserialize delta");
        assert_eq!(delta, parsed);
    }

    #[test]
    fn test_serde_missing_fields_default_to_zero() {
        let delta: TimeDelta =
            serde_json::from_str(r#"{"days": 10}"#).expect("missing fields should default");
        assert_eq!(delta, TimeDelta::from_days(10));

        let empty: TimeDelta = serde_json::from_str("{}").expect("empty object should default");
        assert_eq!(empty, TimeDelta::default());
    }
}
