//! Jalali (Persian) and Gregorian calendar conversion.
//!
//! Dates are reduced to a Julian day number and expanded into the other
//! calendar. Jalali leap years follow the 33-year intercalation rule, reset at
//! the break years of [`BREAK_YEARS`].
//!
//! ```
//! use jalali_calendar::{Calendar, CivilDate};
//!
//! let nowruz = CivilDate::jalali(1403, 1, 1).unwrap();
//! let gregorian = nowruz.to_gregorian().unwrap();
//! assert_eq!(gregorian.to_string(), "2024/3/20");
//! assert_eq!(nowruz.weekday_name(), "چهارشنبه");
//! assert_eq!(gregorian.calendar(), Calendar::Gregorian);
//! ```

mod consts;
mod convert;
pub mod kernel;
mod names;
mod prelude;
mod query;
mod types;

pub use consts::*;
pub use convert::{
    ConvertError, DateValue, convert, convert_fields, convert_json, convert_text, to_gregorian,
    to_jalali,
};
pub use kernel::{DayNumber, Intercalation};
pub use names::*;
pub use query::{
    day_of_week, gregorian_day_of_week, gregorian_from_naive, gregorian_month_length,
    is_leap_gregorian_year, is_leap_jalali_year, is_valid_gregorian_date, is_valid_jalali_date,
    jalali_from_naive, jalali_month_length, now_in_gregorian, now_in_jalali,
};
pub use types::{Calendar, Ymd};

use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Error type for calendar arithmetic and validation.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Invalid {calendar} date: {year}/{month}/{day}")]
    InvalidDate {
        calendar: Calendar,
        year: i32,
        month: i32,
        day: i32,
    },
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(i32),
    #[display(
        fmt = "Jalali year {} is outside the supported range {}..={}",
        year,
        MIN_JALALI_YEAR,
        MAX_JALALI_YEAR
    )]
    OutOfRange { year: i32 },
    #[display(fmt = "Day number {} has no Gregorian date with a 32-bit year", "_0")]
    DayOutOfRange(DayNumber),
}

impl std::error::Error for DateError {}

/// A validated date in a known calendar.
///
/// Only the constructors can build one, so the day always fits its month and
/// the year is inside the calendar's supported range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{}", ymd)]
#[serde(try_from = "CivilDateRepr", into = "CivilDateRepr")]
pub struct CivilDate {
    calendar: Calendar,
    ymd: Ymd,
    day_number: DayNumber,
}

#[derive(Serialize, Deserialize)]
struct CivilDateRepr {
    calendar: Calendar,
    #[serde(flatten)]
    ymd: Ymd,
}

impl CivilDate {
    /// Creates a date after checking it against `calendar`'s rules.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` if `ymd` is not a legal date there.
    pub fn new(calendar: Calendar, ymd: Ymd) -> Result<Self, DateError> {
        if !calendar.is_valid(ymd) {
            return Err(DateError::InvalidDate {
                calendar,
                year: ymd.year,
                month: ymd.month,
                day: ymd.day,
            });
        }
        let day_number = match calendar {
            Calendar::Jalali => kernel::jalali_to_absolute(ymd.year, ymd.month, ymd.day)?,
            Calendar::Gregorian => kernel::gregorian_to_absolute(ymd.year, ymd.month, ymd.day),
        };
        Ok(Self {
            calendar,
            ymd,
            day_number,
        })
    }

    /// Creates a Jalali date.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` if the date is not a legal Jalali date.
    pub fn jalali(year: i32, month: i32, day: i32) -> Result<Self, DateError> {
        Self::new(Calendar::Jalali, Ymd::new(year, month, day))
    }

    /// Creates a Gregorian date.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` if the date is not a legal Gregorian date.
    pub fn gregorian(year: i32, month: i32, day: i32) -> Result<Self, DateError> {
        Self::new(Calendar::Gregorian, Ymd::new(year, month, day))
    }

    /// Parses the `Y/M/D` text form in the given calendar.
    ///
    /// # Errors
    /// Returns `ConvertError::InvalidFormat` for malformed text and
    /// `DateError::InvalidDate` (wrapped) for an illegal date.
    pub fn parse(calendar: Calendar, text: &str) -> Result<Self, ConvertError> {
        let ymd = text.parse::<Ymd>()?;
        Ok(Self::new(calendar, ymd)?)
    }

    /// Today's local date in `calendar`.
    ///
    /// # Errors
    /// Returns `DateError` only if the wall clock is outside the supported range.
    pub fn today(calendar: Calendar) -> Result<Self, DateError> {
        let ymd = match calendar {
            Calendar::Jalali => now_in_jalali()?,
            Calendar::Gregorian => now_in_gregorian(),
        };
        Self::new(calendar, ymd)
    }

    /// Calendar this date is expressed in
    pub const fn calendar(&self) -> Calendar {
        self.calendar
    }

    /// The bare year/month/day triple
    pub const fn ymd(&self) -> Ymd {
        self.ymd
    }

    /// Year in this date's calendar
    pub const fn year(&self) -> i32 {
        self.ymd.year
    }

    /// Month, 1-12
    pub const fn month(&self) -> i32 {
        self.ymd.month
    }

    /// Day of the month
    pub const fn day(&self) -> i32 {
        self.ymd.day
    }

    /// Julian day number of this date
    pub const fn day_number(&self) -> DayNumber {
        self.day_number
    }

    /// Re-expresses this date in `target`.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` if the same day is outside `target`'s
    /// validity range (e.g. Jalali 1/1/1 is Gregorian 622, below 1400).
    pub fn convert_to(&self, target: Calendar) -> Result<Self, DateError> {
        if target == self.calendar {
            return Ok(*self);
        }
        let ymd = match target {
            Calendar::Jalali => kernel::absolute_to_jalali(self.day_number)?,
            Calendar::Gregorian => kernel::absolute_to_gregorian(self.day_number)?,
        };
        Self::new(target, ymd)
    }

    /// # Errors
    /// See [`CivilDate::convert_to`].
    pub fn to_jalali(&self) -> Result<Self, DateError> {
        self.convert_to(Calendar::Jalali)
    }

    /// # Errors
    /// See [`CivilDate::convert_to`].
    pub fn to_gregorian(&self) -> Result<Self, DateError> {
        self.convert_to(Calendar::Gregorian)
    }

    /// Index into this calendar's weekday table: Saturday-first for Jalali,
    /// Sunday-first for Gregorian.
    pub const fn weekday(&self) -> u8 {
        let native = kernel::gregorian_weekday(self.day_number);
        match self.calendar {
            Calendar::Jalali => SATURDAY_FIRST_WEEKDAY[native as usize],
            Calendar::Gregorian => native,
        }
    }

    /// Full weekday name in this calendar's language
    pub fn weekday_name(&self) -> &'static str {
        self.calendar.weekday_names()[usize::from(self.weekday())]
    }

    /// Month name in this calendar's language
    #[allow(clippy::cast_sign_loss)]
    pub fn month_name(&self) -> &'static str {
        self.calendar.month_names()[(self.ymd.month - 1) as usize]
    }
}

impl PartialOrd for CivilDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CivilDate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Same day in both calendars: Jalali sorts first.
        self.day_number
            .cmp(&other.day_number)
            .then_with(|| self.calendar.cmp(&other.calendar))
    }
}

impl TryFrom<CivilDateRepr> for CivilDate {
    type Error = DateError;

    fn try_from(repr: CivilDateRepr) -> Result<Self, Self::Error> {
        Self::new(repr.calendar, repr.ymd)
    }
}

impl From<CivilDate> for CivilDateRepr {
    fn from(date: CivilDate) -> Self {
        Self {
            calendar: date.calendar,
            ymd: date.ymd,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_jalali() {
        let date = CivilDate::jalali(1403, 12, 30).unwrap();
        assert_eq!(date.calendar(), Calendar::Jalali);
        assert_eq!(date.ymd(), Ymd::new(1403, 12, 30));
        assert_eq!(date.year(), 1403);
        assert_eq!(date.month(), 12);
        assert_eq!(date.day(), 30);
    }

    #[test]
    fn test_new_rejects_invalid_dates() {
        assert!(matches!(
            CivilDate::jalali(1402, 12, 30),
            Err(DateError::InvalidDate {
                calendar: Calendar::Jalali,
                year: 1402,
                month: 12,
                day: 30
            })
        ));
        assert!(CivilDate::jalali(1403, 13, 1).is_err());
        assert!(CivilDate::gregorian(2023, 2, 29).is_err());
        assert!(CivilDate::gregorian(1399, 6, 1).is_err());
        assert!(CivilDate::gregorian(2024, 2, 29).is_ok());
    }

    #[test]
    fn test_parse() {
        let date = CivilDate::parse(Calendar::Jalali, "1404/7/26").unwrap();
        assert_eq!(date.ymd(), Ymd::new(1404, 7, 26));

        assert!(matches!(
            CivilDate::parse(Calendar::Gregorian, "2024/13/40"),
            Err(ConvertError::Date(DateError::InvalidDate { .. }))
        ));
        assert!(matches!(
            CivilDate::parse(Calendar::Gregorian, "abc"),
            Err(ConvertError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_display() {
        let date = CivilDate::jalali(1403, 1, 1).unwrap();
        assert_eq!(date.to_string(), "1403/1/1");
    }

    #[test]
    fn test_convert_to() {
        let jalali = CivilDate::jalali(1404, 7, 26).unwrap();
        let gregorian = jalali.to_gregorian().unwrap();
        assert_eq!(gregorian.ymd(), Ymd::new(2025, 10, 18));
        assert_eq!(gregorian.day_number(), jalali.day_number());
        assert_eq!(gregorian.to_jalali().unwrap(), jalali);
        assert_eq!(jalali.convert_to(Calendar::Jalali).unwrap(), jalali);
    }

    #[test]
    fn test_convert_to_outside_target_range() {
        let epoch = CivilDate::jalali(1, 1, 1).unwrap();
        assert!(matches!(
            epoch.to_gregorian(),
            Err(DateError::InvalidDate {
                calendar: Calendar::Gregorian,
                year: 622,
                month: 3,
                day: 22
            })
        ));
    }

    #[test]
    fn test_weekday() {
        let nowruz = CivilDate::jalali(1403, 1, 1).unwrap();
        assert_eq!(nowruz.weekday(), 4);
        assert_eq!(nowruz.weekday_name(), "چهارشنبه");
        assert_eq!(nowruz.month_name(), "فروردین");

        let gregorian = nowruz.to_gregorian().unwrap();
        assert_eq!(gregorian.weekday(), 3);
        assert_eq!(gregorian.weekday_name(), "Wednesday");
        assert_eq!(gregorian.month_name(), "March");
    }

    #[test]
    fn test_weekday_matches_query_layer() {
        let date = CivilDate::jalali(1370, 5, 24).unwrap();
        assert_eq!(date.weekday(), day_of_week(date.ymd()).unwrap());
    }

    #[test]
    fn test_ordering() {
        let a = CivilDate::jalali(1402, 12, 29).unwrap();
        let b = CivilDate::jalali(1403, 1, 1).unwrap();
        assert!(a < b);

        // Same day: Jalali before Gregorian
        let g = b.to_gregorian().unwrap();
        assert!(b < g);
        assert_ne!(b, g);

        let later = CivilDate::gregorian(2024, 3, 21).unwrap();
        assert!(b < later);
        assert!(g < later);
    }

    #[test]
    fn test_today() {
        let jalali = CivilDate::today(Calendar::Jalali).unwrap();
        let gregorian = CivilDate::today(Calendar::Gregorian).unwrap();
        assert_eq!(jalali.day_number(), gregorian.day_number());
        assert_eq!(jalali.to_gregorian().unwrap(), gregorian);
    }

    #[test]
    fn test_serde() {
        let date = CivilDate::jalali(1403, 1, 1).unwrap();
        let json = serde_json::to_value(date).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"calendar": "jalali", "Year": 1403, "Month": 1, "Day": 1})
        );
        let parsed: CivilDate = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, date);
    }

    #[test]
    fn test_serde_validation() {
        let json = r#"{"calendar":"jalali","Year":1402,"Month":12,"Day":30}"#;
        let result: Result<CivilDate, _> = serde_json::from_str(json);
        assert!(result.is_err());

        let json = r#"{"calendar":"gregorian","Year":2024,"Month":2,"Day":29}"#;
        let result: Result<CivilDate, _> = serde_json::from_str(json);
        assert!(result.is_ok());
    }

    #[test]
    fn test_error_display() {
        let err = DateError::InvalidDate {
            calendar: Calendar::Gregorian,
            year: 2024,
            month: 13,
            day: 40,
        };
        assert_eq!(err.to_string(), "Invalid gregorian date: 2024/13/40");
        assert_eq!(
            DateError::InvalidMonth(13).to_string(),
            "Invalid month: 13 (must be 1-12)"
        );
        assert_eq!(
            DateError::OutOfRange { year: 3178 }.to_string(),
            "Jalali year 3178 is outside the supported range -61..=3177"
        );
        assert_eq!(
            DateError::DayOutOfRange(i64::MAX).to_string(),
            "Day number 9223372036854775807 has no Gregorian date with a 32-bit year"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_impl<T: std::error::Error + Send + Sync>() {}
        assert_impl::<DateError>();
        assert_impl::<ConvertError>();
    }
}
