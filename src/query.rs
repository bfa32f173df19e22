//! Validation and derived calendar facts.

use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_GREGORIAN_MONTH, ESFAND_DAYS_COMMON, FEBRUARY, FEBRUARY_DAYS_LEAP,
    GREGORIAN_CYCLE, JALALI_LONG_MONTH_DAYS, JALALI_SHORT_MONTH_DAYS, LEAP_YEAR_CYCLE,
    MAX_GREGORIAN_YEAR, MAX_JALALI_YEAR, MAX_MONTH, MIN_DAY, MIN_GREGORIAN_YEAR, MIN_JALALI_YEAR,
    MIN_MONTH, SATURDAY_FIRST_WEEKDAY,
};
use crate::convert::to_gregorian;
use crate::kernel::{absolute_to_jalali, gregorian_to_absolute, gregorian_weekday, intercalation};
use crate::{DateError, Ymd};
use chrono::{Datelike, Local, NaiveDate};
use std::sync::LazyLock;

/// Local calendar date, read once per process
static TODAY: LazyLock<NaiveDate> = LazyLock::new(|| Local::now().date_naive());

/// Whether Jalali year `jy` has 366 days.
///
/// # Errors
/// Returns `DateError::OutOfRange` if `jy` lies outside the break table.
pub fn is_leap_jalali_year(jy: i32) -> Result<bool, DateError> {
    Ok(intercalation(jy)?.is_leap())
}

/// Whether Gregorian year `gy` has 366 days
pub const fn is_leap_gregorian_year(gy: i32) -> bool {
    (gy % LEAP_YEAR_CYCLE == 0 && gy % CENTURY_CYCLE != 0) || (gy % GREGORIAN_CYCLE == 0)
}

const fn check_month(month: i32) -> Result<(), DateError> {
    if month < MIN_MONTH || month > MAX_MONTH {
        return Err(DateError::InvalidMonth(month));
    }
    Ok(())
}

/// Days in Jalali month `jm`: 31, 30, or 29/30 for Esfand.
///
/// # Errors
/// Returns `DateError::InvalidMonth` for a month outside 1-12, and
/// `DateError::OutOfRange` when Esfand is asked for outside the break table.
pub fn jalali_month_length(jy: i32, jm: i32) -> Result<i32, DateError> {
    check_month(jm)?;
    Ok(match jm {
        1..=6 => JALALI_LONG_MONTH_DAYS,
        7..=11 => JALALI_SHORT_MONTH_DAYS,
        _ if is_leap_jalali_year(jy)? => JALALI_SHORT_MONTH_DAYS,
        _ => ESFAND_DAYS_COMMON,
    })
}

/// Days in Gregorian month `gm` of year `gy`.
///
/// # Errors
/// Returns `DateError::InvalidMonth` for a month outside 1-12.
#[allow(clippy::cast_sign_loss)]
pub fn gregorian_month_length(gy: i32, gm: i32) -> Result<i32, DateError> {
    check_month(gm)?;
    if gm == FEBRUARY && is_leap_gregorian_year(gy) {
        Ok(FEBRUARY_DAYS_LEAP)
    } else {
        Ok(DAYS_IN_GREGORIAN_MONTH[gm as usize])
    }
}

/// Whether `jy/jm/jd` is a legal Jalali date inside the break table
pub fn is_valid_jalali_date(jy: i32, jm: i32, jd: i32) -> bool {
    (MIN_JALALI_YEAR..=MAX_JALALI_YEAR).contains(&jy)
        && (MIN_MONTH..=MAX_MONTH).contains(&jm)
        && matches!(jalali_month_length(jy, jm), Ok(length) if (MIN_DAY..=length).contains(&jd))
}

/// Whether `gy/gm/gd` is a legal Gregorian date inside the validation range
pub fn is_valid_gregorian_date(gy: i32, gm: i32, gd: i32) -> bool {
    (MIN_GREGORIAN_YEAR..=MAX_GREGORIAN_YEAR).contains(&gy)
        && (MIN_MONTH..=MAX_MONTH).contains(&gm)
        && matches!(gregorian_month_length(gy, gm), Ok(length) if (MIN_DAY..=length).contains(&gd))
}

/// Weekday of a Jalali date, Saturday = 0 through Friday = 6.
///
/// # Errors
/// Returns `DateError::OutOfRange` if the year lies outside the break table,
/// and `DateError::InvalidMonth` or `DateError::InvalidDate` for a month or
/// day that cannot belong to any date.
pub fn day_of_week(jalali: Ymd) -> Result<u8, DateError> {
    let gregorian = to_gregorian(jalali)?;
    let native = gregorian_day_of_week(gregorian);
    Ok(SATURDAY_FIRST_WEEKDAY[usize::from(native)])
}

/// Weekday of a Gregorian date, Sunday = 0 through Saturday = 6.
pub fn gregorian_day_of_week(gregorian: Ymd) -> u8 {
    gregorian_weekday(gregorian_to_absolute(
        gregorian.year,
        gregorian.month,
        gregorian.day,
    ))
}

/// Gregorian fields of a `chrono` calendar date
#[allow(clippy::cast_possible_wrap)]
pub fn gregorian_from_naive(date: NaiveDate) -> Ymd {
    Ymd::new(date.year(), date.month() as i32, date.day() as i32)
}

/// Jalali date of a `chrono` calendar date.
///
/// # Errors
/// Returns `DateError::OutOfRange` if the date falls outside the break table.
pub fn jalali_from_naive(date: NaiveDate) -> Result<Ymd, DateError> {
    let g = gregorian_from_naive(date);
    absolute_to_jalali(gregorian_to_absolute(g.year, g.month, g.day))
}

/// Today's local date in the Gregorian calendar
pub fn now_in_gregorian() -> Ymd {
    gregorian_from_naive(*TODAY)
}

/// Today's local date in the Jalali calendar.
///
/// # Errors
/// Returns `DateError::OutOfRange` only if the clock reads a year outside the
/// break table.
pub fn now_in_jalali() -> Result<Ymd, DateError> {
    jalali_from_naive(*TODAY)
}
