//! Integer day-count kernel.
//!
//! Every civil date is reduced to a Julian day number ([`DayNumber`]) and
//! expanded back from it. All divisions truncate toward zero; the formulas
//! depend on that and must not be rewritten with `div_euclid`.

use crate::consts::{
    BREAK_YEARS, JALALI_COMMON_YEAR_DAYS, JALALI_EPOCH_OFFSET, JALALI_FIRST_HALF_DAYS,
    JALALI_LONG_MONTH_DAYS, JALALI_SHORT_MONTH_DAYS, MARCH, MAX_JALALI_YEAR, MAX_MONTH, MIN_DAY,
    MIN_JALALI_YEAR, MIN_MONTH,
};
use crate::{Calendar, DateError, Ymd};
use tracing::trace;

/// Absolute day on a single continuous timeline (Julian day number).
pub type DayNumber = i64;

/// Intercalation parameters of one Jalali year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Intercalation {
    /// Years elapsed since the last leap year, `0` meaning this year is leap.
    /// `4` marks the fifth year of a five-year sub-cycle.
    pub leap: i32,
    /// Gregorian year in which this Jalali year begins
    pub gregorian_year: i32,
    /// Day of March on which Farvardin 1st falls
    pub march: i32,
}

impl Intercalation {
    /// Whether the Jalali year has 366 days
    #[inline]
    pub const fn is_leap(&self) -> bool {
        self.leap == 0
    }
}

/// Day number of the earliest Gregorian date with an `i32` year
pub const MIN_DAY_NUMBER: DayNumber = gregorian_to_absolute(i32::MIN, 1, 1);
/// Day number of the latest Gregorian date with an `i32` year
pub const MAX_DAY_NUMBER: DayNumber = gregorian_to_absolute(i32::MAX, 12, 31);

/// Converts a Gregorian date to its Julian day number.
///
/// Valid for proleptic dates as well; no range check is made. Month and day
/// outside 1-12 / 1-31 give an unspecified day number, never a panic.
#[allow(clippy::cast_lossless)]
pub const fn gregorian_to_absolute(year: i32, month: i32, day: i32) -> DayNumber {
    let (gy, gm, gd) = (year as i64, month as i64, day as i64);
    let d = (gy + (gm - 8) / 6 + 100_100) * 1461 / 4 + (153 * ((gm + 9) % 12) + 2) / 5 + gd
        - 34_840_408;
    d - (gy + 100_100 + (gm - 8) / 6) / 100 * 3 / 4 + 752
}

/// Converts a Julian day number back to a Gregorian date.
///
/// # Errors
/// Returns `DateError::DayOutOfRange` outside
/// [`MIN_DAY_NUMBER`]`..=`[`MAX_DAY_NUMBER`].
#[allow(clippy::cast_possible_truncation)]
pub fn absolute_to_gregorian(day: DayNumber) -> Result<Ymd, DateError> {
    if !(MIN_DAY_NUMBER..=MAX_DAY_NUMBER).contains(&day) {
        return Err(DateError::DayOutOfRange(day));
    }
    let mut j = 4 * day + 139_361_631;
    j += (4 * day + 183_187_720) / 146_097 * 3 / 4 * 4 - 3908;
    let i = j % 1461 / 4 * 5 + 308;
    let gd = i % 153 / 5 + 1;
    let gm = i / 153 % 12 + 1;
    let gy = j / 1461 - 100_100 + (8 - gm) / 6;
    let year = i32::try_from(gy).map_err(|_| DateError::DayOutOfRange(day))?;
    Ok(Ymd::new(year, gm as i32, gd as i32))
}

/// Computes the intercalation record of Jalali year `jy`.
///
/// # Errors
/// Returns `DateError::OutOfRange` if `jy` lies outside the break table.
pub fn intercalation(jy: i32) -> Result<Intercalation, DateError> {
    if !(MIN_JALALI_YEAR..=MAX_JALALI_YEAR).contains(&jy) {
        return Err(DateError::OutOfRange { year: jy });
    }

    let gregorian_year = jy + JALALI_EPOCH_OFFSET;
    let mut leap_j = -14;
    let mut jp = BREAK_YEARS[0];
    let mut jump = 0;

    // Locate the break interval containing jy, counting leap days on the way.
    for &jm in &BREAK_YEARS[1..] {
        jump = jm - jp;
        if jy < jm {
            break;
        }
        leap_j += jump / 33 * 8 + jump % 33 / 4;
        jp = jm;
    }
    let mut n = jy - jp;

    leap_j += n / 33 * 8 + (n % 33 + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_j += 1;
    }

    // Gregorian leap days up to the same year
    let leap_g = gregorian_year / 4 - (gregorian_year / 100 + 1) * 3 / 4 - 150;
    let march = 20 + leap_j - leap_g;

    if jump - n < 6 {
        n = n - jump + (jump + 4) / 33 * 33;
    }
    let mut leap = ((n + 1) % 33 - 1) % 4;
    if leap == -1 {
        leap = 4;
    }

    Ok(Intercalation {
        leap,
        gregorian_year,
        march,
    })
}

/// Julian day number of Farvardin 1st of Jalali year `jy`.
///
/// # Errors
/// Returns `DateError::OutOfRange` if `jy` lies outside the break table.
pub fn new_year_day(jy: i32) -> Result<DayNumber, DateError> {
    let record = intercalation(jy)?;
    Ok(gregorian_to_absolute(record.gregorian_year, MARCH, record.march))
}

/// Number of days in Jalali year `jy`.
///
/// # Errors
/// Returns `DateError::OutOfRange` if `jy` lies outside the break table.
pub fn jalali_year_length(jy: i32) -> Result<i64, DateError> {
    let record = intercalation(jy)?;
    Ok(JALALI_COMMON_YEAR_DAYS + i64::from(record.is_leap()))
}

/// Rejects a month outside 1-12 or a day outside 1-31.
///
/// Day-in-month validity is left to the query layer; this only keeps the
/// kernel's arithmetic inside the shape of a calendar date.
pub(crate) const fn check_fields(calendar: Calendar, ymd: Ymd) -> Result<(), DateError> {
    if ymd.month < MIN_MONTH || ymd.month > MAX_MONTH {
        return Err(DateError::InvalidMonth(ymd.month));
    }
    if ymd.day < MIN_DAY || ymd.day > JALALI_LONG_MONTH_DAYS {
        return Err(DateError::InvalidDate {
            calendar,
            year: ymd.year,
            month: ymd.month,
            day: ymd.day,
        });
    }
    Ok(())
}

/// Converts a Jalali date to its Julian day number.
///
/// Months 1-6 are taken as 31 days and 7-11 as 30. Day 31 of a 30-day month
/// is not rejected here and lands on the first of the next month.
///
/// # Errors
/// Returns `DateError::InvalidMonth` or `DateError::InvalidDate` for a month
/// outside 1-12 or a day outside 1-31, and `DateError::OutOfRange` if `jy`
/// lies outside the break table.
pub fn jalali_to_absolute(jy: i32, jm: i32, jd: i32) -> Result<DayNumber, DateError> {
    check_fields(Calendar::Jalali, Ymd::new(jy, jm, jd))?;
    let (jm, jd) = (i64::from(jm), i64::from(jd));
    Ok(new_year_day(jy)? + (jm - 1) * 31 - jm / 7 * (jm - 7) + jd - 1)
}

/// Converts a Julian day number to a Jalali date.
///
/// # Errors
/// Returns `DateError::OutOfRange` if the day falls outside the Jalali years
/// covered by the break table, and `DateError::DayOutOfRange` if it has no
/// Gregorian date with an `i32` year.
#[allow(clippy::cast_possible_truncation)]
pub fn absolute_to_jalali(day: DayNumber) -> Result<Ymd, DateError> {
    let candidate = absolute_to_gregorian(day)?
        .year
        .saturating_sub(JALALI_EPOCH_OFFSET);

    let (jy, start) = match new_year_day(candidate) {
        Ok(start) if day >= start => (candidate, start),
        Ok(_) => (candidate - 1, new_year_day(candidate - 1)?),
        Err(DateError::OutOfRange { .. }) if candidate == MAX_JALALI_YEAR + 1 => {
            trace!(day, candidate, "re-deriving from the last covered Jalali year");
            (MAX_JALALI_YEAR, new_year_day(MAX_JALALI_YEAR)?)
        }
        Err(err) => return Err(err),
    };

    let mut k = day - start;
    if k >= jalali_year_length(jy)? {
        return Err(DateError::OutOfRange { year: jy + 1 });
    }

    if k < JALALI_FIRST_HALF_DAYS {
        let long = i64::from(JALALI_LONG_MONTH_DAYS);
        return Ok(Ymd::new(jy, 1 + (k / long) as i32, (k % long) as i32 + 1));
    }
    k -= JALALI_FIRST_HALF_DAYS;
    let short = i64::from(JALALI_SHORT_MONTH_DAYS);
    Ok(Ymd::new(jy, 7 + (k / short) as i32, (k % short) as i32 + 1))
}

/// Weekday of a Julian day number, Sunday = 0 through Saturday = 6.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn gregorian_weekday(day: DayNumber) -> u8 {
    ((day.rem_euclid(7) + 1) % 7) as u8
}
