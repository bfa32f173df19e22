/// Jalali years at which the 33-year intercalation cycle restarts.
///
/// The correspondence is tuned to astronomical observation, so this table is
/// data rather than the output of a formula. The last entry is exclusive.
pub const BREAK_YEARS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

/// First Jalali year covered by the break table (inclusive)
pub const MIN_JALALI_YEAR: i32 = BREAK_YEARS[0];
/// Last Jalali year covered by the break table (inclusive)
pub const MAX_JALALI_YEAR: i32 = BREAK_YEARS[BREAK_YEARS.len() - 1] - 1;

/// Lowest Gregorian year accepted by validation (inclusive)
pub const MIN_GREGORIAN_YEAR: i32 = 1400;
/// Highest Gregorian year accepted by validation (inclusive)
pub const MAX_GREGORIAN_YEAR: i32 = 3016;

/// Gregorian year minus Jalali year, for dates after Jalali New Year
pub const JALALI_EPOCH_OFFSET: i32 = 621;

/// Gregorian month in which Jalali New Year falls
pub const MARCH: i32 = 3;
/// Month number for February
pub const FEBRUARY: i32 = 2;
/// Month number for the first month of either calendar
pub const MIN_MONTH: i32 = 1;
/// Month number for the last month of either calendar
pub const MAX_MONTH: i32 = 12;
/// First day of month, used for lower bounds
pub const MIN_DAY: i32 = 1;

/// Length of each of the first six Jalali months
pub const JALALI_LONG_MONTH_DAYS: i32 = 31;
/// Length of months 7 through 11 (and Esfand in a leap year)
pub const JALALI_SHORT_MONTH_DAYS: i32 = 30;
/// Length of Esfand in a common year
pub const ESFAND_DAYS_COMMON: i32 = 29;
/// Days from Farvardin 1st to Mehr 1st
pub const JALALI_FIRST_HALF_DAYS: i64 = 186;
/// Days in a common Jalali year
pub const JALALI_COMMON_YEAR_DAYS: i64 = 365;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: i32 = 29;

/// Maximum days in each Gregorian month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_GREGORIAN_MONTH: [i32; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_gregorian_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Maps a Sunday-first weekday index to the Saturday-first index used with
/// Jalali dates (Saturday = 0 ... Friday = 6).
pub const SATURDAY_FIRST_WEEKDAY: [u8; 7] = [1, 2, 3, 4, 5, 6, 0];

/// Date component separator of the `Y/M/D` text form
pub const DATE_SEPARATOR: char = '/';
