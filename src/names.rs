//! Month and weekday name tables.

/// Persian names of the Jalali months, Farvardin first
pub const JALALI_MONTHS: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

/// Persian weekday names, Saturday first
pub const JALALI_WEEKDAYS: [&str; 7] = [
    "شنبه",
    "یک شنبه",
    "دوشنبه",
    "سه شنبه",
    "چهارشنبه",
    "پنج شنبه",
    "جمعه",
];

/// One-letter Persian weekday labels, Saturday first
pub const JALALI_WEEKDAYS_SHORT: [&str; 7] = ["ش", "ی", "د", "س", "چ", "پ", "ج"];

/// English month names, January first
pub const GREGORIAN_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English weekday names, Sunday first
pub const GREGORIAN_WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Two-letter English weekday labels, Sunday first
pub const GREGORIAN_WEEKDAYS_SHORT: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
