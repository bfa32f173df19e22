use crate::consts::DATE_SEPARATOR;
use crate::convert::ConvertError;
use crate::names::{
    GREGORIAN_MONTHS, GREGORIAN_WEEKDAYS, GREGORIAN_WEEKDAYS_SHORT, JALALI_MONTHS,
    JALALI_WEEKDAYS, JALALI_WEEKDAYS_SHORT,
};
use crate::prelude::*;
use crate::query::{is_valid_gregorian_date, is_valid_jalali_date};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A bare `year/month/day` triple.
///
/// Carries no calendar and no validity guarantee; it is the structured
/// interchange form (`{"Year": .., "Month": .., "Day": ..}`) of the
/// conversion boundary.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[display(fmt = "{}/{}/{}", year, month, day)]
#[serde(rename_all = "PascalCase")]
pub struct Ymd {
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

impl Ymd {
    /// Bundles the three fields; nothing is checked
    #[inline]
    pub const fn new(year: i32, month: i32, day: i32) -> Self {
        Self { year, month, day }
    }
}

impl FromStr for Ymd {
    type Err = ConvertError;

    /// Parses the `Y/M/D` text form. Only the shape is checked here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ConvertError::MissingArgument);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(ConvertError::InvalidFormat(format!(
                "expected 3 '{DATE_SEPARATOR}'-separated fields, found {}: {trimmed}",
                parts.len()
            )));
        };

        Ok(Self {
            year: parse_field(year)?,
            month: parse_field(month)?,
            day: parse_field(day)?,
        })
    }
}

fn parse_field(s: &str) -> Result<i32, ConvertError> {
    s.parse::<i32>()
        .map_err(|_| ConvertError::InvalidFormat(s.to_owned()))
}

/// The two calendars the engine understands.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Calendar {
    /// Solar Hijri calendar, week starting Saturday
    #[display(fmt = "jalali")]
    Jalali,
    /// Proleptic Gregorian calendar, week starting Sunday
    #[display(fmt = "gregorian")]
    Gregorian,
}

impl Calendar {
    /// The calendar a date in `self` is converted into
    pub const fn other(self) -> Self {
        match self {
            Self::Jalali => Self::Gregorian,
            Self::Gregorian => Self::Jalali,
        }
    }

    /// Month names, Farvardin or January first
    pub const fn month_names(self) -> &'static [&'static str; 12] {
        match self {
            Self::Jalali => &JALALI_MONTHS,
            Self::Gregorian => &GREGORIAN_MONTHS,
        }
    }

    /// Weekday names in this calendar's own week order
    pub const fn weekday_names(self) -> &'static [&'static str; 7] {
        match self {
            Self::Jalali => &JALALI_WEEKDAYS,
            Self::Gregorian => &GREGORIAN_WEEKDAYS,
        }
    }

    /// Short weekday names in the same order as [`Calendar::weekday_names`]
    pub const fn weekday_abbreviations(self) -> &'static [&'static str; 7] {
        match self {
            Self::Jalali => &JALALI_WEEKDAYS_SHORT,
            Self::Gregorian => &GREGORIAN_WEEKDAYS_SHORT,
        }
    }

    /// Checks that `ymd` is a legal date in this calendar
    pub fn is_valid(self, ymd: Ymd) -> bool {
        match self {
            Self::Jalali => is_valid_jalali_date(ymd.year, ymd.month, ymd.day),
            Self::Gregorian => is_valid_gregorian_date(ymd.year, ymd.month, ymd.day),
        }
    }
}

impl FromStr for Calendar {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jalali" | "fa" => Ok(Self::Jalali),
            "gregorian" | "en" => Ok(Self::Gregorian),
            _ => Err(ConvertError::InvalidFormat(format!("unknown calendar: {s}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ymd_display_has_no_padding() {
        assert_eq!(Ymd::new(1403, 1, 5).to_string(), "1403/1/5");
        assert_eq!(Ymd::new(-61, 12, 29).to_string(), "-61/12/29");
    }

    #[test]
    fn test_ymd_parse() {
        let ymd = "1403/12/30".parse::<Ymd>().unwrap();
        assert_eq!(ymd, Ymd::new(1403, 12, 30));

        let ymd = " 2024 / 2 / 29 ".parse::<Ymd>().unwrap();
        assert_eq!(ymd, Ymd::new(2024, 2, 29));
    }

    #[test]
    fn test_ymd_parse_keeps_out_of_range_values() {
        // Shape is fine; validity is the converter's concern.
        let ymd = "2024/13/40".parse::<Ymd>().unwrap();
        assert_eq!(ymd, Ymd::new(2024, 13, 40));
    }

    #[test]
    fn test_ymd_parse_bad_shape() {
        assert!(matches!(
            "abc".parse::<Ymd>(),
            Err(ConvertError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2024/1".parse::<Ymd>(),
            Err(ConvertError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2024/1/1/1".parse::<Ymd>(),
            Err(ConvertError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2024-01-01".parse::<Ymd>(),
            Err(ConvertError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2024/XX/1".parse::<Ymd>(),
            Err(ConvertError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_ymd_parse_empty() {
        assert!(matches!("".parse::<Ymd>(), Err(ConvertError::MissingArgument)));
        assert!(matches!("   ".parse::<Ymd>(), Err(ConvertError::MissingArgument)));
    }

    #[test]
    fn test_ymd_tuple_conversions() {
        let ymd: Ymd = (1403, 1, 1).into();
        assert_eq!(ymd, Ymd::new(1403, 1, 1));
        let (y, m, d): (i32, i32, i32) = ymd.into();
        assert_eq!((y, m, d), (1403, 1, 1));
    }

    #[test]
    fn test_ymd_serde_field_names() {
        let json = serde_json::to_string(&Ymd::new(1403, 1, 1)).unwrap();
        assert_eq!(json, r#"{"Year":1403,"Month":1,"Day":1}"#);

        let parsed: Ymd = serde_json::from_str(r#"{"Year":2024,"Month":2,"Day":29}"#).unwrap();
        assert_eq!(parsed, Ymd::new(2024, 2, 29));

        let result: Result<Ymd, _> = serde_json::from_str(r#"{"Foo":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_calendar_display_and_parse() {
        assert_eq!(Calendar::Jalali.to_string(), "jalali");
        assert_eq!(Calendar::Gregorian.to_string(), "gregorian");
        assert_eq!("Jalali".parse::<Calendar>().unwrap(), Calendar::Jalali);
        assert_eq!("fa".parse::<Calendar>().unwrap(), Calendar::Jalali);
        assert_eq!("EN".parse::<Calendar>().unwrap(), Calendar::Gregorian);
        assert!("hijri".parse::<Calendar>().is_err());
    }

    #[test]
    fn test_calendar_serde() {
        let json = serde_json::to_string(&Calendar::Jalali).unwrap();
        assert_eq!(json, r#""jalali""#);
        let parsed: Calendar = serde_json::from_str(r#""gregorian""#).unwrap();
        assert_eq!(parsed, Calendar::Gregorian);
    }

    #[test]
    fn test_calendar_tables() {
        assert_eq!(Calendar::Jalali.month_names()[0], "فروردین");
        assert_eq!(Calendar::Gregorian.month_names()[11], "December");
        assert_eq!(Calendar::Jalali.weekday_names()[0], "شنبه");
        assert_eq!(Calendar::Gregorian.weekday_names()[0], "Sunday");
        assert_eq!(Calendar::Gregorian.weekday_abbreviations()[6], "Sa");
        assert_eq!(Calendar::Jalali.other(), Calendar::Gregorian);
    }

    #[test]
    fn test_calendar_is_valid() {
        assert!(Calendar::Jalali.is_valid(Ymd::new(1403, 12, 30)));
        assert!(!Calendar::Jalali.is_valid(Ymd::new(1402, 12, 30)));
        assert!(Calendar::Gregorian.is_valid(Ymd::new(2024, 2, 29)));
        assert!(!Calendar::Gregorian.is_valid(Ymd::new(1399, 1, 1)));
    }
}
