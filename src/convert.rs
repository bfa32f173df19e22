use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::kernel::{
    absolute_to_gregorian, absolute_to_jalali, check_fields, gregorian_to_absolute,
    jalali_to_absolute,
};
use crate::{Calendar, DateError, Ymd};

/// Error type for the conversion boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// No date was supplied.
    #[error("Missing date argument")]
    MissingArgument,

    /// Input is neither a `Y/M/D` string nor a `{Year, Month, Day}` record.
    #[error("Invalid date format: {0}")]
    InvalidFormat(String),

    /// Well-formed input that is not a legal date.
    #[error(transparent)]
    Date(#[from] DateError),
}

/// A date as it arrives at the boundary: text or structured fields.
///
/// Conversions hand back the same variant they were given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
    Text(String),
    Fields(Ymd),
}

/// Converts a Gregorian date to Jalali.
///
/// Only the month (1-12) and day (1-31) are range-checked; `(979, 3, 21)`
/// maps to `358/1/1` even though year 979 is below the validation floor.
///
/// # Errors
/// Returns `DateError::InvalidMonth` or `DateError::InvalidDate` for fields
/// outside those ranges, and `DateError::OutOfRange` if the result lies
/// outside the break table.
pub fn to_jalali(gregorian: Ymd) -> Result<Ymd, DateError> {
    check_fields(Calendar::Gregorian, gregorian)?;
    absolute_to_jalali(gregorian_to_absolute(
        gregorian.year,
        gregorian.month,
        gregorian.day,
    ))
}

/// Converts a Jalali date to Gregorian.
///
/// # Errors
/// Returns `DateError::InvalidMonth` or `DateError::InvalidDate` for a month
/// outside 1-12 or a day outside 1-31, and `DateError::OutOfRange` if the
/// Jalali year lies outside the break table.
pub fn to_gregorian(jalali: Ymd) -> Result<Ymd, DateError> {
    jalali_to_absolute(jalali.year, jalali.month, jalali.day).and_then(absolute_to_gregorian)
}

/// Validates `ymd` in the calendar opposite `target`, then converts it.
///
/// # Errors
/// Returns `DateError::InvalidDate` if `ymd` is not a legal source date.
pub fn convert_fields(ymd: Ymd, target: Calendar) -> Result<Ymd, ConvertError> {
    let source = target.other();
    if !source.is_valid(ymd) {
        debug!(%ymd, %source, "rejecting invalid source date");
        return Err(DateError::InvalidDate {
            calendar: source,
            year: ymd.year,
            month: ymd.month,
            day: ymd.day,
        }
        .into());
    }

    let converted = match target {
        Calendar::Jalali => to_jalali(ymd)?,
        Calendar::Gregorian => to_gregorian(ymd)?,
    };
    debug!(%ymd, %converted, %target, "converted date");
    Ok(converted)
}

/// Text form of [`convert_fields`]: `"Y/M/D"` in, `"Y/M/D"` out.
///
/// # Errors
/// Returns `ConvertError::MissingArgument` for blank input,
/// `ConvertError::InvalidFormat` if the text is not three numeric fields, and
/// `DateError::InvalidDate` if the fields are not a legal source date.
pub fn convert_text(text: &str, target: Calendar) -> Result<String, ConvertError> {
    let ymd = text.parse::<Ymd>().inspect_err(|err| {
        debug!(text, %err, "rejecting date text");
    })?;
    convert_fields(ymd, target).map(|converted| converted.to_string())
}

/// Converts a boundary value, keeping its shape.
///
/// # Errors
/// Returns `ConvertError::MissingArgument` if `date` is absent or blank, and
/// otherwise the errors of [`convert_text`] / [`convert_fields`].
pub fn convert(date: Option<&DateValue>, target: Calendar) -> Result<DateValue, ConvertError> {
    match date.ok_or(ConvertError::MissingArgument)? {
        DateValue::Text(text) => convert_text(text, target).map(DateValue::Text),
        DateValue::Fields(ymd) => convert_fields(*ymd, target).map(DateValue::Fields),
    }
}

/// Converts an untyped JSON value, keeping its shape.
///
/// `null` and `""` count as missing; objects must carry integer `Year`,
/// `Month` and `Day` fields.
///
/// # Errors
/// Returns `ConvertError::InvalidFormat` for any other JSON value, plus the
/// errors of [`convert`].
pub fn convert_json(value: &Value, target: Calendar) -> Result<Value, ConvertError> {
    let date = match value {
        Value::Null => return Err(ConvertError::MissingArgument),
        Value::String(text) => DateValue::Text(text.clone()),
        Value::Object(_) => Ymd::deserialize(value)
            .map(DateValue::Fields)
            .map_err(|err| ConvertError::InvalidFormat(err.to_string()))?,
        other => {
            return Err(ConvertError::InvalidFormat(format!(
                "expected a date string or object, found {other}"
            )));
        }
    };

    let converted = convert(Some(&date), target)?;
    serde_json::to_value(converted).map_err(|err| ConvertError::InvalidFormat(err.to_string()))
}
