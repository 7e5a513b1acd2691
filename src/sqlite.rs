//! SQLite column conversions.
//!
//! Dates are stored as canonical `YYYY-MM-DD` text. Reading also accepts
//! timestamps written by rusqlite's chrono support or any RFC 3339 text, in
//! which case the calendar day is taken in the timestamp's own offset.
//! Blobs are read as UTF-8 text. `NULL` and empty text or blobs read as the
//! zero date, or as null for [`NullDate`].

use chrono::DateTime;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};

use crate::date::Date;
use crate::error::{CalDateError, CalDateResult};
use crate::null_date::NullDate;

const TIMESTAMP_LAYOUT: &str = "%F %T%.f%:z";

fn parse_moment(text: &str) -> CalDateResult<Date> {
    let moment = DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_str(text, TIMESTAMP_LAYOUT))
        .map_err(|e| CalDateError::parse(text, TIMESTAMP_LAYOUT, e))?;

    let date = Date::from_datetime(&moment);
    if date.is_zero() {
        return Err(CalDateError::parse(text, TIMESTAMP_LAYOUT, "zero timestamp"));
    }

    Ok(date)
}

/// `None` for SQL `NULL` and empty text or blobs.
fn read_column(value: ValueRef<'_>) -> FromSqlResult<Option<Date>> {
    let text = match value {
        ValueRef::Null => return Ok(None),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            std::str::from_utf8(bytes).map_err(|e| FromSqlError::Other(Box::new(e)))?
        }
        _ => return Err(FromSqlError::InvalidType),
    };

    if text.is_empty() {
        return Ok(None);
    }

    Date::parse(text)
        .or_else(|err| parse_moment(text).map_err(|_| err))
        .map(Some)
        .map_err(|e| FromSqlError::Other(Box::new(e)))
}

impl ToSql for Date {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for Date {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Ok(read_column(value)?.unwrap_or_default())
    }
}

impl ToSql for NullDate {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self.as_option() {
            Some(date) => Ok(ToSqlOutput::from(date.to_string())),
            None => Ok(ToSqlOutput::Owned(Value::Null)),
        }
    }
}

impl FromSql for NullDate {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        read_column(value).map(NullDate::from_option)
    }
}
