use time::macros::format_description;
use time::Date;

use crate::model::{Detail, Mission, MissionId, MissionStatus, Rocket, RocketId, RocketStatus};
use crate::split::{split, FIELD_SEPARATOR};
use crate::ScanError;

/// Turns one table row into a typed record.
pub trait RecordParser {
    type Record;

    /// Number of columns a row of this table MUST have.
    const FIELD_COUNT: usize;

    /// Convert already-split fields into a record.
    ///
    /// # Errors
    /// Returns [`ScanError::MalformedRecord`] when the field count differs from
    /// [`Self::FIELD_COUNT`] or any field fails conversion.
    fn parse_fields(&self, fields: &[String]) -> Result<Self::Record, ScanError>;

    /// Split a raw line on [`FIELD_SEPARATOR`] and parse the resulting fields.
    ///
    /// # Errors
    /// Same as [`Self::parse_fields`].
    fn parse_record(&self, line: &str) -> Result<Self::Record, ScanError> {
        self.parse_fields(&split(line, FIELD_SEPARATOR))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MissionParser;

impl MissionParser {
    const ID: usize = 0;
    const COMPANY: usize = 1;
    const LOCATION: usize = 2;
    const DATE: usize = 3;
    const DETAIL: usize = 4;
    const ROCKET_STATUS: usize = 5;
    const COST: usize = 6;
    const MISSION_STATUS: usize = 7;
}

impl RecordParser for MissionParser {
    type Record = Mission;

    const FIELD_COUNT: usize = 8;

    fn parse_fields(&self, fields: &[String]) -> Result<Mission, ScanError> {
        expect_field_count(fields, Self::FIELD_COUNT)?;

        let rocket_status = RocketStatus::parse(&fields[Self::ROCKET_STATUS]).ok_or_else(|| {
            malformed("rocket_status", &fields[Self::ROCKET_STATUS], "is not a known rocket status")
        })?;
        let mission_status =
            MissionStatus::parse(&fields[Self::MISSION_STATUS]).ok_or_else(|| {
                malformed(
                    "mission_status",
                    &fields[Self::MISSION_STATUS],
                    "is not a known mission status",
                )
            })?;

        Ok(Mission {
            id: MissionId(fields[Self::ID].clone()),
            company: fields[Self::COMPANY].clone(),
            location: fields[Self::LOCATION].clone(),
            date: parse_date(&fields[Self::DATE])?,
            detail: parse_detail(&fields[Self::DETAIL])?,
            rocket_status,
            cost: parse_quantity("cost", &fields[Self::COST])?,
            mission_status,
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RocketParser;

impl RocketParser {
    const ID: usize = 0;
    const NAME: usize = 1;
    const WIKI: usize = 2;
    const HEIGHT: usize = 3;
}

impl RecordParser for RocketParser {
    type Record = Rocket;

    const FIELD_COUNT: usize = 4;

    fn parse_fields(&self, fields: &[String]) -> Result<Rocket, ScanError> {
        expect_field_count(fields, Self::FIELD_COUNT)?;

        let wiki = &fields[Self::WIKI];
        Ok(Rocket {
            id: RocketId(fields[Self::ID].clone()),
            name: fields[Self::NAME].clone(),
            wiki: if wiki.trim().is_empty() { None } else { Some(wiki.clone()) },
            height: parse_quantity("height", &fields[Self::HEIGHT])?,
        })
    }
}

fn malformed(field: &str, value: &str, reason: &str) -> ScanError {
    ScanError::MalformedRecord(format!("{field} `{value}` {reason}"))
}

fn expect_field_count(fields: &[String], expected: usize) -> Result<(), ScanError> {
    if fields.len() != expected {
        return Err(ScanError::MalformedRecord(format!(
            "expected {expected} fields, found {}",
            fields.len()
        )));
    }
    Ok(())
}

/// Blank is absent. Otherwise thousands separators and a trailing unit (`58.2 m`) are
/// dropped before parsing; the result MUST be finite and not negative.
fn parse_quantity(field: &str, raw: &str) -> Result<Option<f64>, ScanError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }

    let without_separators = raw.replace(',', "");
    let numeric = without_separators
        .trim()
        .trim_end_matches(|ch: char| ch.is_ascii_alphabetic())
        .trim();
    let value = numeric
        .parse::<f64>()
        .map_err(|err| malformed(field, raw, &format!("is not a number: {err}")))?;

    if !value.is_finite() {
        return Err(malformed(field, raw, "MUST be a finite amount"));
    }
    if value < 0.0 {
        return Err(malformed(field, raw, "MUST NOT be negative"));
    }

    Ok(Some(value))
}

/// The leading weekday MUST agree with the calendar date.
fn parse_date(raw: &str) -> Result<Date, ScanError> {
    let date =
        Date::parse(raw, format_description!("[weekday repr:short] [month repr:short] [day], [year]"))
            .map_err(|err| {
                malformed("date", raw, &format!("does not match `Www Mmm dd, yyyy`: {err}"))
            })?;

    let weekday = date
        .format(format_description!("[weekday repr:short]"))
        .map_err(|err| malformed("date", raw, &format!("weekday cannot be formatted: {err}")))?;
    if !raw.starts_with(weekday.as_str()) {
        return Err(malformed("date", raw, &format!("falls on {weekday}")));
    }

    Ok(date)
}

fn parse_detail(raw: &str) -> Result<Detail, ScanError> {
    let Some((rocket, payload)) = raw.split_once('|') else {
        return Err(malformed("detail", raw, "MUST have the form `<rocket> | <payload>`"));
    };

    let rocket_name = rocket.trim_end();
    let payload = payload.trim_start();
    if rocket_name.is_empty() || payload.is_empty() {
        return Err(malformed("detail", raw, "MUST name both a rocket and a payload"));
    }

    Ok(Detail { rocket_name: rocket_name.to_string(), payload: payload.to_string() })
}
