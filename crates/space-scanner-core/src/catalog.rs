use std::io::BufRead;

use crate::model::{Mission, Rocket};
use crate::parse::{MissionParser, RecordParser, RocketParser};
use crate::ScanError;

/// Missions and rockets in source row order, fixed after construction.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub(crate) missions: Vec<Mission>,
    pub(crate) rockets: Vec<Rocket>,
}

impl Catalog {
    #[must_use]
    pub fn new(missions: Vec<Mission>, rockets: Vec<Rocket>) -> Self {
        Self { missions, rockets }
    }

    /// Build a catalog from two tables. A missing source contributes zero records.
    ///
    /// The first line of each source is a header and is skipped.
    ///
    /// # Errors
    /// Returns [`ScanError::MalformedRecord`] for the first row that cannot be read or
    /// parsed; no partial catalog is produced.
    pub fn from_readers<M, R>(missions: Option<M>, rockets: Option<R>) -> Result<Self, ScanError>
    where
        M: BufRead,
        R: BufRead,
    {
        let missions = match missions {
            Some(source) => load_table("missions", &MissionParser, source.lines())?,
            None => Vec::new(),
        };
        let rockets = match rockets {
            Some(source) => load_table("rockets", &RocketParser, source.lines())?,
            None => Vec::new(),
        };

        Ok(Self { missions, rockets })
    }

    /// Same as [`Self::from_readers`] for in-memory text.
    ///
    /// # Errors
    /// Returns [`ScanError::MalformedRecord`] for the first row that cannot be parsed.
    pub fn from_csv(missions: Option<&str>, rockets: Option<&str>) -> Result<Self, ScanError> {
        Self::from_readers(missions.map(str::as_bytes), rockets.map(str::as_bytes))
    }

    #[must_use]
    pub fn mission_count(&self) -> usize {
        self.missions.len()
    }

    #[must_use]
    pub fn rocket_count(&self) -> usize {
        self.rockets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missions.is_empty() && self.rockets.is_empty()
    }

    /// First rocket carrying `name`, if any. Missions may name rockets that are not listed.
    #[must_use]
    pub fn rocket_by_name(&self, name: &str) -> Option<&Rocket> {
        self.rockets.iter().find(|rocket| rocket.name == name)
    }
}

fn load_table<P, I>(table: &str, parser: &P, lines: I) -> Result<Vec<P::Record>, ScanError>
where
    P: RecordParser,
    I: Iterator<Item = std::io::Result<String>>,
{
    let mut records = Vec::new();

    // Line 1 is the header.
    for (index, line) in lines.enumerate().skip(1) {
        let line_number = index + 1;
        let parsed = line
            .map_err(|err| ScanError::MalformedRecord(format!("unreadable line: {err}")))
            .and_then(|line| parser.parse_record(&line));

        match parsed {
            Ok(record) => records.push(record),
            Err(err) => {
                tracing::warn!(table, line = line_number, error = %err, "rejected record");
                let reason = match err {
                    ScanError::MalformedRecord(reason) => reason,
                    other => other.to_string(),
                };
                return Err(ScanError::MalformedRecord(format!(
                    "{table} line {line_number}: {reason}"
                )));
            }
        }
    }

    tracing::debug!(table, records = records.len(), "loaded table");
    Ok(records)
}
