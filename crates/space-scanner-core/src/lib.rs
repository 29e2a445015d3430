//! In-memory catalog of space missions and rockets with a fixed set of analytical queries.
//!
//! Both tables are parsed once into a [`Catalog`]; every query afterwards is a pure read.
//! [`SpaceScanner`] pairs a catalog with a [`Cipher`] to produce the encrypted
//! most-reliable-rocket report.

mod catalog;
mod cipher;
mod model;
mod parse;
mod query;
mod reliability;
mod split;

#[cfg(test)]
mod test_fixtures;

pub use catalog::Catalog;
pub use cipher::{Cipher, CipherError};
pub use model::{Detail, Mission, MissionId, MissionStatus, Rocket, RocketId, RocketStatus};
pub use parse::{MissionParser, RecordParser, RocketParser};
pub use reliability::{reliability_from_counts, SpaceScanner};
pub use split::{split, FIELD_SEPARATOR};

#[derive(Debug, Clone, thiserror::Error, Eq, PartialEq)]
pub enum ScanError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid time window: {0}")]
    InvalidTimeWindow(String),
    #[error("malformed record: {0}")]
    MalformedRecord(String),
    #[error("cipher failure: {0}")]
    CipherFailure(String),
}
