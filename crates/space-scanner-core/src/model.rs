use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use serde::Serialize;
use time::Date;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

#[derive(Debug, Clone, Serialize, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[serde(transparent)]
pub struct MissionId(pub String);

impl Display for MissionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[serde(transparent)]
pub struct RocketId(pub String);

impl Display for RocketId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    Success,
    Failure,
    PartialFailure,
    PrelaunchFailure,
}

impl MissionStatus {
    /// Value used for this status in the missions table.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Failure => "Failure",
            Self::PartialFailure => "Partial Failure",
            Self::PrelaunchFailure => "Prelaunch Failure",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Success" => Some(Self::Success),
            "Failure" => Some(Self::Failure),
            "Partial Failure" => Some(Self::PartialFailure),
            "Prelaunch Failure" => Some(Self::PrelaunchFailure),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl Display for MissionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RocketStatus {
    Active,
    Retired,
}

impl RocketStatus {
    /// Value used for this status in the missions table.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "StatusActive",
            Self::Retired => "StatusRetired",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "StatusActive" => Some(Self::Active),
            "StatusRetired" => Some(Self::Retired),
            _ => None,
        }
    }
}

impl Display for RocketStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `"<rocket> | <payload>"` compound column of a mission row.
#[derive(Debug, Clone, Serialize, Eq, PartialEq)]
pub struct Detail {
    pub rocket_name: String,
    pub payload: String,
}

/// One launch. Equality and hashing consider only `id`.
#[derive(Debug, Clone, Serialize)]
pub struct Mission {
    pub id: MissionId,
    pub company: String,
    pub location: String,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub detail: Detail,
    pub rocket_status: RocketStatus,
    pub cost: Option<f64>,
    pub mission_status: MissionStatus,
}

impl Mission {
    /// Last comma-delimited segment of the location, without quote characters.
    #[must_use]
    pub fn country(&self) -> String {
        let unquoted = self.location.replace('"', "");
        unquoted.rsplit(',').next().unwrap_or_default().trim().to_string()
    }
}

impl PartialEq for Mission {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Mission {}

impl Hash for Mission {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// One launch vehicle. Equality and hashing consider only `id`.
///
/// Missions refer to rockets by `name` only; nothing guarantees the name exists here.
#[derive(Debug, Clone, Serialize)]
pub struct Rocket {
    pub id: RocketId,
    pub name: String,
    pub wiki: Option<String>,
    /// Meters.
    pub height: Option<f64>,
}

impl PartialEq for Rocket {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Rocket {}

impl Hash for Rocket {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
