//! Agent model
//!
//! An agent is a field worker (data collector or coordinator) who can be sent
//! to a site visit. Agents are owned by an external directory; this crate
//! only reads snapshots of them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Coordinates, ParseError, canonical, lenient_degrees, unknown_degrees};

/// A field agent as seen in a directory snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Unique identifier
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Normalized role
    #[serde(default)]
    pub role: AgentRole,

    /// Operational status
    #[serde(default)]
    pub status: AgentStatus,

    /// Self-reported availability
    #[serde(default)]
    pub availability: Availability,

    /// Last known GPS position, if the agent ever shared one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,

    /// State the agent is affiliated with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_id: Option<String>,

    /// Locality the agent is affiliated with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality_id: Option<String>,

    /// Performance rating (informational only, never used for ranking)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_rating: Option<f64>,
}

/// Last known position of an agent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Latitude in degrees, NaN when the sample carried none
    #[serde(default = "unknown_degrees", deserialize_with = "lenient_degrees")]
    pub latitude: f64,
    /// Longitude in degrees, NaN when the sample carried none
    #[serde(default = "unknown_degrees", deserialize_with = "lenient_degrees")]
    pub longitude: f64,
    /// When the sample was taken
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Location {
    /// Validated coordinates of this sample, `None` when malformed
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Agent role, normalized from the many spellings found upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "String")]
pub enum AgentRole {
    /// Enumerator collecting data on site
    DataCollector,
    /// Field coordinator
    Coordinator,
    /// Any other role (admin, finance, ...)
    #[default]
    Other,
}

impl AgentRole {
    /// Normalize a raw role label
    ///
    /// Never fails: anything unrecognised maps to [`AgentRole::Other`].
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        match canonical(raw).as_str() {
            "datacollector" | "collector" | "enumerator" => Self::DataCollector,
            "coordinator" | "fieldcoordinator" => Self::Coordinator,
            _ => Self::Other,
        }
    }

    /// Whether agents with this role can be ranked for field work
    #[must_use]
    pub const fn is_field_role(self) -> bool {
        matches!(self, Self::DataCollector | Self::Coordinator)
    }
}

impl From<String> for AgentRole {
    fn from(raw: String) -> Self {
        Self::normalize(&raw)
    }
}

impl From<&str> for AgentRole {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DataCollector => write!(f, "dataCollector"),
            Self::Coordinator => write!(f, "coordinator"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Operational status of an agent account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum AgentStatus {
    /// Can receive work
    #[default]
    Active,
    /// Suspended or deactivated
    Inactive,
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

impl std::str::FromStr for AgentStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match canonical(s).as_str() {
            "active" => Ok(Self::Active),
            "inactive" | "disabled" | "suspended" => Ok(Self::Inactive),
            _ => Err(ParseError::AgentStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for AgentStatus {
    type Error = ParseError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

/// Self-reported availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Availability {
    /// Ready for new work
    #[default]
    Online,
    /// Working, but reachable
    Busy,
    /// Not reachable
    Offline,
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => write!(f, "online"),
            Self::Busy => write!(f, "busy"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

impl std::str::FromStr for Availability {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match canonical(s).as_str() {
            "online" | "available" => Ok(Self::Online),
            "busy" => Ok(Self::Busy),
            "offline" | "unavailable" => Ok(Self::Offline),
            _ => Err(ParseError::Availability(s.to_string())),
        }
    }
}

impl TryFrom<String> for Availability {
    type Error = ParseError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl Agent {
    /// Create an active, online agent with no location or locality
    #[must_use]
    pub fn new(id: impl Into<String>, role: AgentRole) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            role,
            status: AgentStatus::Active,
            availability: Availability::Online,
            location: None,
            state_id: None,
            locality_id: None,
            performance_rating: None,
        }
    }

    /// Set the last known location
    #[must_use]
    pub const fn with_location(
        mut self,
        latitude: f64,
        longitude: f64,
        last_updated: Option<DateTime<Utc>>,
    ) -> Self {
        self.location = Some(Location {
            latitude,
            longitude,
            last_updated,
        });
        self
    }

    /// Set the state/locality affiliation
    #[must_use]
    pub fn with_region(mut self, state_id: Option<&str>, locality_id: Option<&str>) -> Self {
        self.state_id = state_id.map(String::from);
        self.locality_id = locality_id.map(String::from);
        self
    }

    /// Set the operational status
    #[must_use]
    pub const fn with_status(mut self, status: AgentStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the availability
    #[must_use]
    pub const fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    /// Validated position, `None` when absent or malformed
    #[must_use]
    pub fn position(&self) -> Option<Coordinates> {
        self.location.as_ref().and_then(Location::coordinates)
    }

    /// When the last position sample was taken
    #[must_use]
    pub fn last_location_update(&self) -> Option<DateTime<Utc>> {
        self.location.and_then(|l| l.last_updated)
    }

    /// Whether the account is active
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == AgentStatus::Active
    }
}
