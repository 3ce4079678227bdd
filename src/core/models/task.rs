//! Task model
//!
//! A task is a site visit: a unit of field work with a target location,
//! a priority, a due date and a lifecycle status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::{ParseError, canonical, lenient_degrees, unknown_degrees};

/// A site visit as seen in a task directory snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier
    pub id: String,

    /// Site name
    #[serde(default)]
    pub name: String,

    /// Target coordinates (may be missing)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    /// State label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Locality label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,

    /// Lifecycle status
    pub status: TaskStatus,

    /// Priority, medium when absent or null
    #[serde(default, deserialize_with = "priority_or_default")]
    pub priority: Priority,

    /// When the visit is due
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    /// Current assignee (agent id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,

    /// When the current assignee was set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_at: Option<DateTime<Utc>>,

    /// Who set the current assignee
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_by: Option<String>,
}

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees, -90..=90
    #[serde(default = "unknown_degrees", deserialize_with = "lenient_degrees")]
    pub latitude: f64,
    /// Longitude in degrees, -180..=180
    #[serde(default = "unknown_degrees", deserialize_with = "lenient_degrees")]
    pub longitude: f64,
}

impl Coordinates {
    /// Build coordinates, rejecting non-finite or out-of-range values
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let coords = Self {
            latitude,
            longitude,
        };
        coords.is_valid().then_some(coords)
    }

    /// Whether both components are finite and within range
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Site visit lifecycle status
///
/// ```text
/// pending ─┐
///          ├─> assigned ─> inProgress ─> completed
/// permitVerified ─┘
/// (any state before completed) ─> cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "String")]
pub enum TaskStatus {
    /// Created, waiting for permits or an assignee
    Pending,
    /// Permits checked, waiting for an assignee
    PermitVerified,
    /// An agent has been assigned
    Assigned,
    /// The agent is on site
    InProgress,
    /// Visit done
    Completed,
    /// Visit called off
    Cancelled,
}

impl TaskStatus {
    /// Whether a task in this status may receive an assignee
    #[must_use]
    pub const fn is_assignable(self) -> bool {
        matches!(self, Self::Pending | Self::PermitVerified)
    }

    /// Whether this status counts toward an agent's active workload
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Assigned | Self::InProgress)
    }

    /// Whether no further transitions are possible
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether `self -> next` is a legal lifecycle transition
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::Pending, Self::PermitVerified)
            | (Self::Pending | Self::PermitVerified, Self::Assigned)
            | (Self::Assigned, Self::InProgress)
            | (Self::InProgress, Self::Completed) => true,
            (from, Self::Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::PermitVerified => write!(f, "permitVerified"),
            Self::Assigned => write!(f, "assigned"),
            Self::InProgress => write!(f, "inProgress"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match canonical(s).as_str() {
            "pending" => Ok(Self::Pending),
            "permitverified" | "verified" => Ok(Self::PermitVerified),
            "assigned" => Ok(Self::Assigned),
            "inprogress" | "started" => Ok(Self::InProgress),
            "completed" | "complete" | "done" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(ParseError::TaskStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = ParseError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

/// Task priority, ordered `Low < Medium < High`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Priority {
    /// Can wait
    Low,
    /// Normal
    #[default]
    Medium,
    /// Visit first
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match canonical(s).as_str() {
            "low" => Ok(Self::Low),
            "medium" | "med" | "normal" => Ok(Self::Medium),
            "high" | "urgent" => Ok(Self::High),
            _ => Err(ParseError::Priority(s.to_string())),
        }
    }
}

impl TryFrom<String> for Priority {
    type Error = ParseError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

fn priority_or_default<'de, D>(deserializer: D) -> Result<Priority, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Priority>::deserialize(deserializer)?.unwrap_or_default())
}

impl Task {
    /// Create an unassigned task with medium priority and no location
    #[must_use]
    pub fn new(id: impl Into<String>, status: TaskStatus) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            coordinates: None,
            state: None,
            locality: None,
            status,
            priority: Priority::default(),
            due_date: None,
            assigned_to: None,
            assigned_at: None,
            assigned_by: None,
        }
    }

    /// Set the target coordinates
    #[must_use]
    pub const fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Some(Coordinates {
            latitude,
            longitude,
        });
        self
    }

    /// Set the state/locality labels
    #[must_use]
    pub fn with_region(mut self, state: Option<&str>, locality: Option<&str>) -> Self {
        self.state = state.map(String::from);
        self.locality = locality.map(String::from);
        self
    }

    /// Set the priority
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the due date
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Set the current assignee
    #[must_use]
    pub fn assigned_to(mut self, agent_id: &str) -> Self {
        self.assigned_to = Some(agent_id.to_string());
        self
    }

    /// Validated target position, `None` when absent or malformed
    #[must_use]
    pub fn position(&self) -> Option<Coordinates> {
        self.coordinates.filter(Coordinates::is_valid)
    }

    /// Whether the task is unassigned and in an assignable status
    #[must_use]
    pub const fn is_open_for_assignment(&self) -> bool {
        self.status.is_assignable() && self.assigned_to.is_none()
    }

    /// Whether the task is assigned to `agent_id`
    #[must_use]
    pub fn is_assigned_to(&self, agent_id: &str) -> bool {
        self.assigned_to.as_deref() == Some(agent_id)
    }

    /// Whether the due date has passed without the visit being completed
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status != TaskStatus::Completed && self.due_date.is_some_and(|due| due < now)
    }

    /// Record an assignment on this task
    ///
    /// Adapters call this after checking [`Task::is_open_for_assignment`]
    /// inside their own critical section.
    pub fn apply_assignment(&mut self, agent_id: &str, assigned_by: &str, at: DateTime<Utc>) {
        self.status = TaskStatus::Assigned;
        self.assigned_to = Some(agent_id.to_string());
        self.assigned_by = Some(assigned_by.to_string());
        self.assigned_at = Some(at);
    }
}
