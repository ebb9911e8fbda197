use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// User identity a seat is assigned to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignee {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Organization a seat is billed through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationRef {
    pub login: String,
}

/// Team through which a seat was granted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamReference {
    pub name: String,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub parent: Option<TeamParent>,
}

/// Enclosing team of a child team. The hierarchy is two levels only:
/// a parent names its children, children never nest further.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamParent {
    pub name: String,
}

impl TeamReference {
    /// Two references denote the same team by id when both carry one,
    /// by name otherwise.
    pub fn same_team(&self, other: &TeamReference) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => self.name == other.name,
        }
    }
}

/// One assigned Copilot seat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatAssignment {
    pub assignee: Assignee,
    #[serde(default)]
    pub organization: Option<OrganizationRef>,
    #[serde(default)]
    pub assigning_team: Option<TeamReference>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_activity_at: Option<DateTime<Utc>>,
    /// Editor the last activity was recorded from, possibly a
    /// composite "name/version" string
    #[serde(default)]
    pub last_activity_editor: Option<String>,
    #[serde(default)]
    pub plan_type: Option<String>,
    #[serde(default)]
    pub pending_cancellation_date: Option<NaiveDate>,
}
