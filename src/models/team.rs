use serde::{Deserialize, Serialize};

use super::seat::{TeamParent, TeamReference};

/// Team object returned by the organization teams listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub parent: Option<TeamParent>,
}

impl Team {
    /// Converts to the reference shape used by seat assignments and
    /// the team catalog
    pub fn to_reference(&self) -> TeamReference {
        TeamReference {
            name: self.name.clone(),
            id: self.id,
            slug: self.slug.clone(),
            parent: self.parent.clone(),
        }
    }
}

/// Member entry returned by the team members listing
#[derive(Debug, Clone, Deserialize)]
pub struct TeamMember {
    pub login: String,
}
