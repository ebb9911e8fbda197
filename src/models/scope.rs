/// Billing scope for a seat query - a single organization or a whole
/// enterprise, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeatScope {
    Enterprise(String),
    Organization(String),
}

impl SeatScope {
    /// Organization name, when this scope is an organization
    pub fn organization(&self) -> Option<&str> {
        match self {
            SeatScope::Organization(name) => Some(name),
            SeatScope::Enterprise(_) => None,
        }
    }

    /// Enterprise name, when this scope is an enterprise
    pub fn enterprise(&self) -> Option<&str> {
        match self {
            SeatScope::Enterprise(name) => Some(name),
            SeatScope::Organization(_) => None,
        }
    }

    /// API path of the Copilot seat listing for this scope
    pub fn seats_path(&self) -> String {
        match self {
            SeatScope::Enterprise(name) => {
                format!("enterprises/{}/copilot/billing/seats", name)
            }
            SeatScope::Organization(name) => {
                format!("orgs/{}/copilot/billing/seats", name)
            }
        }
    }
}

impl std::fmt::Display for SeatScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeatScope::Enterprise(name) => write!(f, "enterprise '{}'", name),
            SeatScope::Organization(name) => write!(f, "organization '{}'", name),
        }
    }
}
