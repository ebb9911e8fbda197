pub mod scope;
pub mod seat;
pub mod snapshot;
pub mod team;

pub use scope::SeatScope;
pub use seat::{Assignee, OrganizationRef, SeatAssignment, TeamParent, TeamReference};
pub use snapshot::SeatSnapshot;
pub use team::{Team, TeamMember};
