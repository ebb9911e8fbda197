//! Derivation of the distinct assigning-team catalog.

use crate::error::AppResult;
use crate::github::SeatsProvider;
use crate::models::{SeatScope, SeatSnapshot, TeamReference};

pub struct TeamCatalog;

impl TeamCatalog {
    /// Distinct assigning teams observed across the snapshots, sorted
    /// by name (case-sensitive; an empty name sorts first). Two teams
    /// are the same by id when both carry one, by name otherwise.
    pub fn from_snapshots(snapshots: &[SeatSnapshot]) -> Vec<TeamReference> {
        let mut catalog: Vec<TeamReference> = Vec::new();

        for snapshot in snapshots {
            for seat in &snapshot.seats {
                if let Some(team) = &seat.assigning_team {
                    if !catalog.iter().any(|known| known.same_team(team)) {
                        catalog.push(team.clone());
                    }
                }
            }
        }

        catalog.sort_by(|a, b| a.name.cmp(&b.name));
        catalog
    }

    /// Catalog for freshly fetched snapshots. When no seat carries a
    /// team assignment, organizations fall back to the full teams
    /// listing; enterprises have no listing endpoint and yield an
    /// empty catalog.
    pub async fn with_listing_fallback(
        api: &dyn SeatsProvider,
        scope: &SeatScope,
        snapshots: &[SeatSnapshot],
    ) -> AppResult<Vec<TeamReference>> {
        let catalog = Self::from_snapshots(snapshots);
        if !catalog.is_empty() {
            return Ok(catalog);
        }

        let org = match scope.organization() {
            Some(org) => org,
            None => return Ok(catalog),
        };

        let mut catalog: Vec<TeamReference> = api
            .list_teams(org)
            .await?
            .iter()
            .map(|team| team.to_reference())
            .collect();
        catalog.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(catalog)
    }
}
