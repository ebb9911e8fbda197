//! Team membership resolution for seat filtering.

use std::collections::HashSet;

use crate::config::TeamConfig;
use crate::github::SeatsProvider;
use crate::models::{SeatAssignment, SeatScope};

/// Resolves which seats belong to a set of requested teams.
///
/// Direct seat assignments always win; the membership lookup only runs
/// when no seat in the input carries a matching team at all (older
/// data is missing the assigning team field entirely).
pub struct TeamMembershipResolver<'a> {
    api: &'a dyn SeatsProvider,
    scope: &'a SeatScope,
    config: &'a TeamConfig,
}

impl<'a> TeamMembershipResolver<'a> {
    pub fn new(api: &'a dyn SeatsProvider, scope: &'a SeatScope, config: &'a TeamConfig) -> Self {
        Self { api, scope, config }
    }

    /// Returns the subset of `seats` belonging to `teams`.
    ///
    /// Never falls back to the unfiltered list: when neither direct
    /// assignments nor the membership lookup yield anything, the
    /// result is empty.
    pub async fn filter_by_teams(
        &self,
        seats: Vec<SeatAssignment>,
        teams: &[String],
    ) -> Vec<SeatAssignment> {
        let requested: HashSet<&str> = teams.iter().map(String::as_str).collect();

        let direct: Vec<SeatAssignment> = seats
            .iter()
            .filter(|seat| {
                seat.assigning_team
                    .as_ref()
                    .map(|team| requested.contains(team.name.as_str()))
                    .unwrap_or(false)
            })
            .cloned()
            .collect();
        if !direct.is_empty() {
            return direct;
        }

        let members = self.resolve_members(teams).await;
        if members.is_empty() {
            return Vec::new();
        }

        seats
            .into_iter()
            .filter(|seat| members.contains(&seat.assignee.login))
            .collect()
    }

    /// Unions the member logins of every requested team and of its
    /// child teams. Lookup failures are logged and contribute an empty
    /// set; they never abort the resolution.
    async fn resolve_members(&self, teams: &[String]) -> HashSet<String> {
        let org = match self.scope.organization() {
            Some(org) => org,
            None => {
                log::warn!("Team membership lookup needs an organization scope, returning no members");
                return HashSet::new();
            }
        };

        // One listing serves the parent lookup for every requested team
        let all_teams = match self.api.list_teams(org).await {
            Ok(all) => all,
            Err(e) => {
                log::warn!("Failed to list teams of '{}': {}", org, e);
                Vec::new()
            }
        };

        let mut members = HashSet::new();
        for team in teams {
            self.collect_team_members(org, team, &mut members).await;

            let mut children: Vec<String> = all_teams
                .iter()
                .filter(|candidate| {
                    candidate
                        .parent
                        .as_ref()
                        .map(|parent| parent.name == *team)
                        .unwrap_or(false)
                })
                .map(|candidate| candidate.name.clone())
                .collect();

            if let Some(overrides) = self.config.child_overrides.get(team) {
                for child in overrides {
                    if !children.contains(child) {
                        children.push(child.clone());
                    }
                }
            }

            for child in &children {
                self.collect_team_members(org, child, &mut members).await;
            }
        }

        members
    }

    async fn collect_team_members(&self, org: &str, team: &str, members: &mut HashSet<String>) {
        match self.api.list_team_members(org, team).await {
            Ok(list) => members.extend(list.into_iter().map(|member| member.login)),
            Err(e) => log::warn!("Failed to list members of team '{}': {}", team, e),
        }
    }
}
