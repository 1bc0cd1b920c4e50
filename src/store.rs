//! In-memory schedule store, one schedule per season.
//!
//! Holds no locks of its own: callers that share a store serialize access (the web binary
//! keeps it behind a `RwLock` and holds the write guard across check and insert).

use crate::logic::{generate_group_stage, generate_round_robin};
use crate::models::{Competitor, Fixture, ScheduleError, SeasonId, SeasonSchedule};
use rand::Rng;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct ScheduleStore {
    seasons: HashMap<SeasonId, SeasonSchedule>,
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if fixtures already exist for the season.
    pub fn has_fixtures(&self, season_id: &str) -> bool {
        self.seasons
            .get(season_id)
            .is_some_and(|s| !s.fixtures.is_empty())
    }

    /// Generate and store a round-robin schedule. Rejected if the season already has fixtures.
    pub fn generate_round_robin(
        &mut self,
        season_id: &str,
        competitors: &[Competitor],
        two_legged: bool,
    ) -> Result<&SeasonSchedule, ScheduleError> {
        self.ensure_no_schedule(season_id)?;
        let fixtures = generate_round_robin(season_id, competitors, two_legged)?;
        Ok(self.insert(season_id, two_legged, fixtures))
    }

    /// Draw groups and store the group-stage schedule. Rejected if the season already has fixtures.
    pub fn generate_group_stage<R: Rng + ?Sized>(
        &mut self,
        season_id: &str,
        competitors: &[Competitor],
        number_of_groups: u32,
        teams_per_group: u32,
        rng: &mut R,
    ) -> Result<&SeasonSchedule, ScheduleError> {
        self.ensure_no_schedule(season_id)?;
        let fixtures =
            generate_group_stage(season_id, competitors, number_of_groups, teams_per_group, rng)?;
        Ok(self.insert(season_id, false, fixtures))
    }

    fn ensure_no_schedule(&self, season_id: &str) -> Result<(), ScheduleError> {
        if self.has_fixtures(season_id) {
            log::warn!("Rejected fixture generation for season {}: fixtures already exist", season_id);
            return Err(ScheduleError::DuplicateScheduleConflict(season_id.to_string()));
        }
        Ok(())
    }

    fn insert(&mut self, season_id: &str, two_legged: bool, fixtures: Vec<Fixture>) -> &SeasonSchedule {
        let schedule = SeasonSchedule::new(season_id, two_legged, fixtures);
        log::info!(
            "Stored {} fixtures in {} rounds for season {}",
            schedule.fixtures.len(),
            schedule.rounds.len(),
            season_id
        );
        self.seasons.insert(season_id.to_string(), schedule);
        &self.seasons[season_id]
    }

    pub fn season(&self, season_id: &str) -> Result<&SeasonSchedule, ScheduleError> {
        self.seasons
            .get(season_id)
            .ok_or_else(|| ScheduleError::SeasonNotFound(season_id.to_string()))
    }

    pub fn season_mut(&mut self, season_id: &str) -> Result<&mut SeasonSchedule, ScheduleError> {
        self.seasons
            .get_mut(season_id)
            .ok_or_else(|| ScheduleError::SeasonNotFound(season_id.to_string()))
    }

    /// Remove every fixture and round record of the season. Returns how many fixtures were deleted.
    pub fn delete_fixtures(&mut self, season_id: &str) -> usize {
        let removed = self
            .seasons
            .remove(season_id)
            .map_or(0, |s| s.fixtures.len());
        if removed > 0 {
            log::info!("Deleted {} fixtures for season {}", removed, season_id);
        }
        removed
    }

    pub fn fixtures_for_competitor(
        &self,
        season_id: &str,
        competitor_id: &str,
    ) -> Result<Vec<&Fixture>, ScheduleError> {
        Ok(self.season(season_id)?.fixtures_for_competitor(competitor_id))
    }
}
