//! SeasonSchedule: the stored fixtures and round records of one season.

use crate::logic::{group_into_rounds, round_keys};
use crate::models::error::ScheduleError;
use crate::models::fixture::{Fixture, FixtureStatus, Leg, MatchOutcome};
use crate::models::round::{
    Round, RoundAction, RoundDeadlines, RoundKey, RoundOverview, RoundState, RoundStatus,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a season (or tournament) a schedule is generated for.
pub type SeasonId = String;

/// Full schedule of a season: fixtures plus one state record per round.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeasonSchedule {
    pub season_id: SeasonId,
    pub two_legged: bool,
    /// Ordered by round number, then match number.
    pub fixtures: Vec<Fixture>,
    /// One entry per distinct (round, leg) in `fixtures`.
    pub rounds: Vec<RoundState>,
    pub generated_at: DateTime<Utc>,
}

impl SeasonSchedule {
    /// Wrap freshly generated fixtures and create a pending round record for each round.
    pub fn new(season_id: impl Into<SeasonId>, two_legged: bool, fixtures: Vec<Fixture>) -> Self {
        let rounds = round_keys(&fixtures).into_iter().map(RoundState::new).collect();
        Self {
            season_id: season_id.into(),
            two_legged,
            fixtures,
            rounds,
            generated_at: Utc::now(),
        }
    }

    /// Fixtures grouped into rounds, ordered by round number.
    pub fn rounds(&self) -> Vec<Round> {
        group_into_rounds(&self.fixtures)
    }

    /// Rounds with their deadline and status records attached.
    pub fn round_overviews(&self) -> Vec<RoundOverview> {
        self.rounds()
            .into_iter()
            .map(|round| {
                let state = self
                    .round_state(round.key())
                    .cloned()
                    .unwrap_or_else(|| RoundState::new(round.key()));
                RoundOverview {
                    is_active: state.is_active(),
                    round,
                    deadlines: state.deadlines,
                    status: state.status,
                }
            })
            .collect()
    }

    /// All fixtures a competitor plays in, home or away.
    pub fn fixtures_for_competitor(&self, competitor_id: &str) -> Vec<&Fixture> {
        self.fixtures
            .iter()
            .filter(|f| f.involves(competitor_id))
            .collect()
    }

    pub fn fixture(&self, fixture_id: &str) -> Option<&Fixture> {
        self.fixtures.iter().find(|f| f.id == fixture_id)
    }

    fn fixture_mut(&mut self, fixture_id: &str) -> Result<&mut Fixture, ScheduleError> {
        self.fixtures
            .iter_mut()
            .find(|f| f.id == fixture_id)
            .ok_or_else(|| ScheduleError::FixtureNotFound(fixture_id.to_string()))
    }

    /// Enter a final score; the fixture becomes completed.
    pub fn record_result(
        &mut self,
        fixture_id: &str,
        home_score: u32,
        away_score: u32,
    ) -> Result<MatchOutcome, ScheduleError> {
        let outcome = self
            .fixture_mut(fixture_id)?
            .record_result(home_score, away_score);
        log::info!(
            "Recorded {}-{} ({:?}) for fixture {}",
            home_score,
            away_score,
            outcome,
            fixture_id
        );
        Ok(outcome)
    }

    pub fn set_fixture_status(
        &mut self,
        fixture_id: &str,
        status: FixtureStatus,
    ) -> Result<(), ScheduleError> {
        self.fixture_mut(fixture_id)?.status = status;
        Ok(())
    }

    pub fn round_state(&self, key: RoundKey) -> Option<&RoundState> {
        self.rounds.iter().find(|r| r.key() == key)
    }

    fn round_state_mut(&mut self, key: RoundKey) -> Result<&mut RoundState, ScheduleError> {
        self.rounds
            .iter_mut()
            .find(|r| r.key() == key)
            .ok_or(ScheduleError::RoundNotFound {
                round_number: key.round_number,
                leg: key.leg,
            })
    }

    pub fn round_deadlines(&self, round_number: u32, leg: Leg) -> Result<&RoundDeadlines, ScheduleError> {
        self.round_state(RoundKey { round_number, leg })
            .map(|r| &r.deadlines)
            .ok_or(ScheduleError::RoundNotFound { round_number, leg })
    }

    pub fn update_round_deadlines(
        &mut self,
        round_number: u32,
        leg: Leg,
        deadlines: RoundDeadlines,
    ) -> Result<(), ScheduleError> {
        self.round_state_mut(RoundKey { round_number, leg })?.deadlines = deadlines;
        Ok(())
    }

    /// Start, pause, resume, complete or restart a round. At most one round is active at a time.
    pub fn apply_round_action(
        &mut self,
        round_number: u32,
        leg: Leg,
        action: RoundAction,
    ) -> Result<&RoundState, ScheduleError> {
        let key = RoundKey { round_number, leg };
        if self.round_state(key).is_none() {
            return Err(ScheduleError::RoundNotFound { round_number, leg });
        }
        let target = action.target_status();
        if target == RoundStatus::Active {
            if let Some(active) = self.rounds.iter().find(|r| r.is_active() && r.key() != key) {
                return Err(ScheduleError::RoundAlreadyActive {
                    round_number: active.round_number,
                    leg: active.leg,
                });
            }
        }
        let state = self.round_state_mut(key)?;
        state.status = target;
        log::info!("Round {} ({}) is now {:?}", round_number, leg, target);
        Ok(&*state)
    }
}
