//! Rounds: fixtures grouped by round number and leg, plus per-round deadlines and status.

use crate::models::fixture::{Fixture, Leg};
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Identifies one round of a season schedule.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct RoundKey {
    pub round_number: u32,
    pub leg: Leg,
}

/// Fixtures sharing a round number and leg.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub round_number: u32,
    pub leg: Leg,
    pub fixtures: Vec<Fixture>,
    pub completed_matches: usize,
    pub total_matches: usize,
}

impl Round {
    pub fn key(&self) -> RoundKey {
        RoundKey {
            round_number: self.round_number,
            leg: self.leg,
        }
    }
}

/// Deadline configuration for a round. Times are local match-day times; no timezone handling.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundDeadlines {
    pub home_fixture_deadline: NaiveTime,
    pub away_fixture_deadline: NaiveTime,
    /// Days after the scheduled date that results may still be entered.
    pub result_entry_day_offset: u32,
    pub result_entry_deadline: NaiveTime,
    #[serde(default)]
    pub scheduled_date: Option<NaiveDate>,
}

impl Default for RoundDeadlines {
    fn default() -> Self {
        let five_pm = NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default();
        Self {
            home_fixture_deadline: five_pm,
            away_fixture_deadline: five_pm,
            result_entry_day_offset: 2,
            result_entry_deadline: NaiveTime::from_hms_opt(0, 30, 0).unwrap_or_default(),
            scheduled_date: None,
        }
    }
}

impl RoundDeadlines {
    /// When the home side must submit its fixture setup. None until the round has a date.
    pub fn home_fixture_due(&self) -> Option<NaiveDateTime> {
        self.scheduled_date
            .map(|d| d.and_time(self.home_fixture_deadline))
    }

    pub fn away_fixture_due(&self) -> Option<NaiveDateTime> {
        self.scheduled_date
            .map(|d| d.and_time(self.away_fixture_deadline))
    }

    /// Last moment results may be entered: scheduled date + day offset, at the result deadline time.
    pub fn result_entry_due(&self) -> Option<NaiveDateTime> {
        self.scheduled_date
            .and_then(|d| d.checked_add_days(Days::new(u64::from(self.result_entry_day_offset))))
            .map(|d| d.and_time(self.result_entry_deadline))
    }
}

/// Where a round is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    #[default]
    Pending,
    Active,
    Paused,
    Completed,
}

/// Admin action on a round.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundAction {
    Start,
    Pause,
    Resume,
    Complete,
    Restart,
}

impl RoundAction {
    /// Status the round ends up in after this action.
    pub fn target_status(self) -> RoundStatus {
        match self {
            RoundAction::Start | RoundAction::Resume | RoundAction::Restart => RoundStatus::Active,
            RoundAction::Pause => RoundStatus::Paused,
            RoundAction::Complete => RoundStatus::Completed,
        }
    }
}

/// Stored per-round record: one per distinct (round, leg) of a schedule.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub round_number: u32,
    pub leg: Leg,
    pub deadlines: RoundDeadlines,
    pub status: RoundStatus,
}

impl RoundState {
    pub fn new(key: RoundKey) -> Self {
        Self {
            round_number: key.round_number,
            leg: key.leg,
            deadlines: RoundDeadlines::default(),
            status: RoundStatus::Pending,
        }
    }

    pub fn key(&self) -> RoundKey {
        RoundKey {
            round_number: self.round_number,
            leg: self.leg,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == RoundStatus::Active
    }
}

/// A round together with its deadlines and status (for API responses).
#[derive(Clone, Debug, Serialize)]
pub struct RoundOverview {
    #[serde(flatten)]
    pub round: Round,
    pub deadlines: RoundDeadlines,
    pub status: RoundStatus,
    pub is_active: bool,
}
