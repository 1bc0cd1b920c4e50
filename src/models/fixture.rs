//! Fixture, Leg, status and outcome of a scheduled match.

use crate::models::competitor::{Competitor, CompetitorId};
use serde::{Deserialize, Serialize};

/// Which half of a two-legged schedule a fixture belongs to.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Leg {
    #[default]
    First,
    Second,
}

impl Leg {
    /// 1 for the first leg, 2 for the second (used in fixture ids).
    pub fn number(self) -> u32 {
        match self {
            Leg::First => 1,
            Leg::Second => 2,
        }
    }
}

impl std::fmt::Display for Leg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Leg::First => write!(f, "first"),
            Leg::Second => write!(f, "second"),
        }
    }
}

/// Lifecycle of a fixture. Generation always starts at `Scheduled`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Postponed,
    Cancelled,
}

/// Result of a completed fixture.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    HomeWin,
    AwayWin,
    Draw,
}

impl MatchOutcome {
    pub fn from_score(home_score: u32, away_score: u32) -> Self {
        match home_score.cmp(&away_score) {
            std::cmp::Ordering::Greater => MatchOutcome::HomeWin,
            std::cmp::Ordering::Less => MatchOutcome::AwayWin,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        }
    }
}

/// One scheduled match between two competitors.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: String,
    pub season_id: String,
    /// 1-based; second-leg rounds continue after the last first-leg round.
    pub round_number: u32,
    /// 1-based position within the round.
    pub match_number: u32,
    pub home_competitor_id: CompetitorId,
    pub away_competitor_id: CompetitorId,
    pub home_competitor_name: String,
    pub away_competitor_name: String,
    pub leg: Leg,
    /// Group name for group-stage fixtures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub status: FixtureStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<MatchOutcome>,
}

impl Fixture {
    /// A freshly scheduled fixture. Id is `{season}_leg{n}_r{round}_m{match}`.
    pub fn new(
        season_id: &str,
        round_number: u32,
        match_number: u32,
        home: &Competitor,
        away: &Competitor,
        leg: Leg,
    ) -> Self {
        Self {
            id: format!(
                "{}_leg{}_r{}_m{}",
                season_id,
                leg.number(),
                round_number,
                match_number
            ),
            season_id: season_id.to_string(),
            round_number,
            match_number,
            home_competitor_id: home.id.clone(),
            away_competitor_id: away.id.clone(),
            home_competitor_name: home.name.clone(),
            away_competitor_name: away.name.clone(),
            leg,
            group: None,
            status: FixtureStatus::Scheduled,
            home_score: None,
            away_score: None,
            result: None,
        }
    }

    /// Tag a fixture as belonging to a group-stage group. Id becomes `{season}_grp{G}_r{round}_m{match}`.
    pub fn in_group(mut self, group: &str) -> Self {
        self.id = format!(
            "{}_grp{}_r{}_m{}",
            self.season_id, group, self.round_number, self.match_number
        );
        self.group = Some(group.to_string());
        self
    }

    /// True if the competitor plays in this fixture, home or away.
    pub fn involves(&self, competitor_id: &str) -> bool {
        self.home_competitor_id == competitor_id || self.away_competitor_id == competitor_id
    }

    /// Store the score, derive the outcome and mark the fixture completed.
    pub fn record_result(&mut self, home_score: u32, away_score: u32) -> MatchOutcome {
        let outcome = MatchOutcome::from_score(home_score, away_score);
        self.home_score = Some(home_score);
        self.away_score = Some(away_score);
        self.result = Some(outcome);
        self.status = FixtureStatus::Completed;
        outcome
    }
}
