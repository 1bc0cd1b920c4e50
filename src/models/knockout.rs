//! Knockout configuration and the elimination stages derived from it.

use crate::models::error::ScheduleError;
use serde::{Deserialize, Serialize};

/// Stable key of an elimination stage (rewards are attached per key).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKey {
    #[serde(rename = "round_of_32_loser")]
    RoundOf32Loser,
    #[serde(rename = "round_of_16_loser")]
    RoundOf16Loser,
    QuarterFinalLoser,
    SemiFinalLoser,
    RunnerUp,
    Winner,
}

impl StageKey {
    /// Display label for the reward form.
    pub fn label(self) -> &'static str {
        match self {
            StageKey::RoundOf32Loser => "Round of 32 Loser",
            StageKey::RoundOf16Loser => "Round of 16 Loser",
            StageKey::QuarterFinalLoser => "Quarter-final Loser",
            StageKey::SemiFinalLoser => "Semi-final Loser",
            StageKey::RunnerUp => "Runner-up",
            StageKey::Winner => "Winner",
        }
    }
}

/// One elimination round, ordered from earliest elimination to the final.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KnockoutStage {
    pub name: String,
    pub key: StageKey,
    /// Teams finishing at this stage.
    pub team_count: u32,
    /// 1-based position in the stage list.
    pub position: u32,
}

/// Raw knockout settings as entered by an admin. Convert into [`KnockoutConfig`] to validate.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct KnockoutSettings {
    #[serde(default)]
    pub has_knockout_stage: bool,
    #[serde(default)]
    pub has_group_stage: bool,
    #[serde(default)]
    pub number_of_groups: u32,
    #[serde(default)]
    pub teams_advancing_per_group: u32,
    #[serde(default)]
    pub playoff_teams: u32,
    #[serde(default)]
    pub direct_semifinal_teams: u32,
}

/// Validated knockout configuration, the only input the stage resolver accepts.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "KnockoutSettings", into = "KnockoutSettings")]
pub struct KnockoutConfig {
    settings: KnockoutSettings,
    entrants: u32,
}

impl KnockoutConfig {
    /// Config with the knockout stage switched off (placeholder stages only).
    pub fn disabled() -> Self {
        Self {
            settings: KnockoutSettings::default(),
            entrants: 0,
        }
    }

    pub fn has_knockout_stage(&self) -> bool {
        self.settings.has_knockout_stage
    }

    pub fn has_group_stage(&self) -> bool {
        self.settings.has_group_stage
    }

    pub fn direct_semifinal_teams(&self) -> u32 {
        self.settings.direct_semifinal_teams
    }

    /// Teams entering the bracket: group advancers if there is a group stage, else playoff teams.
    /// Always 0 while the knockout stage is off.
    pub fn entrants(&self) -> u32 {
        self.entrants
    }
}

impl TryFrom<KnockoutSettings> for KnockoutConfig {
    type Error = ScheduleError;

    fn try_from(settings: KnockoutSettings) -> Result<Self, Self::Error> {
        // Counts are not looked at without a knockout stage.
        if !settings.has_knockout_stage {
            return Ok(Self {
                settings,
                entrants: 0,
            });
        }

        let entrants = if settings.has_group_stage {
            settings
                .number_of_groups
                .checked_mul(settings.teams_advancing_per_group)
                .ok_or_else(|| {
                    ScheduleError::InvalidConfig("too many group-stage advancers".to_string())
                })?
        } else {
            settings.playoff_teams
        };

        let direct = settings.direct_semifinal_teams;
        let direct_entry = entrants > 0 && !settings.has_group_stage && direct > 0;
        if direct_entry {
            if direct > entrants {
                return Err(ScheduleError::InvalidConfig(format!(
                    "{} direct semi-final teams but only {} playoff teams",
                    direct, entrants
                )));
            }
            let qf_teams = entrants - direct;
            if qf_teams % 2 != 0 {
                return Err(ScheduleError::InvalidConfig(format!(
                    "{} teams left for the quarter-finals; must be even",
                    qf_teams
                )));
            }
            let in_semis = qf_teams / 2 + direct;
            if in_semis % 2 != 0 {
                return Err(ScheduleError::InvalidConfig(format!(
                    "{} teams would reach the semi-finals; must be even",
                    in_semis
                )));
            }
        }

        Ok(Self { settings, entrants })
    }
}

impl From<KnockoutConfig> for KnockoutSettings {
    fn from(config: KnockoutConfig) -> Self {
        config.settings
    }
}
