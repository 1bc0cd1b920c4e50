//! Error type shared by scheduling, knockout validation and the schedule store.

use crate::models::fixture::Leg;
use crate::models::season::SeasonId;

/// Errors that can occur while building or updating a season schedule.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScheduleError {
    /// Bad caller input: too few competitors, duplicate ids, mismatched arrays, bad group sizes.
    InvalidInput(String),
    /// Fixtures already exist for the season; delete them first to regenerate.
    DuplicateScheduleConflict(SeasonId),
    /// Knockout configuration that the stage resolver cannot halve cleanly.
    InvalidConfig(String),
    /// No schedule stored for this season.
    SeasonNotFound(SeasonId),
    /// Fixture id not present in the season.
    FixtureNotFound(String),
    /// No round with this number and leg in the season.
    RoundNotFound { round_number: u32, leg: Leg },
    /// Another round is already active; only one may be active at a time.
    RoundAlreadyActive { round_number: u32, leg: Leg },
    /// Roster CSV could not be read.
    Csv(String),
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ScheduleError::DuplicateScheduleConflict(season_id) => write!(
                f,
                "Fixtures already exist for season {}. Delete them first to regenerate",
                season_id
            ),
            ScheduleError::InvalidConfig(msg) => write!(f, "Invalid knockout configuration: {}", msg),
            ScheduleError::SeasonNotFound(season_id) => write!(f, "No fixtures for season {}", season_id),
            ScheduleError::FixtureNotFound(id) => write!(f, "Fixture {} not found", id),
            ScheduleError::RoundNotFound { round_number, leg } => {
                write!(f, "Round {} ({}) not found", round_number, leg)
            }
            ScheduleError::RoundAlreadyActive { round_number, leg } => {
                write!(f, "Round {} ({}) is already active", round_number, leg)
            }
            ScheduleError::Csv(msg) => write!(f, "Could not read roster: {}", msg),
        }
    }
}

impl std::error::Error for ScheduleError {}

impl From<csv::Error> for ScheduleError {
    fn from(e: csv::Error) -> Self {
        ScheduleError::Csv(e.to_string())
    }
}
