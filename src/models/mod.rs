//! Data structures for league scheduling: competitors, fixtures, rounds, group tables, knockout stages, seasons.

mod competitor;
mod error;
mod fixture;
mod knockout;
mod round;
mod season;
mod standing;

pub use competitor::{competitors_from_parts, Competitor, CompetitorId};
pub(crate) use competitor::ensure_unique_ids;
pub use error::ScheduleError;
pub use fixture::{Fixture, FixtureStatus, Leg, MatchOutcome};
pub use knockout::{KnockoutConfig, KnockoutSettings, KnockoutStage, StageKey};
pub use round::{
    Round, RoundAction, RoundDeadlines, RoundKey, RoundOverview, RoundState, RoundStatus,
};
pub use season::{SeasonId, SeasonSchedule};
pub use standing::GroupStanding;
