//! League fixture scheduling: round-robin and group-stage fixtures, group tables, knockout stages, season schedules.

pub mod logic;
pub mod models;
pub mod roster;
pub mod store;

pub use logic::{
    advancing_teams, calculate_group_standings, generate_group_stage, generate_round_robin,
    group_into_rounds, resolve_knockout_stages, round_keys, rounds_per_leg,
};
pub use models::{
    competitors_from_parts, Competitor, CompetitorId, Fixture, FixtureStatus, GroupStanding,
    KnockoutConfig, KnockoutSettings, KnockoutStage, Leg, MatchOutcome, Round, RoundAction,
    RoundDeadlines, RoundKey, RoundOverview, RoundState, RoundStatus, ScheduleError, SeasonId,
    SeasonSchedule, StageKey,
};
pub use roster::read_roster;
pub use store::ScheduleStore;
