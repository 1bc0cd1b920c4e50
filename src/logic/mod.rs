//! Scheduling logic: round-robin fixtures, group stage draws and tables, round grouping, knockout stages.

mod groups;
mod knockout;
mod round_robin;
mod rounds;
mod standings;

pub use groups::{generate_group_stage, group_name, MAX_GROUPS};
pub use knockout::resolve_knockout_stages;
pub use round_robin::{generate_round_robin, rounds_per_leg};
pub use rounds::{group_into_rounds, round_keys};
pub use standings::{advancing_teams, calculate_group_standings};
