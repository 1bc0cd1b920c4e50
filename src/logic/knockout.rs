//! Knockout structure: which elimination stages a bracket has and how many teams finish at each.

use crate::models::{KnockoutConfig, KnockoutStage, StageKey};

/// Standard bracket sizes, largest first, with the stage whose losers leave at that size.
const BRACKET_LADDER: [(u32, StageKey); 3] = [
    (32, StageKey::RoundOf32Loser),
    (16, StageKey::RoundOf16Loser),
    (8, StageKey::QuarterFinalLoser),
];

/// Derive the ordered elimination stages for a knockout configuration.
///
/// Stages run from the earliest elimination to the final and always end with
/// Runner-up then Winner. Without a knockout stage (or without entrants) only those
/// two placeholders are returned, so rewards stay configurable.
pub fn resolve_knockout_stages(config: &KnockoutConfig) -> Vec<KnockoutStage> {
    let entrants = config.entrants();
    let mut stages: Vec<(StageKey, u32)> = Vec::new();

    if config.has_knockout_stage() && entrants > 0 {
        let direct = config.direct_semifinal_teams();
        if !config.has_group_stage() && direct > 0 {
            // Top seeds skip the quarter-finals and meet the quarter-final winners.
            let qf_teams = entrants.saturating_sub(direct);
            if qf_teams >= 2 {
                stages.push((StageKey::QuarterFinalLoser, qf_teams / 2));
            }
            let in_semis = qf_teams / 2 + direct;
            stages.push((StageKey::SemiFinalLoser, in_semis / 2));
        } else {
            let mut remaining = entrants;
            for (round_size, key) in BRACKET_LADDER {
                if remaining >= round_size {
                    stages.push((key, round_size / 2));
                    remaining = round_size / 2;
                }
            }
            stages.push((StageKey::SemiFinalLoser, (remaining / 2).max(1)));
        }
    }

    stages.push((StageKey::RunnerUp, 1));
    stages.push((StageKey::Winner, 1));

    stages
        .into_iter()
        .zip(1..)
        .map(|((key, team_count), position)| KnockoutStage {
            name: key.label().to_string(),
            key,
            team_count,
            position,
        })
        .collect()
}
