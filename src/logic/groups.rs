//! Group stage: random draw into groups, then a single round-robin inside each group.

use crate::logic::round_robin::circle_rounds;
use crate::models::{ensure_unique_ids, Competitor, Fixture, Leg, ScheduleError};
use rand::seq::SliceRandom;
use rand::Rng;

/// Most groups a draw can have (named `A` to `Z`).
pub const MAX_GROUPS: u32 = 26;

/// Name of the group at `index` (0 → "A").
pub fn group_name(index: usize) -> String {
    char::from(b'A' + index as u8).to_string()
}

/// Draw `number_of_groups * teams_per_group` competitors into groups and schedule each group.
///
/// The draw shuffles with `rng`; competitors beyond the needed count are left out. Every
/// group plays a single-leg round-robin. Rounds line up across groups (round 1 of every
/// group is round 1 of the stage), and match numbers run on across groups so they stay
/// unique within a round.
pub fn generate_group_stage<R: Rng + ?Sized>(
    season_id: &str,
    competitors: &[Competitor],
    number_of_groups: u32,
    teams_per_group: u32,
    rng: &mut R,
) -> Result<Vec<Fixture>, ScheduleError> {
    if number_of_groups == 0 || number_of_groups > MAX_GROUPS {
        return Err(ScheduleError::InvalidInput(format!(
            "Number of groups must be between 1 and {} (got {})",
            MAX_GROUPS, number_of_groups
        )));
    }
    if teams_per_group < 2 {
        return Err(ScheduleError::InvalidInput(
            "Each group needs at least 2 teams".to_string(),
        ));
    }
    let needed = number_of_groups as usize * teams_per_group as usize;
    if competitors.len() < needed {
        return Err(ScheduleError::InvalidInput(format!(
            "Not enough teams. Need {} teams ({} groups x {} teams), but only {} available",
            needed,
            number_of_groups,
            teams_per_group,
            competitors.len()
        )));
    }
    ensure_unique_ids(competitors)?;

    let mut drawn = competitors.to_vec();
    drawn.shuffle(rng);
    if drawn.len() > needed {
        log::warn!(
            "Group draw for season {}: {} competitor(s) not drawn",
            season_id,
            drawn.len() - needed
        );
        drawn.truncate(needed);
    }

    let groups: Vec<(String, Vec<_>)> = drawn
        .chunks(teams_per_group as usize)
        .enumerate()
        .map(|(i, members)| (group_name(i), circle_rounds(members)))
        .collect();
    let num_rounds = groups.iter().map(|(_, rounds)| rounds.len()).max().unwrap_or(0);

    let mut fixtures = Vec::new();
    for r in 0..num_rounds {
        let round_number = r as u32 + 1;
        let mut match_number = 0;
        for (name, rounds) in &groups {
            for &(home, away) in rounds.get(r).into_iter().flatten() {
                match_number += 1;
                fixtures.push(
                    Fixture::new(season_id, round_number, match_number, home, away, Leg::First)
                        .in_group(name),
                );
            }
        }
    }

    log::info!(
        "Drew {} groups of {} for season {}: {} fixtures over {} rounds",
        number_of_groups,
        teams_per_group,
        season_id,
        fixtures.len(),
        num_rounds
    );
    Ok(fixtures)
}
