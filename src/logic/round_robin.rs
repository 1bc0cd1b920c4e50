//! Round-robin fixture generation using the circle method.

use crate::models::{ensure_unique_ids, Competitor, Fixture, Leg, ScheduleError};

/// Pairings of one round, as (home, away) competitors. Bye matches are already dropped.
pub(crate) type RoundPairings<'a> = Vec<(&'a Competitor, &'a Competitor)>;

/// Slot pairs (home, away) for round `round` over an even number of slots.
///
/// Slot 0 is anchored; slots `1..total` rotate one step per round. Match 0 pairs the
/// anchor with slot `round + 1`; match `m` pairs the slots `m` steps either side of it.
fn circle_pairings(total: usize, round: usize) -> impl Iterator<Item = (usize, usize)> {
    let spin = total - 1;
    (0..total / 2).map(move |m| {
        if m == 0 {
            (0, round + 1)
        } else {
            ((round + m) % spin + 1, (round + spin - m) % spin + 1)
        }
    })
}

/// Single-leg circle schedule, one entry per round.
///
/// An odd field gets a trailing bye slot; any pairing that lands on it is dropped, so each
/// competitor sits out exactly one round.
pub(crate) fn circle_rounds(competitors: &[Competitor]) -> Vec<RoundPairings<'_>> {
    let mut slots: Vec<Option<&Competitor>> = competitors.iter().map(Some).collect();
    if slots.len() % 2 != 0 {
        slots.push(None);
    }
    let total = slots.len();
    if total < 2 {
        return Vec::new();
    }

    (0..total - 1)
        .map(|round| {
            circle_pairings(total, round)
                .filter_map(|(home, away)| Some((slots[home]?, slots[away]?)))
                .collect()
        })
        .collect()
}

/// Number of rounds per leg for a field of `n` competitors (a bye pads odd fields).
pub fn rounds_per_leg(n: usize) -> usize {
    if n < 2 {
        0
    } else {
        n + n % 2 - 1
    }
}

/// Generate a round-robin schedule for `competitors`.
///
/// Each pair meets once per leg. With `two_legged`, the second leg repeats the first with
/// venues swapped, and its round numbers continue straight after the last first-leg round.
/// Output order is round, then match number; the same input order always yields the same schedule.
pub fn generate_round_robin(
    season_id: &str,
    competitors: &[Competitor],
    two_legged: bool,
) -> Result<Vec<Fixture>, ScheduleError> {
    if competitors.len() < 2 {
        return Err(ScheduleError::InvalidInput(
            "At least 2 competitors are required to generate fixtures".to_string(),
        ));
    }
    ensure_unique_ids(competitors)?;

    let rounds = circle_rounds(competitors);
    let num_rounds = rounds.len() as u32;

    let mut fixtures = leg_fixtures(season_id, &rounds, Leg::First, 0);
    if two_legged {
        fixtures.extend(leg_fixtures(season_id, &rounds, Leg::Second, num_rounds));
    }

    log::debug!(
        "Generated {} fixtures over {} rounds for season {} ({} competitors, two_legged={})",
        fixtures.len(),
        if two_legged { num_rounds * 2 } else { num_rounds },
        season_id,
        competitors.len(),
        two_legged
    );
    Ok(fixtures)
}

/// Turn per-round pairings into fixtures for one leg. The second leg swaps home and away.
fn leg_fixtures(
    season_id: &str,
    rounds: &[RoundPairings<'_>],
    leg: Leg,
    round_offset: u32,
) -> Vec<Fixture> {
    rounds
        .iter()
        .enumerate()
        .flat_map(|(r, pairs)| {
            let round_number = round_offset + r as u32 + 1;
            pairs.iter().enumerate().map(move |(m, &(home, away))| {
                let (home, away) = match leg {
                    Leg::First => (home, away),
                    Leg::Second => (away, home),
                };
                Fixture::new(season_id, round_number, m as u32 + 1, home, away, leg)
            })
        })
        .collect()
}
