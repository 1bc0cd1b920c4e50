//! Grouping fixtures into rounds.

use crate::models::{Fixture, FixtureStatus, Round, RoundKey};
use std::collections::{BTreeMap, BTreeSet};

fn key_of(f: &Fixture) -> RoundKey {
    RoundKey {
        round_number: f.round_number,
        leg: f.leg,
    }
}

/// Group fixtures by (round number, leg), ordered by round; fixtures inside a round by match number.
pub fn group_into_rounds(fixtures: &[Fixture]) -> Vec<Round> {
    let mut by_round: BTreeMap<RoundKey, Vec<Fixture>> = BTreeMap::new();
    for f in fixtures {
        by_round.entry(key_of(f)).or_default().push(f.clone());
    }

    by_round
        .into_iter()
        .map(|(key, mut fixtures)| {
            fixtures.sort_by_key(|f| f.match_number);
            let completed_matches = fixtures
                .iter()
                .filter(|f| f.status == FixtureStatus::Completed)
                .count();
            Round {
                round_number: key.round_number,
                leg: key.leg,
                total_matches: fixtures.len(),
                completed_matches,
                fixtures,
            }
        })
        .collect()
}

/// Distinct (round number, leg) pairs present in `fixtures`, in round order.
/// One deadline record is kept per key.
pub fn round_keys(fixtures: &[Fixture]) -> Vec<RoundKey> {
    fixtures
        .iter()
        .map(key_of)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
