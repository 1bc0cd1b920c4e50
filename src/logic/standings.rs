//! Group tables and the teams that advance from them.

use crate::models::{Fixture, FixtureStatus, GroupStanding};
use std::cmp::Ordering;
use std::collections::BTreeMap;

// Higher points first, then goal difference, then goals scored.
fn compare_standings(a: &GroupStanding, b: &GroupStanding) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
}

/// Build a table per group from group-stage fixtures.
///
/// Every competitor appearing in a group fixture gets a row. Only completed fixtures with
/// both scores count; a win is worth 3 points, a draw 1. Fixtures without a group are ignored.
/// Fully tied rows keep the order in which competitors first appear in `fixtures`.
pub fn calculate_group_standings(fixtures: &[Fixture]) -> BTreeMap<String, Vec<GroupStanding>> {
    let mut tables: BTreeMap<String, Vec<GroupStanding>> = BTreeMap::new();

    for f in fixtures {
        let Some(group) = f.group.as_deref() else {
            continue;
        };
        let table = tables.entry(group.to_string()).or_default();
        for (id, name) in [
            (&f.home_competitor_id, &f.home_competitor_name),
            (&f.away_competitor_id, &f.away_competitor_name),
        ] {
            if !table.iter().any(|s| &s.competitor_id == id) {
                table.push(GroupStanding::new(group, id, name));
            }
        }

        let (Some(home_score), Some(away_score)) = (f.home_score, f.away_score) else {
            continue;
        };
        if f.status != FixtureStatus::Completed {
            continue;
        }
        for row in table.iter_mut() {
            if row.competitor_id == f.home_competitor_id {
                row.add_match(home_score, away_score);
            } else if row.competitor_id == f.away_competitor_id {
                row.add_match(away_score, home_score);
            }
        }
    }

    for table in tables.values_mut() {
        table.sort_by(compare_standings);
        for (row, position) in table.iter_mut().zip(1..) {
            row.position = position;
        }
    }
    tables
}

/// Top `per_group` rows of each table, group by group in table order.
pub fn advancing_teams(
    standings: &BTreeMap<String, Vec<GroupStanding>>,
    per_group: usize,
) -> Vec<GroupStanding> {
    standings
        .values()
        .flat_map(|table| table.iter().take(per_group).cloned())
        .collect()
}
