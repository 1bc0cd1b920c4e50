//! Integration tests for group tables and advancing teams.

use league_fixtures::{
    advancing_teams, calculate_group_standings, Competitor, Fixture, FixtureStatus, Leg,
    ScheduleStore,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn team(i: usize) -> Competitor {
    Competitor::new(format!("T{i}"), format!("Team {i}"))
}

fn played(group: &str, m: u32, home: usize, away: usize, score: (u32, u32)) -> Fixture {
    let mut f = Fixture::new("s", 1, m, &team(home), &team(away), Leg::First).in_group(group);
    f.record_result(score.0, score.1);
    f
}

fn order(rows: &[league_fixtures::GroupStanding]) -> Vec<&str> {
    rows.iter().map(|r| r.competitor_id.as_str()).collect()
}

#[test]
fn points_then_goal_difference_then_goals_for() {
    let fixtures = vec![
        played("A", 1, 1, 3, (1, 0)),
        played("A", 2, 2, 4, (3, 0)),
        played("A", 3, 3, 5, (2, 1)),
        played("A", 4, 4, 6, (3, 0)),
        played("A", 5, 1, 6, (0, 0)),
    ];
    let standings = calculate_group_standings(&fixtures);
    let table = &standings["A"];
    // T2, T4 and T3 share 3 points; T4 and T3 also share goal difference 0.
    assert_eq!(order(table), vec!["T1", "T2", "T4", "T3", "T6", "T5"]);
    assert_eq!(table.iter().map(|r| r.position).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);

    let t4 = &table[2];
    assert_eq!((t4.played, t4.wins, t4.draws, t4.losses), (2, 1, 0, 1));
    assert_eq!((t4.goals_for, t4.goals_against, t4.goal_difference), (3, 3, 0));
    assert_eq!(t4.points, 3);

    let t6 = &table[4];
    assert_eq!((t6.draws, t6.points, t6.goal_difference), (1, 1, -3));
}

#[test]
fn only_completed_scored_fixtures_count() {
    let mut postponed = played("A", 1, 1, 2, (4, 0));
    postponed.status = FixtureStatus::Postponed;
    let scheduled = Fixture::new("s", 1, 2, &team(3), &team(4), Leg::First).in_group("A");
    let mut unscored = Fixture::new("s", 2, 1, &team(1), &team(3), Leg::First).in_group("A");
    unscored.status = FixtureStatus::Completed;
    let league = Fixture::new("s", 1, 1, &team(9), &team(8), Leg::First);

    let standings = calculate_group_standings(&[postponed, scheduled, unscored, league]);
    assert_eq!(standings.len(), 1);
    let table = &standings["A"];
    // Everyone gets a row, nobody has played.
    assert_eq!(table.len(), 4);
    assert!(table.iter().all(|r| r.played == 0 && r.points == 0));
    // Fully tied rows keep first-appearance order.
    assert_eq!(order(table), vec!["T1", "T2", "T3", "T4"]);
}

#[test]
fn top_teams_of_each_group_advance() {
    let fixtures = vec![
        played("B", 1, 5, 6, (0, 1)),
        played("A", 2, 1, 2, (2, 1)),
        played("B", 3, 7, 8, (1, 1)),
        played("A", 4, 3, 4, (0, 3)),
    ];
    let standings = calculate_group_standings(&fixtures);

    let top = advancing_teams(&standings, 1);
    assert_eq!(order(&top), vec!["T4", "T6"]);
    assert_eq!(top[1].group, "B");

    let top_two = advancing_teams(&standings, 2);
    assert_eq!(order(&top_two), vec!["T4", "T1", "T6", "T7"]);

    // Asking for more than a group holds returns the whole group.
    assert_eq!(advancing_teams(&standings, 10).len(), 8);
    assert!(advancing_teams(&standings, 0).is_empty());
}

#[test]
fn standings_from_a_stored_group_stage() {
    let competitors: Vec<Competitor> = (1..=8).map(team).collect();
    let mut store = ScheduleStore::new();
    let mut rng = StdRng::seed_from_u64(3);
    store
        .generate_group_stage("cup", &competitors, 2, 4, &mut rng)
        .unwrap();
    let season = store.season_mut("cup").unwrap();

    // Home side wins every group match 1-0.
    let ids: Vec<String> = season.fixtures.iter().map(|f| f.id.clone()).collect();
    for id in &ids {
        season.record_result(id, 1, 0).unwrap();
    }

    let standings = calculate_group_standings(&season.fixtures);
    assert_eq!(standings.keys().map(String::as_str).collect::<Vec<_>>(), vec!["A", "B"]);
    for table in standings.values() {
        assert_eq!(table.len(), 4);
        assert!(table.iter().all(|r| r.played == 3));
        let points: u32 = table.iter().map(|r| r.points).sum();
        assert_eq!(points, 6 * 3);
        assert!(table.windows(2).all(|w| w[0].points >= w[1].points));
    }
    assert_eq!(advancing_teams(&standings, 2).len(), 4);
}
