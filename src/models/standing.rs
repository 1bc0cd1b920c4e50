//! Group-stage table rows.

use crate::models::competitor::CompetitorId;
use serde::{Deserialize, Serialize};

/// One competitor's line in a group table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupStanding {
    pub group: String,
    pub competitor_id: CompetitorId,
    pub competitor_name: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: u32,
    /// 1-based table position after sorting.
    pub position: u32,
}

impl GroupStanding {
    pub fn new(group: &str, competitor_id: &str, competitor_name: &str) -> Self {
        Self {
            group: group.to_string(),
            competitor_id: competitor_id.to_string(),
            competitor_name: competitor_name.to_string(),
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
            position: 0,
        }
    }

    /// Add one completed match from this competitor's point of view.
    pub(crate) fn add_match(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        self.goals_for += scored;
        self.goals_against += conceded;
        self.goal_difference = i64::from(self.goals_for) - i64::from(self.goals_against);
        match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => {
                self.wins += 1;
                self.points += 3;
            }
            std::cmp::Ordering::Equal => {
                self.draws += 1;
                self.points += 1;
            }
            std::cmp::Ordering::Less => self.losses += 1,
        }
    }
}
