//! Competitor (team) records supplied by the roster.

use crate::models::error::ScheduleError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Identifier of a competitor (team id from the roster).
pub type CompetitorId = String;

/// A team taking part in a schedule run. Opaque to the scheduler apart from its id.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub id: CompetitorId,
    pub name: String,
}

impl Competitor {
    pub fn new(id: impl Into<CompetitorId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Zip parallel id/name arrays into competitors. Lengths must match.
pub fn competitors_from_parts(
    ids: &[CompetitorId],
    names: &[String],
) -> Result<Vec<Competitor>, ScheduleError> {
    if ids.len() != names.len() {
        return Err(ScheduleError::InvalidInput(format!(
            "Competitor ids and names must have the same length ({} ids, {} names)",
            ids.len(),
            names.len()
        )));
    }
    Ok(ids
        .iter()
        .zip(names)
        .map(|(id, name)| Competitor::new(id.clone(), name.clone()))
        .collect())
}

/// Fail with `InvalidInput` if two competitors share an id.
pub(crate) fn ensure_unique_ids(competitors: &[Competitor]) -> Result<(), ScheduleError> {
    let mut seen = HashSet::with_capacity(competitors.len());
    for c in competitors {
        if !seen.insert(c.id.as_str()) {
            return Err(ScheduleError::InvalidInput(format!(
                "Duplicate competitor id '{}'",
                c.id
            )));
        }
    }
    Ok(())
}
