//! Roster import: competitors from a CSV file with an `id,name` header.

use crate::models::{ensure_unique_ids, Competitor, ScheduleError};
use serde::Deserialize;
use std::io::Read;

#[derive(Deserialize)]
struct RosterRecord {
    id: String,
    name: String,
}

/// Read competitors in file order. Fields are trimmed; empty fields and repeated ids are rejected.
pub fn read_roster<R: Read>(reader: R) -> Result<Vec<Competitor>, ScheduleError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut competitors = Vec::new();
    for (row, record) in rdr.deserialize::<RosterRecord>().enumerate() {
        let record = record?;
        if record.id.is_empty() || record.name.is_empty() {
            return Err(ScheduleError::InvalidInput(format!(
                "Roster row {} has an empty id or name",
                row + 1
            )));
        }
        competitors.push(Competitor::new(record.id, record.name));
    }
    ensure_unique_ids(&competitors)?;
    Ok(competitors)
}
