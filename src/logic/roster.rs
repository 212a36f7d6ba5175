//! Participant roster import from CSV.

use crate::logic::setup::validate_participants;
use crate::models::{Participant, TournamentError};
use std::io::Read;

/// Read participant names from the first column of a CSV document.
///
/// A first row reading `name` (any case) is treated as a header. Blank names
/// are skipped; names are trimmed and must be unique (case-insensitive).
pub fn parse_roster_csv<R: Read>(reader: R) -> Result<Vec<Participant>, TournamentError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut participants = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| TournamentError::Roster(e.to_string()))?;
        let name = record.get(0).unwrap_or("");
        if name.is_empty() || (row == 0 && name.eq_ignore_ascii_case("name")) {
            continue;
        }
        participants.push(Participant::new(name));
    }

    validate_participants(&participants)?;
    log::debug!("Imported {} participants from roster", participants.len());
    Ok(participants)
}
