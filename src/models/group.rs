//! Group and GroupStanding.

use crate::models::participant::ParticipantId;
use serde::{Deserialize, Serialize};

/// Unique identifier for a group.
pub type GroupId = uuid::Uuid;

/// A round-robin group. Membership is fixed at creation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    /// "A", "B", "C", ... by creation order (continues "AA", "AB", ... past "Z").
    pub name: String,
    pub participant_ids: Vec<ParticipantId>,
}

/// One row of a group table. Always derived from the group's matches, never stored.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupStanding {
    pub participant_id: ParticipantId,
    pub participant_name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    /// Legs won.
    pub scored_units: u64,
    /// Legs lost.
    pub conceded_units: u64,
    pub difference: i64,
    pub points: u32,
}

impl GroupStanding {
    /// An empty row for a participant who has not played yet.
    pub fn new(participant_id: ParticipantId, participant_name: impl Into<String>) -> Self {
        Self {
            participant_id,
            participant_name: participant_name.into(),
            ..Self::default()
        }
    }

    /// Add one completed match from this participant's point of view.
    pub fn record(&mut self, own: u32, opponent: u32) {
        self.played += 1;
        self.scored_units = self.scored_units.saturating_add(u64::from(own));
        self.conceded_units = self.conceded_units.saturating_add(u64::from(opponent));
        match own.cmp(&opponent) {
            std::cmp::Ordering::Greater => {
                self.won += 1;
                self.points += 2;
            }
            std::cmp::Ordering::Less => self.lost += 1,
            std::cmp::Ordering::Equal => {
                self.drawn += 1;
                self.points += 1;
            }
        }
        self.difference = self
            .difference
            .saturating_add(i64::from(own) - i64::from(opponent));
    }
}
