//! Match, MatchOutcome, Stage and knockout slot sources.

use crate::models::group::GroupId;
use crate::models::participant::ParticipantId;
use serde::{Deserialize, Serialize};

/// Unique identifier for a match.
pub type MatchId = uuid::Uuid;

/// Result of a match. `Draw` only ever appears on group matches.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    Player1,
    Player2,
    Draw,
}

/// One of the two player positions in a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Player1,
    Player2,
}

/// Where a knockout slot gets its participant from. Fixed at bracket build time.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum SlotSource {
    /// Seeded directly into a first-round match.
    Entrant(ParticipantId),
    /// Skipped the first round; placed straight into the second.
    Bye(ParticipantId),
    /// Filled by the winner of an earlier match once it is scored.
    WinnerOf(MatchId),
}

impl SlotSource {
    /// The participant known at build time, if any.
    pub fn fixed_participant(&self) -> Option<ParticipantId> {
        match self {
            SlotSource::Entrant(id) | SlotSource::Bye(id) => Some(*id),
            SlotSource::WinnerOf(_) => None,
        }
    }
}

/// Which phase a match belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Stage {
    Group {
        group_id: GroupId,
    },
    Knockout {
        /// 0-based round index within the bracket.
        round: usize,
        /// Per-slot sources, `[player1, player2]`.
        sources: [SlotSource; 2],
    },
}

/// Lifecycle of a single match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    /// At least one slot is still waiting for an earlier winner.
    Unresolved,
    /// Both slots filled, no result yet.
    Pending,
    /// Result entered and a winner resolved.
    Scored,
    /// Group match ended level.
    Drawn,
}

/// A single 1v1 match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// None while the slot awaits a prior round's winner.
    pub player1: Option<ParticipantId>,
    pub player2: Option<ParticipantId>,
    /// None if not yet played.
    pub winner: Option<MatchOutcome>,
    pub score1: Option<u32>,
    pub score2: Option<u32>,
    pub stage: Stage,
}

impl Match {
    /// A group match between two known participants.
    pub fn group(
        id: MatchId,
        group_id: GroupId,
        player1: ParticipantId,
        player2: ParticipantId,
    ) -> Self {
        Self {
            id,
            player1: Some(player1),
            player2: Some(player2),
            winner: None,
            score1: None,
            score2: None,
            stage: Stage::Group { group_id },
        }
    }

    /// A knockout match; slots with a fixed source are filled immediately.
    pub fn knockout(id: MatchId, round: usize, sources: [SlotSource; 2]) -> Self {
        Self {
            id,
            player1: sources[0].fixed_participant(),
            player2: sources[1].fixed_participant(),
            winner: None,
            score1: None,
            score2: None,
            stage: Stage::Knockout { round, sources },
        }
    }

    pub fn group_id(&self) -> Option<GroupId> {
        match self.stage {
            Stage::Group { group_id } => Some(group_id),
            Stage::Knockout { .. } => None,
        }
    }

    pub fn round(&self) -> Option<usize> {
        match self.stage {
            Stage::Knockout { round, .. } => Some(round),
            Stage::Group { .. } => None,
        }
    }

    pub fn is_knockout(&self) -> bool {
        matches!(self.stage, Stage::Knockout { .. })
    }

    pub fn slot(&self, slot: Slot) -> Option<ParticipantId> {
        match slot {
            Slot::Player1 => self.player1,
            Slot::Player2 => self.player2,
        }
    }

    pub fn slot_mut(&mut self, slot: Slot) -> &mut Option<ParticipantId> {
        match slot {
            Slot::Player1 => &mut self.player1,
            Slot::Player2 => &mut self.player2,
        }
    }

    /// Both scores entered.
    pub fn is_complete(&self) -> bool {
        self.winner.is_some() && self.score1.is_some() && self.score2.is_some()
    }

    /// Participant id of the winner; None for draws and unplayed matches.
    pub fn winner_id(&self) -> Option<ParticipantId> {
        match self.winner? {
            MatchOutcome::Player1 => self.player1,
            MatchOutcome::Player2 => self.player2,
            MatchOutcome::Draw => None,
        }
    }

    pub fn state(&self) -> MatchState {
        match self.winner {
            Some(MatchOutcome::Draw) => MatchState::Drawn,
            Some(_) => MatchState::Scored,
            None if self.player1.is_some() && self.player2.is_some() => MatchState::Pending,
            None => MatchState::Unresolved,
        }
    }

    /// Forget any entered result (used when an upstream edit changes who plays here).
    pub fn clear_result(&mut self) {
        self.winner = None;
        self.score1 = None;
        self.score2 = None;
    }
}
