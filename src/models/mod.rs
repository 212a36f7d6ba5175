//! Data structures for the tournament engine: participants, groups, matches, bracket, structure.

mod game;
mod group;
mod participant;
mod tournament;

pub use game::{Match, MatchId, MatchOutcome, MatchState, Slot, SlotSource, Stage};
pub use group::{Group, GroupId, GroupStanding};
pub use participant::{Participant, ParticipantId};
pub use tournament::{
    KnockoutBracket, TournamentError, TournamentId, TournamentMode, TournamentSetupRequest,
    TournamentStructure,
};
