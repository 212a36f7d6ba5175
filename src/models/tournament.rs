//! TournamentSetupRequest, KnockoutBracket, TournamentStructure and TournamentError.

use crate::models::game::{Match, MatchId};
use crate::models::group::{Group, GroupId};
use crate::models::participant::{Participant, ParticipantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum TournamentError {
    /// A bracket needs at least two participants.
    #[error("Need at least 2 participants (got {count})")]
    InvalidParticipantCount { count: usize },
    /// Group count must be between 1 and the number of participants.
    #[error("Cannot split {participants} participants into {groups} groups")]
    InvalidGroupCount { groups: usize, participants: usize },
    /// Every pairing must be scheduled at least once.
    #[error("Matches per opponent must be at least 1")]
    InvalidMatchesPerOpponent,
    #[error("Match not found")]
    MatchNotFound(MatchId),
    #[error("Group not found")]
    GroupNotFound(GroupId),
    /// A slot of the match is still waiting for an earlier winner.
    #[error("Match is still waiting for its players")]
    SlotNotReady(MatchId),
    /// Knockout matches must produce a winner.
    #[error("Knockout matches cannot end in a draw")]
    DrawNotAllowed(MatchId),
    /// Scores do not describe a finished best-of-N match.
    #[error("Score {score1}:{score2} is not a finished best of {best_of} match")]
    InvalidScore { score1: u32, score2: u32, best_of: u32 },
    #[error("Participant names cannot be empty")]
    EmptyParticipantName,
    /// Names are unique (case-insensitive) so standings can break ties by name.
    #[error("A participant named {0:?} already exists")]
    DuplicateParticipantName(String),
    #[error("Participant listed twice")]
    DuplicateParticipantId(ParticipantId),
    /// The knockout stage of a hybrid tournament needs every group match to be played.
    #[error("Not all group matches have a result")]
    GroupStageIncomplete,
    #[error("Knockout stage has already started")]
    KnockoutAlreadyStarted,
    #[error("Group tournaments have no knockout stage")]
    NoKnockoutStage,
    /// Too few or too many qualifiers per group for a bracket.
    #[error("Cannot advance {per_group} participants per group")]
    InvalidAdvanceCount { per_group: usize },
    #[error("Invalid roster: {0}")]
    Roster(String),
}

/// Unique identifier for a tournament.
pub type TournamentId = uuid::Uuid;

/// Tournament format.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TournamentMode {
    /// Round-robin groups only; the overall table leader wins.
    Group,
    /// Single-elimination bracket only.
    #[default]
    Knockout,
    /// Round-robin groups, then the top finishers of each group enter a bracket.
    GroupKnockout,
}

impl TournamentMode {
    pub fn has_groups(self) -> bool {
        matches!(self, TournamentMode::Group | TournamentMode::GroupKnockout)
    }
}

/// Everything a collaborator supplies to create a tournament. Never mutated after build.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentSetupRequest {
    #[serde(default)]
    pub mode: TournamentMode,
    pub participants: Vec<Participant>,
    /// Defaults to [`crate::suggest_group_count`].
    #[serde(default)]
    pub group_count: Option<usize>,
    /// Defaults to 1.
    #[serde(default)]
    pub matches_per_opponent: Option<u32>,
    /// Legs per match; a side needs `ceil(best_of / 2)` legs to win.
    #[serde(default)]
    pub best_of_legs: Option<u32>,
    /// Qualifiers per group in `group-knockout` mode. Defaults to 2.
    #[serde(default)]
    pub advance_per_group: Option<usize>,
}

impl TournamentSetupRequest {
    pub fn new(mode: TournamentMode, participants: Vec<Participant>) -> Self {
        Self {
            mode,
            participants,
            group_count: None,
            matches_per_opponent: None,
            best_of_legs: None,
            advance_per_group: None,
        }
    }

    pub fn with_group_count(mut self, group_count: usize) -> Self {
        self.group_count = Some(group_count);
        self
    }

    pub fn with_matches_per_opponent(mut self, matches_per_opponent: u32) -> Self {
        self.matches_per_opponent = Some(matches_per_opponent);
        self
    }

    pub fn with_best_of_legs(mut self, best_of_legs: u32) -> Self {
        self.best_of_legs = Some(best_of_legs);
        self
    }

    pub fn with_advance_per_group(mut self, advance_per_group: usize) -> Self {
        self.advance_per_group = Some(advance_per_group);
        self
    }

    pub fn matches_per_opponent(&self) -> u32 {
        self.matches_per_opponent.unwrap_or(1)
    }

    pub fn advance_per_group(&self) -> usize {
        self.advance_per_group.unwrap_or(2)
    }
}

/// Single-elimination bracket. Rounds hold match ids only; the matches live in
/// [`TournamentStructure::matches`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KnockoutBracket {
    pub rounds: Vec<Vec<MatchId>>,
    /// Participants placed straight into the second round.
    pub bye_participants: Vec<ParticipantId>,
}

impl KnockoutBracket {
    /// Id of the final (the only match of the last round).
    pub fn final_match_id(&self) -> Option<MatchId> {
        self.rounds.last().and_then(|round| round.first()).copied()
    }
}

/// Aggregate root: configuration, groups, every match, and the bracket view.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TournamentStructure {
    pub id: TournamentId,
    pub config: TournamentSetupRequest,
    /// Present in `group` and `group-knockout` modes.
    pub groups: Option<Vec<Group>>,
    /// Every match (group and knockout), stored once.
    pub matches: Vec<Match>,
    /// Present in `knockout` mode, and in `group-knockout` once the knockout stage started.
    pub knockout_bracket: Option<KnockoutBracket>,
    pub created_at: DateTime<Utc>,
}

impl TournamentStructure {
    pub fn match_by_id(&self, id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn match_by_id_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    pub fn group_by_id(&self, id: GroupId) -> Option<&Group> {
        self.groups.as_ref()?.iter().find(|g| g.id == id)
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.config.participants.iter().find(|p| p.id == id)
    }

    /// Matches of one group, in schedule order.
    pub fn group_matches(&self, group_id: GroupId) -> impl Iterator<Item = &Match> {
        self.matches
            .iter()
            .filter(move |m| m.group_id() == Some(group_id))
    }

    /// Matches of one knockout round, in bracket order.
    pub fn round_matches(&self, round: usize) -> Vec<&Match> {
        let Some(bracket) = &self.knockout_bracket else {
            return Vec::new();
        };
        bracket
            .rounds
            .get(round)
            .map(|ids| ids.iter().filter_map(|id| self.match_by_id(*id)).collect())
            .unwrap_or_default()
    }
}
