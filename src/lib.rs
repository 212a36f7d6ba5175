//! Dart tournament engine: group schedules, knockout brackets, standings and
//! result entry for group, knockout and group-knockout tournaments.

pub mod logic;
pub mod models;

pub use logic::{
    advancing_participants, assign_groups, build_bracket, build_tournament,
    build_tournament_with_rng, bye_count, compute_standings, destination, generate_group_matches,
    get_winner, group_standings, is_completed, next_power_of_two, overall_standings,
    parse_roster_csv, record_result, round_count, start_knockout_stage,
    start_knockout_stage_with_rng, suggest_group_count,
};
pub use models::{
    Group, GroupId, GroupStanding, KnockoutBracket, Match, MatchId, MatchOutcome, MatchState,
    Participant, ParticipantId, Slot, SlotSource, Stage, TournamentError, TournamentId,
    TournamentMode, TournamentSetupRequest, TournamentStructure,
};
