//! Tournament structure logic: seeding, scheduling, standings, advancement.

mod advancement;
mod group_play;
mod knockout;
mod random;
mod roster;
mod setup;
mod standings;

pub use advancement::{destination, get_winner, is_completed, record_result};
pub use group_play::{
    assign_groups, generate_group_matches, group_name, pair_count, suggest_group_count,
};
pub use knockout::{build_bracket, bye_count, next_power_of_two, round_count};
pub use random::{random_id, shuffled};
pub use roster::parse_roster_csv;
pub use setup::{
    build_tournament, build_tournament_with_rng, start_knockout_stage,
    start_knockout_stage_with_rng, validate_participants,
};
pub use standings::{
    advancing_participants, compare_standings, compute_standings, group_standings,
    overall_standings,
};
