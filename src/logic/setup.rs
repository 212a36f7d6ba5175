//! Setup phase: turn a setup request into a tournament, and start the
//! knockout stage of a group-knockout tournament.

use crate::logic::group_play::{assign_groups, generate_group_matches, suggest_group_count};
use crate::logic::knockout::build_bracket;
use crate::logic::random::random_id;
use crate::logic::standings::advancing_participants;
use crate::models::{
    Group, Participant, TournamentError, TournamentMode, TournamentSetupRequest,
    TournamentStructure,
};
use chrono::Utc;
use rand::Rng;
use std::collections::HashSet;

/// Build a tournament from `request` using the thread-local random source.
pub fn build_tournament(
    request: TournamentSetupRequest,
) -> Result<TournamentStructure, TournamentError> {
    build_tournament_with_rng(request, &mut rand::thread_rng())
}

/// Build a tournament from `request`.
///
/// - `group`: groups plus their round-robin schedule.
/// - `knockout`: a bracket over every participant.
/// - `group-knockout`: groups and schedule only; see [`start_knockout_stage`].
///   The advance count is checked against the groups here so a valid setup
///   can always reach its knockout stage.
pub fn build_tournament_with_rng<R: Rng>(
    request: TournamentSetupRequest,
    rng: &mut R,
) -> Result<TournamentStructure, TournamentError> {
    if request.participants.len() < 2 {
        return Err(TournamentError::InvalidParticipantCount {
            count: request.participants.len(),
        });
    }
    validate_participants(&request.participants)?;

    let mut structure = TournamentStructure {
        id: random_id(rng),
        config: request,
        groups: None,
        matches: Vec::new(),
        knockout_bracket: None,
        created_at: Utc::now(),
    };
    let participants = &structure.config.participants;

    if structure.config.mode.has_groups() {
        let group_count = structure
            .config
            .group_count
            .unwrap_or_else(|| suggest_group_count(participants.len()));
        let groups = assign_groups(participants, group_count, rng)?;
        if structure.config.mode == TournamentMode::GroupKnockout {
            check_advance_count(&groups, structure.config.advance_per_group())?;
        }
        structure.matches =
            generate_group_matches(&groups, structure.config.matches_per_opponent(), rng)?;
        structure.groups = Some(groups);
    } else {
        let (bracket, matches) = build_bracket(participants, rng)?;
        structure.matches = matches;
        structure.knockout_bracket = Some(bracket);
    }

    log::info!(
        "Built {:?} tournament {} with {} participants and {} matches",
        structure.config.mode,
        structure.id,
        structure.config.participants.len(),
        structure.matches.len()
    );
    Ok(structure)
}

/// Start the knockout stage of a group-knockout tournament.
///
/// Every group match must have a result. The first `advance_per_group`
/// finishers of each group are drawn into a bracket whose matches are added
/// to the tournament.
pub fn start_knockout_stage(structure: &mut TournamentStructure) -> Result<(), TournamentError> {
    start_knockout_stage_with_rng(structure, &mut rand::thread_rng())
}

pub fn start_knockout_stage_with_rng<R: Rng>(
    structure: &mut TournamentStructure,
    rng: &mut R,
) -> Result<(), TournamentError> {
    if structure.config.mode == TournamentMode::Group {
        return Err(TournamentError::NoKnockoutStage);
    }
    if structure.knockout_bracket.is_some() {
        return Err(TournamentError::KnockoutAlreadyStarted);
    }
    if structure
        .matches
        .iter()
        .any(|m| !m.is_knockout() && !m.is_complete())
    {
        return Err(TournamentError::GroupStageIncomplete);
    }

    let per_group = structure.config.advance_per_group();
    check_advance_count(structure.groups.as_deref().unwrap_or_default(), per_group)?;

    let qualified: Vec<Participant> = advancing_participants(structure, per_group)
        .into_iter()
        .filter_map(|id| structure.participant(id).cloned())
        .collect();

    let (bracket, matches) = build_bracket(&qualified, rng)?;
    structure.matches.extend(matches);
    structure.knockout_bracket = Some(bracket);

    log::info!(
        "Knockout stage of tournament {} started with {} qualifiers",
        structure.id,
        qualified.len()
    );
    Ok(())
}

/// At least one qualifier per group, no more than the smallest group holds,
/// and at least two in total.
fn check_advance_count(groups: &[Group], per_group: usize) -> Result<(), TournamentError> {
    let smallest_group = groups
        .iter()
        .map(|g| g.participant_ids.len())
        .min()
        .unwrap_or(0);
    if per_group == 0 || per_group > smallest_group || per_group * groups.len() < 2 {
        return Err(TournamentError::InvalidAdvanceCount { per_group });
    }
    Ok(())
}

/// Names must be present and unique (case-insensitive); ids must be unique.
pub fn validate_participants(participants: &[Participant]) -> Result<(), TournamentError> {
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for p in participants {
        let name = p.name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyParticipantName);
        }
        if !names.insert(name.to_lowercase()) {
            return Err(TournamentError::DuplicateParticipantName(name.to_string()));
        }
        if !ids.insert(p.id) {
            return Err(TournamentError::DuplicateParticipantId(p.id));
        }
    }
    Ok(())
}
