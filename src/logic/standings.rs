//! Group tables, recomputed from the matches on every call.

use crate::models::{
    Group, GroupId, GroupStanding, Match, Participant, ParticipantId, TournamentError,
    TournamentStructure,
};
use std::cmp::Ordering;

/// Standings of one group from its matches.
///
/// Only matches with both scores entered count. Wins are worth 2 points,
/// draws 1. Rows are sorted by points, leg difference, legs won (all
/// descending), then by name.
pub fn group_standings<'a>(
    group: &Group,
    matches: impl IntoIterator<Item = &'a Match>,
    participants: &[Participant],
) -> Vec<GroupStanding> {
    let name_of = |id: ParticipantId| {
        participants
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.clone())
            .unwrap_or_default()
    };
    let mut rows: Vec<GroupStanding> = group
        .participant_ids
        .iter()
        .map(|&id| GroupStanding::new(id, name_of(id)))
        .collect();

    for m in matches {
        let (Some(p1), Some(p2), Some(s1), Some(s2)) = (m.player1, m.player2, m.score1, m.score2)
        else {
            continue;
        };
        let i1 = rows.iter().position(|r| r.participant_id == p1);
        let i2 = rows.iter().position(|r| r.participant_id == p2);
        if let (Some(i1), Some(i2)) = (i1, i2) {
            rows[i1].record(s1, s2);
            rows[i2].record(s2, s1);
        }
    }

    rows.sort_by(compare_standings);
    rows
}

/// Table order: points, difference, legs won (descending), then name.
pub fn compare_standings(a: &GroupStanding, b: &GroupStanding) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.difference.cmp(&a.difference))
        .then_with(|| b.scored_units.cmp(&a.scored_units))
        .then_with(|| {
            a.participant_name
                .to_lowercase()
                .cmp(&b.participant_name.to_lowercase())
        })
        .then_with(|| a.participant_name.cmp(&b.participant_name))
}

/// Standings of a group of `structure`.
pub fn compute_standings(
    structure: &TournamentStructure,
    group_id: GroupId,
) -> Result<Vec<GroupStanding>, TournamentError> {
    let group = structure
        .group_by_id(group_id)
        .ok_or(TournamentError::GroupNotFound(group_id))?;
    Ok(group_standings(
        group,
        structure.group_matches(group_id),
        &structure.config.participants,
    ))
}

/// Every group's rows merged into one table with the same ordering.
pub fn overall_standings(structure: &TournamentStructure) -> Vec<GroupStanding> {
    let Some(groups) = &structure.groups else {
        return Vec::new();
    };
    let mut rows: Vec<GroupStanding> = groups
        .iter()
        .flat_map(|g| {
            group_standings(g, structure.group_matches(g.id), &structure.config.participants)
        })
        .collect();
    rows.sort_by(compare_standings);
    rows
}

/// The first `per_group` participants of every group's table, groups in creation order.
pub fn advancing_participants(
    structure: &TournamentStructure,
    per_group: usize,
) -> Vec<ParticipantId> {
    let Some(groups) = &structure.groups else {
        return Vec::new();
    };
    groups
        .iter()
        .flat_map(|g| {
            group_standings(g, structure.group_matches(g.id), &structure.config.participants)
                .into_iter()
                .take(per_group)
                .map(|row| row.participant_id)
        })
        .collect()
}
