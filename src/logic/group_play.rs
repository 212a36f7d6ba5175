//! Group stage: group assignment and round-robin schedule.

use crate::logic::random::{random_id, shuffled};
use crate::models::{Group, Match, Participant, TournamentError};
use rand::Rng;

/// Suggested number of groups for a field size (groups of about four, World Cup style).
///
/// - up to 8 → 2
/// - up to 16 → 4
/// - up to 24 → 6
/// - up to 32 → 8
/// - otherwise `ceil(n / 4)`
///
/// Never more groups than participants (and at least 1).
pub fn suggest_group_count(participant_count: usize) -> usize {
    let suggested = match participant_count {
        0..=8 => 2,
        9..=16 => 4,
        17..=24 => 6,
        25..=32 => 8,
        n => n.div_ceil(4),
    };
    suggested.min(participant_count).max(1)
}

/// Group label by creation order: A..Z, then AA, AB, ...
pub fn group_name(index: usize) -> String {
    let mut name = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        name.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    name.reverse();
    String::from_utf8(name).unwrap_or_default()
}

/// Shuffle participants and deal them into `group_count` groups (`i % group_count`).
///
/// Group sizes differ by at most one.
pub fn assign_groups<R: Rng>(
    participants: &[Participant],
    group_count: usize,
    rng: &mut R,
) -> Result<Vec<Group>, TournamentError> {
    if group_count < 1 || group_count > participants.len() {
        return Err(TournamentError::InvalidGroupCount {
            groups: group_count,
            participants: participants.len(),
        });
    }

    let mut groups: Vec<Group> = (0..group_count)
        .map(|i| Group {
            id: random_id(rng),
            name: group_name(i),
            participant_ids: Vec::new(),
        })
        .collect();

    for (i, participant) in shuffled(participants, rng).iter().enumerate() {
        groups[i % group_count].participant_ids.push(participant.id);
    }

    log::debug!(
        "Assigned {} participants to {} groups",
        participants.len(),
        group_count
    );
    Ok(groups)
}

/// Round-robin schedule for every group.
///
/// Pairs are enumerated in member order (`i < j`); each pair is emitted
/// `matches_per_opponent` times back to back, alternating who is player 1.
pub fn generate_group_matches<R: Rng>(
    groups: &[Group],
    matches_per_opponent: u32,
    rng: &mut R,
) -> Result<Vec<Match>, TournamentError> {
    if matches_per_opponent < 1 {
        return Err(TournamentError::InvalidMatchesPerOpponent);
    }

    let mut matches = Vec::new();
    for group in groups {
        let members = &group.participant_ids;
        for i in 0..members.len() {
            for j in (i + 1)..members.len() {
                for k in 0..matches_per_opponent {
                    let (home, away) = if k % 2 == 0 {
                        (members[i], members[j])
                    } else {
                        (members[j], members[i])
                    };
                    matches.push(Match::group(random_id(rng), group.id, home, away));
                }
            }
        }
        log::debug!(
            "Group {}: {} members, {} matches scheduled",
            group.name,
            members.len(),
            pair_count(members.len()) * matches_per_opponent as usize
        );
    }
    Ok(matches)
}

/// Number of unordered pairs in a group of `size`.
pub fn pair_count(size: usize) -> usize {
    size * size.saturating_sub(1) / 2
}
