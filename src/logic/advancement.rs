//! Result entry, knockout advancement, and winner lookup.

use crate::logic::standings::overall_standings;
use crate::models::{
    MatchId, MatchOutcome, ParticipantId, Slot, SlotSource, Stage, TournamentError,
    TournamentMode, TournamentStructure,
};
use std::cmp::Ordering;

/// Record (or overwrite) the score of a match.
///
/// The winner is the higher score. Level scores make a draw in group matches
/// and are rejected in knockout matches. A knockout winner is written into the
/// slot that names this match as its source. If an edit changes the winner,
/// results already entered further down that path are cleared. Group results
/// are frozen once the knockout stage has been drawn from them.
///
/// Nothing is modified when an error is returned.
pub fn record_result(
    structure: &mut TournamentStructure,
    match_id: MatchId,
    score1: u32,
    score2: u32,
) -> Result<(), TournamentError> {
    let m = structure
        .match_by_id(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if m.player1.is_none() || m.player2.is_none() {
        return Err(TournamentError::SlotNotReady(match_id));
    }
    let knockout = m.is_knockout();
    if !knockout && structure.knockout_bracket.is_some() {
        return Err(TournamentError::KnockoutAlreadyStarted);
    }

    let outcome = match score1.cmp(&score2) {
        Ordering::Greater => MatchOutcome::Player1,
        Ordering::Less => MatchOutcome::Player2,
        Ordering::Equal if knockout => return Err(TournamentError::DrawNotAllowed(match_id)),
        Ordering::Equal => MatchOutcome::Draw,
    };
    if let Some(best_of) = structure.config.best_of_legs.filter(|&n| n > 0) {
        validate_legs(score1, score2, best_of, knockout)?;
    }

    let was_completed = is_completed(structure);
    let m = structure
        .match_by_id_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    m.winner = Some(outcome);
    m.score1 = Some(score1);
    m.score2 = Some(score2);
    let winner = m.winner_id();

    if knockout {
        advance(structure, match_id, winner);
    }
    if !was_completed && is_completed(structure) {
        log::info!("Tournament {} completed", structure.id);
    }
    Ok(())
}

/// A finished best-of-N score: nobody past `ceil(N / 2)` legs, no more than N
/// legs in total, and either someone reached `ceil(N / 2)` or (group matches)
/// every leg was played.
fn validate_legs(
    score1: u32,
    score2: u32,
    best_of: u32,
    knockout: bool,
) -> Result<(), TournamentError> {
    let legs_to_win = best_of.div_ceil(2);
    let played = u64::from(score1) + u64::from(score2);
    let decided = score1 == legs_to_win || score2 == legs_to_win;
    let all_played = played == u64::from(best_of);

    let valid = score1 <= legs_to_win
        && score2 <= legs_to_win
        && played <= u64::from(best_of)
        && (decided || (!knockout && all_played));
    if valid {
        Ok(())
    } else {
        Err(TournamentError::InvalidScore {
            score1,
            score2,
            best_of,
        })
    }
}

/// The match and slot fed by the winner of `match_id`, if any (none for the final).
pub fn destination(
    structure: &TournamentStructure,
    match_id: MatchId,
) -> Option<(MatchId, Slot)> {
    let link = SlotSource::WinnerOf(match_id);
    structure.matches.iter().find_map(|m| match m.stage {
        Stage::Knockout { sources, .. } if sources[0] == link => Some((m.id, Slot::Player1)),
        Stage::Knockout { sources, .. } if sources[1] == link => Some((m.id, Slot::Player2)),
        _ => None,
    })
}

/// Write `winner` into the slot fed by `from`. A slot whose occupant changes
/// invalidates the result of its match, and that match's own slot downstream.
fn advance(structure: &mut TournamentStructure, from: MatchId, winner: Option<ParticipantId>) {
    let mut current = from;
    let mut carried = winner;
    while let Some((next_id, slot)) = destination(structure, current) {
        let Some(next) = structure.match_by_id_mut(next_id) else {
            break;
        };
        if next.slot(slot) == carried {
            break;
        }
        *next.slot_mut(slot) = carried;
        if next.winner.is_none() {
            break;
        }
        log::warn!(
            "Match {} lost its result: a player changed after an earlier result was edited",
            next_id
        );
        next.clear_result();
        current = next_id;
        carried = None;
    }
}

/// Tournament winner so far.
///
/// With a bracket: the winner of the final, once scored. In group mode: the
/// leader of the combined table, once every group match has a result.
/// Otherwise None.
pub fn get_winner(structure: &TournamentStructure) -> Option<ParticipantId> {
    if let Some(bracket) = &structure.knockout_bracket {
        let final_id = bracket.final_match_id()?;
        return structure.match_by_id(final_id)?.winner_id();
    }
    if structure.config.mode == TournamentMode::Group && is_completed(structure) {
        return overall_standings(structure)
            .first()
            .map(|row| row.participant_id);
    }
    None
}

/// Whether every reachable match has a result: the final, or every group match in group mode.
pub fn is_completed(structure: &TournamentStructure) -> bool {
    if let Some(bracket) = &structure.knockout_bracket {
        return bracket
            .final_match_id()
            .and_then(|id| structure.match_by_id(id))
            .is_some_and(|m| m.is_complete());
    }
    structure.config.mode == TournamentMode::Group
        && structure
            .matches
            .iter()
            .filter(|m| !m.is_knockout())
            .all(|m| m.is_complete())
}
