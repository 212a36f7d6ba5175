//! Single-elimination bracket: seeding and bye placement.
//!
//! For `n` participants the bracket has `s = n.next_power_of_two()` slots and
//! `s - n` byes. After a random draw the first `s - n` participants get a bye
//! and the rest are paired, in order, into first-round matches.
//!
//! Second-round slots are numbered left to right (`slot k` is match `k / 2`,
//! player 1 when `k` is even). The winner of first-round match `i` owns slot
//! `i`; byes fill every remaining slot in draw order. The first round always has
//! `n - s / 2` matches and the second round `s / 2` slots, so winners and byes
//! fill it exactly, and surplus byes meet each other there.
//!
//! Every slot records its [`SlotSource`], so advancement never has to
//! recompute positions.

use crate::logic::random::{random_id, shuffled};
use crate::models::{
    KnockoutBracket, Match, Participant, ParticipantId, SlotSource, TournamentError,
};
use rand::Rng;

/// Slots in a bracket for `n` participants.
pub fn next_power_of_two(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

/// Participants who skip the first round.
pub fn bye_count(n: usize) -> usize {
    if n < 2 {
        return 0;
    }
    next_power_of_two(n) - n
}

/// Rounds needed to produce a single winner (`log2` of the slot count).
pub fn round_count(n: usize) -> usize {
    next_power_of_two(n).trailing_zeros() as usize
}

/// Draw a bracket for `participants`.
///
/// Returns the bracket (match ids per round) and the matches it references,
/// first round first. Later rounds start with unresolved slots, except
/// second-round slots held by byes.
pub fn build_bracket<R: Rng>(
    participants: &[Participant],
    rng: &mut R,
) -> Result<(KnockoutBracket, Vec<Match>), TournamentError> {
    let total = participants.len();
    if total < 2 {
        return Err(TournamentError::InvalidParticipantCount { count: total });
    }

    let slots = next_power_of_two(total);
    let byes = bye_count(total);
    let rounds = round_count(total);

    let ids: Vec<ParticipantId> = participants.iter().map(|p| p.id).collect();
    let order = shuffled(&ids, rng);
    let (bye_participants, entrants) = order.split_at(byes);

    let mut matches: Vec<Match> = Vec::with_capacity(total - 1);
    let mut round_ids = Vec::with_capacity(rounds);

    let first_round: Vec<Match> = entrants
        .chunks_exact(2)
        .map(|pair| {
            Match::knockout(
                random_id(rng),
                0,
                [SlotSource::Entrant(pair[0]), SlotSource::Entrant(pair[1])],
            )
        })
        .collect();

    // Sources for the next round's slots, left to right.
    let mut next_sources: Vec<SlotSource> = first_round
        .iter()
        .map(|m| SlotSource::WinnerOf(m.id))
        .chain(bye_participants.iter().map(|&id| SlotSource::Bye(id)))
        .collect();
    debug_assert!(rounds < 2 || next_sources.len() == slots / 2);

    round_ids.push(first_round.iter().map(|m| m.id).collect::<Vec<_>>());
    matches.extend(first_round);

    for round in 1..rounds {
        let round_matches: Vec<Match> = next_sources
            .chunks_exact(2)
            .map(|pair| Match::knockout(random_id(rng), round, [pair[0], pair[1]]))
            .collect();
        next_sources = round_matches
            .iter()
            .map(|m| SlotSource::WinnerOf(m.id))
            .collect();
        round_ids.push(round_matches.iter().map(|m| m.id).collect());
        matches.extend(round_matches);
    }

    log::debug!(
        "Bracket for {} participants: {} slots, {} byes, {} rounds, {} first-round matches",
        total,
        slots,
        byes,
        rounds,
        round_ids[0].len()
    );

    Ok((
        KnockoutBracket {
            rounds: round_ids,
            bye_participants: bye_participants.to_vec(),
        },
        matches,
    ))
}
