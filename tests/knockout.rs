//! Integration tests for bracket seeding and bye placement.

use dart_tournament_engine::{
    build_bracket, bye_count, next_power_of_two, round_count, KnockoutBracket, Match, MatchId,
    MatchState, Participant, SlotSource, Stage, TournamentError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn participants(n: usize) -> Vec<Participant> {
    (0..n).map(|i| Participant::new(format!("P{i}"))).collect()
}

fn build(n: usize, seed: u64) -> (KnockoutBracket, Vec<Match>) {
    build_bracket(&participants(n), &mut StdRng::seed_from_u64(seed)).unwrap()
}

fn find(matches: &[Match], id: MatchId) -> &Match {
    matches.iter().find(|m| m.id == id).unwrap()
}

fn sources(m: &Match) -> [SlotSource; 2] {
    match m.stage {
        Stage::Knockout { sources, .. } => sources,
        Stage::Group { .. } => panic!("not a knockout match"),
    }
}

#[test]
fn bracket_arithmetic() {
    assert_eq!(next_power_of_two(5), 8);
    assert_eq!(next_power_of_two(8), 8);
    assert_eq!(bye_count(5), 3);
    assert_eq!(bye_count(8), 0);
    assert_eq!(bye_count(9), 7);
    assert_eq!(round_count(2), 1);
    assert_eq!(round_count(5), 3);
    assert_eq!(round_count(16), 4);
    assert_eq!(round_count(17), 5);
}

#[test]
fn fewer_than_two_participants_is_an_error() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
        build_bracket(&participants(1), &mut rng).unwrap_err(),
        TournamentError::InvalidParticipantCount { count: 1 }
    );
    assert!(matches!(
        build_bracket(&[], &mut rng),
        Err(TournamentError::InvalidParticipantCount { count: 0 })
    ));
}

#[test]
fn two_participants_play_the_final_directly() {
    let (bracket, matches) = build(2, 3);
    assert_eq!(bracket.rounds.len(), 1);
    assert_eq!(matches.len(), 1);
    assert!(bracket.bye_participants.is_empty());
    assert_eq!(matches[0].state(), MatchState::Pending);
    assert_eq!(bracket.final_match_id(), Some(matches[0].id));
}

#[test]
fn power_of_two_field_has_no_byes() {
    let (bracket, matches) = build(16, 4);
    assert!(bracket.bye_participants.is_empty());
    let sizes: Vec<usize> = bracket.rounds.iter().map(|r| r.len()).collect();
    assert_eq!(sizes, vec![8, 4, 2, 1]);
    assert_eq!(matches.len(), 15);
    for id in &bracket.rounds[1] {
        let m = find(&matches, *id);
        assert_eq!(m.state(), MatchState::Unresolved);
        assert!(matches!(sources(m), [SlotSource::WinnerOf(_), SlotSource::WinnerOf(_)]));
    }
}

#[test]
fn five_participants_pair_surplus_byes_in_round_two() {
    let (bracket, matches) = build(5, 5);
    assert_eq!(bracket.bye_participants.len(), 3);
    let sizes: Vec<usize> = bracket.rounds.iter().map(|r| r.len()).collect();
    assert_eq!(sizes, vec![1, 2, 1]);

    let first = find(&matches, bracket.rounds[0][0]);
    let byes = &bracket.bye_participants;

    let second_a = find(&matches, bracket.rounds[1][0]);
    assert_eq!(
        sources(second_a),
        [SlotSource::WinnerOf(first.id), SlotSource::Bye(byes[0])]
    );
    assert_eq!(second_a.player1, None);
    assert_eq!(second_a.player2, Some(byes[0]));
    assert_eq!(second_a.state(), MatchState::Unresolved);

    let second_b = find(&matches, bracket.rounds[1][1]);
    assert_eq!(
        sources(second_b),
        [SlotSource::Bye(byes[1]), SlotSource::Bye(byes[2])]
    );
    assert_eq!(second_b.state(), MatchState::Pending);

    let last = find(&matches, bracket.rounds[2][0]);
    assert_eq!(
        sources(last),
        [SlotSource::WinnerOf(second_a.id), SlotSource::WinnerOf(second_b.id)]
    );
}

#[test]
fn three_participants_one_bye_meets_the_first_winner() {
    let (bracket, matches) = build(3, 6);
    assert_eq!(bracket.rounds.len(), 2);
    assert_eq!(bracket.bye_participants.len(), 1);
    let first = find(&matches, bracket.rounds[0][0]);
    let last = find(&matches, bracket.rounds[1][0]);
    assert_eq!(
        sources(last),
        [
            SlotSource::WinnerOf(first.id),
            SlotSource::Bye(bracket.bye_participants[0])
        ]
    );
}

#[test]
fn byes_and_entrants_are_disjoint() {
    let (bracket, matches) = build(13, 7);
    let byes: HashSet<_> = bracket.bye_participants.iter().copied().collect();
    let mut entrants = HashSet::new();
    for id in &bracket.rounds[0] {
        let m = find(&matches, *id);
        for p in [m.player1.unwrap(), m.player2.unwrap()] {
            assert!(entrants.insert(p), "participant in two first-round matches");
            assert!(!byes.contains(&p), "participant both bye and entrant");
        }
    }
    assert_eq!(entrants.len() + byes.len(), 13);
}

#[test]
fn rounds_are_tagged_with_their_index() {
    let (bracket, matches) = build(11, 8);
    for (r, ids) in bracket.rounds.iter().enumerate() {
        for id in ids {
            assert_eq!(find(&matches, *id).round(), Some(r));
        }
    }
}

#[test]
fn same_seed_same_bracket() {
    let ps = participants(9);
    let a = build_bracket(&ps, &mut StdRng::seed_from_u64(99)).unwrap();
    let b = build_bracket(&ps, &mut StdRng::seed_from_u64(99)).unwrap();
    assert_eq!(a, b);
}
