//! Integration tests for building tournaments from a setup request.

use dart_tournament_engine::{
    advancing_participants, build_tournament, build_tournament_with_rng, compute_standings,
    get_winner, is_completed, record_result, start_knockout_stage_with_rng, MatchId, Participant,
    TournamentError, TournamentMode, TournamentSetupRequest, TournamentStructure,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn participants(n: usize) -> Vec<Participant> {
    (0..n).map(|i| Participant::new(format!("P{i}"))).collect()
}

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn play_all_group_matches(t: &mut TournamentStructure) {
    let ids: Vec<MatchId> = t
        .matches
        .iter()
        .filter(|m| !m.is_knockout())
        .map(|m| m.id)
        .collect();
    for id in ids {
        record_result(t, id, 3, 1).unwrap();
    }
}

#[test]
fn knockout_tournament_has_a_bracket_and_no_groups() {
    let t = build_tournament(TournamentSetupRequest::new(
        TournamentMode::Knockout,
        participants(6),
    ))
    .unwrap();
    assert!(t.groups.is_none());
    let bracket = t.knockout_bracket.as_ref().unwrap();
    assert_eq!(t.matches.len(), 5);
    let referenced: HashSet<MatchId> = bracket.rounds.iter().flatten().copied().collect();
    let stored: HashSet<MatchId> = t.matches.iter().map(|m| m.id).collect();
    assert_eq!(referenced, stored);

    // 6 players: 2 byes, 2 first-round matches, then 2 and 1
    let sizes: Vec<usize> = (0..3).map(|r| t.round_matches(r).len()).collect();
    assert_eq!(sizes, vec![2, 2, 1]);
    assert!(t.round_matches(3).is_empty());
}

#[test]
fn group_tournament_uses_the_suggested_group_count() {
    let t = build_tournament_with_rng(
        TournamentSetupRequest::new(TournamentMode::Group, participants(10)),
        &mut rng(1),
    )
    .unwrap();
    assert!(t.knockout_bracket.is_none());
    let groups = t.groups.as_ref().unwrap();
    assert_eq!(groups.len(), 4);
    // sizes 3, 3, 2, 2 → 3 + 3 + 1 + 1 matches
    assert_eq!(t.matches.len(), 8);
}

#[test]
fn sixteen_players_four_groups() {
    let request = TournamentSetupRequest::new(TournamentMode::Group, participants(16))
        .with_group_count(4)
        .with_matches_per_opponent(1);
    let t = build_tournament_with_rng(request, &mut rng(2)).unwrap();
    assert_eq!(t.groups.as_ref().unwrap().len(), 4);
    assert_eq!(t.matches.len(), 24);
}

#[test]
fn setup_validation() {
    let one = TournamentSetupRequest::new(TournamentMode::Group, participants(1));
    assert_eq!(
        build_tournament(one).unwrap_err(),
        TournamentError::InvalidParticipantCount { count: 1 }
    );

    let mut dup = participants(3);
    dup[2].name = "p0".to_string();
    assert_eq!(
        build_tournament(TournamentSetupRequest::new(TournamentMode::Knockout, dup)).unwrap_err(),
        TournamentError::DuplicateParticipantName("p0".to_string())
    );

    let mut same_id = participants(3);
    same_id[1].id = same_id[0].id;
    assert!(matches!(
        build_tournament(TournamentSetupRequest::new(TournamentMode::Knockout, same_id)),
        Err(TournamentError::DuplicateParticipantId(_))
    ));

    let mut blank = participants(3);
    blank[0].name = "   ".to_string();
    assert_eq!(
        build_tournament(TournamentSetupRequest::new(TournamentMode::Knockout, blank))
            .unwrap_err(),
        TournamentError::EmptyParticipantName
    );

    let too_many_groups =
        TournamentSetupRequest::new(TournamentMode::Group, participants(3)).with_group_count(4);
    assert!(matches!(
        build_tournament(too_many_groups),
        Err(TournamentError::InvalidGroupCount { groups: 4, participants: 3 })
    ));

    let no_repeats = TournamentSetupRequest::new(TournamentMode::Group, participants(4))
        .with_matches_per_opponent(0);
    assert_eq!(
        build_tournament(no_repeats).unwrap_err(),
        TournamentError::InvalidMatchesPerOpponent
    );
}

#[test]
fn group_knockout_runs_groups_then_bracket() {
    let request = TournamentSetupRequest::new(TournamentMode::GroupKnockout, participants(12))
        .with_group_count(4);
    let mut t = build_tournament_with_rng(request, &mut rng(3)).unwrap();
    assert!(t.knockout_bracket.is_none());
    let group_matches = t.matches.len();

    assert_eq!(
        start_knockout_stage_with_rng(&mut t, &mut rng(4)).unwrap_err(),
        TournamentError::GroupStageIncomplete
    );
    assert!(!is_completed(&t));
    assert_eq!(get_winner(&t), None);

    play_all_group_matches(&mut t);
    assert!(!is_completed(&t));
    start_knockout_stage_with_rng(&mut t, &mut rng(4)).unwrap();

    let bracket = t.knockout_bracket.as_ref().unwrap();
    assert_eq!(bracket.rounds.len(), 3);
    assert!(bracket.bye_participants.is_empty());
    assert_eq!(t.matches.len(), group_matches + 7);

    let mut qualified = HashSet::new();
    for id in &bracket.rounds[0] {
        let m = t.match_by_id(*id).unwrap();
        qualified.insert(m.player1.unwrap());
        qualified.insert(m.player2.unwrap());
    }
    for g in t.groups.as_ref().unwrap() {
        let table = compute_standings(&t, g.id).unwrap();
        assert!(qualified.contains(&table[0].participant_id));
        assert!(qualified.contains(&table[1].participant_id));
        assert!(!qualified.contains(&table[2].participant_id));
    }

    assert_eq!(
        start_knockout_stage_with_rng(&mut t, &mut rng(5)).unwrap_err(),
        TournamentError::KnockoutAlreadyStarted
    );
}

#[test]
fn group_results_are_frozen_once_the_knockout_stage_starts() {
    let request = TournamentSetupRequest::new(TournamentMode::GroupKnockout, participants(6))
        .with_group_count(2)
        .with_advance_per_group(1);
    let mut t = build_tournament_with_rng(request, &mut rng(16)).unwrap();
    play_all_group_matches(&mut t);
    start_knockout_stage_with_rng(&mut t, &mut rng(17)).unwrap();
    let qualified = advancing_participants(&t, 1);

    let group_ids: Vec<MatchId> = t
        .matches
        .iter()
        .filter(|m| !m.is_knockout())
        .map(|m| m.id)
        .collect();
    for id in group_ids {
        let before = t.match_by_id(id).unwrap().clone();
        assert_eq!(
            record_result(&mut t, id, 0, 3).unwrap_err(),
            TournamentError::KnockoutAlreadyStarted
        );
        assert_eq!(t.match_by_id(id).unwrap(), &before);
    }
    assert_eq!(advancing_participants(&t, 1), qualified);

    // the bracket itself still takes results
    let final_id = t.knockout_bracket.as_ref().unwrap().final_match_id().unwrap();
    record_result(&mut t, final_id, 3, 0).unwrap();
    assert!(is_completed(&t));
    assert!(qualified.contains(&get_winner(&t).unwrap()));
}

#[test]
fn group_knockout_with_odd_qualifier_count_gets_byes() {
    let request = TournamentSetupRequest::new(TournamentMode::GroupKnockout, participants(9))
        .with_group_count(3)
        .with_advance_per_group(1);
    let mut t = build_tournament_with_rng(request, &mut rng(6)).unwrap();
    play_all_group_matches(&mut t);
    start_knockout_stage_with_rng(&mut t, &mut rng(7)).unwrap();
    let bracket = t.knockout_bracket.as_ref().unwrap();
    assert_eq!(bracket.bye_participants.len(), 1);
    assert_eq!(bracket.rounds.len(), 2);
}

#[test]
fn unreachable_knockout_stages_are_rejected_at_build() {
    let hybrid =
        |n: usize| TournamentSetupRequest::new(TournamentMode::GroupKnockout, participants(n));
    let cases = [
        (hybrid(6).with_group_count(2).with_advance_per_group(4), 4),
        (hybrid(6).with_group_count(2).with_advance_per_group(0), 0),
        // default: two groups of 2 and 1, two qualifiers each
        (hybrid(3), 2),
        (hybrid(4).with_group_count(1).with_advance_per_group(1), 1),
    ];
    for (request, per_group) in cases {
        assert_eq!(
            build_tournament_with_rng(request, &mut rng(8)).unwrap_err(),
            TournamentError::InvalidAdvanceCount { per_group }
        );
    }

    // the same numbers are fine without a knockout stage
    let group_only = TournamentSetupRequest::new(TournamentMode::Group, participants(3));
    assert!(build_tournament_with_rng(group_only, &mut rng(9)).is_ok());
}

#[test]
fn knockout_stage_rejects_group_mode_and_allows_single_member_groups() {
    let request = TournamentSetupRequest::new(TournamentMode::GroupKnockout, participants(6))
        .with_group_count(6)
        .with_advance_per_group(1);
    let mut single = build_tournament_with_rng(request, &mut rng(10)).unwrap();
    assert!(single.matches.is_empty());
    assert!(start_knockout_stage_with_rng(&mut single, &mut rng(11)).is_ok());

    let mut group_only = build_tournament_with_rng(
        TournamentSetupRequest::new(TournamentMode::Group, participants(4)),
        &mut rng(12),
    )
    .unwrap();
    assert_eq!(
        start_knockout_stage_with_rng(&mut group_only, &mut rng(13)).unwrap_err(),
        TournamentError::NoKnockoutStage
    );
}

#[test]
fn same_seed_same_tournament() {
    let ps = participants(7);
    let request = TournamentSetupRequest::new(TournamentMode::Knockout, ps);
    let a = build_tournament_with_rng(request.clone(), &mut rng(14)).unwrap();
    let b = build_tournament_with_rng(request, &mut rng(14)).unwrap();
    assert_eq!(a.id, b.id);
    assert_eq!(a.matches, b.matches);
    assert_eq!(a.knockout_bracket, b.knockout_bracket);
}

#[test]
fn structure_serializes_as_json() {
    let request = TournamentSetupRequest::new(TournamentMode::GroupKnockout, participants(4))
        .with_group_count(1)
        .with_best_of_legs(3);
    let mut t = build_tournament_with_rng(request, &mut rng(15)).unwrap();
    let id = t.matches[0].id;
    record_result(&mut t, id, 2, 1).unwrap();

    let json = serde_json::to_value(&t).unwrap();
    assert_eq!(json["config"]["mode"], "group-knockout");
    assert_eq!(json["matches"][0]["winner"], "player1");
    assert_eq!(json["matches"][0]["stage"]["kind"], "group");

    let back: TournamentStructure = serde_json::from_value(json).unwrap();
    assert_eq!(back.matches, t.matches);
    assert_eq!(back.groups, t.groups);
}

#[test]
fn setup_request_defaults_from_json() {
    let json = r#"{
        "mode": "knockout",
        "participants": [
            {"id": "6f1c2a0e-4c57-4d0b-9a83-0c4d2b7c1a10", "name": "Anna"},
            {"id": "0a5b3d6e-1f2c-4e8a-8d7b-6c5a4b3e2d10", "name": "Ben"}
        ]
    }"#;
    let request: TournamentSetupRequest = serde_json::from_str(json).unwrap();
    assert_eq!(request.group_count, None);
    assert_eq!(request.matches_per_opponent(), 1);
    assert_eq!(request.advance_per_group(), 2);
    let t = build_tournament(request).unwrap();
    assert_eq!(t.matches.len(), 1);
}
