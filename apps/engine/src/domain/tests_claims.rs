use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::domain::books::Book;
use crate::domain::cards::{Rank, Variant};
use crate::domain::state::{GameState, GameStatus, MoveEvent};
use crate::domain::test_state_helpers::{c, owner_map, started_state};
use crate::domain::{mutate, validate};
use crate::errors::Reject;

// Teams: {p1, p2} vs {p3, p4}; the Twos sit entirely with team one.
fn claimable_game() -> GameState {
    started_state(
        Variant::Normal,
        &[
            ("p1", "2C 2D 3C"),
            ("p2", "2H 2S 3D"),
            ("p3", "4H 5H 6H"),
            ("p4", "4S 5S 6S"),
        ],
        "p1",
    )
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[test]
fn claim_must_name_a_full_single_book() {
    let state = claimable_game();

    let short = owner_map(&[("2C", "p1"), ("2D", "p1"), ("2H", "p2")]);
    assert_eq!(
        validate::validate_claim(&state, "p1", &short).unwrap_err(),
        Reject::WrongClaimSize { expected: 4 }
    );

    let mixed = owner_map(&[("2C", "p1"), ("2D", "p1"), ("2H", "p2"), ("3C", "p1")]);
    assert_eq!(
        validate::validate_claim(&state, "p1", &mixed).unwrap_err(),
        Reject::MixedBookClaim
    );
}

#[test]
fn claim_must_name_the_claimant_and_one_team() {
    let state = claimable_game();

    let without_self = owner_map(&[("2C", "p2"), ("2D", "p2"), ("2H", "p2"), ("2S", "p2")]);
    // p1 not among the named owners
    assert_eq!(
        validate::validate_claim(&state, "p1", &without_self).unwrap_err(),
        Reject::ClaimantNotNamed
    );

    let cross_team = owner_map(&[("2C", "p1"), ("2D", "p1"), ("2H", "p3"), ("2S", "p2")]);
    assert_eq!(
        validate::validate_claim(&state, "p1", &cross_team).unwrap_err(),
        Reject::OwnersNotOneTeam
    );

    let outsider = owner_map(&[("2C", "p1"), ("2D", "p1"), ("2H", "p9"), ("2S", "p2")]);
    assert_eq!(
        validate::validate_claim(&state, "p1", &outsider).unwrap_err(),
        Reject::UnknownPlayer("p9".to_string())
    );
}

#[test]
fn claim_requires_the_book_to_still_be_in_play() {
    let mut state = claimable_game();
    state.owner_of.remove(&c("2H"));
    let owners = owner_map(&[("2C", "p1"), ("2D", "p1"), ("2H", "p2"), ("2S", "p2")]);
    assert_eq!(
        validate::validate_claim(&state, "p1", &owners).unwrap_err(),
        Reject::CardNotInPlay
    );
}

#[test]
fn correct_claim_scores_and_purges_the_book() {
    let mut state = claimable_game();
    let owners = owner_map(&[("2C", "p1"), ("2D", "p1"), ("2H", "p2"), ("2S", "p2")]);
    validate::validate_claim(&state, "p1", &owners).unwrap();
    let outcome = mutate::apply_claim(&mut state, "p1", owners, &mut rng());

    assert!(outcome.success);
    assert_eq!(outcome.book, Book::Rank(Rank::Two));
    assert_eq!(outcome.winning_team, "team-1");
    assert!(!outcome.game_completed);

    let team = state.team("team-1").unwrap();
    assert_eq!(team.score, 1);
    assert_eq!(team.books_won, vec![Book::Rank(Rank::Two)]);

    // The whole book leaves play: ownership, hands, counts, inference.
    for card in ["2C", "2D", "2H", "2S"] {
        assert!(!state.owner_of.contains_key(&c(card)));
        assert!(!state.possible_owners.contains_key(&c(card)));
    }
    assert_eq!(state.hands["p1"], vec![c("3C")]);
    assert_eq!(state.card_count("p1"), 1);
    assert_eq!(state.card_count("p2"), 1);

    // Claimant keeps the turn.
    assert_eq!(state.turn.as_deref(), Some("p1"));
    assert_eq!(state.metrics["p1"].claims_made, 1);
    assert_eq!(state.metrics["p1"].claims_succeeded, 1);
}

#[test]
fn wrong_claim_awards_the_opposing_team_and_moves_the_turn() {
    let mut state = claimable_game();
    // 2H is really with p2.
    let owners = owner_map(&[("2C", "p1"), ("2D", "p1"), ("2H", "p1"), ("2S", "p2")]);
    validate::validate_claim(&state, "p1", &owners).unwrap();
    let outcome = mutate::apply_claim(&mut state, "p1", owners, &mut rng());

    assert!(!outcome.success);
    assert_eq!(outcome.winning_team, "team-2");
    let opposing = state.team("team-2").unwrap();
    assert_eq!(opposing.score, 1);

    // Book is gone either way.
    assert!(!state.owner_of.contains_key(&c("2H")));
    assert_eq!(state.metrics["p1"].claims_succeeded, 0);

    // Turn goes to an opponent who still has cards.
    let next = state.turn.clone().unwrap();
    assert!(next == "p3" || next == "p4", "turn went to {next}");
}

#[test]
fn wrong_claim_in_a_multi_team_game_awards_the_holders() {
    // Three teams of one; p2 and p3 are both opponents of p1, and p2
    // holds more of the claimed book than p3.
    let mut state = started_state(
        Variant::Normal,
        &[("p1", "2C 3C"), ("p2", "2D 2H 3D"), ("p3", "2S 4H 4S")],
        "p1",
    );
    state.teams = vec![
        team_of_one("team-1", "Alpha", "p1"),
        team_of_one("team-2", "Beta", "p2"),
        team_of_one("team-3", "Gamma", "p3"),
    ];
    for (id, team, opps) in [
        ("p1", "team-1", ["p2", "p3"]),
        ("p2", "team-2", ["p1", "p3"]),
        ("p3", "team-3", ["p1", "p2"]),
    ] {
        let player = state.players.iter_mut().find(|p| p.id == id).unwrap();
        player.team_id = Some(team.to_string());
        player.teammates = Vec::new();
        player.opponents = opps.iter().map(|s| s.to_string()).collect();
    }

    // All four Twos attributed to p1; actually spread across everyone.
    let owners = owner_map(&[("2C", "p1"), ("2D", "p1"), ("2H", "p1"), ("2S", "p1")]);
    let outcome = mutate::apply_claim(&mut state, "p1", owners, &mut rng());

    assert!(!outcome.success);
    // Beta held two of the Twos, Gamma one.
    assert_eq!(outcome.winning_team, "team-2");
}

#[test]
fn final_claim_completes_the_game() {
    let mut state = claimable_game();
    // Every other book already claimed.
    let already_won: Vec<Book> = state
        .config
        .as_ref()
        .unwrap()
        .books
        .iter()
        .copied()
        .filter(|&b| b != Book::Rank(Rank::Two))
        .collect();
    state.teams[1].books_won = already_won;

    let owners = owner_map(&[("2C", "p1"), ("2D", "p1"), ("2H", "p2"), ("2S", "p2")]);
    let outcome = mutate::apply_claim(&mut state, "p1", owners, &mut rng());

    assert!(outcome.success);
    assert!(outcome.game_completed);
    assert_eq!(state.status, GameStatus::Completed);
    assert_eq!(state.turn, None);

    // Nothing mutates a completed game.
    assert_eq!(
        validate::validate_ask(&state, "p1", "p3", c("4H")).unwrap_err(),
        Reject::WrongStatus {
            actual: "COMPLETED".to_string()
        }
    );
}

#[test]
fn transfer_is_only_legal_right_after_your_own_successful_claim() {
    let mut state = claimable_game();
    assert_eq!(
        validate::validate_transfer(&state, "p1", "p2").unwrap_err(),
        Reject::TransferNeedsClaim
    );

    let owners = owner_map(&[("2C", "p1"), ("2D", "p1"), ("2H", "p2"), ("2S", "p2")]);
    mutate::apply_claim(&mut state, "p1", owners, &mut rng());

    assert_eq!(
        validate::validate_transfer(&state, "p1", "p3").unwrap_err(),
        Reject::TargetNotTeammate
    );
    validate::validate_transfer(&state, "p1", "p2").unwrap();

    // An intervening move closes the window.
    mutate::apply_ask(&mut state, "p1", "p3", c("4H"));
    assert_eq!(
        validate::validate_transfer(&state, "p1", "p2").unwrap_err(),
        Reject::TransferNeedsClaim
    );
}

#[test]
fn transfer_rejects_an_empty_handed_teammate() {
    let mut state = claimable_game();
    let owners = owner_map(&[("2C", "p1"), ("2D", "p1"), ("2H", "p2"), ("2S", "p2")]);
    mutate::apply_claim(&mut state, "p1", owners, &mut rng());
    state.card_counts.insert("p2".to_string(), 0);

    assert_eq!(
        validate::validate_transfer(&state, "p1", "p2").unwrap_err(),
        Reject::TargetHasNoCards
    );
}

#[test]
fn transfer_hands_the_turn_over_and_is_recorded() {
    let mut state = claimable_game();
    let owners = owner_map(&[("2C", "p1"), ("2D", "p1"), ("2H", "p2"), ("2S", "p2")]);
    mutate::apply_claim(&mut state, "p1", owners, &mut rng());
    mutate::apply_transfer(&mut state, "p1", "p2");

    assert_eq!(state.turn.as_deref(), Some("p2"));
    match state.last_event() {
        Some(MoveEvent::Transfer { actor, target, .. }) => {
            assert_eq!(actor, "p1");
            assert_eq!(target, "p2");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

fn team_of_one(id: &str, name: &str, member: &str) -> crate::domain::state::Team {
    crate::domain::state::Team {
        id: id.to_string(),
        name: name.to_string(),
        players: vec![member.to_string()],
        score: 0,
        books_won: Vec::new(),
    }
}
