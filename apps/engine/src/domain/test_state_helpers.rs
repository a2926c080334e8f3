//! Shared fixtures for domain tests: compact card literals and
//! hand-built game states that skip the shuffled deal.

use std::collections::HashMap;

use crate::domain::cards::{Card, Variant};
use crate::domain::state::{
    GameConfig, GameState, GameStatus, Metrics, Player, PlayerIdentity, Team,
};

pub fn c(s: &str) -> Card {
    s.parse().unwrap()
}

/// Space-separated card literals: `cards("2C 2D 2H")`.
pub fn cards(s: &str) -> Vec<Card> {
    s.split_whitespace().map(c).collect()
}

pub fn identity(id: &str) -> PlayerIdentity {
    PlayerIdentity {
        id: id.to_string(),
        name: format!("Player {id}"),
        username: id.to_string(),
        avatar: String::new(),
    }
}

/// A game mid-deal with explicit hands, two teams split evenly over the
/// seat order, and the turn handed to `turn`. The inference universe
/// starts wide open: every dealt card could be with anyone. Odd player
/// counts get teams of one; callers override the teams when they need a
/// different shape.
pub fn started_state(variant: Variant, hands: &[(&str, &str)], turn: &str) -> GameState {
    let player_count = hands.len() as u8;
    let team_count = if player_count % 2 == 0 { 2 } else { player_count };
    let config = GameConfig::new(variant, player_count, team_count).unwrap();

    let mut state = GameState::new("game-1", "ABC123");
    state.config = Some(config);
    state.creator = Some(hands[0].0.to_string());
    state.status = GameStatus::InProgress;
    state.turn = Some(turn.to_string());

    let all_ids: Vec<String> = hands.iter().map(|(id, _)| id.to_string()).collect();
    let half = all_ids.len() / 2;
    let team_a: Vec<String> = all_ids[..half].to_vec();
    let team_b: Vec<String> = all_ids[half..].to_vec();
    state.teams = vec![
        Team {
            id: "team-1".to_string(),
            name: "Alpha".to_string(),
            players: team_a.clone(),
            score: 0,
            books_won: Vec::new(),
        },
        Team {
            id: "team-2".to_string(),
            name: "Beta".to_string(),
            players: team_b.clone(),
            score: 0,
            books_won: Vec::new(),
        },
    ];

    for (id, hand_str) in hands {
        let hand = cards(hand_str);
        let on_a = team_a.iter().any(|m| m == id);
        let (mates, opps) = if on_a {
            (&team_a, &team_b)
        } else {
            (&team_b, &team_a)
        };
        let mut player = Player::from_identity(&identity(id), false);
        player.team_id = Some(if on_a { "team-1" } else { "team-2" }.to_string());
        player.teammates = mates.iter().filter(|m| *m != id).cloned().collect();
        player.opponents = opps.clone();
        state.players.push(player);
        state.metrics.insert(id.to_string(), Metrics::default());

        for &card in &hand {
            state.owner_of.insert(card, id.to_string());
            state.possible_owners.insert(card, all_ids.clone());
        }
        state.card_counts.insert(id.to_string(), hand.len() as u8);
        state.hands.insert(id.to_string(), hand);
    }
    state
}

/// Collapse a card's possible-owner set to a single known owner.
pub fn pin_owner(state: &mut GameState, card: &str, owner: &str) {
    state
        .possible_owners
        .insert(c(card), vec![owner.to_string()]);
}

/// Owner map for a claim, `[("2C", "p1"), ...]` style.
pub fn owner_map(entries: &[(&str, &str)]) -> HashMap<Card, String> {
    entries
        .iter()
        .map(|(card, owner)| (c(card), owner.to_string()))
        .collect()
}
