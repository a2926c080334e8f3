//! State mutators.
//!
//! Each function assumes its validator has already passed and applies
//! the operation in full: ownership, inference sets, turn, scores,
//! histories, metrics. Mutation never begins on unvalidated input, so
//! there is no rollback path.

use std::collections::HashMap;

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use time::OffsetDateTime;

use crate::domain::books::{book_of, build_deck, cards_of_book, Book};
use crate::domain::cards::Card;
use crate::domain::state::{
    GameConfig, GameState, GameStatus, Metrics, MoveEvent, Player, PlayerId, PlayerIdentity, Team,
    TeamSpec,
};

/// Result of an ask, as reported back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct AskOutcome {
    pub success: bool,
}

/// Result of a claim, as reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ClaimOutcome {
    pub success: bool,
    pub book: Book,
    pub winning_team: String,
    pub game_completed: bool,
}

pub fn apply_initialize(state: &mut GameState, config: GameConfig, creator: &PlayerIdentity) {
    state.config = Some(config);
    state.creator = Some(creator.id.clone());
    seat_player(state, creator, false);
}

/// Seats a player and flips the game to PLAYERS_READY once the roster
/// is full. Caller has already checked the roster has room.
pub fn apply_add_player(state: &mut GameState, who: &PlayerIdentity, is_bot: bool) {
    seat_player(state, who, is_bot);
    let full = state
        .config
        .as_ref()
        .is_some_and(|c| state.players.len() == c.player_count as usize);
    if full {
        state.status = GameStatus::PlayersReady;
    }
}

pub fn apply_add_bots(state: &mut GameState, bots: Vec<PlayerIdentity>) {
    for bot in &bots {
        apply_add_player(state, bot, true);
    }
}

pub fn apply_create_teams(state: &mut GameState, specs: Vec<TeamSpec>) {
    state.teams = specs
        .iter()
        .enumerate()
        .map(|(i, spec)| Team {
            id: format!("team-{}", i + 1),
            name: spec.name.clone(),
            players: spec.players.clone(),
            score: 0,
            books_won: Vec::new(),
        })
        .collect();

    for team in &state.teams.clone() {
        for member in &team.players {
            let teammates: Vec<PlayerId> = team
                .players
                .iter()
                .filter(|id| *id != member)
                .cloned()
                .collect();
            let opponents: Vec<PlayerId> = state
                .players
                .iter()
                .map(|p| p.id.clone())
                .filter(|id| !team.players.contains(id))
                .collect();
            if let Some(player) = state.players.iter_mut().find(|p| &p.id == member) {
                player.team_id = Some(team.id.clone());
                player.teammates = teammates;
                player.opponents = opponents;
            }
        }
    }
    state.status = GameStatus::TeamsCreated;
}

/// Shuffle and deal, populate ownership and the inference universe, and
/// hand the first turn to a random player.
pub fn apply_start_game<R: Rng>(state: &mut GameState, rng: &mut R) {
    let Some(config) = state.config.clone() else {
        return;
    };
    let mut deck = build_deck(config.deck_size);
    deck.shuffle(rng);

    let per_player = config.deck_size / config.player_count as usize;
    let all_ids: Vec<PlayerId> = state.players.iter().map(|p| p.id.clone()).collect();

    state.owner_of.clear();
    state.possible_owners.clear();
    state.hands.clear();
    state.card_counts.clear();

    for (seat, player_id) in all_ids.iter().enumerate() {
        let hand: Vec<Card> = deck[seat * per_player..(seat + 1) * per_player].to_vec();
        for &card in &hand {
            state.owner_of.insert(card, player_id.clone());
        }
        state.card_counts.insert(player_id.clone(), hand.len() as u8);
        state.hands.insert(player_id.clone(), hand);
    }
    for &card in &deck {
        state.possible_owners.insert(card, all_ids.clone());
    }

    state.turn = all_ids.choose(rng).cloned();
    state.status = GameStatus::InProgress;
}

pub fn apply_ask(state: &mut GameState, asker: &str, target: &str, card: Card) -> AskOutcome {
    let success = state.owner_of.get(&card).is_some_and(|owner| owner == target);
    let asker_name = display_name(state, asker);
    let target_name = display_name(state, target);

    if success {
        move_card(state, card, target, asker);
        state.possible_owners.insert(card, vec![asker.to_string()]);
        bump(state, asker, |m| m.cards_gained += 1);
        bump(state, target, |m| m.cards_given += 1);
    } else {
        if let Some(set) = state.possible_owners.get_mut(&card) {
            set.retain(|id| id != asker && id != target);
        }
        state.turn = Some(target.to_string());
    }
    bump(state, asker, |m| m.asks_made += 1);

    let description = if success {
        format!("{asker_name} asked {target_name} for {card} and took it")
    } else {
        format!("{asker_name} asked {target_name} for {card}, but they didn't have it")
    };
    state.history.insert(
        0,
        MoveEvent::Ask {
            actor: asker.to_string(),
            target: target.to_string(),
            card,
            success,
            description,
            at: OffsetDateTime::now_utc(),
        },
    );
    AskOutcome { success }
}

pub fn apply_claim<R: Rng>(
    state: &mut GameState,
    claimant: &str,
    owners: HashMap<Card, PlayerId>,
    rng: &mut R,
) -> ClaimOutcome {
    let variant = state
        .config
        .as_ref()
        .map(|c| c.variant)
        .unwrap_or(crate::domain::cards::Variant::Normal);
    let book = owners
        .keys()
        .next()
        .map(|&c| book_of(c, variant))
        .unwrap_or(Book::Rank(crate::domain::cards::Rank::Two));
    let book_cards = cards_of_book(book);

    // Actual ownership before the purge decides correctness.
    let success = book_cards
        .iter()
        .all(|c| state.owner_of.get(c) == owners.get(c));
    let claimant_team_id = state
        .player(claimant)
        .and_then(|p| p.team_id.clone())
        .unwrap_or_default();

    // The book leaves the inference universe entirely, right or wrong.
    let mut purged_owner_counts: HashMap<String, usize> = HashMap::new();
    for &card in &book_cards {
        if let Some(owner) = state.owner_of.remove(&card) {
            if let Some(team) = state.team_of(&owner).map(|t| t.id.clone()) {
                *purged_owner_counts.entry(team).or_insert(0) += 1;
            }
            if let Some(hand) = state.hands.get_mut(&owner) {
                hand.retain(|c| *c != card);
            }
            if let Some(count) = state.card_counts.get_mut(&owner) {
                *count = count.saturating_sub(1);
            }
        }
        state.possible_owners.remove(&card);
    }

    // Success awards the claimant's team; failure awards the opposing
    // team that actually held the most cards of the book.
    let winning_team_id = if success {
        claimant_team_id.clone()
    } else {
        opposing_award_team(state, &claimant_team_id, &purged_owner_counts)
    };
    if let Some(team) = state.teams.iter_mut().find(|t| t.id == winning_team_id) {
        team.score += 1;
        team.books_won.push(book);
    }

    bump(state, claimant, |m| m.claims_made += 1);
    if success {
        bump(state, claimant, |m| m.claims_succeeded += 1);
    } else {
        state.turn = next_turn_after_failed_claim(state, claimant, rng);
    }

    let claimant_name = display_name(state, claimant);
    let team_name = state
        .team(&winning_team_id)
        .map(|t| t.name.clone())
        .unwrap_or_default();
    let description = if success {
        format!("{claimant_name} claimed {book} correctly for {team_name}")
    } else {
        format!("{claimant_name} claimed {book} incorrectly; {team_name} takes it")
    };
    state.history.insert(
        0,
        MoveEvent::Claim {
            actor: claimant.to_string(),
            book,
            owners,
            success,
            description,
            at: OffsetDateTime::now_utc(),
        },
    );

    let total_books = state.config.as_ref().map(|c| c.books.len()).unwrap_or(0);
    let game_completed = state.total_books_won() >= total_books;
    if game_completed {
        state.status = GameStatus::Completed;
        state.turn = None;
    }

    ClaimOutcome {
        success,
        book,
        winning_team: winning_team_id,
        game_completed,
    }
}

pub fn apply_transfer(state: &mut GameState, actor: &str, target: &str) {
    state.turn = Some(target.to_string());
    let actor_name = display_name(state, actor);
    let target_name = display_name(state, target);
    state.history.insert(
        0,
        MoveEvent::Transfer {
            actor: actor.to_string(),
            target: target.to_string(),
            description: format!("{actor_name} passed the turn to {target_name}"),
            at: OffsetDateTime::now_utc(),
        },
    );
}

fn seat_player(state: &mut GameState, who: &PlayerIdentity, is_bot: bool) {
    state.players.push(Player::from_identity(who, is_bot));
    state.metrics.insert(who.id.clone(), Metrics::default());
}

fn display_name(state: &GameState, id: &str) -> String {
    state
        .player(id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| id.to_string())
}

fn bump(state: &mut GameState, id: &str, f: impl FnOnce(&mut Metrics)) {
    f(state.metrics.entry(id.to_string()).or_default());
}

fn move_card(state: &mut GameState, card: Card, from: &str, to: &str) {
    state.owner_of.insert(card, to.to_string());
    if let Some(hand) = state.hands.get_mut(from) {
        hand.retain(|c| *c != card);
    }
    state.hands.entry(to.to_string()).or_default().push(card);
    if let Some(count) = state.card_counts.get_mut(from) {
        *count = count.saturating_sub(1);
    }
    *state.card_counts.entry(to.to_string()).or_insert(0) += 1;
}

/// Which opposing team is awarded a botched claim: the one that held
/// the most cards of the book, ties broken by team order.
fn opposing_award_team(
    state: &GameState,
    claimant_team_id: &str,
    purged_owner_counts: &HashMap<String, usize>,
) -> String {
    let mut best: Option<(&str, usize)> = None;
    for team in state.teams.iter().filter(|t| t.id != claimant_team_id) {
        let held = purged_owner_counts.get(&team.id).copied().unwrap_or(0);
        if best.is_none_or(|(_, n)| held > n) {
            best = Some((&team.id, held));
        }
    }
    best.map(|(id, _)| id.to_string())
        .unwrap_or_else(|| claimant_team_id.to_string())
}

/// Uniform-random opponent still holding cards; falls back to any
/// player with cards, then to the claimant, so the game never hands the
/// turn to someone who cannot act at all.
fn next_turn_after_failed_claim<R: Rng>(
    state: &GameState,
    claimant: &str,
    rng: &mut R,
) -> Option<PlayerId> {
    let opponents = state
        .player(claimant)
        .map(|p| p.opponents.clone())
        .unwrap_or_default();
    let with_cards: Vec<PlayerId> = opponents
        .into_iter()
        .filter(|id| state.card_count(id) > 0)
        .collect();
    if let Some(chosen) = with_cards.choose(rng) {
        return Some(chosen.clone());
    }
    let any_with_cards: Vec<PlayerId> = state
        .players
        .iter()
        .map(|p| p.id.clone())
        .filter(|id| state.card_count(id) > 0)
        .collect();
    if let Some(chosen) = any_with_cards.choose(rng) {
        return Some(chosen.clone());
    }
    Some(claimant.to_string())
}
