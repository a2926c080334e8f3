//! Pure operation validators.
//!
//! Every check runs against the current state and returns either `Ok`
//! or the rejection a caller should see. Validation always completes
//! before any mutation begins; there is no partial-apply path.

use std::collections::HashMap;

use crate::domain::books::{book_of, cards_of_book};
use crate::domain::cards::Card;
use crate::domain::state::{GameState, GameStatus, MoveEvent, PlayerId, TeamSpec};
use crate::errors::Reject;

fn require_status(state: &GameState, expected: GameStatus) -> Result<(), Reject> {
    if state.status != expected {
        return Err(Reject::WrongStatus {
            actual: state.status.as_str().to_string(),
        });
    }
    Ok(())
}

fn require_creator(state: &GameState, caller: &str) -> Result<(), Reject> {
    if state.creator.as_deref() != Some(caller) {
        return Err(Reject::NotCreator);
    }
    Ok(())
}

fn require_turn(state: &GameState, caller: &str) -> Result<(), Reject> {
    if state.turn.as_deref() != Some(caller) {
        return Err(Reject::NotYourTurn);
    }
    Ok(())
}

pub fn validate_initialize(state: &GameState) -> Result<(), Reject> {
    require_status(state, GameStatus::Created)?;
    if !state.players.is_empty() || state.config.is_some() {
        return Err(Reject::AlreadyInitialized);
    }
    Ok(())
}

/// Outcome of the add-player precondition check. Re-joining an already
/// seated player is an explicit no-op, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinCheck {
    AlreadySeated,
    Seat,
}

pub fn validate_add_player(state: &GameState, caller: &str) -> Result<JoinCheck, Reject> {
    if state.is_member(caller) {
        return Ok(JoinCheck::AlreadySeated);
    }
    let config = state.require_config()?;
    if state.players.len() >= config.player_count as usize {
        return Err(Reject::RosterFull);
    }
    Ok(JoinCheck::Seat)
}

pub fn validate_add_bots(state: &GameState, caller: &str) -> Result<(), Reject> {
    require_creator(state, caller)?;
    let config = state.require_config()?;
    if state.players.len() >= config.player_count as usize {
        return Err(Reject::RosterFull);
    }
    Ok(())
}

pub fn validate_create_teams(
    state: &GameState,
    specs: &[TeamSpec],
    caller: &str,
) -> Result<(), Reject> {
    require_creator(state, caller)?;
    require_status(state, GameStatus::PlayersReady)?;
    let config = state.require_config()?;

    if specs.len() != config.team_count as usize {
        return Err(Reject::BadTeamMapping);
    }
    let team_size = config.team_size();
    for spec in specs {
        if spec.players.len() != team_size {
            return Err(Reject::BadTeamSize { expected: team_size });
        }
    }
    // Exactly-once cover of the roster.
    let mut seen: Vec<&PlayerId> = Vec::with_capacity(state.players.len());
    for spec in specs {
        for id in &spec.players {
            if !state.is_member(id) {
                return Err(Reject::UnknownPlayer(id.clone()));
            }
            if seen.contains(&id) {
                return Err(Reject::BadTeamMapping);
            }
            seen.push(id);
        }
    }
    if seen.len() != state.players.len() {
        return Err(Reject::BadTeamMapping);
    }
    Ok(())
}

pub fn validate_start_game(state: &GameState, caller: &str) -> Result<(), Reject> {
    require_creator(state, caller)?;
    require_status(state, GameStatus::TeamsCreated)?;
    Ok(())
}

pub fn validate_ask(
    state: &GameState,
    caller: &str,
    target: &str,
    card: Card,
) -> Result<(), Reject> {
    require_status(state, GameStatus::InProgress)?;
    require_turn(state, caller)?;
    let Some(asker) = state.player(caller) else {
        return Err(Reject::UnknownPlayer(caller.to_string()));
    };
    if !state.is_member(target) {
        return Err(Reject::UnknownPlayer(target.to_string()));
    }
    if !asker.opponents.iter().any(|id| id == target) {
        return Err(Reject::TargetNotOpponent);
    }
    if state
        .hands
        .get(caller)
        .is_some_and(|hand| hand.contains(&card))
    {
        return Err(Reject::CardAlreadyHeld);
    }
    if !state.owner_of.contains_key(&card) {
        return Err(Reject::CardNotInPlay);
    }
    Ok(())
}

pub fn validate_claim(
    state: &GameState,
    caller: &str,
    owners: &HashMap<Card, PlayerId>,
) -> Result<(), Reject> {
    require_status(state, GameStatus::InProgress)?;
    require_turn(state, caller)?;
    let config = state.require_config()?;

    if owners.len() != config.book_size {
        return Err(Reject::WrongClaimSize {
            expected: config.book_size,
        });
    }
    for named in owners.values() {
        if !state.is_member(named) {
            return Err(Reject::UnknownPlayer(named.clone()));
        }
    }
    if !owners.values().any(|id| id == caller) {
        return Err(Reject::ClaimantNotNamed);
    }

    // All cards must belong to one book, and the book must still be in
    // the inference universe.
    let Some(&first) = owners.keys().next() else {
        return Err(Reject::WrongClaimSize {
            expected: config.book_size,
        });
    };
    let book = book_of(first, config.variant);
    if !config.books.contains(&book) {
        return Err(Reject::MixedBookClaim);
    }
    let book_cards = cards_of_book(book);
    if !owners.keys().all(|c| book_cards.contains(c)) {
        return Err(Reject::MixedBookClaim);
    }
    if !owners.keys().all(|c| state.owner_of.contains_key(c)) {
        return Err(Reject::CardNotInPlay);
    }

    // All named owners on one team.
    let mut team_id: Option<&str> = None;
    for named in owners.values() {
        let Some(player) = state.player(named) else {
            return Err(Reject::UnknownPlayer(named.clone()));
        };
        let Some(t) = player.team_id.as_deref() else {
            return Err(Reject::OwnersNotOneTeam);
        };
        match team_id {
            None => team_id = Some(t),
            Some(existing) if existing != t => return Err(Reject::OwnersNotOneTeam),
            Some(_) => {}
        }
    }
    Ok(())
}

pub fn validate_transfer(state: &GameState, caller: &str, target: &str) -> Result<(), Reject> {
    require_status(state, GameStatus::InProgress)?;
    require_turn(state, caller)?;

    let allowed = matches!(
        state.last_event(),
        Some(MoveEvent::Claim { actor, success: true, .. }) if actor == caller
    );
    if !allowed {
        return Err(Reject::TransferNeedsClaim);
    }

    let Some(actor) = state.player(caller) else {
        return Err(Reject::UnknownPlayer(caller.to_string()));
    };
    if !state.is_member(target) {
        return Err(Reject::UnknownPlayer(target.to_string()));
    }
    if !actor.teammates.iter().any(|id| id == target) {
        return Err(Reject::TargetNotTeammate);
    }
    if state.card_count(target) == 0 {
        return Err(Reject::TargetHasNoCards);
    }
    Ok(())
}

pub fn validate_player_data(state: &GameState, caller: &str) -> Result<(), Reject> {
    if !state.is_member(caller) {
        return Err(Reject::UnknownPlayer(caller.to_string()));
    }
    Ok(())
}
