//! Weighted move suggestions for automated players.
//!
//! Everything here is a stateless function over a [`PlayerView`]; the
//! suggester never touches game state and never bypasses validation —
//! the coordinator executes chosen suggestions through the same public
//! operations a human would call.
//!
//! Weights are on a 0..=W scale per card: a card whose location is
//! certain (in our hand, or a singleton possible-owner set) is worth
//! the full `W`; an uncertain card is worth `W / |possible owners|`.

use std::collections::HashMap;

use crate::domain::books::{cards_of_book, missing_cards_of, Book};
use crate::domain::cards::Card;
use crate::domain::player_view::PlayerView;
use crate::domain::state::PlayerId;

/// Full weight of a certainly-located card.
pub const W: f64 = 100.0;

/// A book the caller's hand participates in, scored by how much of it
/// is pinned down.
#[derive(Debug, Clone)]
pub struct BookCandidate {
    pub book: Book,
    pub weight: f64,
    /// Every possible owner of every card we don't hold is on our team.
    pub with_team: bool,
    /// Every card's owner is already known.
    pub claimable: bool,
}

#[derive(Debug, Clone)]
pub struct AskSuggestion {
    pub card: Card,
    pub target: PlayerId,
    pub book: Book,
    pub weight: f64,
}

#[derive(Debug, Clone)]
pub struct ClaimSuggestion {
    pub book: Book,
    pub owners: HashMap<Card, PlayerId>,
    pub weight: f64,
}

#[derive(Debug, Clone)]
pub struct TransferSuggestion {
    pub target: PlayerId,
    pub weight: f64,
}

fn sort_desc<T>(items: &mut [T], weight: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| weight(b).total_cmp(&weight(a)));
}

/// Score every open book the caller's hand participates in; zero-weight
/// books are dropped, heaviest first.
pub fn suggest_books(view: &PlayerView) -> Vec<BookCandidate> {
    let mut candidates = Vec::new();
    for book in view.open_books() {
        let cards = cards_of_book(book);
        if !cards.iter().any(|&c| view.in_hand(c)) {
            continue;
        }
        let mut total = 0.0;
        let mut with_team = true;
        let mut claimable = true;
        for &card in &cards {
            if view.in_hand(card) {
                total += W;
                continue;
            }
            let owners = view
                .possible_owners
                .get(&card)
                .map(Vec::as_slice)
                .unwrap_or_default();
            if owners.len() == 1 {
                total += W;
            } else if !owners.is_empty() {
                total += W / owners.len() as f64;
                claimable = false;
            } else {
                claimable = false;
            }
            if !owners.iter().all(|id| view.is_self_or_teammate(id)) {
                with_team = false;
            }
        }
        let weight = total / cards.len() as f64;
        if weight > 0.0 {
            candidates.push(BookCandidate {
                book,
                weight,
                with_team,
                claimable,
            });
        }
    }
    sort_desc(&mut candidates, |c| c.weight);
    candidates
}

/// One ask per (missing card, possible opposing owner with cards),
/// weighted by how narrowed-down the card already is.
pub fn suggest_asks(books: &[BookCandidate], view: &PlayerView) -> Vec<AskSuggestion> {
    let mut asks = Vec::new();
    for candidate in books {
        for card in missing_cards_of(candidate.book, &view.hand) {
            let Some(owners) = view.possible_owners.get(&card) else {
                continue;
            };
            for owner in owners {
                if view.is_self_or_teammate(owner) || view.card_count(owner) == 0 {
                    continue;
                }
                asks.push(AskSuggestion {
                    card,
                    target: owner.clone(),
                    book: candidate.book,
                    weight: W / owners.len() as f64,
                });
            }
        }
    }
    sort_desc(&mut asks, |a| a.weight);
    asks
}

/// Sure claims: every card's owner known and the whole book is with the
/// caller's team.
pub fn suggest_claims(books: &[BookCandidate], view: &PlayerView) -> Vec<ClaimSuggestion> {
    let mut claims = Vec::new();
    for candidate in books {
        if !(candidate.claimable && candidate.with_team) {
            continue;
        }
        let mut owners = HashMap::new();
        for card in cards_of_book(candidate.book) {
            if view.in_hand(card) {
                owners.insert(card, view.player_id.clone());
            } else if let Some(owner) = view.known_owner(card) {
                owners.insert(card, owner.clone());
            }
        }
        if owners.len() == cards_of_book(candidate.book).len() {
            claims.push(ClaimSuggestion {
                book: candidate.book,
                owners,
                weight: W,
            });
        }
    }
    sort_desc(&mut claims, |c| c.weight);
    claims
}

/// Last-resort claims for with-team books that are not fully resolved:
/// one candidate per combination of the unresolved cards' possible
/// owners. Intentionally exponential but bounded — a book has at most
/// six cards and owner sets only ever shrink.
pub fn suggest_risky_claims(books: &[BookCandidate], view: &PlayerView) -> Vec<ClaimSuggestion> {
    let mut claims = Vec::new();
    for candidate in books {
        if !candidate.with_team || candidate.claimable {
            continue;
        }
        let cards = cards_of_book(candidate.book);
        let mut resolved: HashMap<Card, PlayerId> = HashMap::new();
        let mut unresolved: Vec<(Card, Vec<PlayerId>)> = Vec::new();
        let mut total = 0.0;
        for &card in &cards {
            if view.in_hand(card) {
                resolved.insert(card, view.player_id.clone());
                total += W;
            } else if let Some(owner) = view.known_owner(card) {
                resolved.insert(card, owner.clone());
                total += W;
            } else {
                let owners = view.possible_owners.get(&card).cloned().unwrap_or_default();
                if owners.is_empty() {
                    break;
                }
                total += W / owners.len() as f64;
                unresolved.push((card, owners));
            }
        }
        if resolved.len() + unresolved.len() != cards.len() {
            continue;
        }
        let weight = total / cards.len() as f64;
        for combo in cartesian(&unresolved) {
            let mut owners = resolved.clone();
            owners.extend(combo);
            claims.push(ClaimSuggestion {
                book: candidate.book,
                owners,
                weight,
            });
        }
    }
    sort_desc(&mut claims, |c| c.weight);
    claims
}

/// Every combination of owner assignments for the unresolved cards.
fn cartesian(unresolved: &[(Card, Vec<PlayerId>)]) -> Vec<Vec<(Card, PlayerId)>> {
    let mut combos: Vec<Vec<(Card, PlayerId)>> = vec![Vec::new()];
    for (card, owners) in unresolved {
        let mut next = Vec::with_capacity(combos.len() * owners.len());
        for combo in &combos {
            for owner in owners {
                let mut extended = combo.clone();
                extended.push((*card, owner.clone()));
                next.push(extended);
            }
        }
        combos = next;
    }
    combos
}

/// Teammates worth handing the turn to, weighted by how many cards of
/// still-open books they are the sole known owner of.
pub fn suggest_transfers(view: &PlayerView) -> Vec<TransferSuggestion> {
    let mut transfers = Vec::new();
    for teammate in &view.teammates {
        if view.card_count(teammate) == 0 {
            continue;
        }
        let known_cards = view
            .open_books()
            .iter()
            .flat_map(|&book| cards_of_book(book))
            .filter(|&card| view.known_owner(card) == Some(teammate))
            .count();
        transfers.push(TransferSuggestion {
            target: teammate.clone(),
            weight: known_cards as f64,
        });
    }
    sort_desc(&mut transfers, |t| t.weight);
    transfers
}
