//! Bot decision policy.
//!
//! The suggester ranks candidate moves; `choose_action` applies the
//! fixed preference order: transfer right after our own successful
//! claim, then sure claims, then asks, and a risky claim only when
//! nothing safer exists.

pub mod suggest;


use std::collections::HashMap;

use crate::domain::cards::Card;
use crate::domain::player_view::PlayerView;
use crate::domain::state::{MoveEvent, PlayerId};

/// A move chosen for an automated player. Executed through the same
/// public operations a human would call, never directly against state.
#[derive(Debug, Clone)]
pub enum BotAction {
    Ask { target: PlayerId, card: Card },
    Claim { owners: HashMap<Card, PlayerId> },
    Transfer { target: PlayerId },
}

pub fn choose_action(view: &PlayerView) -> Option<BotAction> {
    let after_own_claim = matches!(
        view.last_event(),
        Some(MoveEvent::Claim { actor, success: true, .. }) if actor == &view.player_id
    );
    if after_own_claim {
        if let Some(transfer) = suggest::suggest_transfers(view).into_iter().next() {
            return Some(BotAction::Transfer {
                target: transfer.target,
            });
        }
    }

    let books = suggest::suggest_books(view);
    if let Some(claim) = suggest::suggest_claims(&books, view).into_iter().next() {
        return Some(BotAction::Claim {
            owners: claim.owners,
        });
    }
    if let Some(ask) = suggest::suggest_asks(&books, view).into_iter().next() {
        return Some(BotAction::Ask {
            target: ask.target,
            card: ask.card,
        });
    }
    if let Some(claim) = suggest::suggest_risky_claims(&books, view).into_iter().next() {
        return Some(BotAction::Claim {
            owners: claim.owners,
        });
    }
    None
}
