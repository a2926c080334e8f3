//! In-game operations: asking for a card, claiming a book, and passing
//! the turn after a successful claim.

use std::collections::HashMap;

use tracing::info;

use super::GameHandle;
use crate::domain::cards::Card;
use crate::domain::mutate::{self, AskOutcome, ClaimOutcome};
use crate::domain::state::{PlayerId, PlayerIdentity};
use crate::domain::validate;
use crate::errors::EngineError;

impl GameHandle {
    /// Ask `target` for `card`. On success the card moves and the asker
    /// keeps the turn; on failure the turn passes to the target.
    pub async fn ask_card(
        &self,
        caller: &PlayerIdentity,
        target: &str,
        card: Card,
    ) -> Result<AskOutcome, EngineError> {
        let mut g = self.inner.lock().await;
        validate::validate_ask(&g.state, &caller.id, target, card)?;
        let outcome = mutate::apply_ask(&mut g.state, &caller.id, target, card);
        info!(
            game_id = %self.game_id,
            asker = %caller.id,
            target,
            %card,
            success = outcome.success,
            "ask resolved"
        );
        g.persist_and_broadcast().await?;
        drop(g);
        self.arm_bot_timer();
        Ok(outcome)
    }

    /// Claim a full book by naming the owner of every card. The book is
    /// removed from play whether the claim is right or wrong.
    pub async fn claim_book(
        &self,
        caller: &PlayerIdentity,
        owners: HashMap<Card, PlayerId>,
    ) -> Result<ClaimOutcome, EngineError> {
        let mut g = self.inner.lock().await;
        validate::validate_claim(&g.state, &caller.id, &owners)?;
        let inner = &mut *g;
        let outcome = mutate::apply_claim(&mut inner.state, &caller.id, owners, &mut inner.rng);
        info!(
            game_id = %self.game_id,
            claimant = %caller.id,
            book = %outcome.book,
            success = outcome.success,
            completed = outcome.game_completed,
            "claim resolved"
        );
        g.persist_and_broadcast().await?;
        drop(g);
        if outcome.game_completed {
            self.cancel_bot_timer();
        } else {
            self.arm_bot_timer();
        }
        Ok(outcome)
    }

    /// Hand the turn to a teammate. Only legal immediately after the
    /// caller's own successful claim.
    pub async fn transfer_turn(
        &self,
        caller: &PlayerIdentity,
        target: &str,
    ) -> Result<(), EngineError> {
        let mut g = self.inner.lock().await;
        validate::validate_transfer(&g.state, &caller.id, target)?;
        mutate::apply_transfer(&mut g.state, &caller.id, target);
        info!(game_id = %self.game_id, from = %caller.id, to = target, "turn transferred");
        g.persist_and_broadcast().await?;
        drop(g);
        self.arm_bot_timer();
        Ok(())
    }
}
