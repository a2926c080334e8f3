//! Bridges the scheduler to the bot policy.
//!
//! A wake-up re-checks everything under the lock before acting: the game
//! may have completed, the turn may have moved to a human, or the state
//! may have changed since the timer was armed. Chosen actions run
//! through the same public operations a human would call, so every bot
//! move is validated like any other.

use tracing::{debug, warn};

use super::GameHandle;
use crate::ai::{self, BotAction};
use crate::domain::player_view::PlayerView;
use crate::domain::state::GameStatus;

pub(crate) async fn run_bot_turn(handle: GameHandle) {
    let (identity, action) = {
        let g = handle.inner.lock().await;
        if g.state.status != GameStatus::InProgress {
            return;
        }
        let Some(current) = g.state.current_player() else {
            return;
        };
        if !current.is_bot {
            return;
        }
        let identity = current.identity();
        let view = PlayerView::for_player(&g.state, &identity.id);
        match ai::choose_action(&view) {
            Some(action) => (identity, action),
            None => {
                // No legal move the policy is willing to make; the game
                // waits for a human or the next state change.
                debug!(game_id = %handle.game_id, bot = %identity.id, "bot has no move");
                return;
            }
        }
    };

    let result = match action {
        BotAction::Ask { target, card } => handle
            .ask_card(&identity, &target, card)
            .await
            .map(|_| ()),
        BotAction::Claim { owners } => handle.claim_book(&identity, owners).await.map(|_| ()),
        BotAction::Transfer { target } => handle.transfer_turn(&identity, &target).await,
    };
    if let Err(err) = result {
        // The state moved between choosing and executing, or the policy
        // produced an illegal move; either way the game stays untouched.
        warn!(game_id = %handle.game_id, bot = %identity.id, %err, "bot move rejected");
    }
}

/// Drive bot turns to quiescence without waiting on the wall clock.
#[cfg(test)]
pub(crate) async fn run_until_human_or_done(handle: &GameHandle, max_moves: usize) -> usize {
    let mut moves = 0;
    while moves < max_moves {
        let acting_bot = {
            let g = handle.inner.lock().await;
            g.state.status == GameStatus::InProgress
                && g.state.current_player().is_some_and(|p| p.is_bot)
        };
        if !acting_bot {
            break;
        }
        let before = { handle.inner.lock().await.state.history.len() };
        run_bot_turn(handle.clone()).await;
        let after = { handle.inner.lock().await.state.history.len() };
        if after == before {
            break;
        }
        moves += 1;
    }
    handle.cancel_bot_timer();
    moves
}
