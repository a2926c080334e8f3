//! Game flow orchestration - the per-game actor.
//!
//! Each game is owned by exactly one [`GameInstance`]; a cloneable
//! [`GameHandle`] serializes every operation through one async mutex,
//! so no two mutations for the same game ever overlap. An operation
//! either fails validation and leaves state untouched, or applies in
//! full and then persists, broadcasts each member's view, and (for
//! turn-affecting moves) re-arms the bot scheduler.

mod ai_coordinator;
mod lobby;
mod player_actions;


use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::broadcast::Broadcaster;
use crate::domain::player_view::PlayerView;
use crate::domain::state::GameState;
use crate::errors::EngineError;
use crate::services::scheduler::BotScheduler;
use crate::store::{self, code_key, GameStore};
use crate::utils::join_code::generate_join_code;

/// Instance knobs. Tests shrink the bot delay and pin the RNG seed.
#[derive(Debug, Clone)]
pub struct GameOptions {
    pub bot_delay: Duration,
    pub rng_seed: Option<u64>,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            bot_delay: Duration::from_millis(1500),
            rng_seed: None,
        }
    }
}

pub(crate) struct GameInstance {
    pub(crate) state: GameState,
    store: Arc<dyn GameStore>,
    broadcaster: Arc<dyn Broadcaster>,
    rng: StdRng,
}

impl GameInstance {
    /// Persist the whole blob, then push every member's filtered view.
    async fn persist_and_broadcast(&self) -> Result<(), EngineError> {
        store::save_state(self.store.as_ref(), &self.state).await?;
        for player in &self.state.players {
            let view = PlayerView::for_player(&self.state, &player.id);
            self.broadcaster
                .send(&self.state.game_id, &player.id, &view);
        }
        Ok(())
    }
}

/// Addressable, cloneable reference to one game's actor.
#[derive(Clone)]
pub struct GameHandle {
    game_id: String,
    inner: Arc<Mutex<GameInstance>>,
    scheduler: Arc<BotScheduler>,
    bot_delay: Duration,
}

impl GameHandle {
    /// Create a brand-new game: fresh state, join code, and the two
    /// persisted entries (`code:<code>` reverse lookup and the state
    /// blob).
    pub async fn create(
        store: Arc<dyn GameStore>,
        broadcaster: Arc<dyn Broadcaster>,
        options: &GameOptions,
    ) -> Result<Self, EngineError> {
        let game_id = Uuid::new_v4().to_string();
        let code = generate_join_code();
        let state = GameState::new(&game_id, &code);
        store
            .put(&code_key(&code), game_id.clone().into_bytes())
            .await?;
        store::save_state(store.as_ref(), &state).await?;
        Ok(Self::from_state(state, store, broadcaster, options))
    }

    /// Activate an existing game, loading its persisted blob before any
    /// operation can run. Missing state is a hard failure, not a
    /// rejection.
    pub async fn activate(
        game_id: &str,
        store: Arc<dyn GameStore>,
        broadcaster: Arc<dyn Broadcaster>,
        options: &GameOptions,
    ) -> Result<Self, EngineError> {
        let state = store::load_state(store.as_ref(), game_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("game {game_id}")))?;
        Ok(Self::from_state(state, store, broadcaster, options))
    }

    fn from_state(
        state: GameState,
        store: Arc<dyn GameStore>,
        broadcaster: Arc<dyn Broadcaster>,
        options: &GameOptions,
    ) -> Self {
        let rng = match options.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let game_id = state.game_id.clone();
        Self {
            game_id,
            inner: Arc::new(Mutex::new(GameInstance {
                state,
                store,
                broadcaster,
                rng,
            })),
            scheduler: Arc::new(BotScheduler::new()),
            bot_delay: options.bot_delay,
        }
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub async fn join_code(&self) -> String {
        self.inner.lock().await.state.join_code.clone()
    }

    /// Re-arm the single delayed wake-up that drives bot turns.
    fn arm_bot_timer(&self) {
        let handle = self.clone();
        self.scheduler.arm(self.bot_delay, async move {
            ai_coordinator::run_bot_turn(handle).await;
        });
    }

    fn cancel_bot_timer(&self) {
        self.scheduler.cancel();
    }
}
