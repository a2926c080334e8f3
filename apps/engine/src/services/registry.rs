//! Process-wide directory of live game actors.
//!
//! Lookups by id activate the persisted state on a cache miss, so a
//! restarted process picks games back up transparently. Join codes are
//! resolved through the persisted `code:<code>` reverse-lookup entry.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::info;

use crate::broadcast::Broadcaster;
use crate::errors::EngineError;
use crate::services::game_flow::{GameHandle, GameOptions};
use crate::store::{code_key, GameStore};

pub struct GameRegistry {
    store: Arc<dyn GameStore>,
    broadcaster: Arc<dyn Broadcaster>,
    options: GameOptions,
    games: DashMap<String, GameHandle>,
}

impl GameRegistry {
    pub fn new(
        store: Arc<dyn GameStore>,
        broadcaster: Arc<dyn Broadcaster>,
        options: GameOptions,
    ) -> Self {
        Self {
            store,
            broadcaster,
            options,
            games: DashMap::new(),
        }
    }

    /// Create a new game and register its handle.
    pub async fn create_game(&self) -> Result<GameHandle, EngineError> {
        let handle = GameHandle::create(
            Arc::clone(&self.store),
            Arc::clone(&self.broadcaster),
            &self.options,
        )
        .await?;
        info!(game_id = %handle.game_id(), "game created");
        self.games
            .insert(handle.game_id().to_string(), handle.clone());
        Ok(handle)
    }

    /// Handle for a game id, activating from the store if it is not
    /// already live in this process.
    pub async fn by_id(&self, game_id: &str) -> Result<GameHandle, EngineError> {
        if let Some(handle) = self.games.get(game_id) {
            return Ok(handle.clone());
        }
        let handle = GameHandle::activate(
            game_id,
            Arc::clone(&self.store),
            Arc::clone(&self.broadcaster),
            &self.options,
        )
        .await?;
        // Concurrent activations race to this point; everyone converges
        // on whichever instance lands in the map first, so one game
        // never has two live actors.
        Ok(self
            .games
            .entry(game_id.to_string())
            .or_insert(handle)
            .clone())
    }

    /// Resolve a join code to its game.
    pub async fn by_code(&self, code: &str) -> Result<GameHandle, EngineError> {
        let bytes = self
            .store
            .get(&code_key(code))
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("join code {code}")))?;
        let game_id = String::from_utf8(bytes)
            .map_err(|e| EngineError::Corrupt(format!("join code entry: {e}")))?;
        self.by_id(&game_id).await
    }
}
