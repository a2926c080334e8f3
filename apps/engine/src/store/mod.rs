//! Persistence adapter: the key-value blob contract.
//!
//! The engine persists the entire `GameState` as one opaque JSON blob
//! under `game:<id>` after every mutation, plus a reverse-lookup entry
//! `code:<join code> -> game id` written once at creation. The real
//! backend is external; `MemoryStore` covers tests and single-process
//! deployments.

use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;

use crate::domain::state::GameState;
use crate::errors::EngineError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage i/o: {0}")]
    Io(String),
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        EngineError::Store(err.to_string())
    }
}

pub fn state_key(game_id: &str) -> String {
    format!("game:{game_id}")
}

pub fn code_key(code: &str) -> String {
    format!("code:{code}")
}

#[async_trait]
pub trait GameStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;
}

/// Serialize and write the full state blob.
pub async fn save_state(store: &dyn GameStore, state: &GameState) -> Result<(), EngineError> {
    let bytes = serde_json::to_vec(state)
        .map_err(|e| EngineError::Corrupt(format!("serialize game state: {e}")))?;
    store.put(&state_key(&state.game_id), bytes).await?;
    Ok(())
}

/// Load and deserialize the full state blob, if present.
pub async fn load_state(
    store: &dyn GameStore,
    game_id: &str,
) -> Result<Option<GameState>, EngineError> {
    match store.get(&state_key(game_id)).await? {
        Some(bytes) => {
            let state = serde_json::from_slice(&bytes)
                .map_err(|e| EngineError::Corrupt(format!("deserialize game state: {e}")))?;
            Ok(Some(state))
        }
        None => Ok(None),
    }
}

/// In-memory store backed by a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.get(key).map(|v| v.clone()))
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}
