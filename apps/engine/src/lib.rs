#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod broadcast;
pub mod domain;
pub mod errors;
pub mod services;
pub mod store;
pub mod utils;


// Re-exports for public API
pub use broadcast::{Broadcaster, NullBroadcaster, SessionHub, ViewUpdate};
pub use domain::cards::{Card, Rank, Suit, Variant};
pub use domain::player_view::PlayerView;
pub use domain::state::{GameState, GameStatus, PlayerIdentity, TeamSpec};
pub use errors::{EngineError, Reject};
pub use services::game_flow::{GameHandle, GameOptions};
pub use services::registry::GameRegistry;
pub use store::{GameStore, MemoryStore};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
