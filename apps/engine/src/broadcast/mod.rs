//! Per-player view fan-out.
//!
//! After every mutation the engine pushes each member's filtered
//! [`PlayerView`] through a [`Broadcaster`]. The real-time transport is
//! external; [`SessionHub`] is the in-process implementation that
//! registered sessions subscribe to, and [`NullBroadcaster`] is for
//! tests and headless drivers.

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

use crate::domain::player_view::PlayerView;

pub trait Broadcaster: Send + Sync {
    fn send(&self, game_id: &str, player_id: &str, view: &PlayerView);
}

#[derive(Debug, Default)]
pub struct NullBroadcaster;

impl Broadcaster for NullBroadcaster {
    fn send(&self, _game_id: &str, _player_id: &str, _view: &PlayerView) {}
}

/// One pushed update: the serialized view a single player should see.
#[derive(Debug, Clone, Serialize)]
pub struct ViewUpdate {
    pub game_id: String,
    pub player_id: String,
    pub view: serde_json::Value,
}

type SessionKey = (String, String); // (game_id, player_id)

/// In-process session registry: sessions subscribe per (game, player)
/// and receive every subsequent view for that player.
#[derive(Debug, Default)]
pub struct SessionHub {
    sessions: DashMap<SessionKey, DashMap<Uuid, mpsc::UnboundedSender<ViewUpdate>>>,
}

impl SessionHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &self,
        game_id: &str,
        player_id: &str,
    ) -> (Uuid, mpsc::UnboundedReceiver<ViewUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let token = Uuid::new_v4();
        self.sessions
            .entry((game_id.to_string(), player_id.to_string()))
            .or_default()
            .insert(token, tx);
        (token, rx)
    }

    pub fn unsubscribe(&self, game_id: &str, player_id: &str, token: Uuid) {
        let key = (game_id.to_string(), player_id.to_string());
        if let Some(entry) = self.sessions.get(&key) {
            entry.remove(&token);
        }
        // Emptiness check and removal must be one atomic step, or a
        // concurrent subscribe between them would be thrown away.
        self.sessions.remove_if(&key, |_, senders| senders.is_empty());
    }
}

impl Broadcaster for SessionHub {
    fn send(&self, game_id: &str, player_id: &str, view: &PlayerView) {
        let key = (game_id.to_string(), player_id.to_string());
        let Some(entry) = self.sessions.get(&key) else {
            return;
        };
        let payload = match serde_json::to_value(view) {
            Ok(v) => v,
            Err(e) => {
                debug!(game_id, player_id, error = %e, "failed to serialize view");
                return;
            }
        };
        let update = ViewUpdate {
            game_id: game_id.to_string(),
            player_id: player_id.to_string(),
            view: payload,
        };
        entry.retain(|_, tx| tx.send(update.clone()).is_ok());
    }
}
