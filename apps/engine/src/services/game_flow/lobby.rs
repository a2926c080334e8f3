//! Lobby operations: initialize, joining, bot fill, team formation,
//! and game start.

use tracing::{debug, info};

use super::GameHandle;
use crate::domain::cards::Variant;
use crate::domain::player_view::PlayerView;
use crate::domain::state::{GameConfig, PlayerIdentity, TeamSpec};
use crate::domain::{mutate, validate};
use crate::domain::validate::JoinCheck;
use crate::errors::EngineError;
use crate::utils::bot_identity::generate_bots;

impl GameHandle {
    /// Set configuration and seat the creator as the first player.
    pub async fn initialize(
        &self,
        caller: &PlayerIdentity,
        variant: Variant,
        player_count: u8,
        team_count: u8,
    ) -> Result<(), EngineError> {
        let mut g = self.inner.lock().await;
        validate::validate_initialize(&g.state)?;
        let config = GameConfig::new(variant, player_count, team_count)?;
        info!(
            game_id = %self.game_id,
            ?variant,
            player_count,
            team_count,
            "initializing game"
        );
        mutate::apply_initialize(&mut g.state, config, caller);
        g.persist_and_broadcast().await?;
        Ok(())
    }

    /// Seat a player. Re-joining when already seated is an explicit
    /// no-op, not an error.
    pub async fn add_player(&self, caller: &PlayerIdentity) -> Result<(), EngineError> {
        let mut g = self.inner.lock().await;
        match validate::validate_add_player(&g.state, &caller.id)? {
            JoinCheck::AlreadySeated => {
                debug!(game_id = %self.game_id, player = %caller.id, "re-join ignored");
                return Ok(());
            }
            JoinCheck::Seat => {}
        }
        mutate::apply_add_player(&mut g.state, caller, false);
        g.persist_and_broadcast().await?;
        Ok(())
    }

    /// Fill every remaining seat with a generated bot identity.
    pub async fn add_bots(&self, caller: &PlayerIdentity) -> Result<(), EngineError> {
        let mut g = self.inner.lock().await;
        validate::validate_add_bots(&g.state, &caller.id)?;
        let config = g.state.require_config()?;
        let missing = config.player_count as usize - g.state.players.len();
        let bots = generate_bots(missing, g.state.players.len());
        info!(game_id = %self.game_id, count = missing, "filling seats with bots");
        mutate::apply_add_bots(&mut g.state, bots);
        g.persist_and_broadcast().await?;
        Ok(())
    }

    pub async fn create_teams(
        &self,
        caller: &PlayerIdentity,
        specs: Vec<TeamSpec>,
    ) -> Result<(), EngineError> {
        let mut g = self.inner.lock().await;
        validate::validate_create_teams(&g.state, &specs, &caller.id)?;
        mutate::apply_create_teams(&mut g.state, specs);
        g.persist_and_broadcast().await?;
        Ok(())
    }

    /// Shuffle, deal, and open play. The first turn may land on a bot,
    /// so this arms the scheduler like any turn-affecting move.
    pub async fn start_game(&self, caller: &PlayerIdentity) -> Result<(), EngineError> {
        let mut g = self.inner.lock().await;
        validate::validate_start_game(&g.state, &caller.id)?;
        let inner = &mut *g;
        mutate::apply_start_game(&mut inner.state, &mut inner.rng);
        info!(game_id = %self.game_id, turn = ?g.state.turn, "game started");
        g.persist_and_broadcast().await?;
        drop(g);
        self.arm_bot_timer();
        Ok(())
    }

    /// Read-only: the caller's filtered view of the game.
    pub async fn player_data(&self, caller: &PlayerIdentity) -> Result<PlayerView, EngineError> {
        let g = self.inner.lock().await;
        validate::validate_player_data(&g.state, &caller.id)?;
        Ok(PlayerView::for_player(&g.state, &caller.id))
    }
}
