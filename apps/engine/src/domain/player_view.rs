//! Player view of game state - what information is visible to a player.
//!
//! The projection replaces the global ownership map and the full hand
//! collection with just the viewer's own hand. Everything else in the
//! aggregate is table-public: counts, possible-owner sets, teams,
//! history, metrics. This is the sole interface the bot suggester and
//! the broadcast layer consume.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::books::{cards_of_book, Book};
use crate::domain::cards::Card;
use crate::domain::state::{
    GameConfig, GameState, GameStatus, Metrics, MoveEvent, Player, PlayerId, Team,
};

/// Public slice of a player entity; never carries hand contents.
#[derive(Debug, Clone, Serialize)]
pub struct PublicPlayer {
    pub id: PlayerId,
    pub name: String,
    pub avatar: String,
    pub is_bot: bool,
    pub team_id: Option<String>,
}

impl From<&Player> for PublicPlayer {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            avatar: p.avatar.clone(),
            is_bot: p.is_bot,
            team_id: p.team_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub player_id: PlayerId,
    pub game_id: String,
    pub join_code: String,
    pub status: GameStatus,
    pub config: Option<GameConfig>,
    pub creator: Option<PlayerId>,
    pub players: Vec<PublicPlayer>,
    pub teams: Vec<Team>,
    pub turn: Option<PlayerId>,
    /// The viewer's own hand; no other hand ever appears in a view.
    pub hand: Vec<Card>,
    pub card_counts: HashMap<PlayerId, u8>,
    pub possible_owners: HashMap<Card, Vec<PlayerId>>,
    pub history: Vec<MoveEvent>,
    pub metrics: HashMap<PlayerId, Metrics>,
    pub teammates: Vec<PlayerId>,
    pub opponents: Vec<PlayerId>,
}

impl PlayerView {
    pub fn for_player(state: &GameState, player_id: &str) -> Self {
        let me = state.player(player_id);
        Self {
            player_id: player_id.to_string(),
            game_id: state.game_id.clone(),
            join_code: state.join_code.clone(),
            status: state.status,
            config: state.config.clone(),
            creator: state.creator.clone(),
            players: state.players.iter().map(PublicPlayer::from).collect(),
            teams: state.teams.clone(),
            turn: state.turn.clone(),
            hand: state.hands.get(player_id).cloned().unwrap_or_default(),
            card_counts: state.card_counts.clone(),
            possible_owners: state.possible_owners.clone(),
            history: state.history.clone(),
            metrics: state.metrics.clone(),
            teammates: me.map(|p| p.teammates.clone()).unwrap_or_default(),
            opponents: me.map(|p| p.opponents.clone()).unwrap_or_default(),
        }
    }

    pub fn in_hand(&self, card: Card) -> bool {
        self.hand.contains(&card)
    }

    /// Known owner of a card: singleton possible-owner set.
    pub fn known_owner(&self, card: Card) -> Option<&PlayerId> {
        match self.possible_owners.get(&card).map(Vec::as_slice) {
            Some([only]) => Some(only),
            _ => None,
        }
    }

    pub fn is_self_or_teammate(&self, id: &str) -> bool {
        id == self.player_id || self.teammates.iter().any(|t| t == id)
    }

    pub fn card_count(&self, id: &str) -> u8 {
        self.card_counts.get(id).copied().unwrap_or(0)
    }

    pub fn last_event(&self) -> Option<&MoveEvent> {
        self.history.first()
    }

    /// Books whose cards are all still in the inference universe.
    pub fn open_books(&self) -> Vec<Book> {
        let Some(config) = &self.config else {
            return Vec::new();
        };
        config
            .books
            .iter()
            .copied()
            .filter(|&book| {
                cards_of_book(book)
                    .iter()
                    .all(|c| self.possible_owners.contains_key(c))
            })
            .collect()
    }
}
