//! The per-game mutable aggregate and its entity types.
//!
//! `GameState` is the single source of truth for one game instance. It
//! is owned exclusively by the game's actor and serializes to one JSON
//! blob for persistence. Nothing outside the domain layer mutates it
//! directly; operations go through `validate` then `mutate`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::books::{self, Book};
use crate::domain::cards::{Card, Variant};
use crate::errors::Reject;

pub type PlayerId = String;

const VALID_PLAYER_COUNTS: [u8; 4] = [3, 4, 6, 8];
const VALID_TEAM_COUNTS: [u8; 3] = [2, 3, 4];

/// Strictly forward lifecycle of a game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Created,
    PlayersReady,
    TeamsCreated,
    InProgress,
    Completed,
}

impl GameStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::Created => "CREATED",
            GameStatus::PlayersReady => "PLAYERS_READY",
            GameStatus::TeamsCreated => "TEAMS_CREATED",
            GameStatus::InProgress => "IN_PROGRESS",
            GameStatus::Completed => "COMPLETED",
        }
    }
}

/// Immutable-once-set game configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub variant: Variant,
    pub player_count: u8,
    pub team_count: u8,
    pub deck_size: usize,
    pub book_size: usize,
    pub books: Vec<Book>,
}

impl GameConfig {
    pub fn new(variant: Variant, player_count: u8, team_count: u8) -> Result<Self, Reject> {
        if !VALID_PLAYER_COUNTS.contains(&player_count) {
            return Err(Reject::BadPlayerCount(player_count));
        }
        if !VALID_TEAM_COUNTS.contains(&team_count) {
            return Err(Reject::BadTeamCount(team_count));
        }
        if player_count % team_count != 0 {
            return Err(Reject::BadTeamArithmetic);
        }
        let deck_size = books::derived_deck_size(variant, player_count);
        Ok(Self {
            variant,
            player_count,
            team_count,
            deck_size,
            book_size: books::book_size(variant),
            books: books::books_for(variant, deck_size),
        })
    }

    pub fn team_size(&self) -> usize {
        self.player_count as usize / self.team_count as usize
    }
}

/// An already-authenticated caller identity, as handed to the engine by
/// the routing layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub id: PlayerId,
    pub name: String,
    pub username: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub username: String,
    pub avatar: String,
    pub is_bot: bool,
    /// Empty until teams are formed.
    pub team_id: Option<String>,
    /// Computed once at team formation, never recomputed.
    pub teammates: Vec<PlayerId>,
    pub opponents: Vec<PlayerId>,
}

impl Player {
    pub fn from_identity(identity: &PlayerIdentity, is_bot: bool) -> Self {
        Self {
            id: identity.id.clone(),
            name: identity.name.clone(),
            username: identity.username.clone(),
            avatar: identity.avatar.clone(),
            is_bot,
            team_id: None,
            teammates: Vec::new(),
            opponents: Vec::new(),
        }
    }

    pub fn identity(&self) -> PlayerIdentity {
        PlayerIdentity {
            id: self.id.clone(),
            name: self.name.clone(),
            username: self.username.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub players: Vec<PlayerId>,
    pub score: u32,
    pub books_won: Vec<Book>,
}

/// Requested team composition for `create_teams`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSpec {
    pub name: String,
    pub players: Vec<PlayerId>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoveKind {
    Ask,
    Claim,
    Transfer,
}

/// One entry of the move history; immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoveEvent {
    Ask {
        actor: PlayerId,
        target: PlayerId,
        card: Card,
        success: bool,
        description: String,
        #[serde(with = "time::serde::timestamp")]
        at: OffsetDateTime,
    },
    Claim {
        actor: PlayerId,
        book: Book,
        owners: HashMap<Card, PlayerId>,
        success: bool,
        description: String,
        #[serde(with = "time::serde::timestamp")]
        at: OffsetDateTime,
    },
    Transfer {
        actor: PlayerId,
        target: PlayerId,
        description: String,
        #[serde(with = "time::serde::timestamp")]
        at: OffsetDateTime,
    },
}

impl MoveEvent {
    pub fn kind(&self) -> MoveKind {
        match self {
            MoveEvent::Ask { .. } => MoveKind::Ask,
            MoveEvent::Claim { .. } => MoveKind::Claim,
            MoveEvent::Transfer { .. } => MoveKind::Transfer,
        }
    }
}

/// Per-player counters; informational only, never read by validators.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metrics {
    pub asks_made: u32,
    pub cards_gained: u32,
    pub cards_given: u32,
    pub claims_made: u32,
    pub claims_succeeded: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub game_id: String,
    pub join_code: String,
    pub status: GameStatus,
    pub config: Option<GameConfig>,
    pub creator: Option<PlayerId>,
    /// Seating order; first seat is the creator.
    pub players: Vec<Player>,
    pub teams: Vec<Team>,
    /// `card -> owning player`, only for cards still in play.
    pub owner_of: HashMap<Card, PlayerId>,
    /// `card -> players who could still hold it`. Shrinks or collapses,
    /// never grows, for the lifetime of a deal.
    pub possible_owners: HashMap<Card, Vec<PlayerId>>,
    /// Denormalized hand contents, kept in sync with `owner_of`.
    pub hands: HashMap<PlayerId, Vec<Card>>,
    pub card_counts: HashMap<PlayerId, u8>,
    pub turn: Option<PlayerId>,
    /// Most-recent-first, append-only.
    pub history: Vec<MoveEvent>,
    pub metrics: HashMap<PlayerId, Metrics>,
}

impl GameState {
    pub fn new(game_id: impl Into<String>, join_code: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            join_code: join_code.into(),
            status: GameStatus::Created,
            config: None,
            creator: None,
            players: Vec::new(),
            teams: Vec::new(),
            owner_of: HashMap::new(),
            possible_owners: HashMap::new(),
            hands: HashMap::new(),
            card_counts: HashMap::new(),
            turn: None,
            history: Vec::new(),
            metrics: HashMap::new(),
        }
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn is_member(&self, id: &str) -> bool {
        self.player(id).is_some()
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.turn.as_deref().and_then(|id| self.player(id))
    }

    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn team_of(&self, player_id: &str) -> Option<&Team> {
        let team_id = self.player(player_id)?.team_id.as_deref()?;
        self.team(team_id)
    }

    pub fn card_count(&self, player_id: &str) -> u8 {
        self.card_counts.get(player_id).copied().unwrap_or(0)
    }

    /// Most recent move, if any.
    pub fn last_event(&self) -> Option<&MoveEvent> {
        self.history.first()
    }

    pub fn last_move_kind(&self) -> Option<MoveKind> {
        self.last_event().map(MoveEvent::kind)
    }

    /// Known owner of a card: defined once its possible-owner set has
    /// collapsed to a singleton.
    pub fn known_owner(&self, card: Card) -> Option<&PlayerId> {
        match self.possible_owners.get(&card).map(Vec::as_slice) {
            Some([only]) => Some(only),
            _ => None,
        }
    }

    pub fn total_books_won(&self) -> usize {
        self.teams.iter().map(|t| t.books_won.len()).sum()
    }

    pub fn require_config(&self) -> Result<&GameConfig, Reject> {
        self.config.as_ref().ok_or(Reject::WrongStatus {
            actual: self.status.as_str().to_string(),
        })
    }
}
