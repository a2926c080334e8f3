//! Domain layer: pure game logic types and helpers.

pub mod books;
pub mod cards;
pub mod mutate;
pub mod player_view;
pub mod state;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_state_helpers;

#[cfg(test)]
mod tests_claims;
#[cfg(test)]
mod tests_taxonomy;

// Re-exports for ergonomics
pub use books::{book_of, books_for, books_in_hand, build_deck, cards_of_book, missing_cards_of, Book};
pub use cards::{Card, Rank, Suit, Variant};
pub use player_view::PlayerView;
pub use state::{
    GameConfig, GameState, GameStatus, MoveEvent, MoveKind, Player, PlayerId, PlayerIdentity, Team,
    TeamSpec,
};
