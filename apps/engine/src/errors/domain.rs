//! Engine error taxonomy.
//!
//! Two disjoint classes: [`Reject`] covers expected business-rule
//! rejections (wrong turn, malformed claim, ...) and is returned to the
//! caller as data, never panicked. [`EngineError`] wraps rejections and
//! adds the hard failures (missing lookup keys, corrupt persisted state,
//! storage I/O) that the routing layer should surface as 404/500-class
//! responses.

use thiserror::Error;

/// A business-rule rejection. The transport edge renders these as
/// `{error: <message>}`; no operation ever mutates state after
/// producing one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Reject {
    #[error("operation not allowed while the game is {actual}")]
    WrongStatus { actual: String },
    #[error("only the game creator may do this")]
    NotCreator,
    #[error("it is not your turn")]
    NotYourTurn,
    #[error("the game already has its players")]
    RosterFull,
    #[error("the game is already set up")]
    AlreadyInitialized,
    #[error("unsupported player count {0}")]
    BadPlayerCount(u8),
    #[error("unsupported team count {0}")]
    BadTeamCount(u8),
    #[error("player count must be a multiple of team count")]
    BadTeamArithmetic,
    #[error("player {0} is not part of this game")]
    UnknownPlayer(String),
    #[error("team mapping must cover every player exactly once")]
    BadTeamMapping,
    #[error("each team must have exactly {expected} players")]
    BadTeamSize { expected: usize },
    #[error("you can only ask an opponent for a card")]
    TargetNotOpponent,
    #[error("you already hold that card")]
    CardAlreadyHeld,
    #[error("that card is no longer in play")]
    CardNotInPlay,
    #[error("a claim must name exactly {expected} cards")]
    WrongClaimSize { expected: usize },
    #[error("claimed cards must all belong to one book")]
    MixedBookClaim,
    #[error("the claimant must appear among the named owners")]
    ClaimantNotNamed,
    #[error("all named owners must be on one team")]
    OwnersNotOneTeam,
    #[error("the turn can only be transferred right after your own successful claim")]
    TransferNeedsClaim,
    #[error("the turn can only be transferred to a teammate")]
    TargetNotTeammate,
    #[error("cannot transfer the turn to a player with no cards")]
    TargetHasNoCards,
}

/// Top-level engine error. `Reject` is the recoverable branch; the rest
/// indicate corrupted or missing state rather than a bad request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error(transparent)]
    Reject(#[from] Reject),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage failure: {0}")]
    Store(String),
    #[error("corrupt game state: {0}")]
    Corrupt(String),
}

impl EngineError {
    /// The rejection message, if this is a business-rule rejection.
    /// Routing layers use this to build the `{error}` response shape.
    pub fn rejection(&self) -> Option<String> {
        match self {
            EngineError::Reject(r) => Some(r.to_string()),
            _ => None,
        }
    }
}
