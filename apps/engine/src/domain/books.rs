//! Book taxonomy: the fixed partition of a deck into claimable groups.
//!
//! Normal books are four of a kind, one per rank. Canadian books are
//! half-suits of six: Low = {2,3,4,5,6,8}, High = {9,T,J,Q,K,A}
//! (Sevens are not part of the Canadian deck). Everything here is a
//! pure, stateless lookup.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::cards::{Card, Rank, Suit, Variant};

pub const NORMAL_BOOK_SIZE: usize = 4;
pub const CANADIAN_BOOK_SIZE: usize = 6;

const CANADIAN_LOW_RANKS: [Rank; 6] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Eight,
];
const CANADIAN_HIGH_RANKS: [Rank; 6] = [
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Book {
    /// Normal variant: all four cards of one rank.
    Rank(Rank),
    /// Canadian variant: the low half of a suit.
    Low(Suit),
    /// Canadian variant: the high half of a suit.
    High(Suit),
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Book::Rank(r) => write!(f, "{}", r.plural()),
            Book::Low(s) => write!(f, "Low {s:?}"),
            Book::High(s) => write!(f, "High {s:?}"),
        }
    }
}

static CANADIAN_BOOKS: Lazy<Vec<Book>> = Lazy::new(|| {
    let mut books = Vec::with_capacity(8);
    for suit in Suit::ALL {
        books.push(Book::Low(suit));
    }
    for suit in Suit::ALL {
        books.push(Book::High(suit));
    }
    books
});

static NORMAL_BOOKS_52: Lazy<Vec<Book>> = Lazy::new(|| Rank::ALL.map(Book::Rank).to_vec());

static NORMAL_BOOKS_48: Lazy<Vec<Book>> = Lazy::new(|| {
    Rank::ALL
        .into_iter()
        .filter(|r| *r != Rank::Seven)
        .map(Book::Rank)
        .collect()
});

pub fn book_size(variant: Variant) -> usize {
    match variant {
        Variant::Normal => NORMAL_BOOK_SIZE,
        Variant::Canadian => CANADIAN_BOOK_SIZE,
    }
}

/// Deck size for a variant and table size. Canadian always plays 48
/// cards; Normal keeps the full 52 only when it deals evenly, otherwise
/// the Sevens come out.
pub fn derived_deck_size(variant: Variant, player_count: u8) -> usize {
    match variant {
        Variant::Canadian => 48,
        Variant::Normal => {
            if 52 % player_count as usize == 0 {
                52
            } else {
                48
            }
        }
    }
}

/// The books in play for a variant and deck size. A 48-card Normal deck
/// has no Sevens, so the Sevens book is excluded.
pub fn books_for(variant: Variant, deck_size: usize) -> Vec<Book> {
    match (variant, deck_size) {
        (Variant::Canadian, _) => CANADIAN_BOOKS.clone(),
        (Variant::Normal, 52) => NORMAL_BOOKS_52.clone(),
        (Variant::Normal, _) => NORMAL_BOOKS_48.clone(),
    }
}

/// The book a card belongs to. Sevens never occur in a Canadian deck.
pub fn book_of(card: Card, variant: Variant) -> Book {
    match variant {
        Variant::Normal => Book::Rank(card.rank),
        Variant::Canadian => {
            debug_assert!(card.rank != Rank::Seven, "Sevens are not dealt in Canadian games");
            if CANADIAN_LOW_RANKS.contains(&card.rank) {
                Book::Low(card.suit)
            } else {
                Book::High(card.suit)
            }
        }
    }
}

/// Every card of a book, in fixed rank order.
pub fn cards_of_book(book: Book) -> Vec<Card> {
    match book {
        Book::Rank(rank) => Suit::ALL.iter().map(|&s| Card::new(rank, s)).collect(),
        Book::Low(suit) => CANADIAN_LOW_RANKS.iter().map(|&r| Card::new(r, suit)).collect(),
        Book::High(suit) => CANADIAN_HIGH_RANKS.iter().map(|&r| Card::new(r, suit)).collect(),
    }
}

/// Distinct books represented in a hand, in first-seen order.
pub fn books_in_hand(hand: &[Card], variant: Variant) -> Vec<Book> {
    let mut books = Vec::new();
    for &card in hand {
        let book = book_of(card, variant);
        if !books.contains(&book) {
            books.push(book);
        }
    }
    books
}

/// Cards of a book that the hand does not hold.
pub fn missing_cards_of(book: Book, hand: &[Card]) -> Vec<Card> {
    cards_of_book(book)
        .into_iter()
        .filter(|c| !hand.contains(c))
        .collect()
}

/// Cards of a book that the hand does hold.
pub fn cards_of_book_in(book: Book, hand: &[Card]) -> Vec<Card> {
    cards_of_book(book)
        .into_iter()
        .filter(|c| hand.contains(c))
        .collect()
}

/// Build the (unshuffled) deck. A 48-card deck omits the Sevens.
pub fn build_deck(deck_size: usize) -> Vec<Card> {
    let mut deck = Vec::with_capacity(deck_size);
    for rank in Rank::ALL {
        if deck_size == 48 && rank == Rank::Seven {
            continue;
        }
        for suit in Suit::ALL {
            deck.push(Card::new(rank, suit));
        }
    }
    deck
}
