use crate::domain::books::{
    book_of, book_size, books_for, books_in_hand, build_deck, cards_of_book, cards_of_book_in,
    derived_deck_size, missing_cards_of, Book,
};
use crate::domain::cards::{Card, Rank, Suit, Variant};
use crate::domain::test_state_helpers::{c, cards};

#[test]
fn card_round_trips_through_its_string_form() {
    for s in ["2C", "TD", "JH", "AS", "9H"] {
        let card = c(s);
        assert_eq!(card.to_string(), s);
    }
    assert!("XX".parse::<Card>().is_err());
    assert!("10H".parse::<Card>().is_err());
    assert!("".parse::<Card>().is_err());
}

#[test]
fn card_serializes_as_a_compact_string() {
    let card = Card::new(Rank::Ten, Suit::Hearts);
    assert_eq!(serde_json::to_string(&card).unwrap(), "\"TH\"");
    let back: Card = serde_json::from_str("\"TH\"").unwrap();
    assert_eq!(back, card);
}

#[test]
fn normal_deck_derivation_follows_divisibility() {
    assert_eq!(derived_deck_size(Variant::Normal, 4), 52);
    assert_eq!(derived_deck_size(Variant::Normal, 3), 48);
    assert_eq!(derived_deck_size(Variant::Normal, 6), 48);
    assert_eq!(derived_deck_size(Variant::Normal, 8), 48);
}

#[test]
fn canadian_deck_is_always_48() {
    for n in [3u8, 4, 6, 8] {
        assert_eq!(derived_deck_size(Variant::Canadian, n), 48);
    }
}

#[test]
fn deck_partitions_exactly_into_books() {
    for (variant, deck_size) in [
        (Variant::Normal, 52),
        (Variant::Normal, 48),
        (Variant::Canadian, 48),
    ] {
        let books = books_for(variant, deck_size);
        let size = book_size(variant);
        assert_eq!(books.len() * size, deck_size);

        let mut all: Vec<Card> = books.iter().flat_map(|&b| cards_of_book(b)).collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), deck_size);

        let mut deck = build_deck(deck_size);
        deck.sort();
        assert_eq!(all, deck);
    }
}

#[test]
fn forty_eight_card_normal_deck_has_no_sevens_book() {
    let books = books_for(Variant::Normal, 48);
    assert!(!books.contains(&Book::Rank(Rank::Seven)));
    assert!(build_deck(48).iter().all(|card| card.rank != Rank::Seven));
}

#[test]
fn every_card_maps_into_its_own_book() {
    for variant in [Variant::Normal, Variant::Canadian] {
        let deck_size = if variant == Variant::Normal { 52 } else { 48 };
        for card in build_deck(deck_size) {
            let book = book_of(card, variant);
            assert!(cards_of_book(book).contains(&card), "{card} not in {book}");
        }
    }
}

#[test]
fn canadian_books_split_at_the_eight_nine_boundary() {
    assert_eq!(book_of(c("8H"), Variant::Canadian), Book::Low(Suit::Hearts));
    assert_eq!(book_of(c("9H"), Variant::Canadian), Book::High(Suit::Hearts));
    assert_eq!(
        cards_of_book(Book::Low(Suit::Spades)),
        cards("2S 3S 4S 5S 6S 8S")
    );
    assert_eq!(
        cards_of_book(Book::High(Suit::Clubs)),
        cards("9C TC JC QC KC AC")
    );
}

#[test]
fn missing_cards_excludes_the_hand() {
    let hand = cards("2C 2H 5D");
    assert_eq!(
        missing_cards_of(Book::Rank(Rank::Two), &hand),
        cards("2D 2S")
    );
}

#[test]
fn hand_partitions_into_books_in_first_seen_order() {
    let hand = cards("2C 9H 2D 3S");
    assert_eq!(
        books_in_hand(&hand, Variant::Normal),
        vec![
            Book::Rank(Rank::Two),
            Book::Rank(Rank::Nine),
            Book::Rank(Rank::Three)
        ]
    );
    assert_eq!(
        books_in_hand(&hand, Variant::Canadian),
        vec![
            Book::Low(Suit::Clubs),
            Book::High(Suit::Hearts),
            Book::Low(Suit::Diamonds),
            Book::Low(Suit::Spades)
        ]
    );
    assert_eq!(
        cards_of_book_in(Book::Rank(Rank::Two), &hand),
        cards("2C 2D")
    );
}

#[test]
fn book_display_names_are_readable() {
    assert_eq!(Book::Rank(Rank::Six).to_string(), "Sixes");
    assert_eq!(Book::Low(Suit::Hearts).to_string(), "Low Hearts");
    assert_eq!(Book::High(Suit::Spades).to_string(), "High Spades");
}
