use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::player::Seat;
use crate::model::suit::Suit;
use serde::Serialize;
use std::array;

pub const HAND_SIZE: usize = 13;

/// Cards held by one seat, kept suit-major (clubs, diamonds, hearts, spades)
/// with ranks ascending inside each suit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort();
        hand
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
        self.sort();
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn has_suit(&self, suit: Suit) -> bool {
        self.cards.iter().any(|c| c.suit == suit)
    }

    /// True when every remaining card is of `suit` (vacuously true when empty).
    pub fn only_suit(&self, suit: Suit) -> bool {
        self.cards.iter().all(|c| c.suit == suit)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    fn sort(&mut self) {
        self.cards
            .sort_by(|a, b| a.suit.cmp(&b.suit).then(a.rank.cmp(&b.rank)));
    }
}

/// Deals the deck round-robin: card `i` goes to seat `i % 4`.
pub fn deal(deck: &Deck) -> [Hand; 4] {
    let mut piles: [Vec<Card>; 4] = array::from_fn(|_| Vec::with_capacity(HAND_SIZE));
    for (index, card) in deck.cards().iter().enumerate() {
        piles[index % Seat::COUNT].push(*card);
    }
    piles.map(Hand::with_cards)
}

#[cfg(test)]
mod tests {
    use super::{HAND_SIZE, Hand, deal};
    use crate::model::card::Card;
    use crate::model::deck::Deck;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn add_and_remove_cards() {
        let mut hand = Hand::new();
        let card = Card::new(Rank::Three, Suit::Clubs);
        hand.add(card);
        assert!(hand.contains(card));
        assert!(hand.remove(card));
        assert!(!hand.contains(card));
        assert!(!hand.remove(card));
    }

    #[test]
    fn cards_are_sorted_by_suit_then_rank() {
        let hand = Hand::with_cards(vec![
            Card::new(Rank::King, Suit::Spades),
            Card::new(Rank::Ace, Suit::Clubs),
            Card::new(Rank::Two, Suit::Hearts),
            Card::new(Rank::Two, Suit::Clubs),
        ]);
        let ordered: Vec<String> = hand.iter().map(Card::to_string).collect();
        assert_eq!(ordered, ["2C", "AC", "2H", "KS"]);
    }

    #[test]
    fn suit_queries() {
        let hand = Hand::with_cards(vec![
            Card::new(Rank::Four, Suit::Spades),
            Card::new(Rank::Nine, Suit::Spades),
        ]);
        assert!(hand.has_suit(Suit::Spades));
        assert!(!hand.has_suit(Suit::Hearts));
        assert!(hand.only_suit(Suit::Spades));
    }

    #[test]
    fn deal_is_round_robin() {
        let deck = Deck::standard();
        let hands = deal(&deck);
        assert!(hands[0].contains(Card::TWO_OF_CLUBS));
        assert!(hands[1].contains(Card::new(Rank::Three, Suit::Clubs)));
        assert!(hands[3].contains(Card::new(Rank::Ace, Suit::Spades)));
    }

    proptest! {
        #[test]
        fn hands_partition_the_deck(seed in any::<u64>()) {
            let hands = deal(&Deck::shuffled_with_seed(seed));
            let mut seen = HashSet::new();
            for hand in &hands {
                prop_assert_eq!(hand.len(), HAND_SIZE);
                for card in hand.iter() {
                    prop_assert!(seen.insert(*card), "{} dealt twice", card);
                }
            }
            prop_assert_eq!(seen.len(), 52);
        }
    }
}
