use crate::model::bid::{Bid, BidError};
use crate::model::bidding::BiddingState;
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::{self, Hand};
use crate::model::player::Seat;
use crate::model::suit::Suit;
use crate::model::trick::{Play, Trick, TrickError};
use serde::Serialize;
use thiserror::Error;

/// How the first leader of a round is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opening {
    /// Opening round of a game: the holder of the two of clubs leads it.
    TwoOfClubs,
    /// Later rounds: the given seat leads, no card restriction.
    Rotated(Seat),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    Bidding,
    Playing,
    Complete,
}

/// Where the current trick stands during the playing phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrickState {
    AwaitingFirstLead,
    AwaitingLead,
    TrickInProgress,
    TrickComplete,
    RoundComplete,
}

#[derive(Debug, Clone)]
pub struct RoundState {
    hands: [Hand; 4],
    bidding: BiddingState,
    tricks_won: [u8; 4],
    current_trick: Trick,
    trick_history: Vec<Trick>,
    starting_player: Seat,
    phase: RoundPhase,
    spades_broken: bool,
    two_of_clubs_owed: bool,
}

impl RoundState {
    /// Deals `deck` and opens the bidding at the round's starting player.
    /// `spades_broken` carries the game-wide flag from earlier rounds.
    pub fn deal(deck: &Deck, opening: Opening, spades_broken: bool) -> Self {
        Self::from_hands(hand::deal(deck), opening, spades_broken)
    }

    pub fn from_hands(hands: [Hand; 4], opening: Opening, spades_broken: bool) -> Self {
        let (starting_player, two_of_clubs_owed) = match opening {
            Opening::TwoOfClubs => (find_first_player(&hands), true),
            Opening::Rotated(seat) => (seat, false),
        };

        Self {
            hands,
            bidding: BiddingState::new(starting_player),
            tricks_won: [0; 4],
            current_trick: Trick::new(starting_player),
            trick_history: Vec::new(),
            starting_player,
            phase: RoundPhase::Bidding,
            spades_broken,
            two_of_clubs_owed,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn hands(&self) -> &[Hand; 4] {
        &self.hands
    }

    pub fn bidding(&self) -> &BiddingState {
        &self.bidding
    }

    pub fn bid(&self, seat: Seat) -> Option<Bid> {
        self.bidding.bid(seat)
    }

    pub fn tricks_won(&self, seat: Seat) -> u8 {
        self.tricks_won[seat.index()]
    }

    pub fn tricks_won_by_seat(&self) -> [u8; 4] {
        self.tricks_won
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current_trick
    }

    pub fn trick_history(&self) -> &[Trick] {
        &self.trick_history
    }

    pub fn tricks_completed(&self) -> usize {
        self.trick_history.len()
    }

    pub fn starting_player(&self) -> Seat {
        self.starting_player
    }

    pub fn spades_broken(&self) -> bool {
        self.spades_broken
    }

    /// Seat expected to act next: the next bidder while bidding, the next
    /// card player during play, nobody once the trick is full or the round
    /// is over.
    pub fn current_player(&self) -> Option<Seat> {
        match self.phase {
            RoundPhase::Bidding => self.bidding.expected_seat(),
            RoundPhase::Playing => self.current_trick.next_seat(),
            RoundPhase::Complete => None,
        }
    }

    pub fn trick_state(&self) -> TrickState {
        if self.phase == RoundPhase::Complete {
            return TrickState::RoundComplete;
        }
        match self.current_trick.plays().len() {
            0 if self.two_of_clubs_owed => TrickState::AwaitingFirstLead,
            0 => TrickState::AwaitingLead,
            n if n < Seat::COUNT => TrickState::TrickInProgress,
            _ => TrickState::TrickComplete,
        }
    }

    pub fn submit_bid(&mut self, seat: Seat, bid: Bid) -> Result<BidOutcome, BidError> {
        if self.phase != RoundPhase::Bidding {
            return Err(BidError::NotInBiddingPhase);
        }
        self.bidding.submit(seat, bid)?;
        match self.bidding.expected_seat() {
            Some(next) => Ok(BidOutcome::Placed { next }),
            None => {
                self.phase = RoundPhase::Playing;
                Ok(BidOutcome::Complete)
            }
        }
    }

    /// Runs every legality check for `seat` playing `card` without mutating.
    pub fn check_play(&self, seat: Seat, card: Card) -> Result<(), PlayError> {
        if self.phase != RoundPhase::Playing {
            return Err(PlayError::NotInPlayPhase);
        }

        let Some(expected) = self.current_trick.next_seat() else {
            return Err(PlayError::TrickAwaitingResolution);
        };
        if expected != seat {
            return Err(PlayError::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        let hand = &self.hands[seat.index()];
        if !hand.contains(card) {
            return Err(PlayError::CardNotInHand(card));
        }

        match self.current_trick.lead_suit() {
            None => {
                if self.two_of_clubs_owed && !card.is_two_of_clubs() {
                    return Err(PlayError::MustLeadTwoOfClubs);
                }
                if card.is_spade() && !self.spades_broken && !hand.only_suit(Suit::Spades) {
                    return Err(PlayError::SpadesNotBroken);
                }
            }
            Some(lead) => {
                if card.suit != lead && hand.has_suit(lead) {
                    return Err(PlayError::MustFollowSuit(lead));
                }
            }
        }

        Ok(())
    }

    /// Cards `seat` may play right now, in hand order. Empty when it is not
    /// the seat's turn.
    pub fn legal_cards(&self, seat: Seat) -> Vec<Card> {
        self.hands[seat.index()]
            .iter()
            .copied()
            .filter(|card| self.check_play(seat, *card).is_ok())
            .collect()
    }

    pub fn play_card(&mut self, seat: Seat, card: Card) -> Result<PlayOutcome, PlayError> {
        self.check_play(seat, card)?;

        self.current_trick.play(seat, card)?;
        self.hands[seat.index()].remove(card);

        let breaks_spades = card.is_spade() && !self.spades_broken;
        if card.is_spade() {
            self.spades_broken = true;
        }

        Ok(match self.current_trick.next_seat() {
            Some(next) => PlayOutcome::Played { next, breaks_spades },
            None => PlayOutcome::TrickFull { breaks_spades },
        })
    }

    /// Settles a full trick: credits the winner, who leads the next one.
    pub fn resolve_trick(&mut self) -> Result<TrickResult, PlayError> {
        if self.phase != RoundPhase::Playing {
            return Err(PlayError::NotInPlayPhase);
        }
        let Some(winning) = self.current_trick.winning_play() else {
            return Err(PlayError::TrickNotComplete);
        };

        self.tricks_won[winning.seat.index()] += 1;
        self.two_of_clubs_owed = false;
        let finished = std::mem::replace(&mut self.current_trick, Trick::new(winning.seat));
        self.trick_history.push(finished.clone());

        let round_complete = self.hands.iter().all(Hand::is_empty);
        if round_complete {
            self.phase = RoundPhase::Complete;
        }

        Ok(TrickResult {
            winner: winning.seat,
            winning_card: winning.card,
            plays: finished.plays().to_vec(),
            round_complete,
        })
    }
}

/// Seat holding the two of clubs; seat 0 if no hand has it.
pub fn find_first_player(hands: &[Hand; 4]) -> Seat {
    Seat::LOOP
        .into_iter()
        .find(|seat| hands[seat.index()].contains(Card::TWO_OF_CLUBS))
        .unwrap_or(Seat::LOOP[0])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidOutcome {
    Placed { next: Seat },
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played { next: Seat, breaks_spades: bool },
    TrickFull { breaks_spades: bool },
}

impl PlayOutcome {
    pub fn breaks_spades(self) -> bool {
        match self {
            PlayOutcome::Played { breaks_spades, .. } | PlayOutcome::TrickFull { breaks_spades } => {
                breaks_spades
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrickResult {
    pub winner: Seat,
    pub winning_card: Card,
    pub plays: Vec<Play>,
    pub round_complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("cards are not being played right now")]
    NotInPlayPhase,
    #[error("not your turn: expected {expected}, got {actual}")]
    OutOfTurn { expected: Seat, actual: Seat },
    #[error("{0} is not in that hand")]
    CardNotInHand(Card),
    #[error("the two of clubs must lead the first trick")]
    MustLeadTwoOfClubs,
    #[error("must follow suit ({})", .0.name())]
    MustFollowSuit(Suit),
    #[error("spades have not been broken")]
    SpadesNotBroken,
    #[error("the current trick is full and must be resolved first")]
    TrickAwaitingResolution,
    #[error("the current trick is not complete")]
    TrickNotComplete,
    #[error(transparent)]
    Trick(#[from] TrickError),
}

#[cfg(test)]
mod tests {
    use super::{Opening, PlayError, PlayOutcome, RoundPhase, RoundState, TrickState};
    use crate::model::bid::{Bid, BidError};
    use crate::model::card::Card;
    use crate::model::deck::Deck;
    use crate::model::hand::Hand;
    use crate::model::player::Seat;
    use crate::model::suit::Suit;

    fn seat(index: usize) -> Seat {
        Seat::from_index(index).unwrap()
    }

    fn card(text: &str) -> Card {
        text.parse().unwrap()
    }

    fn hands(cards: [&[&str]; 4]) -> [Hand; 4] {
        cards.map(|list| Hand::with_cards(list.iter().map(|t| card(t)).collect()))
    }

    fn bid_all(round: &mut RoundState, value: i32) {
        while let Some(next) = round.current_player() {
            if round.phase() != RoundPhase::Bidding {
                break;
            }
            round.submit_bid(next, Bid::new(value).unwrap()).unwrap();
        }
        assert_eq!(round.phase(), RoundPhase::Playing);
    }

    fn play_trick(round: &mut RoundState, cards: [&str; 4]) {
        for text in cards {
            let current = round.current_player().unwrap();
            round.play_card(current, card(text)).unwrap();
        }
        round.resolve_trick().unwrap();
    }

    #[test]
    fn dealing_distributes_thirteen_cards_per_seat() {
        let round = RoundState::deal(&Deck::shuffled_with_seed(7), Opening::TwoOfClubs, false);
        for s in Seat::LOOP {
            assert_eq!(round.hand(s).len(), 13, "{s} should have 13 cards");
            assert_eq!(round.tricks_won(s), 0);
        }
        assert_eq!(round.phase(), RoundPhase::Bidding);
        assert!(round.hand(round.starting_player()).contains(Card::TWO_OF_CLUBS));
        assert_eq!(round.current_player(), Some(round.starting_player()));
    }

    #[test]
    fn rotated_opening_uses_given_seat() {
        let round = RoundState::deal(&Deck::standard(), Opening::Rotated(seat(2)), false);
        assert_eq!(round.starting_player(), seat(2));
        assert_eq!(round.bidding().first_bidder(), seat(2));
    }

    #[test]
    fn bidding_must_finish_before_play() {
        let mut round = RoundState::deal(&Deck::standard(), Opening::TwoOfClubs, false);
        assert_eq!(
            round.play_card(seat(0), Card::TWO_OF_CLUBS),
            Err(PlayError::NotInPlayPhase)
        );
        assert!(matches!(
            round.submit_bid(seat(1), Bid::new(2).unwrap()),
            Err(BidError::OutOfTurn { .. })
        ));
        bid_all(&mut round, 3);
        assert_eq!(
            round.submit_bid(seat(0), Bid::new(2).unwrap()),
            Err(BidError::NotInBiddingPhase)
        );
        assert_eq!(round.bid(seat(3)).map(Bid::value), Some(3));
    }

    #[test]
    fn first_lead_must_be_two_of_clubs() {
        let mut round = RoundState::deal(&Deck::standard(), Opening::TwoOfClubs, false);
        bid_all(&mut round, 3);
        assert_eq!(round.trick_state(), TrickState::AwaitingFirstLead);
        assert_eq!(round.legal_cards(seat(0)), vec![Card::TWO_OF_CLUBS]);
        assert_eq!(
            round.play_card(seat(0), card("6C")),
            Err(PlayError::MustLeadTwoOfClubs)
        );
        assert_eq!(
            round.play_card(seat(0), Card::TWO_OF_CLUBS),
            Ok(PlayOutcome::Played {
                next: seat(1),
                breaks_spades: false
            })
        );
        assert_eq!(round.trick_state(), TrickState::TrickInProgress);
    }

    #[test]
    fn rejected_plays_leave_state_untouched() {
        let mut round = RoundState::deal(&Deck::standard(), Opening::TwoOfClubs, false);
        bid_all(&mut round, 3);
        let before = round.hand(seat(0)).clone();
        assert!(round.play_card(seat(1), card("3C")).is_err());
        assert!(round.play_card(seat(0), card("3C")).is_err());
        assert!(round.play_card(seat(0), card("AC")).is_err());
        assert_eq!(round.hand(seat(0)), &before);
        assert!(round.current_trick().is_empty());
    }

    #[test]
    fn out_of_turn_and_foreign_cards_are_rejected() {
        let mut round = RoundState::deal(&Deck::standard(), Opening::TwoOfClubs, false);
        bid_all(&mut round, 3);
        assert_eq!(
            round.play_card(seat(2), card("4C")),
            Err(PlayError::OutOfTurn {
                expected: seat(0),
                actual: seat(2)
            })
        );
        assert_eq!(
            round.play_card(seat(0), card("3C")),
            Err(PlayError::CardNotInHand(card("3C")))
        );
    }

    #[test]
    fn follow_suit_is_required() {
        let mut round = RoundState::deal(&Deck::standard(), Opening::TwoOfClubs, false);
        bid_all(&mut round, 3);
        round.play_card(seat(0), Card::TWO_OF_CLUBS).unwrap();
        assert_eq!(
            round.play_card(seat(1), card("2D")),
            Err(PlayError::MustFollowSuit(Suit::Clubs))
        );
        assert!(round.legal_cards(seat(1)).iter().all(|c| c.suit == Suit::Clubs));
        round.play_card(seat(1), card("3C")).unwrap();
    }

    #[test]
    fn void_seat_may_discard_any_suit() {
        let mut round = RoundState::from_hands(
            hands([&["2C", "3D"], &["4H", "5S"], &["6C", "7C"], &["8C", "9D"]]),
            Opening::TwoOfClubs,
            false,
        );
        bid_all(&mut round, 0);
        round.play_card(seat(0), Card::TWO_OF_CLUBS).unwrap();
        assert_eq!(round.legal_cards(seat(1)).len(), 2);
        let outcome = round.play_card(seat(1), card("5S")).unwrap();
        assert!(outcome.breaks_spades());
        assert!(round.spades_broken());
    }

    #[test]
    fn discarding_a_spade_breaks_spades() {
        let mut round = RoundState::from_hands(
            hands([
                &["2C", "3S", "4D"],
                &["5C", "6D", "7D"],
                &["8C", "9D", "10D"],
                &["AC", "QD", "KD"],
            ]),
            Opening::TwoOfClubs,
            false,
        );
        bid_all(&mut round, 1);
        play_trick(&mut round, ["2C", "5C", "8C", "AC"]);
        play_trick(&mut round, ["KD", "4D", "6D", "9D"]);
        // Seat 0 is void in diamonds and discards its last card, a spade.
        assert_eq!(round.current_player(), Some(seat(3)));
        round.play_card(seat(3), card("QD")).unwrap();
        round.play_card(seat(0), card("3S")).unwrap();
        assert!(round.spades_broken());
    }

    #[test]
    fn spade_lead_allowed_when_hand_is_all_spades() {
        let mut round = RoundState::from_hands(
            hands([&["3S", "4S"], &["5C", "6C"], &["7C", "8C"], &["9C", "10C"]]),
            Opening::Rotated(seat(0)),
            false,
        );
        bid_all(&mut round, 0);
        assert_eq!(round.trick_state(), TrickState::AwaitingLead);
        assert_eq!(round.legal_cards(seat(0)).len(), 2);
        round.play_card(seat(0), card("3S")).unwrap();
        assert!(round.spades_broken());
    }

    #[test]
    fn spade_lead_rejected_with_mixed_hand_until_broken() {
        let mut round = RoundState::from_hands(
            hands([&["3S", "4H"], &["5C", "6C"], &["7C", "8C"], &["9C", "10C"]]),
            Opening::Rotated(seat(0)),
            false,
        );
        bid_all(&mut round, 0);
        assert_eq!(
            round.play_card(seat(0), card("3S")),
            Err(PlayError::SpadesNotBroken)
        );
        assert_eq!(round.legal_cards(seat(0)), vec![card("4H")]);

        let mut broken = RoundState::from_hands(
            hands([&["3S", "4H"], &["5C", "6C"], &["7C", "8C"], &["9C", "10C"]]),
            Opening::Rotated(seat(0)),
            true,
        );
        bid_all(&mut broken, 0);
        assert!(broken.play_card(seat(0), card("3S")).is_ok());
    }

    #[test]
    fn full_trick_waits_for_resolution() {
        let mut round = RoundState::from_hands(
            hands([&["2C", "2D"], &["3C", "3D"], &["4C", "4D"], &["5C", "5S"]]),
            Opening::TwoOfClubs,
            false,
        );
        bid_all(&mut round, 1);
        round.play_card(seat(0), card("2C")).unwrap();
        round.play_card(seat(1), card("3C")).unwrap();
        round.play_card(seat(2), card("4C")).unwrap();
        let outcome = round.play_card(seat(3), card("5C")).unwrap();
        assert_eq!(outcome, PlayOutcome::TrickFull { breaks_spades: false });
        assert_eq!(round.trick_state(), TrickState::TrickComplete);
        assert_eq!(round.current_player(), None);
        assert_eq!(
            round.play_card(seat(0), card("2D")),
            Err(PlayError::TrickAwaitingResolution)
        );

        let result = round.resolve_trick().unwrap();
        assert_eq!(result.winner, seat(3));
        assert_eq!(result.winning_card, card("5C"));
        assert!(!result.round_complete);
        assert_eq!(round.tricks_won(seat(3)), 1);
        assert_eq!(round.current_player(), Some(seat(3)));
        assert_eq!(round.trick_state(), TrickState::AwaitingLead);
        assert_eq!(round.resolve_trick(), Err(PlayError::TrickNotComplete));
    }

    #[test]
    fn two_of_clubs_rule_only_binds_the_first_trick() {
        let mut round = RoundState::from_hands(
            hands([&["2C", "3C"], &["4C", "5C"], &["6C", "7C"], &["8C", "9C"]]),
            Opening::TwoOfClubs,
            false,
        );
        bid_all(&mut round, 0);
        play_trick(&mut round, ["2C", "4C", "6C", "8C"]);
        assert_eq!(round.current_player(), Some(seat(3)));
        assert_eq!(round.trick_state(), TrickState::AwaitingLead);
        round.play_card(seat(3), card("9C")).unwrap();
    }

    #[test]
    fn last_trick_completes_the_round() {
        let mut round = RoundState::from_hands(
            hands([&["2C"], &["3H"], &["4S"], &["5C"]]),
            Opening::TwoOfClubs,
            false,
        );
        bid_all(&mut round, 0);
        round.play_card(seat(0), card("2C")).unwrap();
        round.play_card(seat(1), card("3H")).unwrap();
        round.play_card(seat(2), card("4S")).unwrap();
        round.play_card(seat(3), card("5C")).unwrap();
        let result = round.resolve_trick().unwrap();
        assert_eq!(result.winner, seat(2));
        assert!(result.round_complete);
        assert_eq!(round.phase(), RoundPhase::Complete);
        assert_eq!(round.trick_state(), TrickState::RoundComplete);
        assert_eq!(round.current_player(), None);
        assert_eq!(round.tricks_won_by_seat(), [0, 0, 1, 0]);
        assert_eq!(round.trick_history().len(), 1);
    }
}
