use crate::model::bid::{Bid, BidError};
use crate::model::player::Seat;

/// Collects one bid per seat, in turn order from the round's first bidder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiddingState {
    first: Seat,
    bids: [Option<Bid>; 4],
    placed: usize,
}

impl BiddingState {
    pub fn new(first: Seat) -> Self {
        Self {
            first,
            bids: [None; 4],
            placed: 0,
        }
    }

    pub fn first_bidder(&self) -> Seat {
        self.first
    }

    /// Seat whose bid is awaited, or `None` once every seat has bid.
    pub fn expected_seat(&self) -> Option<Seat> {
        (!self.is_complete()).then(|| self.first.rotation()[self.placed])
    }

    pub fn is_complete(&self) -> bool {
        self.placed == Seat::COUNT
    }

    pub fn bid(&self, seat: Seat) -> Option<Bid> {
        self.bids[seat.index()]
    }

    pub fn bids(&self) -> [Option<Bid>; 4] {
        self.bids
    }

    pub fn completed(&self) -> Option<[Bid; 4]> {
        let [a, b, c, d] = self.bids;
        Some([a?, b?, c?, d?])
    }

    pub fn submit(&mut self, seat: Seat, bid: Bid) -> Result<(), BidError> {
        let expected = self.expected_seat().ok_or(BidError::NotInBiddingPhase)?;
        if expected != seat {
            return Err(BidError::OutOfTurn {
                expected,
                actual: seat,
            });
        }
        self.bids[seat.index()] = Some(bid);
        self.placed += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::BiddingState;
    use crate::model::bid::{Bid, BidError};
    use crate::model::player::Seat;

    fn seat(index: usize) -> Seat {
        Seat::from_index(index).unwrap()
    }

    #[test]
    fn bids_follow_seat_order_from_first_bidder() {
        let mut bidding = BiddingState::new(seat(2));
        for (expected, value) in [(2, 3), (3, 1), (0, 4), (1, 2)] {
            assert_eq!(bidding.expected_seat(), Some(seat(expected)));
            bidding.submit(seat(expected), Bid::new(value).unwrap()).unwrap();
        }
        assert!(bidding.is_complete());
        assert_eq!(bidding.expected_seat(), None);
        let values = bidding.completed().unwrap().map(Bid::value);
        assert_eq!(values, [4, 2, 3, 1]);
    }

    #[test]
    fn out_of_turn_bid_does_not_advance() {
        let mut bidding = BiddingState::new(seat(0));
        let err = bidding.submit(seat(1), Bid::new(3).unwrap()).unwrap_err();
        assert_eq!(
            err,
            BidError::OutOfTurn {
                expected: seat(0),
                actual: seat(1)
            }
        );
        assert_eq!(bidding.expected_seat(), Some(seat(0)));
        assert_eq!(bidding.bid(seat(1)), None);
        assert!(bidding.completed().is_none());
    }

    #[test]
    fn completed_bidding_rejects_more_bids() {
        let mut bidding = BiddingState::new(seat(1));
        for s in seat(1).rotation() {
            bidding.submit(s, Bid::new(1).unwrap()).unwrap();
        }
        assert_eq!(
            bidding.submit(seat(1), Bid::new(1).unwrap()),
            Err(BidError::NotInBiddingPhase)
        );
    }
}
