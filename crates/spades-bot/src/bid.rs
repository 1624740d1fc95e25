use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spades_core::game::ports::{BidRequest, BidSource};
use spades_core::model::bid::MAX_BID;
use tracing::{Level, event};

pub const PLACEHOLDER_MIN_BID: i32 = 1;
pub const PLACEHOLDER_MAX_BID: i32 = 5;

/// Placeholder bidder: a uniform pick from `1..=5` regardless of the hand.
#[derive(Debug, Clone)]
pub struct RandomBidder {
    rng: StdRng,
}

impl RandomBidder {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl BidSource for RandomBidder {
    fn request_bid(&mut self, request: &BidRequest) -> i32 {
        let bid = self.rng.gen_range(PLACEHOLDER_MIN_BID..=PLACEHOLDER_MAX_BID);
        event!(Level::DEBUG, seat = request.seat.index(), bid, "random bid");
        bid
    }
}

/// Always answers with the same number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedBidder {
    value: i32,
}

impl FixedBidder {
    pub fn new(value: u8) -> Self {
        Self {
            value: i32::from(value.min(MAX_BID)),
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }
}

impl BidSource for FixedBidder {
    fn request_bid(&mut self, _request: &BidRequest) -> i32 {
        self.value
    }
}
