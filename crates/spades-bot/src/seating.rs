use crate::bid::{FixedBidder, RandomBidder};
use crate::policy::{LowestLegalPlayer, PlayPolicy, PolicyContext, RandomLegalPlayer};
use spades_core::game::ports::{BidRequest, BidSource};
use spades_core::model::card::Card;
use spades_core::model::player::Seat;

/// Bidding and card play for one seat.
pub struct SeatDriver {
    pub bidder: Box<dyn BidSource + Send>,
    pub player: Box<dyn PlayPolicy>,
}

impl SeatDriver {
    pub fn new(bidder: impl BidSource + Send + 'static, player: impl PlayPolicy + 'static) -> Self {
        Self {
            bidder: Box::new(bidder),
            player: Box::new(player),
        }
    }

    /// Random placeholder bids and random legal plays, both seeded.
    pub fn random(seed: u64) -> Self {
        Self::new(
            RandomBidder::new(seed),
            RandomLegalPlayer::new(seed.rotate_left(17) ^ 0x5eed),
        )
    }

    pub fn fixed_lowest(bid: u8) -> Self {
        Self::new(FixedBidder::new(bid), LowestLegalPlayer)
    }
}

/// Four seat drivers, dispatched by seat.
pub struct Seating {
    drivers: [SeatDriver; 4],
}

impl Seating {
    pub fn new(drivers: [SeatDriver; 4]) -> Self {
        Self { drivers }
    }

    pub fn all_random(seed: u64) -> Self {
        Self::new(Seat::LOOP.map(|seat| SeatDriver::random(seed.wrapping_add(seat.index() as u64))))
    }

    pub fn driver_mut(&mut self, seat: Seat) -> &mut SeatDriver {
        &mut self.drivers[seat.index()]
    }

    pub fn choose_play(&mut self, ctx: &PolicyContext) -> Option<Card> {
        self.drivers[ctx.seat.index()].player.choose_play(ctx)
    }
}

impl BidSource for Seating {
    fn request_bid(&mut self, request: &BidRequest) -> i32 {
        self.drivers[request.seat.index()]
            .bidder
            .request_bid(request)
    }
}
