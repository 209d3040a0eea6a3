mod bid;
mod curve;
mod map;
mod participant;
mod store;

pub use bid::{BLOCKS_PER_BID, Bid, BidBlock, BidError};
pub use curve::{CurvePoint, StepCurve};
pub use map::Map;
pub use participant::{ParticipantId, Side};
pub use store::{BidStore, MAX_PARTICIPANTS, StoreError};
