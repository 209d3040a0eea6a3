use super::{BLOCKS_PER_BID, Bid, BidBlock, BidError, Map, ParticipantId, Side};
use thiserror::Error;

/// The maximum number of participants per side.
pub const MAX_PARTICIPANTS: usize = 20;

/// Session-owned bid state: one [`Bid`] per (side, participant).
///
/// The store is the explicit input boundary of the clearing engine. It is
/// passed into the curve builder rather than read from ambient state, and it
/// rejects invalid values (negative, NaN, infinite) on entry so the engine
/// can assume well-formed bids throughout. Each session owns its store; no
/// state is shared between computations.
#[derive(Clone, Debug, PartialEq)]
pub struct BidStore {
    supply: Map<ParticipantId, Bid>,
    demand: Map<ParticipantId, Bid>,
}

impl BidStore {
    /// Creates a store with the given participant counts, each seeded with
    /// the default bid schedule.
    pub fn new(generators: usize, consumers: usize) -> Result<Self, StoreError> {
        let mut store = Self {
            supply: Map::default(),
            demand: Map::default(),
        };
        store.set_participant_count(Side::Supply, generators)?;
        store.set_participant_count(Side::Demand, consumers)?;
        Ok(store)
    }

    /// Creates a store from explicit per-side bid lists.
    ///
    /// Ids are assigned 1..=n in list order. Counts outside 1..=20 are
    /// rejected.
    pub fn from_bids(generators: Vec<Bid>, consumers: Vec<Bid>) -> Result<Self, StoreError> {
        for n in [generators.len(), consumers.len()] {
            if n == 0 || n > MAX_PARTICIPANTS {
                return Err(StoreError::ParticipantCount(n));
            }
        }
        let assign = |bids: Vec<Bid>| {
            bids.into_iter()
                .enumerate()
                .map(|(i, bid)| (ParticipantId::new(i as u32 + 1), bid))
                .collect()
        };
        Ok(Self {
            supply: assign(generators),
            demand: assign(consumers),
        })
    }

    /// Sets the number of active participants on one side (1..=20).
    ///
    /// Shrinking drops the highest ids; growing seeds new participants with
    /// the default bid schedule.
    pub fn set_participant_count(&mut self, side: Side, count: usize) -> Result<(), StoreError> {
        if count == 0 || count > MAX_PARTICIPANTS {
            return Err(StoreError::ParticipantCount(count));
        }
        let bids = self.side_mut(side);
        bids.truncate(count);
        for i in bids.len()..count {
            let id = ParticipantId::new(i as u32 + 1);
            bids.insert(id, default_bid(side, i));
        }
        Ok(())
    }

    /// Replaces one block of one participant's bid.
    ///
    /// `block` is 1-based, per the submission form convention. Values are
    /// validated here; the rest of the engine assumes non-negative, finite
    /// bids.
    pub fn set_bid(
        &mut self,
        side: Side,
        participant: ParticipantId,
        block: usize,
        price: f64,
        quantity: f64,
    ) -> Result<(), StoreError> {
        if block == 0 || block > BLOCKS_PER_BID {
            return Err(StoreError::BlockIndex(block));
        }
        let validated = BidBlock::new(price, quantity)?;
        let bid = self
            .side_mut(side)
            .get_mut(&participant)
            .ok_or(StoreError::UnknownParticipant(side, participant))?;
        bid.set_block(block - 1, validated);
        Ok(())
    }

    /// The bids on one side, in ascending id order.
    pub fn bids(&self, side: Side) -> impl Iterator<Item = (ParticipantId, &Bid)> {
        self.side(side).iter().map(|(id, bid)| (*id, bid))
    }

    /// The number of active participants on one side.
    pub fn participant_count(&self, side: Side) -> usize {
        self.side(side).len()
    }

    fn side(&self, side: Side) -> &Map<ParticipantId, Bid> {
        match side {
            Side::Supply => &self.supply,
            Side::Demand => &self.demand,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut Map<ParticipantId, Bid> {
        match side {
            Side::Supply => &mut self.supply,
            Side::Demand => &mut self.demand,
        }
    }
}

/// The default bid schedule for the i-th participant (zero-based).
///
/// Generators step up from cheap to expensive, consumers step down from high
/// to low willingness to pay; later consumers are clamped at zero rather than
/// bidding negative prices.
fn default_bid(side: Side, i: usize) -> Bid {
    let offset = 10.0 * i as f64;
    match side {
        Side::Supply => Bid::new([
            BidBlock::from_parts(20.0 + offset, 50.0),
            BidBlock::from_parts(30.0 + offset, 75.0),
            BidBlock::from_parts(40.0 + offset, 100.0),
        ]),
        Side::Demand => Bid::new([
            BidBlock::from_parts((80.0 - offset).max(0.0), 50.0),
            BidBlock::from_parts((60.0 - offset).max(0.0), 75.0),
            BidBlock::from_parts((40.0 - offset).max(0.0), 100.0),
        ]),
    }
}

/// The ways a store operation can be rejected.
#[derive(Debug, PartialEq, Error)]
pub enum StoreError {
    /// Error when a participant count is outside 1..=[`MAX_PARTICIPANTS`].
    #[error("participant count must be between 1 and {MAX_PARTICIPANTS}, got {0}")]
    ParticipantCount(usize),
    /// Error when a bid targets a participant that is not active.
    #[error("no {0} participant with id {1}")]
    UnknownParticipant(Side, ParticipantId),
    /// Error when a block index is outside 1..=[`BLOCKS_PER_BID`].
    #[error("block index must be between 1 and {BLOCKS_PER_BID}, got {0}")]
    BlockIndex(usize),
    /// Error when a bid value fails validation.
    #[error(transparent)]
    Bid(#[from] BidError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_the_default_schedule() {
        let store = BidStore::new(3, 3).unwrap();
        assert_eq!(store.participant_count(Side::Supply), 3);

        let (id, bid) = store.bids(Side::Supply).nth(1).unwrap();
        assert_eq!(id, ParticipantId::new(2));
        assert_eq!(bid.blocks()[0].price(), 30.0);
        assert_eq!(bid.blocks()[0].quantity(), 50.0);

        let (_, bid) = store.bids(Side::Demand).nth(2).unwrap();
        assert_eq!(bid.blocks()[2].price(), 20.0);
    }

    #[test]
    fn rejects_out_of_range_counts() {
        assert_eq!(
            BidStore::new(0, 3).unwrap_err(),
            StoreError::ParticipantCount(0)
        );
        assert_eq!(
            BidStore::new(3, 21).unwrap_err(),
            StoreError::ParticipantCount(21)
        );
    }

    #[test]
    fn shrinking_drops_highest_ids_and_growing_reseeds() {
        let mut store = BidStore::new(5, 1).unwrap();
        store.set_participant_count(Side::Supply, 2).unwrap();
        assert_eq!(store.participant_count(Side::Supply), 2);

        store.set_participant_count(Side::Supply, 3).unwrap();
        let (id, bid) = store.bids(Side::Supply).last().unwrap();
        assert_eq!(id, ParticipantId::new(3));
        assert_eq!(bid.blocks()[0].price(), 40.0);
    }

    #[test]
    fn set_bid_validates_at_the_boundary() {
        let mut store = BidStore::new(1, 1).unwrap();

        store
            .set_bid(Side::Supply, ParticipantId::new(1), 2, 12.5, 60.0)
            .unwrap();
        let (_, bid) = store.bids(Side::Supply).next().unwrap();
        assert_eq!(bid.blocks()[1].price(), 12.5);
        assert_eq!(bid.blocks()[1].quantity(), 60.0);

        assert_eq!(
            store
                .set_bid(Side::Supply, ParticipantId::new(1), 4, 1.0, 1.0)
                .unwrap_err(),
            StoreError::BlockIndex(4)
        );
        assert_eq!(
            store
                .set_bid(Side::Demand, ParticipantId::new(2), 1, 1.0, 1.0)
                .unwrap_err(),
            StoreError::UnknownParticipant(Side::Demand, ParticipantId::new(2))
        );
        assert_eq!(
            store
                .set_bid(Side::Supply, ParticipantId::new(1), 1, -1.0, 1.0)
                .unwrap_err(),
            StoreError::Bid(BidError::Negative)
        );
    }

    #[test]
    fn late_consumers_never_bid_negative() {
        let store = BidStore::new(1, 20).unwrap();
        for (_, bid) in store.bids(Side::Demand) {
            for block in bid.blocks() {
                assert!(block.price() >= 0.0);
            }
        }
    }
}
