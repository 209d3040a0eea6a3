use thiserror::Error;

/// The number of (price, quantity) blocks in every bid.
pub const BLOCKS_PER_BID: usize = 3;

/// One marginal (price, quantity) increment of a participant's bid.
///
/// The price is the marginal offer (generator) or willingness to pay
/// (consumer) for this increment of quantity, not a total. Both coordinates
/// must be finite and non-negative; construction enforces this, and the serde
/// representation round-trips through a validating DTO so deserialized blocks
/// carry the same guarantee.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "BidBlockDto", into = "BidBlockDto")
)]
pub struct BidBlock {
    price: f64,
    quantity: f64,
}

impl BidBlock {
    /// Creates a block, validating that both coordinates are finite and
    /// non-negative.
    pub fn new(price: f64, quantity: f64) -> Result<Self, BidError> {
        if price.is_nan() || quantity.is_nan() {
            Err(BidError::NaN)
        } else if price.is_infinite() || quantity.is_infinite() {
            Err(BidError::Infinite)
        } else if price < 0.0 || quantity < 0.0 {
            Err(BidError::Negative)
        } else {
            Ok(Self { price, quantity })
        }
    }

    /// Creates a block from values the caller knows to be valid.
    ///
    /// Crate-internal: used for the default bid schedule, whose constants
    /// are finite and non-negative by construction.
    pub(crate) const fn from_parts(price: f64, quantity: f64) -> Self {
        Self { price, quantity }
    }

    /// The marginal price of this increment.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// The quantity offered or requested at this price.
    pub fn quantity(&self) -> f64 {
        self.quantity
    }
}

/// DTO to ensure that we always validate when we deserialize from an
/// untrusted source.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug)]
pub struct BidBlockDto {
    /// The marginal price of this increment.
    pub price: f64,
    /// The quantity offered or requested at this price.
    pub quantity: f64,
}

impl From<BidBlock> for BidBlockDto {
    fn from(value: BidBlock) -> Self {
        Self {
            price: value.price,
            quantity: value.quantity,
        }
    }
}

impl TryFrom<BidBlockDto> for BidBlock {
    type Error = BidError;

    fn try_from(value: BidBlockDto) -> Result<Self, Self::Error> {
        BidBlock::new(value.price, value.quantity)
    }
}

/// One participant's complete bid: exactly [`BLOCKS_PER_BID`] blocks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Bid([BidBlock; BLOCKS_PER_BID]);

impl Bid {
    /// Assembles a bid from already-validated blocks.
    pub fn new(blocks: [BidBlock; BLOCKS_PER_BID]) -> Self {
        Self(blocks)
    }

    /// Builds a bid from raw (price, quantity) pairs, validating each.
    pub fn from_values(values: [(f64, f64); BLOCKS_PER_BID]) -> Result<Self, BidError> {
        let mut blocks = [BidBlock::default(); BLOCKS_PER_BID];
        for (slot, (price, quantity)) in blocks.iter_mut().zip(values) {
            *slot = BidBlock::new(price, quantity)?;
        }
        Ok(Self(blocks))
    }

    /// The blocks of this bid, in submission order.
    pub fn blocks(&self) -> &[BidBlock; BLOCKS_PER_BID] {
        &self.0
    }

    /// Replaces one block (zero-based index).
    pub(crate) fn set_block(&mut self, index: usize, block: BidBlock) {
        self.0[index] = block;
    }

    /// Total quantity across all blocks.
    pub fn total_quantity(&self) -> f64 {
        self.0.iter().map(BidBlock::quantity).sum()
    }
}

/// The various ways in which a bid value can be invalid.
#[derive(Debug, PartialEq, Error)]
pub enum BidError {
    /// Error when a price or quantity is NaN.
    #[error("NaN value encountered")]
    NaN,
    /// Error when a price or quantity is infinite.
    #[error("prices and quantities cannot be infinite")]
    Infinite,
    /// Error when a price or quantity is negative.
    #[error("prices and quantities cannot be negative")]
    Negative,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_nan_and_infinite_values() {
        assert_eq!(BidBlock::new(f64::NAN, 1.0).unwrap_err(), BidError::NaN);
        assert_eq!(BidBlock::new(1.0, f64::NAN).unwrap_err(), BidError::NaN);
        assert_eq!(
            BidBlock::new(f64::INFINITY, 1.0).unwrap_err(),
            BidError::Infinite
        );
        assert_eq!(
            BidBlock::new(1.0, f64::NEG_INFINITY).unwrap_err(),
            BidError::Infinite
        );
    }

    #[test]
    fn rejects_negative_values() {
        assert_eq!(BidBlock::new(-1.0, 1.0).unwrap_err(), BidError::Negative);
        assert_eq!(BidBlock::new(1.0, -1.0).unwrap_err(), BidError::Negative);
    }

    #[test]
    fn zero_is_valid() {
        assert!(BidBlock::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn bid_from_values_propagates_the_first_error() {
        assert_eq!(
            Bid::from_values([(10.0, 50.0), (-20.0, 50.0), (30.0, 50.0)]).unwrap_err(),
            BidError::Negative
        );
    }

    #[test]
    fn serde_round_trip_validates() {
        let bid = Bid::from_values([(10.0, 50.0), (20.0, 75.0), (30.0, 100.0)]).unwrap();
        let json = serde_json::to_string(&bid).unwrap();
        let back: Bid = serde_json::from_str(&json).unwrap();
        assert_eq!(bid, back);

        let invalid = r#"[{"price":-1.0,"quantity":5.0},{"price":1.0,"quantity":5.0},{"price":2.0,"quantity":5.0}]"#;
        assert!(serde_json::from_str::<Bid>(invalid).is_err());
    }
}
