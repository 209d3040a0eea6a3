/// Which side of the market a participant trades on.
///
/// Supply belongs to generators, demand to consumers. Every derived curve
/// point carries its side explicitly, so downstream code resolves side by
/// pattern matching rather than by probing for a key.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Side {
    /// The generator (offer) side, dispatched cheapest-first.
    Supply,
    /// The consumer (bid) side, served highest-willingness-first.
    Demand,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Supply => write!(f, "supply"),
            Side::Demand => write!(f, "demand"),
        }
    }
}

/// A participant id newtype.
///
/// Ids are positive and unique within their side; the same number may appear
/// on both sides (generator 1 and consumer 1 are distinct participants).
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[repr(transparent)]
pub struct ParticipantId(u32);

impl ParticipantId {
    /// Wraps a raw id.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ParticipantId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
