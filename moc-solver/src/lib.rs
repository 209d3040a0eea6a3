/**
 * The market-clearing engine: equilibrium search over step-wise bid curves
 * and per-participant welfare allocation.
 */
mod equilibrium;
pub use equilibrium::*;

mod welfare;
pub use welfare::*;

mod compare;
pub use compare::*;

// Allocation internals: merit-order fills and equal-share rationing.
mod allocation;
mod ration;

/// Optional JSON document types for file-based auctions.
#[cfg(feature = "io")]
pub mod io;

// We use non-std collections here for their ordering semantics
pub(crate) type Map<K, V> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;
