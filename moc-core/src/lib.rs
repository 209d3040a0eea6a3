#![warn(missing_docs)]
//! Domain models for merit-order electricity market clearing.
//!
//! This crate holds the data the clearing engine operates on: multi-block
//! bids, the session-owned [`models::BidStore`], and the step curves derived
//! from it. The models are primarily data structures with minimal business
//! logic; the clearing algorithms themselves live in `moc-solver`.

/// Core domain models for the market clearing system.
///
/// Everything here is a pure function of the bids currently in the store:
/// curves are rebuilt from scratch whenever bids change, never mutated in
/// place.
pub mod models;
