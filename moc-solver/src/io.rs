use crate::{
    ConstrainedWelfare, Equilibrium, NoEquilibrium, WelfareComparison, WelfareReport, compare,
    compute_equilibrium, compute_welfare, compute_welfare_at_price,
};
use moc_core::models::{Bid, BidStore, StoreError};
use serde::{Deserialize, Serialize};

/// A representation of an auction: every participant's three-block bid.
///
/// Ids are assigned 1..=n in list order on each side, matching the store's
/// convention. Deserialization validates every block, so a parsed auction is
/// always well-formed.
#[derive(Debug, Serialize, Deserialize)]
pub struct Auction {
    /// The generator (supply) bids.
    pub generators: Vec<Bid>,
    /// The consumer (demand) bids.
    pub consumers: Vec<Bid>,
}

/// The result of clearing an auction at its equilibrium.
#[derive(Debug, Serialize, Deserialize)]
pub struct Outcome {
    /// The market-clearing price and quantity.
    pub equilibrium: Equilibrium,
    /// The per-participant settlement at the equilibrium.
    pub welfare: WelfareReport,
}

/// The result of settling an auction at an alternative market price.
#[derive(Debug, Serialize, Deserialize)]
pub struct Evaluation {
    /// The equilibrium the alternative is measured against.
    pub equilibrium: Equilibrium,
    /// The alternative market price.
    pub market_price: f64,
    /// The constrained quantity available at the alternative price.
    pub total_quantity: f64,
    /// The per-participant settlement at the alternative price.
    pub welfare: WelfareReport,
    /// Row-by-row surplus changes against the equilibrium baseline.
    pub comparison: WelfareComparison,
}

/// The ways solving an auction document can fail.
#[derive(Debug, thiserror::Error)]
pub enum SolveError {
    /// The bid lists could not be loaded into a store.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The curves never cross, so there is nothing to settle.
    #[error(transparent)]
    NoEquilibrium(#[from] NoEquilibrium),
}

impl Auction {
    /// Loads the bids into a session store.
    pub fn into_store(self) -> Result<BidStore, StoreError> {
        BidStore::from_bids(self.generators, self.consumers)
    }

    /// Clears the auction and settles welfare at the equilibrium.
    pub fn solve(self) -> Result<Outcome, SolveError> {
        let store = self.into_store()?;
        let equilibrium = compute_equilibrium(&store)?;
        let welfare = compute_welfare(&store, equilibrium.price, equilibrium.quantity);
        Ok(Outcome {
            equilibrium,
            welfare,
        })
    }

    /// Settles welfare at an alternative market price and compares it
    /// against the equilibrium baseline.
    pub fn evaluate(self, market_price: f64) -> Result<Evaluation, SolveError> {
        let store = self.into_store()?;
        let equilibrium = compute_equilibrium(&store)?;
        let baseline = compute_welfare(&store, equilibrium.price, equilibrium.quantity);
        let ConstrainedWelfare {
            report,
            total_quantity,
        } = compute_welfare_at_price(&store, market_price, equilibrium);
        let comparison = compare(&baseline, &report);
        Ok(Evaluation {
            equilibrium,
            market_price,
            total_quantity,
            welfare: report,
            comparison,
        })
    }
}
