use moc_core::models::{BidStore, Side, StepCurve};
use tracing::{Level, event};

/// The market-clearing price/quantity pair.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equilibrium {
    /// The clearing price.
    pub price: f64,
    /// The cleared quantity: min(supply, demand) at the clearing price.
    pub quantity: f64,
}

/// Returned when the candidate-price scan completes without cumulative
/// supply ever covering cumulative demand.
///
/// This is a genuine failure mode (e.g. every offer priced above every bid):
/// callers must refuse to settle welfare rather than format a bogus price.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("supply never meets demand over the bid price range")]
pub struct NoEquilibrium;

/// Builds both step curves from the current bid state.
pub fn build_curves(store: &BidStore) -> (StepCurve, StepCurve) {
    (
        StepCurve::build(Side::Supply, store.bids(Side::Supply)),
        StepCurve::build(Side::Demand, store.bids(Side::Demand)),
    )
}

/// Clears the market from the current bid state.
pub fn compute_equilibrium(store: &BidStore) -> Result<Equilibrium, NoEquilibrium> {
    let (supply, demand) = build_curves(store);
    find_equilibrium(&supply, &demand)
}

/// Finds the intersection of the two step curves.
///
/// Scans the union of all distinct bid prices ascending, recomputing total
/// supply and demand at each candidate from scratch (O(n²), fine at ≤120
/// points). The first candidate where supply covers demand clears the
/// market; if the previous candidate had already crossed, the curves overlap
/// across a vertical jump and the price is the midpoint of the two
/// candidates. Either way the cleared quantity is min(supply, demand) at the
/// crossing candidate.
pub fn find_equilibrium(
    supply: &StepCurve,
    demand: &StepCurve,
) -> Result<Equilibrium, NoEquilibrium> {
    let mut candidates: Vec<f64> = supply
        .points()
        .iter()
        .chain(demand.points())
        .map(|point| point.price)
        .collect();
    candidates.sort_by(f64::total_cmp);
    candidates.dedup();

    // (price, supplied, demanded) at the previous candidate
    let mut previous: Option<(f64, f64, f64)> = None;

    for candidate in candidates {
        let supplied = supply.quantity_at(candidate);
        let demanded = demand.quantity_at(candidate);

        if supplied >= demanded {
            let price = match previous {
                Some((prev, s, d)) if s >= d => (candidate + prev) / 2.0,
                _ => candidate,
            };
            let cleared = Equilibrium {
                price,
                quantity: supplied.min(demanded),
            };
            event!(
                Level::DEBUG,
                price = cleared.price,
                quantity = cleared.quantity,
                "market cleared"
            );
            return Ok(cleared);
        }

        previous = Some((candidate, supplied, demanded));
    }

    Err(NoEquilibrium)
}
