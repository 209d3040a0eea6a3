use crate::Map;
use moc_core::models::{Bid, ParticipantId, Side, StepCurve};

/// Quantity granted to one participant plus the bid-side value of the
/// granted blocks (production cost for supply, utility for demand).
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Allocation {
    pub quantity: f64,
    pub valuation: f64,
}

/// Merit-order fill of `target` quantity across a curve's points.
///
/// Points are visited cheapest-first for supply and highest-willingness-first
/// for demand, ties broken by ascending participant id so the result is
/// deterministic. Each point contributes at most its own block quantity.
pub(crate) fn merit_allocation(curve: &StepCurve, target: f64) -> Map<ParticipantId, Allocation> {
    let mut points = curve.points().to_vec();
    match curve.side() {
        Side::Supply => points.sort_by(|a, b| {
            a.price
                .total_cmp(&b.price)
                .then(a.participant.cmp(&b.participant))
        }),
        Side::Demand => points.sort_by(|a, b| {
            b.price
                .total_cmp(&a.price)
                .then(a.participant.cmp(&b.participant))
        }),
    }

    let mut allocations: Map<ParticipantId, Allocation> = Map::default();
    let mut remaining = target;

    for point in points {
        if remaining <= 0.0 {
            break;
        }
        let granted = point.quantity.min(remaining);
        let entry = allocations.entry(point.participant).or_default();
        entry.quantity += granted;
        entry.valuation += granted * point.price;
        remaining -= granted;
    }

    allocations
}

/// Bid-side value of filling `quantity` from one participant's own blocks in
/// merit order: cheapest blocks first for a generator's cost, most-valued
/// first for a consumer's utility.
pub(crate) fn own_block_valuation(side: Side, bid: &Bid, quantity: f64) -> f64 {
    let mut blocks = *bid.blocks();
    match side {
        Side::Supply => blocks.sort_by(|a, b| a.price().total_cmp(&b.price())),
        Side::Demand => blocks.sort_by(|a, b| b.price().total_cmp(&a.price())),
    }

    let mut remaining = quantity;
    let mut value = 0.0;
    for block in blocks {
        if remaining <= 0.0 {
            break;
        }
        let granted = block.quantity().min(remaining);
        value += granted * block.price();
        remaining -= granted;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use moc_core::models::BidStore;

    #[test]
    fn merit_fill_respects_block_capacity_and_ties_on_id() {
        let store = BidStore::from_bids(
            vec![
                Bid::from_values([(10.0, 30.0), (20.0, 30.0), (30.0, 30.0)]).unwrap(),
                Bid::from_values([(10.0, 30.0), (25.0, 30.0), (35.0, 30.0)]).unwrap(),
            ],
            vec![Bid::from_values([(50.0, 50.0), (40.0, 50.0), (30.0, 50.0)]).unwrap()],
        )
        .unwrap();
        let supply = StepCurve::build(Side::Supply, store.bids(Side::Supply));

        let allocations = merit_allocation(&supply, 70.0);
        let one = allocations[&ParticipantId::new(1)];
        let two = allocations[&ParticipantId::new(2)];

        // 30 + 30 at price 10 (id order), then 10 from participant 1's 20-block
        assert_eq!(one.quantity, 40.0);
        assert_eq!(one.valuation, 30.0 * 10.0 + 10.0 * 20.0);
        assert_eq!(two.quantity, 30.0);
        assert_eq!(two.valuation, 300.0);
    }

    #[test]
    fn own_block_valuation_walks_merit_order() {
        let bid = Bid::from_values([(30.0, 10.0), (10.0, 10.0), (20.0, 10.0)]).unwrap();
        // cheapest-first: 10 @ 10, then 5 @ 20
        assert_eq!(own_block_valuation(Side::Supply, &bid, 15.0), 200.0);
        // most-valued-first: 10 @ 30, then 5 @ 20
        assert_eq!(own_block_valuation(Side::Demand, &bid, 15.0), 400.0);
    }

    #[test]
    fn zero_target_allocates_nothing() {
        let bid = Bid::from_values([(10.0, 10.0), (20.0, 10.0), (30.0, 10.0)]).unwrap();
        assert_eq!(own_block_valuation(Side::Supply, &bid, 0.0), 0.0);
    }
}
