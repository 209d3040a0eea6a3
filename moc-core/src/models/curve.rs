use super::{Bid, ParticipantId, Side};

/// One step of a stacked bid curve.
///
/// Derived from a single bid block and immutable once built: curves are
/// recomputed from the store whenever bids change, never patched in place.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvePoint {
    /// Which side of the market this step belongs to.
    pub side: Side,
    /// The participant whose bid block produced this step.
    pub participant: ParticipantId,
    /// The marginal price of the block.
    pub price: f64,
    /// The quantity of the block.
    pub quantity: f64,
    /// Running total of quantity along the curve in sort order.
    pub cumulative: f64,
}

/// A step-wise aggregate bid curve for one side of the market.
///
/// Supply curves are sorted ascending by price (merit order), demand curves
/// descending by willingness to pay. Points with equal price remain separate
/// entries, keeping their relative submission order; there is no
/// deduplication.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepCurve {
    side: Side,
    points: Vec<CurvePoint>,
}

impl StepCurve {
    /// Expands each bid into one point per block, sorts by the side's merit
    /// order, and computes cumulative quantities by running sum.
    pub fn build<'a>(
        side: Side,
        bids: impl Iterator<Item = (ParticipantId, &'a Bid)>,
    ) -> Self {
        let mut points: Vec<CurvePoint> = bids
            .flat_map(|(participant, bid)| {
                bid.blocks().iter().map(move |block| CurvePoint {
                    side,
                    participant,
                    price: block.price(),
                    quantity: block.quantity(),
                    cumulative: 0.0,
                })
            })
            .collect();

        // Stable sort: ties keep submission order.
        match side {
            Side::Supply => points.sort_by(|a, b| a.price.total_cmp(&b.price)),
            Side::Demand => points.sort_by(|a, b| b.price.total_cmp(&a.price)),
        }

        let mut cumulative = 0.0;
        for point in &mut points {
            cumulative += point.quantity;
            point.cumulative = cumulative;
        }

        Self { side, points }
    }

    /// Which side of the market this curve aggregates.
    pub fn side(&self) -> Side {
        self.side
    }

    /// The curve's points in sort order.
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Total quantity achievable at the given price.
    ///
    /// For supply this sums blocks priced at or below `price` (everything
    /// willing to generate); for demand, blocks priced at or above it
    /// (everything willing to pay). Linear scan; the documented scale does
    /// not warrant more.
    pub fn quantity_at(&self, price: f64) -> f64 {
        self.points
            .iter()
            .filter(|point| match self.side {
                Side::Supply => point.price <= price,
                Side::Demand => point.price >= price,
            })
            .map(|point| point.quantity)
            .sum()
    }

    /// The sum of all block quantities on this curve.
    pub fn total_quantity(&self) -> f64 {
        self.points.last().map_or(0.0, |point| point.cumulative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BidStore;

    fn curves() -> (StepCurve, StepCurve) {
        let store = BidStore::from_bids(
            vec![Bid::from_values([(10.0, 50.0), (20.0, 50.0), (30.0, 50.0)]).unwrap()],
            vec![Bid::from_values([(35.0, 40.0), (25.0, 40.0), (15.0, 40.0)]).unwrap()],
        )
        .unwrap();
        (
            StepCurve::build(Side::Supply, store.bids(Side::Supply)),
            StepCurve::build(Side::Demand, store.bids(Side::Demand)),
        )
    }

    #[test]
    fn supply_sorts_ascending_with_running_sum() {
        let (supply, _) = curves();
        let prices: Vec<f64> = supply.points().iter().map(|p| p.price).collect();
        let cumulative: Vec<f64> = supply.points().iter().map(|p| p.cumulative).collect();
        assert_eq!(prices, vec![10.0, 20.0, 30.0]);
        assert_eq!(cumulative, vec![50.0, 100.0, 150.0]);
    }

    #[test]
    fn demand_sorts_descending_with_running_sum() {
        let (_, demand) = curves();
        let prices: Vec<f64> = demand.points().iter().map(|p| p.price).collect();
        let cumulative: Vec<f64> = demand.points().iter().map(|p| p.cumulative).collect();
        assert_eq!(prices, vec![35.0, 25.0, 15.0]);
        assert_eq!(cumulative, vec![40.0, 80.0, 120.0]);
    }

    #[test]
    fn cumulative_is_nondecreasing_and_totals_match() {
        let store = BidStore::new(4, 4).unwrap();
        for side in [Side::Supply, Side::Demand] {
            let curve = StepCurve::build(side, store.bids(side));
            let mut previous = 0.0;
            for point in curve.points() {
                assert!(point.cumulative >= previous);
                previous = point.cumulative;
            }
            let block_sum: f64 = store
                .bids(side)
                .map(|(_, bid)| bid.total_quantity())
                .sum();
            assert_eq!(curve.total_quantity(), block_sum);
        }
    }

    #[test]
    fn quantity_at_is_monotone_in_price() {
        let (supply, demand) = curves();
        let probes = [0.0, 5.0, 10.0, 17.5, 25.0, 30.0, 40.0];
        for pair in probes.windows(2) {
            assert!(supply.quantity_at(pair[0]) <= supply.quantity_at(pair[1]));
            assert!(demand.quantity_at(pair[0]) >= demand.quantity_at(pair[1]));
        }
        assert_eq!(supply.quantity_at(20.0), 100.0);
        assert_eq!(demand.quantity_at(20.0), 80.0);
    }

    #[test]
    fn equal_prices_stay_separate() {
        let store = BidStore::from_bids(
            vec![
                Bid::from_values([(10.0, 5.0), (10.0, 5.0), (20.0, 5.0)]).unwrap(),
                Bid::from_values([(10.0, 7.0), (15.0, 5.0), (20.0, 5.0)]).unwrap(),
            ],
            vec![Bid::from_values([(30.0, 10.0), (25.0, 10.0), (20.0, 10.0)]).unwrap()],
        )
        .unwrap();
        let supply = StepCurve::build(Side::Supply, store.bids(Side::Supply));
        let at_ten: Vec<_> = supply
            .points()
            .iter()
            .filter(|p| p.price == 10.0)
            .collect();
        assert_eq!(at_ten.len(), 3);
        // stable sort keeps participant 1's blocks ahead of participant 2's
        assert_eq!(at_ten[0].participant, ParticipantId::new(1));
        assert_eq!(at_ten[2].participant, ParticipantId::new(2));
    }
}
