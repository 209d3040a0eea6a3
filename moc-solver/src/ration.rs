use crate::Map;
use moc_core::models::{CurvePoint, ParticipantId, Side};

/// Equal-share rationing of a constrained quantity among eligible points.
///
/// Points are grouped by exact price and the groups visited in priority
/// order: ascending price for supply (cheapest eligible first), descending
/// for demand (highest willingness first). A group whose total request fits
/// within the remaining quantity is granted in full; the first group that
/// does not splits the remainder equally per point, capped by each point's
/// own quantity, and allocation stops there. A capped point's unused share
/// is not redistributed.
pub(crate) fn distribute_equally(
    side: Side,
    eligible: &[CurvePoint],
    available: f64,
) -> Map<ParticipantId, f64> {
    let mut points = eligible.to_vec();
    match side {
        Side::Supply => points.sort_by(|a, b| a.price.total_cmp(&b.price)),
        Side::Demand => points.sort_by(|a, b| b.price.total_cmp(&a.price)),
    }

    let mut allocated: Map<ParticipantId, f64> = Map::default();
    let mut remaining = available;

    for group in points.chunk_by(|a, b| a.price == b.price) {
        if remaining <= 0.0 {
            break;
        }
        let requested: f64 = group.iter().map(|point| point.quantity).sum();
        if requested <= remaining {
            for point in group {
                *allocated.entry(point.participant).or_insert(0.0) += point.quantity;
            }
            remaining -= requested;
        } else {
            let share = remaining / group.len() as f64;
            for point in group {
                *allocated.entry(point.participant).or_insert(0.0) += point.quantity.min(share);
            }
            remaining = 0.0;
        }
    }

    allocated
}
