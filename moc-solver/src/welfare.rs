use crate::allocation::{merit_allocation, own_block_valuation};
use crate::ration::distribute_equally;
use crate::{Equilibrium, build_curves};
use moc_core::models::{BidStore, CurvePoint, ParticipantId, Side};

/// Per-generator settlement at a cleared price.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProducerWelfare {
    /// The generator this row settles.
    pub participant: ParticipantId,
    /// Quantity dispatched.
    pub quantity: f64,
    /// Receipts at the market price.
    pub revenue: f64,
    /// Production cost of the dispatched blocks.
    pub cost: f64,
    /// revenue − cost.
    pub surplus: f64,
}

/// Per-consumer settlement at a cleared price.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumerWelfare {
    /// The consumer this row settles.
    pub participant: ParticipantId,
    /// Quantity served.
    pub quantity: f64,
    /// Bid-side value of the served blocks.
    pub utility: f64,
    /// Payment at the market price.
    pub cost: f64,
    /// utility − cost.
    pub surplus: f64,
}

/// Welfare rows for both sides of the market, one row per configured
/// participant in id order (participants allocated nothing still get a zero
/// row).
///
/// Reports are recomputed from scratch on every clearing request and never
/// persisted; two calls with identical inputs yield identical reports.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WelfareReport {
    /// One row per generator.
    pub generators: Vec<ProducerWelfare>,
    /// One row per consumer.
    pub consumers: Vec<ConsumerWelfare>,
}

impl WelfareReport {
    /// Total producer surplus across all generators.
    pub fn producer_surplus(&self) -> f64 {
        self.generators.iter().map(|row| row.surplus).sum()
    }

    /// Total consumer surplus across all consumers.
    pub fn consumer_surplus(&self) -> f64 {
        self.consumers.iter().map(|row| row.surplus).sum()
    }

    /// Total market welfare: producer plus consumer surplus.
    pub fn total_welfare(&self) -> f64 {
        self.producer_surplus() + self.consumer_surplus()
    }
}

/// Settles welfare at the cleared (price, quantity) by merit order.
///
/// The clearing quantity is dispatched to generators cheapest-first and to
/// consumers highest-willingness-first, ties broken by participant id. Total
/// quantity on each side equals the clearing quantity (up to floating-point
/// rounding) and no block is dispatched beyond its own quantity.
pub fn compute_welfare(store: &BidStore, price: f64, quantity: f64) -> WelfareReport {
    let (supply, demand) = build_curves(store);

    let generator_allocations = merit_allocation(&supply, quantity);
    let consumer_allocations = merit_allocation(&demand, quantity);

    let generators = store
        .bids(Side::Supply)
        .map(|(participant, _)| {
            let allocation = generator_allocations
                .get(&participant)
                .copied()
                .unwrap_or_default();
            let revenue = price * allocation.quantity;
            ProducerWelfare {
                participant,
                quantity: allocation.quantity,
                revenue,
                cost: allocation.valuation,
                surplus: revenue - allocation.valuation,
            }
        })
        .collect();

    let consumers = store
        .bids(Side::Demand)
        .map(|(participant, _)| {
            let allocation = consumer_allocations
                .get(&participant)
                .copied()
                .unwrap_or_default();
            let cost = price * allocation.quantity;
            ConsumerWelfare {
                participant,
                quantity: allocation.quantity,
                utility: allocation.valuation,
                cost,
                surplus: allocation.valuation - cost,
            }
        })
        .collect();

    WelfareReport {
        generators,
        consumers,
    }
}

/// A welfare report settled at a non-equilibrium price, together with the
/// constrained quantity that the binding side made available.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstrainedWelfare {
    /// The per-participant settlement rows.
    pub report: WelfareReport,
    /// The quantity available at the market price on the binding side.
    pub total_quantity: f64,
}

/// Settles welfare at an arbitrary market price.
///
/// At the equilibrium price this delegates to [`compute_welfare`], so the
/// two paths agree exactly. Away from it, the short side of the market fixes
/// a single shared target: demand caps the market above equilibrium, supply
/// below. Eligible blocks (supply priced at or below the market price,
/// demand at or above it) are then rationed in priority order, splitting the
/// remainder equally within the tied price group where quantity runs out,
/// and each participant's cost or utility is recomputed from their own
/// blocks in merit order.
pub fn compute_welfare_at_price(
    store: &BidStore,
    market_price: f64,
    equilibrium: Equilibrium,
) -> ConstrainedWelfare {
    if market_price == equilibrium.price {
        return ConstrainedWelfare {
            report: compute_welfare(store, equilibrium.price, equilibrium.quantity),
            total_quantity: equilibrium.quantity,
        };
    }

    let (supply, demand) = build_curves(store);

    let available = if market_price > equilibrium.price {
        demand.quantity_at(market_price)
    } else {
        supply.quantity_at(market_price)
    };

    let eligible_supply: Vec<CurvePoint> = supply
        .points()
        .iter()
        .copied()
        .filter(|point| point.price <= market_price)
        .collect();
    let eligible_demand: Vec<CurvePoint> = demand
        .points()
        .iter()
        .copied()
        .filter(|point| point.price >= market_price)
        .collect();

    let generator_quantities = distribute_equally(Side::Supply, &eligible_supply, available);
    let consumer_quantities = distribute_equally(Side::Demand, &eligible_demand, available);

    let generators = store
        .bids(Side::Supply)
        .map(|(participant, bid)| {
            let quantity = generator_quantities
                .get(&participant)
                .copied()
                .unwrap_or(0.0);
            let cost = own_block_valuation(Side::Supply, bid, quantity);
            let revenue = market_price * quantity;
            ProducerWelfare {
                participant,
                quantity,
                revenue,
                cost,
                surplus: revenue - cost,
            }
        })
        .collect();

    let consumers = store
        .bids(Side::Demand)
        .map(|(participant, bid)| {
            let quantity = consumer_quantities
                .get(&participant)
                .copied()
                .unwrap_or(0.0);
            let utility = own_block_valuation(Side::Demand, bid, quantity);
            let cost = market_price * quantity;
            ConsumerWelfare {
                participant,
                quantity,
                utility,
                cost,
                surplus: utility - cost,
            }
        })
        .collect();

    ConstrainedWelfare {
        report: WelfareReport {
            generators,
            consumers,
        },
        total_quantity: available,
    }
}
