use crate::WelfareReport;
use moc_core::models::ParticipantId;

/// Change in one participant's surplus between two clearings.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurplusDelta {
    /// The participant being compared.
    pub participant: ParticipantId,
    /// Alternative surplus minus baseline surplus.
    pub absolute: f64,
    /// The change relative to the baseline, in percent. `None` when the
    /// baseline surplus is zero: the ratio is undefined and must not leak
    /// out as ±inf or NaN.
    pub percent: Option<f64>,
}

/// A market-wide surplus total under both clearings.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurplusTotals {
    /// The total under the baseline clearing.
    pub baseline: f64,
    /// The total under the alternative clearing.
    pub alternative: f64,
    /// alternative − baseline.
    pub absolute: f64,
    /// Relative change in percent; `None` when the baseline is zero.
    pub percent: Option<f64>,
}

/// Side-by-side comparison of an alternative-price clearing against the
/// equilibrium baseline.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WelfareComparison {
    /// Per-generator surplus changes.
    pub generators: Vec<SurplusDelta>,
    /// Per-consumer surplus changes.
    pub consumers: Vec<SurplusDelta>,
    /// Producer surplus across all generators.
    pub producer_surplus: SurplusTotals,
    /// Consumer surplus across all consumers.
    pub consumer_surplus: SurplusTotals,
    /// Total market welfare.
    pub total_welfare: SurplusTotals,
}

/// Compares two welfare reports row by row.
///
/// Both reports must come from the same store so the rows line up by
/// participant and side.
pub fn compare(baseline: &WelfareReport, alternative: &WelfareReport) -> WelfareComparison {
    debug_assert_eq!(baseline.generators.len(), alternative.generators.len());
    debug_assert_eq!(baseline.consumers.len(), alternative.consumers.len());

    let generators = baseline
        .generators
        .iter()
        .zip(&alternative.generators)
        .map(|(base, alt)| delta(base.participant, base.surplus, alt.surplus))
        .collect();
    let consumers = baseline
        .consumers
        .iter()
        .zip(&alternative.consumers)
        .map(|(base, alt)| delta(base.participant, base.surplus, alt.surplus))
        .collect();

    WelfareComparison {
        generators,
        consumers,
        producer_surplus: totals(baseline.producer_surplus(), alternative.producer_surplus()),
        consumer_surplus: totals(baseline.consumer_surplus(), alternative.consumer_surplus()),
        total_welfare: totals(baseline.total_welfare(), alternative.total_welfare()),
    }
}

fn delta(participant: ParticipantId, baseline: f64, alternative: f64) -> SurplusDelta {
    let absolute = alternative - baseline;
    SurplusDelta {
        participant,
        absolute,
        percent: percent_change(baseline, absolute),
    }
}

fn totals(baseline: f64, alternative: f64) -> SurplusTotals {
    let absolute = alternative - baseline;
    SurplusTotals {
        baseline,
        alternative,
        absolute,
        percent: percent_change(baseline, absolute),
    }
}

fn percent_change(baseline: f64, absolute: f64) -> Option<f64> {
    (baseline != 0.0).then(|| absolute / baseline * 100.0)
}
