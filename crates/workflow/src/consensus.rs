// Path: crates/workflow/src/consensus.rs

//! Per-field consensus reconciliation of reserve observations.
//!
//! Each field is reconciled on its own distribution — the timestamp median
//! and the reserve median are independent, not a joint statistic. The
//! aggregation is deterministic and order-independent: permuting the
//! observation list cannot change the result.

use chrono::{DateTime, Utc};
use por_types::error::EvidenceError;
use por_types::evidence::ReserveObservation;
use rust_decimal::Decimal;

/// The statically-known field-to-aggregator mapping.
///
/// Exactly the two reconciled fields are covered; new fields get a new
/// entry here, not a generic registry.
pub struct AggregationPolicy {
    /// Aggregates the per-node update instants, in unix milliseconds.
    pub last_updated: fn(Vec<i64>) -> i64,
    /// Aggregates the per-node reserve figures.
    pub total_reserve: fn(Vec<Decimal>) -> Decimal,
}

/// Median on both fields, the policy every production run uses.
pub const MEDIAN_BY_FIELD: AggregationPolicy = AggregationPolicy {
    last_updated: median_millis,
    total_reserve: median_reserve,
};

/// Merges the per-node observations into one agreed value per field.
/// Produced exactly once per run; an empty observation set is an error.
pub fn reconcile(
    observations: &[ReserveObservation],
    policy: &AggregationPolicy,
) -> Result<ReserveObservation, EvidenceError> {
    if observations.is_empty() {
        return Err(EvidenceError::NoObservations);
    }

    let millis = observations
        .iter()
        .map(|o| o.last_updated.timestamp_millis())
        .collect();
    let reserves = observations.iter().map(|o| o.total_reserve).collect();

    let agreed_millis = (policy.last_updated)(millis);
    let last_updated = DateTime::<Utc>::from_timestamp_millis(agreed_millis).ok_or_else(|| {
        EvidenceError::MalformedResponse(format!(
            "reconciled timestamp {agreed_millis}ms is out of range"
        ))
    })?;

    Ok(ReserveObservation {
        last_updated,
        total_reserve: (policy.total_reserve)(reserves),
    })
}

/// Median of unix-millisecond instants. Even counts take the midpoint of
/// the two central values (standard median definition).
fn median_millis(mut values: Vec<i64>) -> i64 {
    values.sort_unstable();
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        let low = values[n / 2 - 1];
        let high = values[n / 2];
        low + (high - low) / 2
    }
}

/// Median of reserve figures, mean of the two central values when even.
fn median_reserve(mut values: Vec<Decimal>) -> Decimal {
    values.sort_unstable();
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        let low = values[n / 2 - 1];
        let high = values[n / 2];
        low + (high - low) / Decimal::TWO
    }
}
