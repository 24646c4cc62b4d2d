// Path: crates/workflow/src/encode.rs

//! Canonical report encoding.
//!
//! The wire layout is the ABI encoding of `(bytes32, uint32, uint224)[]`:
//! one offset word, one length word, then three words per report. Encoding
//! is pure — identical input yields identical bytes — and range-checked:
//! a timestamp or price that does not fit its field fails the run instead
//! of being truncated.

use alloy_primitives::U256;
use por_types::error::EncodeError;
use por_types::report::{EncodedReport, ReconciledPrice};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Fixed-point scale of the published price: 18 decimal places.
const WEI_PER_UNIT: u64 = 1_000_000_000_000_000_000;

const WORD: usize = 32;

/// Number of bits the price field carries on the wire.
const PRICE_BITS: usize = 224;

/// Scales a reserve figure to 18 decimal places as an unsigned integer.
///
/// The decomposition is exact over the integer part; fractional digits past
/// the 18th are truncated toward zero. Negative figures are rejected.
pub fn scale_reserve(amount: Decimal) -> Result<U256, EncodeError> {
    let out_of_range = || EncodeError::ReserveOutOfRange {
        amount: amount.to_string(),
    };
    if amount.is_sign_negative() {
        return Err(out_of_range());
    }
    let units = amount.trunc().to_u128().ok_or_else(out_of_range)?;
    let fraction_wei = (amount.fract() * Decimal::from(WEI_PER_UNIT))
        .trunc()
        .to_u128()
        .ok_or_else(out_of_range)?;
    Ok(U256::from(units) * U256::from(WEI_PER_UNIT) + U256::from(fraction_wei))
}

/// Encodes reports into the canonical tuple-array layout.
///
/// A production run encodes exactly one report; the layout itself is
/// count-agnostic because every tuple field is static-width.
pub fn encode_reports(reports: &[ReconciledPrice]) -> Result<EncodedReport, EncodeError> {
    let mut out = Vec::with_capacity((2 + 3 * reports.len()) * WORD);
    push_word(&mut out, U256::from(WORD));
    push_word(&mut out, U256::from(reports.len()));
    for report in reports {
        let timestamp = u32::try_from(report.timestamp).map_err(|_| {
            EncodeError::TimestampOutOfRange {
                seconds: report.timestamp,
            }
        })?;
        if report.price.bit_len() > PRICE_BITS {
            return Err(EncodeError::PriceOutOfRange {
                price: report.price.to_string(),
            });
        }
        out.extend_from_slice(report.feed_id.as_bytes());
        push_word(&mut out, U256::from(timestamp));
        push_word(&mut out, report.price);
    }
    Ok(EncodedReport(out))
}

fn push_word(out: &mut Vec<u8>, word: U256) {
    out.extend_from_slice(&word.to_be_bytes::<WORD>());
}
