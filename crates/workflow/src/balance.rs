// Path: crates/workflow/src/balance.rs

//! On-chain balance evidence collection.
//!
//! Two independent views are gathered per run: a direct balance query at the
//! chain's current view, and a batched read through the balance reader
//! contract pinned to the last finalized block so any auditor re-executing
//! the read later sees the same value.

use alloy_primitives::{keccak256, Address, U256};
use por_api::chain::{BlockSelector, CallMsg, ChainReader};
use por_types::error::EvidenceError;
use por_types::evidence::BalanceEvidence;

/// Solidity signature of the batched balance reader function.
const GET_NATIVE_BALANCES: &str = "getNativeBalances(address[])";

const WORD: usize = 32;

/// Collects both balance attestations, aborting on the first failure.
/// Balances are not optional inputs: any chain error is fatal for the run.
pub async fn collect_balance_evidence(
    chain: &dyn ChainReader,
    address_one: Address,
    address_two: Address,
    balance_reader: Address,
) -> Result<BalanceEvidence, EvidenceError> {
    let balance_one =
        chain
            .balance_at(address_one)
            .await
            .map_err(|e| EvidenceError::ChainQuery {
                address: address_one.to_string(),
                reason: e.to_string(),
            })?;
    tracing::info!(
        address = %address_one,
        balance = %balance_one,
        "got on-chain balance with direct query"
    );

    let call = CallMsg {
        to: balance_reader,
        data: pack_get_native_balances(&[address_two]),
    };
    let raw = chain
        .call_contract(call, BlockSelector::Finalized)
        .await
        .map_err(|e| EvidenceError::ChainQuery {
            address: balance_reader.to_string(),
            reason: e.to_string(),
        })?;
    tracing::info!(output = %hex::encode(&raw), "got raw contract call output");

    let balances = unpack_balance_list(&raw).map_err(|reason| EvidenceError::ChainQuery {
        address: balance_reader.to_string(),
        reason,
    })?;
    // Batching exists for future multi-address reads; this run consumes
    // exactly index 0.
    let balance_two = balances
        .first()
        .copied()
        .ok_or_else(|| EvidenceError::EmptyResult {
            contract: balance_reader.to_string(),
        })?;
    tracing::info!(
        address = %address_two,
        balance = %balance_two,
        "read on-chain balance from contract"
    );

    Ok(BalanceEvidence {
        address_one,
        balance_one,
        address_two,
        balance_two,
    })
}

/// Packs calldata for `getNativeBalances(address[])`.
fn pack_get_native_balances(addresses: &[Address]) -> Vec<u8> {
    let selector = keccak256(GET_NATIVE_BALANCES.as_bytes());
    let mut data = selector[..4].to_vec();
    // One dynamic argument: the offset to the array, then length, then the
    // addresses left-padded into full words.
    data.extend_from_slice(&U256::from(WORD).to_be_bytes::<WORD>());
    data.extend_from_slice(&U256::from(addresses.len()).to_be_bytes::<WORD>());
    for address in addresses {
        let mut word = [0u8; WORD];
        word[12..].copy_from_slice(address.as_slice());
        data.extend_from_slice(&word);
    }
    data
}

/// Unpacks a `uint256[]` return value.
fn unpack_balance_list(raw: &[u8]) -> Result<Vec<U256>, String> {
    let offset = usize::try_from(read_word(raw, 0)?)
        .map_err(|_| "array offset exceeds return data".to_string())?;
    if offset % WORD != 0 {
        return Err(format!("misaligned array offset {offset}"));
    }
    let base = offset / WORD;
    let len = usize::try_from(read_word(raw, base)?)
        .map_err(|_| "array length exceeds return data".to_string())?;
    let mut balances = Vec::with_capacity(len);
    for i in 0..len {
        balances.push(read_word(raw, base + 1 + i)?);
    }
    Ok(balances)
}

fn read_word(raw: &[u8], index: usize) -> Result<U256, String> {
    let start = index * WORD;
    raw.get(start..start + WORD)
        .map(U256::from_be_slice)
        .ok_or_else(|| format!("return data truncated at word {index}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn encode_balance_list(balances: &[U256]) -> Vec<u8> {
        let mut data = U256::from(WORD).to_be_bytes::<WORD>().to_vec();
        data.extend_from_slice(&U256::from(balances.len()).to_be_bytes::<WORD>());
        for balance in balances {
            data.extend_from_slice(&balance.to_be_bytes::<WORD>());
        }
        data
    }

    #[test]
    fn calldata_carries_the_selector_and_one_address() {
        let address = Address::from_str("0x2222222222222222222222222222222222222222").unwrap();
        let data = pack_get_native_balances(&[address]);

        assert_eq!(&data[..4], &keccak256(GET_NATIVE_BALANCES.as_bytes())[..4]);
        assert_eq!(data.len(), 4 + 3 * WORD);
        // Offset word, then a one-element array.
        assert_eq!(U256::from_be_slice(&data[4..36]), U256::from(WORD));
        assert_eq!(U256::from_be_slice(&data[36..68]), U256::from(1));
        assert_eq!(&data[68 + 12..], address.as_slice());
    }

    #[test]
    fn unpacking_inverts_the_return_layout() {
        let balances = vec![U256::from(7u64), U256::MAX, U256::ZERO];
        let decoded = unpack_balance_list(&encode_balance_list(&balances)).unwrap();
        assert_eq!(decoded, balances);
    }

    #[test]
    fn unpacking_rejects_truncated_data() {
        let mut data = encode_balance_list(&[U256::from(7u64)]);
        data.truncate(data.len() - 1);
        assert!(unpack_balance_list(&data).is_err());
        assert!(unpack_balance_list(&[]).is_err());
    }

    #[test]
    fn an_empty_list_decodes_to_no_balances() {
        let decoded = unpack_balance_list(&encode_balance_list(&[])).unwrap();
        assert!(decoded.is_empty());
    }
}
