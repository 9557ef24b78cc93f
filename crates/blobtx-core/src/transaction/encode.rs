//! Encoding for blob transactions (type 0x03).
//!
//! Signing:  `0x03 || rlp([chain_id, nonce, max_priority_fee_per_gas, max_fee_per_gas,
//!           gas_limit, to, value, data, access_list, max_fee_per_blob_gas, blob_versioned_hashes])`
//! Payload:  `0x03 || rlp([...signing fields, y_parity, r, s])`
//! Wire:     `0x03 || rlp([[...payload fields], wrapper_version, [blob], [commitment], [proof]])`

use alloy_primitives::{B256, U256};

use crate::{
    hash::{Hasher, Keccak256},
    rlp::{encode_list, RlpItem},
    sidecar::{BlobSidecar, WRAPPER_VERSION},
};

use super::{BlobTransaction, TransactionError};

/// EIP-2718 transaction type for blob transactions.
pub const BLOB_TX_TYPE: u8 = 0x03;

/// Number of fields covered by the signature.
pub const SIGNING_FIELD_COUNT: usize = 11;

/// Signing fields plus `y_parity, r, s`.
pub const PAYLOAD_FIELD_COUNT: usize = SIGNING_FIELD_COUNT + 3;

/// `[payload, wrapper_version, blobs, commitments, cell_proofs]`.
pub const WIRE_FIELD_COUNT: usize = 5;

pub(crate) fn signing_fields(tx: &BlobTransaction) -> Vec<RlpItem> {
    let mut fields = Vec::with_capacity(PAYLOAD_FIELD_COUNT);
    fields.push(tx.chain_id.into());
    fields.push(RlpItem::uint(tx.nonce));
    fields.push(tx.max_priority_fee_per_gas.into());
    fields.push(tx.max_fee_per_gas.into());
    fields.push(RlpItem::uint(tx.gas_limit));
    fields.push(tx.to.into());
    fields.push(tx.value.into());
    fields.push(tx.input.clone().into());
    fields.push(RlpItem::List(tx.access_list.iter().map(|item| item.to_rlp_item()).collect()));
    fields.push(tx.max_fee_per_blob_gas.into());
    fields.push(RlpItem::List(tx.blob_versioned_hashes.iter().map(|h| RlpItem::from(*h)).collect()));
    debug_assert_eq!(fields.len(), SIGNING_FIELD_COUNT);
    fields
}

/// Signing fields extended with the signature. Never built independently, so
/// the signed payload always starts with exactly the signed-over fields.
pub(crate) fn payload_fields(tx: &BlobTransaction) -> Result<Vec<RlpItem>, TransactionError> {
    let signature = tx.signature().ok_or(TransactionError::Unsigned)?;

    let mut fields = signing_fields(tx);
    fields.push(RlpItem::Uint(U256::from(signature.v())));
    fields.push(signature.r().into());
    fields.push(signature.s().into());
    debug_assert_eq!(fields.len(), PAYLOAD_FIELD_COUNT);
    Ok(fields)
}

/// Encode the signing payload into the provided buffer.
///
/// Any attached signature is ignored.
pub fn encode_signing_payload(tx: &BlobTransaction, out: &mut Vec<u8>) {
    out.push(BLOB_TX_TYPE);
    encode_list(&signing_fields(tx), out);
}

/// Compute the signing digest with the given hash function.
pub fn signature_hash_with<H: Hasher + ?Sized>(tx: &BlobTransaction, hasher: &H) -> B256 {
    let mut buf = Vec::with_capacity(256);
    encode_signing_payload(tx, &mut buf);
    hasher.hash(&buf)
}

/// Encode the signed payload (no sidecar) into the provided buffer.
pub fn encode_payload(tx: &BlobTransaction, out: &mut Vec<u8>) -> Result<(), TransactionError> {
    let fields = payload_fields(tx)?;
    out.push(BLOB_TX_TYPE);
    encode_list(&fields, out);
    Ok(())
}

/// Compute the keccak256 hash of the signed payload.
#[inline]
pub fn tx_hash(tx: &BlobTransaction) -> Result<B256, TransactionError> {
    let mut buf = Vec::with_capacity(320);
    encode_payload(tx, &mut buf)?;
    Ok(Keccak256.hash(&buf))
}

/// Encode the wire payload: signed fields, wrapper version and sidecar.
///
/// Fails with [`TransactionError::Unsigned`] before signing, or
/// [`TransactionError::InvalidField`] if the transaction and sidecar disagree.
pub fn encode_wire_payload(
    tx: &BlobTransaction,
    sidecar: &BlobSidecar,
    out: &mut Vec<u8>,
) -> Result<(), TransactionError> {
    let payload = payload_fields(tx)?;
    tx.validate()?;
    sidecar.validate(&tx.blob_versioned_hashes)?;

    let [blobs, commitments, cell_proofs] = sidecar.rlp_fields();
    let wrapper = [
        RlpItem::List(payload),
        RlpItem::uint(WRAPPER_VERSION),
        blobs,
        commitments,
        cell_proofs,
    ];

    out.push(BLOB_TX_TYPE);
    encode_list(&wrapper, out);
    Ok(())
}
