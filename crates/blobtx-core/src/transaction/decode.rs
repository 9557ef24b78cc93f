//! Decoding of signed blob transactions and their wire form.

use alloy_primitives::{Bytes, FixedBytes};

use crate::{
    rlp::{decode_exact, RlpError, RlpItem},
    sidecar::{BlobSidecar, WRAPPER_VERSION},
};

use super::{
    encode::{BLOB_TX_TYPE, PAYLOAD_FIELD_COUNT, WIRE_FIELD_COUNT},
    AccessListItem, BlobTransaction, TransactionError, TxSignature,
};

/// Decode `0x03 || rlp([...14 fields])`.
pub fn decode_payload(data: &[u8]) -> Result<BlobTransaction, TransactionError> {
    let item = decode_exact(strip_type(data)?)?;
    transaction_from_fields(item.as_list()?)
}

/// Decode `0x03 || rlp([payload, wrapper_version, blobs, commitments, cell_proofs])`.
pub fn decode_wire_payload(
    data: &[u8],
) -> Result<(BlobTransaction, BlobSidecar), TransactionError> {
    let item = decode_exact(strip_type(data)?)?;
    let members = expect_len(item.as_list()?, WIRE_FIELD_COUNT, "wrapper")?;

    let tx = transaction_from_fields(members[0].as_list()?)?;

    let version = field("wrapper_version", members[1].as_u64())?;
    if version != WRAPPER_VERSION {
        return Err(TransactionError::InvalidField {
            field: "wrapper_version",
            reason: format!("unsupported version {}", version),
        });
    }

    let blobs = field("blobs", members[2].as_list())?
        .iter()
        .map(|b| b.as_bytes().map(Bytes::copy_from_slice))
        .collect::<Result<Vec<_>, _>>();
    let blobs = field("blobs", blobs)?;
    let commitments = field("commitments", fixed_list::<48>(&members[3]))?;
    let cell_proofs = field("cell_proofs", fixed_list::<48>(&members[4]))?;

    Ok((tx, BlobSidecar::new(blobs, commitments, cell_proofs)))
}

fn strip_type(data: &[u8]) -> Result<&[u8], TransactionError> {
    match data.split_first() {
        None => Err(TransactionError::Empty),
        Some((&BLOB_TX_TYPE, rest)) => Ok(rest),
        Some((&other, _)) => Err(TransactionError::UnexpectedType(other)),
    }
}

fn transaction_from_fields(fields: &[RlpItem]) -> Result<BlobTransaction, TransactionError> {
    let f = expect_len(fields, PAYLOAD_FIELD_COUNT, "payload")?;

    let access_list = field("access_list", f[8].as_list())?
        .iter()
        .map(access_list_item)
        .collect::<Result<Vec<_>, _>>();

    let v = field("v", f[11].as_u64())?;
    let v = u8::try_from(v).map_err(|_| TransactionError::InvalidField {
        field: "v",
        reason: format!("recovery id {} out of range", v),
    })?;
    let signature = TxSignature::new(v, field("r", f[12].as_uint())?, field("s", f[13].as_uint())?)?;

    Ok(BlobTransaction {
        chain_id: field("chain_id", f[0].as_uint())?,
        nonce: field("nonce", f[1].as_u64())?,
        max_priority_fee_per_gas: field("max_priority_fee_per_gas", f[2].as_uint())?,
        max_fee_per_gas: field("max_fee_per_gas", f[3].as_uint())?,
        gas_limit: field("gas_limit", f[4].as_u64())?,
        to: field("to", f[5].as_fixed::<20>())?.into(),
        value: field("value", f[6].as_uint())?,
        input: Bytes::copy_from_slice(field("input", f[7].as_bytes())?),
        access_list: field("access_list", access_list)?,
        max_fee_per_blob_gas: field("max_fee_per_blob_gas", f[9].as_uint())?,
        blob_versioned_hashes: field("blob_versioned_hashes", fixed_list::<32>(&f[10]))?,
        signature: Some(signature),
    })
}

fn access_list_item(item: &RlpItem) -> Result<AccessListItem, RlpError> {
    let parts = item.as_list()?;
    if parts.len() != 2 {
        return Err(RlpError::UnexpectedLength { expected: 2, got: parts.len() });
    }
    Ok(AccessListItem {
        address: parts[0].as_fixed::<20>()?.into(),
        storage_keys: fixed_list::<32>(&parts[1])?,
    })
}

fn fixed_list<const N: usize>(
    item: &RlpItem,
) -> Result<Vec<FixedBytes<N>>, RlpError> {
    item.as_list()?.iter().map(RlpItem::as_fixed::<N>).collect()
}

fn expect_len<'a>(
    items: &'a [RlpItem],
    expected: usize,
    what: &'static str,
) -> Result<&'a [RlpItem], TransactionError> {
    if items.len() != expected {
        return Err(TransactionError::InvalidField {
            field: what,
            reason: format!("expected {} fields, got {}", expected, items.len()),
        });
    }
    Ok(items)
}

/// Attach the field name to a decoding error.
fn field<T>(name: &'static str, result: Result<T, RlpError>) -> Result<T, TransactionError> {
    result.map_err(|e| TransactionError::InvalidField { field: name, reason: e.to_string() })
}
