//! Type-3 (blob-carrying) transactions.
//!
//! A transaction has three serializations, all prefixed with [`BLOB_TX_TYPE`]:
//! - signing payload: `rlp([chain_id, nonce, max_priority_fee_per_gas, max_fee_per_gas,
//!   gas_limit, to, value, data, access_list, max_fee_per_blob_gas, blob_versioned_hashes])`
//! - payload: the same eleven fields followed by `y_parity, r, s`
//! - wire payload: `rlp([payload_fields, wrapper_version, blobs, commitments, cell_proofs])`
//!
//! See <https://eips.ethereum.org/EIPS/eip-4844>, <https://eips.ethereum.org/EIPS/eip-7594>

pub mod decode;
pub mod encode;
pub mod signature;

use alloy_primitives::{Address, Bytes, B256, U256};
use bon::Builder;
use thiserror::Error;

use crate::{
    hash::{Hasher, Keccak256},
    rlp::{RlpError, RlpItem},
    sidecar::BlobSidecar,
    versioned_hash::VERSIONED_HASH_VERSION_KZG,
};

pub use encode::BLOB_TX_TYPE;
pub use signature::{DigestSigner, TxSignature};

#[derive(Debug, Error)]
pub enum TransactionError {
    /// The operation needs the signature and there is none yet.
    #[error("transaction is not signed")]
    Unsigned,
    #[error("transaction is already signed")]
    AlreadySigned,
    #[error("invalid field `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),
    #[error("empty transaction data")]
    Empty,
    #[error("unexpected transaction type: expected 0x03, got {0:#04x}")]
    UnexpectedType(u8),
    #[error("signer error: {0}")]
    Signer(String),
    #[error("RLP error: {0}")]
    Rlp(#[from] RlpError),
}

/// One access list entry: an address and the storage slots it pre-warms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessListItem {
    pub address: Address,
    pub storage_keys: Vec<B256>,
}

impl AccessListItem {
    pub(crate) fn to_rlp_item(&self) -> RlpItem {
        RlpItem::List(vec![
            self.address.into(),
            RlpItem::List(self.storage_keys.iter().map(|k| RlpItem::from(*k)).collect()),
        ])
    }
}

/// A blob transaction body.
///
/// Built unsigned; moves to the signed state exactly once through
/// [`sign`](Self::sign) or [`attach_signature`](Self::attach_signature).
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct BlobTransaction {
    pub chain_id: U256,
    pub nonce: u64,
    pub max_priority_fee_per_gas: U256,
    pub max_fee_per_gas: U256,
    pub gas_limit: u64,
    pub to: Address,
    #[builder(default)]
    pub value: U256,
    #[builder(default, into)]
    pub input: Bytes,
    #[builder(default)]
    pub access_list: Vec<AccessListItem>,
    pub max_fee_per_blob_gas: U256,
    pub blob_versioned_hashes: Vec<B256>,
    #[builder(skip)]
    signature: Option<TxSignature>,
}

impl BlobTransaction {
    pub fn signature(&self) -> Option<&TxSignature> {
        self.signature.as_ref()
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Move to the signed state. Fails if a signature is already present.
    pub fn attach_signature(&mut self, signature: TxSignature) -> Result<(), TransactionError> {
        if self.signature.is_some() {
            return Err(TransactionError::AlreadySigned);
        }
        self.signature = Some(signature);
        Ok(())
    }

    /// Sign the transaction digest and attach the normalized signature.
    pub fn sign<S: DigestSigner + ?Sized>(
        &mut self,
        signer: &S,
    ) -> Result<TxSignature, TransactionError> {
        if self.signature.is_some() {
            return Err(TransactionError::AlreadySigned);
        }
        let digest = self.signature_hash();
        let raw =
            signer.sign_digest(&digest).map_err(|e| TransactionError::Signer(e.to_string()))?;
        let signature = TxSignature::from_raw(&raw)?;
        self.signature = Some(signature);
        Ok(signature)
    }

    /// Check the fields a blob transaction must satisfy to be valid.
    pub fn validate(&self) -> Result<(), TransactionError> {
        if self.blob_versioned_hashes.is_empty() {
            return Err(TransactionError::InvalidField {
                field: "blob_versioned_hashes",
                reason: "must contain at least one hash".to_string(),
            });
        }
        if let Some(hash) =
            self.blob_versioned_hashes.iter().find(|h| h[0] != VERSIONED_HASH_VERSION_KZG)
        {
            return Err(TransactionError::InvalidField {
                field: "blob_versioned_hashes",
                reason: format!("unsupported version byte {:#04x} in {}", hash[0], hash),
            });
        }
        Ok(())
    }

    /// The eleven fields covered by the signature, in wire order.
    pub fn signing_fields(&self) -> Vec<RlpItem> {
        encode::signing_fields(self)
    }

    /// `0x03 || rlp(signing_fields)`.
    pub fn encode_signing_payload(&self) -> Bytes {
        let mut buf = Vec::with_capacity(256);
        encode::encode_signing_payload(self, &mut buf);
        Bytes::from(buf)
    }

    /// The digest the signer signs: `keccak256(0x03 || rlp(signing_fields))`.
    #[inline]
    pub fn signature_hash(&self) -> B256 {
        encode::signature_hash_with(self, &Keccak256)
    }

    /// Same as [`signature_hash`](Self::signature_hash) with an injected hash function.
    #[inline]
    pub fn signature_hash_with<H: Hasher + ?Sized>(&self, hasher: &H) -> B256 {
        encode::signature_hash_with(self, hasher)
    }

    /// `0x03 || rlp(signing_fields ++ [y_parity, r, s])`, without the sidecar.
    pub fn encode_payload(&self) -> Result<Bytes, TransactionError> {
        let mut buf = Vec::with_capacity(320);
        encode::encode_payload(self, &mut buf)?;
        Ok(Bytes::from(buf))
    }

    /// Transaction hash: keccak256 of [`encode_payload`](Self::encode_payload).
    pub fn tx_hash(&self) -> Result<B256, TransactionError> {
        encode::tx_hash(self)
    }

    /// Full network form with the sidecar attached.
    pub fn encode_wire_payload(&self, sidecar: &BlobSidecar) -> Result<Bytes, TransactionError> {
        let mut buf = Vec::new();
        encode::encode_wire_payload(self, sidecar, &mut buf)?;
        Ok(Bytes::from(buf))
    }

    /// Parse a signed payload produced by [`encode_payload`](Self::encode_payload).
    #[inline]
    pub fn decode_payload(data: &[u8]) -> Result<Self, TransactionError> {
        decode::decode_payload(data)
    }

    /// Parse a wire payload back into the transaction and its sidecar.
    #[inline]
    pub fn decode_wire_payload(data: &[u8]) -> Result<(Self, BlobSidecar), TransactionError> {
        decode::decode_wire_payload(data)
    }
}
