//! Canonical RLP codec and type-3 blob transaction envelope.
//!
//! This crate provides the pure, I/O-free core of blob transaction building:
//! - RLP encoding and strict decoding of byte strings, integers and nested lists
//! - Versioned hashes derived from KZG commitments
//! - The blob transaction body, its signing digest and signature normalization
//! - The signed payload and the wire form carrying blobs, commitments and cell proofs
//!
//! Hashing and signing are injected through [`Hasher`] and [`DigestSigner`], so the
//! encoding logic can be exercised with deterministic fakes.

pub mod hash;
pub mod rlp;
pub mod sidecar;
pub mod transaction;
pub mod versioned_hash;

#[cfg(test)]
mod tests;

pub use hash::{Hasher, Keccak256, Sha256};
pub use rlp::{RlpError, RlpItem};
pub use sidecar::{BlobSidecar, Bytes48, BYTES_PER_BLOB, CELLS_PER_EXT_BLOB, WRAPPER_VERSION};
pub use transaction::{
    AccessListItem, BlobTransaction, DigestSigner, TransactionError, TxSignature, BLOB_TX_TYPE,
};
pub use versioned_hash::{kzg_to_versioned_hash, versioned_hash_with, VERSIONED_HASH_VERSION_KZG};
