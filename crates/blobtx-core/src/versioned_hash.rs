//! Versioned hashes: how a blob transaction refers to a KZG commitment.
//!
//! `versioned_hash = VERSIONED_HASH_VERSION_KZG || sha256(commitment)[1..]`
//! See <https://eips.ethereum.org/EIPS/eip-4844#helpers>

use alloy_primitives::B256;

use crate::{
    hash::{Hasher, Sha256},
    sidecar::Bytes48,
};

/// Version marker written into byte 0 of every KZG versioned hash.
pub const VERSIONED_HASH_VERSION_KZG: u8 = 0x01;

/// Derive the versioned hash of a KZG commitment.
#[inline]
pub fn kzg_to_versioned_hash(commitment: &Bytes48) -> B256 {
    versioned_hash_with(&Sha256, commitment.as_slice())
}

/// Derive a versioned hash with an injected hash function.
pub fn versioned_hash_with<H: Hasher + ?Sized>(hasher: &H, commitment: &[u8]) -> B256 {
    let mut hash = hasher.hash(commitment);
    hash.0[0] = VERSIONED_HASH_VERSION_KZG;
    hash
}
