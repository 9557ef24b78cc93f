//! Hash primitives behind a single-method trait so callers can swap them out.

use alloy_primitives::{keccak256, B256};
use sha2::Digest;

/// A fixed 32-byte output hash function.
pub trait Hasher {
    fn hash(&self, data: &[u8]) -> B256;
}

/// Keccak-256, used for the transaction signing digest and hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct Keccak256;

impl Hasher for Keccak256 {
    #[inline]
    fn hash(&self, data: &[u8]) -> B256 {
        keccak256(data)
    }
}

/// SHA-256, used for versioned blob hashes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256;

impl Hasher for Sha256 {
    #[inline]
    fn hash(&self, data: &[u8]) -> B256 {
        B256::from_slice(&sha2::Sha256::digest(data))
    }
}
