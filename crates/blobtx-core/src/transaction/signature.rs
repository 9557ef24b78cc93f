//! Signature shape and normalization.
//!
//! Signers hand back 65 bytes, `r || s || recovery`, where the recovery byte is
//! either the bare parity (`0`/`1`) or the Electrum form (`27`/`28`). Typed
//! transactions carry the bare parity as `v`: no chain id offset is applied.

use alloy_primitives::{B256, U256};

use super::TransactionError;

/// Length of a raw `r || s || v` signature.
pub const SIGNATURE_LEN: usize = 65;

/// Offset used by signers that emit Electrum-style recovery bytes.
const ELECTRUM_V_OFFSET: u8 = 27;

/// Anything that can sign a 32-byte digest with a secp256k1 key.
pub trait DigestSigner {
    type Error: std::fmt::Display;

    /// Sign `digest`, returning `r || s || recovery` (65 bytes).
    fn sign_digest(&self, digest: &B256) -> Result<[u8; SIGNATURE_LEN], Self::Error>;
}

/// The `(v, r, s)` triple of a signed blob transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxSignature {
    v: u8,
    r: U256,
    s: U256,
}

impl TxSignature {
    /// Build from parts; `v` must be the bare parity.
    pub fn new(v: u8, r: U256, s: U256) -> Result<Self, TransactionError> {
        if v > 1 {
            return Err(TransactionError::InvalidRecoveryId(v));
        }
        Ok(Self { v, r, s })
    }

    /// Split a raw signature into its wire components.
    pub fn from_raw(raw: &[u8; SIGNATURE_LEN]) -> Result<Self, TransactionError> {
        let r = U256::from_be_slice(&raw[..32]);
        let s = U256::from_be_slice(&raw[32..64]);
        let v = normalize_recovery_id(raw[64])?;
        Ok(Self { v, r, s })
    }

    /// `r || s || v` with `v` as the bare parity.
    pub fn to_raw(&self) -> [u8; SIGNATURE_LEN] {
        let mut raw = [0u8; SIGNATURE_LEN];
        raw[..32].copy_from_slice(&self.r.to_be_bytes::<32>());
        raw[32..64].copy_from_slice(&self.s.to_be_bytes::<32>());
        raw[64] = self.v;
        raw
    }

    pub fn v(&self) -> u8 {
        self.v
    }

    pub fn r(&self) -> U256 {
        self.r
    }

    pub fn s(&self) -> U256 {
        self.s
    }

    pub fn y_parity(&self) -> bool {
        self.v == 1
    }
}

/// Map a recovery byte onto `{0, 1}`.
pub fn normalize_recovery_id(byte: u8) -> Result<u8, TransactionError> {
    match byte {
        0 | 1 => Ok(byte),
        27 | 28 => Ok(byte - ELECTRUM_V_OFFSET),
        other => Err(TransactionError::InvalidRecoveryId(other)),
    }
}
