//! Local secp256k1 signing adapter and signer recovery.

use std::str::FromStr;

use alloy_primitives::{Address, Signature, B256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use blobtx_core::{BlobTransaction, DigestSigner, TransactionError};

use crate::VectorError;

/// A digest signer that also knows the address of its key.
pub trait AddressedSigner: DigestSigner + Send + Sync {
    fn address(&self) -> Address;
}

/// Signs with an in-memory private key.
#[derive(Debug, Clone)]
pub struct LocalSigner {
    inner: PrivateKeySigner,
}

impl LocalSigner {
    /// Parse a hex private key, with or without `0x`.
    pub fn from_hex(key: &str) -> Result<Self, VectorError> {
        let inner = PrivateKeySigner::from_str(key.trim())
            .map_err(|e| VectorError::Signing(format!("invalid private key: {}", e)))?;
        Ok(Self { inner })
    }
}

impl DigestSigner for LocalSigner {
    type Error = alloy_signer::Error;

    /// Returns `r || s || v` with `v` in Electrum form (27/28); the core
    /// normalizes it to the bare parity.
    fn sign_digest(&self, digest: &B256) -> Result<[u8; 65], Self::Error> {
        let signature = self.inner.sign_hash_sync(digest)?;
        Ok(signature.as_bytes())
    }
}

impl AddressedSigner for LocalSigner {
    fn address(&self) -> Address {
        self.inner.address()
    }
}

/// Recover the address that signed `tx`.
pub fn recover_signer(tx: &BlobTransaction) -> Result<Address, VectorError> {
    let sig = tx.signature().ok_or(TransactionError::Unsigned)?;
    Signature::new(sig.r(), sig.s(), sig.y_parity())
        .recover_address_from_prehash(&tx.signature_hash())
        .map_err(|e| VectorError::Signing(format!("failed to recover signer: {}", e)))
}
