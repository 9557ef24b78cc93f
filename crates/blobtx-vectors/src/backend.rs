//! Commitment backends: turn a blob into its KZG commitment and cell proofs.

use blobtx_core::{Bytes48, CELLS_PER_EXT_BLOB};
use c_kzg::{Blob, KzgSettings};
use thiserror::Error;

/// Disables fixed-base multi-scalar multiplication precomputation.
const NO_PRECOMPUTE: u64 = 0;

#[derive(Debug, Error)]
#[error("{0}")]
pub struct BackendError(pub String);

/// Commitment and per-cell proofs for one blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobCommitment {
    pub commitment: Bytes48,
    pub cell_proofs: Vec<Bytes48>,
}

pub trait CommitmentBackend: Send + Sync {
    fn commit(&self, blob: &[u8]) -> Result<BlobCommitment, BackendError>;
}

/// KZG backend over the Ethereum mainnet trusted setup bundled with `c-kzg`.
#[derive(Debug, Clone, Copy)]
pub struct CKzgBackend {
    settings: &'static KzgSettings,
}

impl CKzgBackend {
    pub fn mainnet() -> Self {
        Self { settings: c_kzg::ethereum_kzg_settings(NO_PRECOMPUTE) }
    }
}

impl Default for CKzgBackend {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl CommitmentBackend for CKzgBackend {
    fn commit(&self, blob: &[u8]) -> Result<BlobCommitment, BackendError> {
        let blob = Blob::from_bytes(blob)
            .map_err(|e| BackendError(format!("invalid blob: {:?}", e)))?;

        let commitment = self
            .settings
            .blob_to_kzg_commitment(&blob)
            .map_err(|e| BackendError(format!("failed to compute commitment: {:?}", e)))?;

        let (_cells, proofs) = self
            .settings
            .compute_cells_and_kzg_proofs(&blob)
            .map_err(|e| BackendError(format!("failed to compute cell proofs: {:?}", e)))?;

        let cell_proofs: Vec<Bytes48> =
            proofs.iter().map(|p| Bytes48::from(p.to_bytes().into_inner())).collect();
        debug_assert_eq!(cell_proofs.len(), CELLS_PER_EXT_BLOB);

        Ok(BlobCommitment {
            commitment: Bytes48::from(commitment.to_bytes().into_inner()),
            cell_proofs,
        })
    }
}
