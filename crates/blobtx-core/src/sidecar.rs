//! Blob sidecar carried next to (never inside the hash of) a blob transaction.

use alloy_primitives::{Bytes, FixedBytes, B256};

use crate::{rlp::RlpItem, versioned_hash::kzg_to_versioned_hash, TransactionError};

/// A 48-byte compressed G1 point: KZG commitments and proofs.
pub type Bytes48 = FixedBytes<48>;

/// Size of one blob: 4096 field elements of 32 bytes.
pub const BYTES_PER_BLOB: usize = 131_072;

/// Cell proofs per blob once the blob is extended to 128 cells.
pub const CELLS_PER_EXT_BLOB: usize = 128;

/// Wrapper version of the network form that carries cell proofs.
pub const WRAPPER_VERSION: u64 = 1;

/// Blobs with their commitments and cell proofs, as produced by a KZG backend.
///
/// `cell_proofs` is flat: blob `i` owns `cell_proofs[i * 128..(i + 1) * 128]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlobSidecar {
    pub blobs: Vec<Bytes>,
    pub commitments: Vec<Bytes48>,
    pub cell_proofs: Vec<Bytes48>,
}

impl BlobSidecar {
    pub fn new(blobs: Vec<Bytes>, commitments: Vec<Bytes48>, cell_proofs: Vec<Bytes48>) -> Self {
        Self { blobs, commitments, cell_proofs }
    }

    /// Sidecar for a single blob.
    pub fn single(blob: Bytes, commitment: Bytes48, cell_proofs: Vec<Bytes48>) -> Self {
        Self::new(vec![blob], vec![commitment], cell_proofs)
    }

    /// Versioned hashes of every commitment, in order.
    pub fn versioned_hashes(&self) -> Vec<B256> {
        self.commitments.iter().map(kzg_to_versioned_hash).collect()
    }

    /// Check the sidecar is well formed and belongs to `versioned_hashes`.
    pub fn validate(&self, versioned_hashes: &[B256]) -> Result<(), TransactionError> {
        if let Some(blob) = self.blobs.iter().find(|b| b.len() != BYTES_PER_BLOB) {
            return Err(TransactionError::InvalidField {
                field: "blobs",
                reason: format!("blob is {} bytes, expected {}", blob.len(), BYTES_PER_BLOB),
            });
        }

        if self.commitments.len() != self.blobs.len() {
            return Err(TransactionError::InvalidField {
                field: "commitments",
                reason: format!("{} commitments for {} blobs", self.commitments.len(), self.blobs.len()),
            });
        }

        let expected_proofs = self.blobs.len() * CELLS_PER_EXT_BLOB;
        if self.cell_proofs.len() != expected_proofs {
            return Err(TransactionError::InvalidField {
                field: "cell_proofs",
                reason: format!("{} proofs, expected {}", self.cell_proofs.len(), expected_proofs),
            });
        }

        if versioned_hashes.len() != self.commitments.len() {
            return Err(TransactionError::InvalidField {
                field: "blob_versioned_hashes",
                reason: format!(
                    "{} hashes for {} commitments",
                    versioned_hashes.len(),
                    self.commitments.len()
                ),
            });
        }

        for (i, (commitment, hash)) in self.commitments.iter().zip(versioned_hashes).enumerate() {
            if kzg_to_versioned_hash(commitment) != *hash {
                return Err(TransactionError::InvalidField {
                    field: "blob_versioned_hashes",
                    reason: format!("hash {} does not match commitment {}", hash, i),
                });
            }
        }

        Ok(())
    }

    /// `[blob...]`, `[commitment...]`, `[proof...]` as RLP lists.
    pub(crate) fn rlp_fields(&self) -> [RlpItem; 3] {
        [
            RlpItem::bytes_list(&self.blobs),
            RlpItem::bytes_list(&self.commitments),
            RlpItem::bytes_list(&self.cell_proofs),
        ]
    }
}
