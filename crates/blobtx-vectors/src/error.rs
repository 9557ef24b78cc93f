//! Error types for the vector pipeline.

use std::path::PathBuf;

use alloy_primitives::Address;
use blobtx_core::TransactionError;
use thiserror::Error;

use crate::backend::BackendError;

/// Errors that can occur while turning test vectors into signed transactions.
///
/// Everything except [`VectorError::NothingProduced`] is scoped to a single
/// vector: the batch records it and moves on.
#[derive(Debug, Error)]
pub enum VectorError {
    /// Filesystem error.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The vector file is not valid YAML of the expected shape.
    #[error("YAML error in {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Malformed hex in a vector field.
    #[error("hex decode error in {field}: {source}")]
    Decode {
        field: &'static str,
        #[source]
        source: hex::FromHexError,
    },

    /// A decoded value has the wrong width.
    #[error("{field} is {got} bytes, expected {expected}")]
    Width { field: &'static str, expected: usize, got: usize },

    /// The commitment backend failed.
    #[error("commitment backend error: {0}")]
    Backend(#[from] BackendError),

    /// The signing primitive failed.
    #[error("signing error: {0}")]
    Signing(String),

    /// The signature does not recover to the signing key.
    #[error("signature recovers to {recovered}, expected {expected}")]
    SignerMismatch { expected: Address, recovered: Address },

    /// Computed cell proofs disagree with the vector's expected output.
    #[error("cell proof {index} differs from the expected output")]
    ProofMismatch { index: usize },

    /// The vector's expected output carries a different number of proofs.
    #[error("expected {expected} cell proofs, computed {got}")]
    ProofCount { expected: usize, got: usize },

    /// Transaction building or encoding error.
    #[error("transaction error: {0}")]
    Transaction(#[from] TransactionError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A worker task panicked or was cancelled.
    #[error("task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    /// No vector directory matched.
    #[error("no test vectors found in {}", .0.display())]
    NoVectors(PathBuf),

    /// Every vector failed; there is nothing to write.
    #[error("none of the {0} vectors could be processed")]
    NothingProduced(usize),
}

impl VectorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
