//! Signed blob transactions from KZG test vectors.
//!
//! For every `*_valid_*/data.yaml` vector this crate:
//! - computes the blob's KZG commitment and its 128 cell proofs
//! - derives the versioned hash and builds a type-3 transaction from a fixed template
//! - signs it, checks the signature recovers to the key, and encodes the wire form
//!
//! Results are written as one JSON array, in vector order.
//!
//! # Quick Start
//!
//! ```ignore
//! use blobtx_vectors::{CKzgBackend, LocalSigner, PipelineConfig, VectorPipeline, TEST_PRIVATE_KEY};
//!
//! let signer = LocalSigner::from_hex(TEST_PRIVATE_KEY)?;
//! let pipeline = VectorPipeline::new(CKzgBackend::mainnet(), signer, PipelineConfig::default());
//! let report = blobtx_vectors::run("vectors/".as_ref(), "out.json".as_ref(), &pipeline).await?;
//! println!("{} written, {} failed", report.outputs.len(), report.failures.len());
//! ```

pub mod backend;
pub mod config;
mod error;
pub mod loader;
mod output;
mod pipeline;
pub mod signer;

#[cfg(test)]
mod tests;

use std::{collections::HashMap, path::Path};

use tracing::info;

pub use backend::{BackendError, BlobCommitment, CKzgBackend, CommitmentBackend};
pub use config::{TxTemplate, TEST_PRIVATE_KEY};
pub use error::VectorError;
pub use loader::VectorCase;
pub use output::write_outputs;
pub use pipeline::{BatchReport, PipelineConfig, VectorFailure, VectorPipeline};
pub use signer::{recover_signer, AddressedSigner, LocalSigner};

/// Discover, load and process every vector under `test_dir`, then write `output`.
///
/// Vectors that fail to load or process are reported, not fatal. Fails only when
/// no vector is found or none produced an output.
pub async fn run<B, S>(
    test_dir: &Path,
    output: &Path,
    pipeline: &VectorPipeline<B, S>,
) -> Result<BatchReport, VectorError>
where
    B: CommitmentBackend + 'static,
    S: AddressedSigner + 'static,
{
    let files = loader::discover(test_dir)?;
    if files.is_empty() {
        return Err(VectorError::NoVectors(test_dir.to_path_buf()));
    }
    info!(target: "blobtx_vectors", count = files.len(), dir = %test_dir.display(), "Found test vectors");

    let total = files.len();
    let mut cases = Vec::with_capacity(total);
    let mut load_failures = Vec::new();
    for file in &files {
        match loader::load_case(file) {
            Ok(case) => cases.push(case),
            Err(error) => {
                tracing::warn!(target: "blobtx_vectors", file = %file.display(), %error, "Skipping vector");
                load_failures.push(VectorFailure { test_name: loader::vector_name(file), error });
            }
        }
    }

    let mut report = pipeline.run(cases).await;
    report.failures.append(&mut load_failures);
    // Directory names are unique, so the name locates each failure among `files`.
    let order: HashMap<String, usize> =
        files.iter().enumerate().map(|(i, file)| (loader::vector_name(file), i)).collect();
    report.failures.sort_by_key(|failure| order.get(&failure.test_name).copied());

    if report.outputs.is_empty() {
        return Err(VectorError::NothingProduced(total));
    }

    write_outputs(output, &report.outputs)?;
    info!(
        target: "blobtx_vectors",
        written = report.outputs.len(),
        failed = report.failures.len(),
        output = %output.display(),
        "Wrote results"
    );

    Ok(report)
}
