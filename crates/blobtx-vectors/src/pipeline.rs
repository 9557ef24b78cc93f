//! Per-vector processing and the concurrent batch runner.

use std::sync::Arc;

use blobtx_core::{kzg_to_versioned_hash, BlobSidecar, Bytes48, TransactionError};
use blobtx_types::VectorOutput;
use bon::Builder;
use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::{
    backend::CommitmentBackend,
    config::{TxTemplate, DEFAULT_CONCURRENCY},
    loader::VectorCase,
    output::to_hex,
    signer::{recover_signer, AddressedSigner},
    VectorError,
};

#[derive(Debug, Clone, Builder)]
pub struct PipelineConfig {
    /// Transaction fields shared by every vector.
    #[builder(default)]
    template: TxTemplate,

    /// Vectors processed at once.
    #[builder(default = DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Compare computed cell proofs against the ones shipped with the vector.
    #[builder(default = true)]
    check_expected_proofs: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A vector that could not be turned into a transaction.
#[derive(Debug)]
pub struct VectorFailure {
    pub test_name: String,
    pub error: VectorError,
}

/// Outcome of a batch: successes and failures, each in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outputs: Vec<VectorOutput>,
    pub failures: Vec<VectorFailure>,
}

/// Commits, signs and encodes vectors.
pub struct VectorPipeline<B, S> {
    backend: Arc<B>,
    signer: Arc<S>,
    config: PipelineConfig,
}

impl<B, S> Clone for VectorPipeline<B, S> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            signer: Arc::clone(&self.signer),
            config: self.config.clone(),
        }
    }
}

impl<B, S> VectorPipeline<B, S>
where
    B: CommitmentBackend + 'static,
    S: AddressedSigner + 'static,
{
    pub fn new(backend: B, signer: S, config: PipelineConfig) -> Self {
        Self { backend: Arc::new(backend), signer: Arc::new(signer), config }
    }

    pub fn signer(&self) -> &S {
        &self.signer
    }

    /// Turn one vector into its output record.
    pub fn process(&self, case: &VectorCase) -> Result<VectorOutput, VectorError> {
        let committed = self.backend.commit(&case.blob)?;

        if self.config.check_expected_proofs {
            if let Some(expected) = &case.expected_proofs {
                check_proofs(expected, &committed.cell_proofs)?;
            }
        }

        let versioned_hash = kzg_to_versioned_hash(&committed.commitment);
        let mut tx = self.config.template.to_transaction(vec![versioned_hash]);
        tx.validate()?;

        tx.sign(self.signer.as_ref()).map_err(|e| match e {
            TransactionError::Signer(msg) => VectorError::Signing(msg),
            other => other.into(),
        })?;

        let expected = self.signer.address();
        let recovered = recover_signer(&tx)?;
        if recovered != expected {
            return Err(VectorError::SignerMismatch { expected, recovered });
        }

        let sidecar = BlobSidecar::single(
            case.blob.clone(),
            committed.commitment,
            committed.cell_proofs.clone(),
        );
        let wire = tx.encode_wire_payload(&sidecar)?;
        let tx_hash = tx.tx_hash()?;

        debug!(
            target: "blobtx_vectors::pipeline",
            name = %case.name,
            %versioned_hash,
            %tx_hash,
            wire_len = wire.len(),
            "Encoded blob transaction"
        );

        Ok(VectorOutput {
            test_name: case.name.clone(),
            blob: case.blob_hex.clone(),
            commitment: to_hex(committed.commitment),
            versioned_hash: to_hex(versioned_hash),
            cell_proofs: committed.cell_proofs.iter().map(to_hex).collect(),
            signed_transaction_hex: to_hex(&wire),
        })
    }

    /// Process every case, at most `concurrency` at a time.
    ///
    /// A failing vector is logged and recorded; the others still run.
    pub async fn run(&self, cases: Vec<VectorCase>) -> BatchReport {
        // The semaphore is owned here and never closed.
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));

        let tasks = cases.into_iter().map(|case| {
            let pipeline = self.clone();
            let semaphore = Arc::clone(&semaphore);
            async move {
                let _permit = semaphore.acquire_owned().await.ok();
                let name = case.name.clone();
                let result = tokio::task::spawn_blocking(move || pipeline.process(&case))
                    .await
                    .map_err(VectorError::from)
                    .and_then(|r| r);
                (name, result)
            }
        });

        let mut report = BatchReport::default();
        for (test_name, result) in join_all(tasks).await {
            match result {
                Ok(output) => report.outputs.push(output),
                Err(error) => {
                    warn!(target: "blobtx_vectors::pipeline", name = %test_name, %error, "Vector failed");
                    report.failures.push(VectorFailure { test_name, error });
                }
            }
        }
        report
    }
}

fn check_proofs(expected: &[Bytes48], computed: &[Bytes48]) -> Result<(), VectorError> {
    if expected.len() != computed.len() {
        return Err(VectorError::ProofCount { expected: expected.len(), got: computed.len() });
    }
    match expected.iter().zip(computed).position(|(e, c)| e != c) {
        Some(index) => Err(VectorError::ProofMismatch { index }),
        None => Ok(()),
    }
}
