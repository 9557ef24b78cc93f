use std::path::PathBuf;

use clap::Parser;
use eyre::WrapErr;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use blobtx_vectors::{
    config::{DEFAULT_CHAIN_ID, DEFAULT_CONCURRENCY, DEFAULT_NONCE},
    AddressedSigner, CKzgBackend, LocalSigner, PipelineConfig, TxTemplate, VectorPipeline,
    TEST_PRIVATE_KEY,
};

#[derive(Parser)]
#[command(name = "blobtx-vectors")]
#[command(about = "Build signed type-3 blob transactions from KZG test vectors")]
struct Args {
    /// Directory holding `*_valid_*/data.yaml` vectors
    test_dir: PathBuf,

    /// JSON file to write
    output: PathBuf,

    /// Hex private key used to sign every transaction
    #[arg(long, env = "BLOBTX_PRIVATE_KEY", default_value = TEST_PRIVATE_KEY, hide_default_value = true)]
    private_key: String,

    /// Chain id of the generated transactions
    #[arg(long, default_value_t = DEFAULT_CHAIN_ID)]
    chain_id: u64,

    /// Nonce of the generated transactions
    #[arg(long, default_value_t = DEFAULT_NONCE)]
    nonce: u64,

    /// Vectors processed at once
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// Do not compare cell proofs against the vector's expected output
    #[arg(long)]
    skip_proof_check: bool,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,blobtx_vectors=debug")),
        )
        .init();

    let args = Args::parse();

    let signer = LocalSigner::from_hex(&args.private_key).wrap_err("loading signing key")?;
    info!("Signing as {}", signer.address());
    info!("Vectors: {}", args.test_dir.display());
    info!("Output: {}", args.output.display());

    let template = TxTemplate::builder().chain_id(args.chain_id).nonce(args.nonce).build();
    let config = PipelineConfig::builder()
        .template(template)
        .concurrency(args.concurrency)
        .check_expected_proofs(!args.skip_proof_check)
        .build();
    let pipeline = VectorPipeline::new(CKzgBackend::mainnet(), signer, config);

    let report = blobtx_vectors::run(&args.test_dir, &args.output, &pipeline)
        .await
        .wrap_err("processing test vectors")?;

    if !report.failures.is_empty() {
        let names: Vec<_> = report.failures.iter().map(|f| f.test_name.as_str()).collect();
        warn!("Failed vectors: {}", names.join(", "));
    }
    info!(
        "Done: {} transactions written, {} vectors failed",
        report.outputs.len(),
        report.failures.len()
    );

    Ok(())
}
