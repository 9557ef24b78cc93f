//! Transaction parameters used for every vector.
//!
//! These match the blob transaction fixtures of the reference test suite, so the
//! produced payloads can be compared byte for byte.

use alloy_primitives::{address, Address, Bytes, B256, U256};
use blobtx_core::BlobTransaction;
use bon::Builder;

pub const DEFAULT_CHAIN_ID: u64 = 1;
pub const DEFAULT_NONCE: u64 = 1;
pub const DEFAULT_MAX_PRIORITY_FEE_PER_GAS: u64 = 50;
pub const DEFAULT_MAX_FEE_PER_GAS: u64 = 1000;
pub const DEFAULT_GAS_LIMIT: u64 = 100_000;
pub const DEFAULT_VALUE: u64 = 1;
pub const DEFAULT_MAX_FEE_PER_BLOB_GAS: u64 = 100;

/// Recipient of every generated transaction.
pub const DEFAULT_RECIPIENT: Address = address!("45Ae5777c9b35Eb16280e423b0d7c91C06C66B58");

/// Calldata of every generated transaction.
pub const DEFAULT_INPUT: [u8; 8] = [0x52, 0xfd, 0xfc, 0x07, 0x21, 0x82, 0x65, 0x4f];

/// Well-known test key (`0x46` repeated), never use it for real funds.
pub const TEST_PRIVATE_KEY: &str =
    "4646464646464646464646464646464646464646464646464646464646464646";

/// Only directories whose name contains this marker are treated as vectors.
pub const VALID_VECTOR_MARKER: &str = "_valid_";

/// File holding a vector inside its directory.
pub const VECTOR_FILE: &str = "data.yaml";

/// Vectors processed at once.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Fields shared by every generated transaction; only the blob hash varies.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct TxTemplate {
    #[builder(default = DEFAULT_CHAIN_ID)]
    pub chain_id: u64,
    #[builder(default = DEFAULT_NONCE)]
    pub nonce: u64,
    #[builder(default = DEFAULT_MAX_PRIORITY_FEE_PER_GAS)]
    pub max_priority_fee_per_gas: u64,
    #[builder(default = DEFAULT_MAX_FEE_PER_GAS)]
    pub max_fee_per_gas: u64,
    #[builder(default = DEFAULT_GAS_LIMIT)]
    pub gas_limit: u64,
    #[builder(default = DEFAULT_RECIPIENT)]
    pub to: Address,
    #[builder(default = DEFAULT_VALUE)]
    pub value: u64,
    #[builder(default = Bytes::from_static(&DEFAULT_INPUT), into)]
    pub input: Bytes,
    #[builder(default = DEFAULT_MAX_FEE_PER_BLOB_GAS)]
    pub max_fee_per_blob_gas: u64,
}

impl Default for TxTemplate {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl TxTemplate {
    /// An unsigned transaction referencing `blob_versioned_hashes`.
    pub fn to_transaction(&self, blob_versioned_hashes: Vec<B256>) -> BlobTransaction {
        BlobTransaction::builder()
            .chain_id(U256::from(self.chain_id))
            .nonce(self.nonce)
            .max_priority_fee_per_gas(U256::from(self.max_priority_fee_per_gas))
            .max_fee_per_gas(U256::from(self.max_fee_per_gas))
            .gas_limit(self.gas_limit)
            .to(self.to)
            .value(U256::from(self.value))
            .input(self.input.clone())
            .max_fee_per_blob_gas(U256::from(self.max_fee_per_blob_gas))
            .blob_versioned_hashes(blob_versioned_hashes)
            .build()
    }
}
