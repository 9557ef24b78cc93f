//! Shared types for the blobtx crate family.

use serde::{Deserialize, Serialize};

/// A KZG test vector as published in the consensus reference tests (`data.yaml`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorDocument {
    pub input: VectorInput,
    /// Expected `[cells, proofs]`, hex encoded. Absent for vectors that only carry input.
    #[serde(default)]
    pub output: Option<Vec<Vec<String>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorInput {
    /// `0x`-prefixed hex of the 131072-byte blob.
    pub blob: String,
}

impl VectorDocument {
    /// Expected cell proofs, if the vector carries them.
    pub fn expected_proofs(&self) -> Option<&[String]> {
        self.output.as_ref().and_then(|out| out.get(1)).map(Vec::as_slice)
    }
}

/// One processed vector, as written to the output file.
///
/// All byte fields are `0x`-prefixed lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorOutput {
    pub test_name: String,
    pub blob: String,
    pub commitment: String,
    pub versioned_hash: String,
    pub cell_proofs: Vec<String>,
    pub signed_transaction_hex: String,
}
