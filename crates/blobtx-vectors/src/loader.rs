//! Discovery and parsing of KZG test vectors.
//!
//! Layout: `<dir>/<name>/data.yaml`, where only names containing `_valid_` are used.

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy_primitives::Bytes;
use blobtx_core::{Bytes48, BYTES_PER_BLOB};
use blobtx_types::VectorDocument;

use crate::{
    config::{VALID_VECTOR_MARKER, VECTOR_FILE},
    VectorError,
};

/// A parsed vector, ready for the pipeline.
#[derive(Debug, Clone)]
pub struct VectorCase {
    pub name: String,
    /// Blob hex exactly as it appears in the vector.
    pub blob_hex: String,
    pub blob: Bytes,
    pub expected_proofs: Option<Vec<Bytes48>>,
}

/// List every valid vector file under `dir`, sorted by path.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>, VectorError> {
    let entries = fs::read_dir(dir).map_err(|e| VectorError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| VectorError::io(dir, e))?;
        let name = entry.file_name();
        if !name.to_string_lossy().contains(VALID_VECTOR_MARKER) {
            continue;
        }
        let file = entry.path().join(VECTOR_FILE);
        if file.is_file() {
            files.push(file);
        }
    }

    files.sort();
    Ok(files)
}

/// Read and parse the vector at `path`; its name is the parent directory's.
pub fn load_case(path: &Path) -> Result<VectorCase, VectorError> {
    let contents = fs::read_to_string(path).map_err(|e| VectorError::io(path, e))?;
    let document: VectorDocument = serde_yaml::from_str(&contents)
        .map_err(|source| VectorError::Yaml { path: path.to_path_buf(), source })?;
    parse_case(vector_name(path), document)
}

/// Name of the vector stored at `path`.
pub fn vector_name(path: &Path) -> String {
    path.parent()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn parse_case(name: String, document: VectorDocument) -> Result<VectorCase, VectorError> {
    let blob = decode_hex("blob", &document.input.blob)?;
    if blob.len() != BYTES_PER_BLOB {
        return Err(VectorError::Width { field: "blob", expected: BYTES_PER_BLOB, got: blob.len() });
    }

    let expected_proofs = document
        .expected_proofs()
        .map(|proofs| proofs.iter().map(|p| decode_bytes48("proof", p)).collect())
        .transpose()?;

    Ok(VectorCase {
        name,
        blob_hex: document.input.blob,
        blob: Bytes::from(blob),
        expected_proofs,
    })
}

fn decode_hex(field: &'static str, value: &str) -> Result<Vec<u8>, VectorError> {
    let value = value.trim();
    let value = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(value).map_err(|source| VectorError::Decode { field, source })
}

fn decode_bytes48(field: &'static str, value: &str) -> Result<Bytes48, VectorError> {
    let bytes = decode_hex(field, value)?;
    if bytes.len() != 48 {
        return Err(VectorError::Width { field, expected: 48, got: bytes.len() });
    }
    Ok(Bytes48::from_slice(&bytes))
}
