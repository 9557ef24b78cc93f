//! Output file writing.

use std::{fs, path::Path};

use blobtx_types::VectorOutput;

use crate::VectorError;

/// `0x`-prefixed lowercase hex.
pub(crate) fn to_hex(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Write the records as a pretty-printed JSON array.
pub fn write_outputs(path: &Path, outputs: &[VectorOutput]) -> Result<(), VectorError> {
    let json = serde_json::to_string_pretty(outputs)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| VectorError::io(parent, e))?;
    }
    fs::write(path, json).map_err(|e| VectorError::io(path, e))
}
