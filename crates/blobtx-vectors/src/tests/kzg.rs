//! End to end with the real KZG backend.

use alloy_primitives::{hex, Bytes, U256};
use blobtx_core::{
    kzg_to_versioned_hash, BlobTransaction, RlpItem, BYTES_PER_BLOB, CELLS_PER_EXT_BLOB,
};

use super::{case, test_signer, zero_commitment, TEST_ADDRESS};
use crate::{recover_signer, CKzgBackend, CommitmentBackend, PipelineConfig, VectorPipeline};

#[test]
fn test_zero_blob_commitment() {
    let committed = CKzgBackend::mainnet().commit(&vec![0u8; BYTES_PER_BLOB]).unwrap();

    assert_eq!(committed.commitment, zero_commitment());
    assert_eq!(committed.cell_proofs.len(), CELLS_PER_EXT_BLOB);
    assert!(committed.cell_proofs.iter().all(|p| *p == zero_commitment()));
}

#[test]
fn test_backend_rejects_wrong_width() {
    assert!(CKzgBackend::mainnet().commit(&[0u8; 32]).is_err());
}

#[test]
fn test_backend_rejects_non_canonical_field_element() {
    let blob = vec![0xffu8; BYTES_PER_BLOB];
    assert!(CKzgBackend::mainnet().commit(&blob).is_err());
}

#[test]
fn test_zero_blob_end_to_end() {
    let pipeline =
        VectorPipeline::new(CKzgBackend::mainnet(), test_signer(), PipelineConfig::default());
    let output = pipeline.process(&case("compute_cells_case_valid_zero", 0)).unwrap();

    let versioned_hash = kzg_to_versioned_hash(&zero_commitment());
    assert_eq!(versioned_hash[0], 0x01);
    assert_eq!(output.versioned_hash, format!("{}", versioned_hash));

    let wire = hex::decode(&output.signed_transaction_hex).unwrap();
    assert_eq!(wire[0], 0x03);

    let outer = blobtx_core::rlp::decode_exact(&wire[1..]).unwrap();
    let members = outer.as_list().unwrap();
    assert_eq!(members.len(), 5);
    assert_eq!(members[0].as_list().unwrap().len(), 14);
    assert_eq!(members[1].as_uint().unwrap(), U256::from(1));
    assert_eq!(members[2].as_list().unwrap().len(), 1);
    let commitment = RlpItem::Bytes(Bytes::copy_from_slice(zero_commitment().as_slice()));
    assert_eq!(members[3].as_list().unwrap(), &[commitment][..]);
    assert_eq!(members[4].as_list().unwrap().len(), CELLS_PER_EXT_BLOB);

    let (tx, sidecar) = BlobTransaction::decode_wire_payload(&wire).unwrap();
    assert_eq!(tx.blob_versioned_hashes, vec![versioned_hash]);
    assert_eq!(sidecar.versioned_hashes(), tx.blob_versioned_hashes);
    assert_eq!(recover_signer(&tx).unwrap(), TEST_ADDRESS);
}
