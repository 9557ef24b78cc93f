mod kzg;

use alloy_primitives::{Address, Bytes, B256};
use blobtx_core::{Bytes48, DigestSigner, BYTES_PER_BLOB, CELLS_PER_EXT_BLOB};

use crate::{
    backend::{BackendError, BlobCommitment, CommitmentBackend},
    config::TEST_PRIVATE_KEY,
    loader::VectorCase,
    signer::{AddressedSigner, LocalSigner},
};

/// Address of [`TEST_PRIVATE_KEY`].
pub(super) const TEST_ADDRESS: Address =
    alloy_primitives::address!("9d8A62f656a8d1615C1294fd71e9CFb3E4855A4F");

pub(super) fn zero_commitment() -> Bytes48 {
    let mut c = [0u8; 48];
    c[0] = 0xc0;
    Bytes48::from(c)
}

pub(super) fn zero_blob_hex() -> String {
    format!("0x{}", "00".repeat(BYTES_PER_BLOB))
}

pub(super) fn case(name: &str, first_byte: u8) -> VectorCase {
    let mut blob = vec![0u8; BYTES_PER_BLOB];
    blob[0] = first_byte;
    VectorCase {
        name: name.to_string(),
        blob_hex: format!("0x{}", hex::encode(&blob)),
        blob: Bytes::from(blob),
        expected_proofs: None,
    }
}

pub(super) fn test_signer() -> LocalSigner {
    LocalSigner::from_hex(TEST_PRIVATE_KEY).unwrap()
}

/// Deterministic backend: fixed commitment, proof `i` is `i` repeated.
/// Blobs starting with `0xff` are rejected.
#[derive(Debug, Default)]
pub(super) struct FakeBackend;

pub(super) fn fake_proofs() -> Vec<Bytes48> {
    (0..CELLS_PER_EXT_BLOB).map(|i| Bytes48::repeat_byte(i as u8)).collect()
}

impl CommitmentBackend for FakeBackend {
    fn commit(&self, blob: &[u8]) -> Result<BlobCommitment, BackendError> {
        if blob.first() == Some(&0xff) {
            return Err(BackendError("blob is not canonical".to_string()));
        }
        Ok(BlobCommitment { commitment: zero_commitment(), cell_proofs: fake_proofs() })
    }
}

/// Signer whose key is unavailable.
pub(super) struct FailingSigner;

impl DigestSigner for FailingSigner {
    type Error = String;

    fn sign_digest(&self, _digest: &B256) -> Result<[u8; 65], Self::Error> {
        Err("hardware wallet disconnected".to_string())
    }
}

impl AddressedSigner for FailingSigner {
    fn address(&self) -> Address {
        Address::ZERO
    }
}

/// Signs with the test key but claims another address.
pub(super) struct WrongAddressSigner(pub LocalSigner);

impl DigestSigner for WrongAddressSigner {
    type Error = alloy_signer::Error;

    fn sign_digest(&self, digest: &B256) -> Result<[u8; 65], Self::Error> {
        self.0.sign_digest(digest)
    }
}

impl AddressedSigner for WrongAddressSigner {
    fn address(&self) -> Address {
        Address::repeat_byte(0x11)
    }
}
