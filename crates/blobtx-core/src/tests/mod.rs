mod rlp_decode;

use std::cell::RefCell;

use alloy_primitives::{address, bytes, Address, Bytes, B256, U256};

use crate::{
    kzg_to_versioned_hash, BlobSidecar, BlobTransaction, Bytes48, DigestSigner, BYTES_PER_BLOB,
    CELLS_PER_EXT_BLOB,
};

pub(super) const RECIPIENT: Address = address!("45Ae5777c9b35Eb16280e423b0d7c91C06C66B58");

pub(super) fn commitment() -> Bytes48 {
    // Compressed point at infinity: the commitment of an all-zero blob.
    let mut c = [0u8; 48];
    c[0] = 0xc0;
    Bytes48::from(c)
}

/// The transaction used by the test-vector driver, bound to `commitment()`.
pub(super) fn sample_tx() -> BlobTransaction {
    BlobTransaction::builder()
        .chain_id(U256::from(1))
        .nonce(1)
        .max_priority_fee_per_gas(U256::from(50))
        .max_fee_per_gas(U256::from(1000))
        .gas_limit(100_000)
        .to(RECIPIENT)
        .value(U256::from(1))
        .input(bytes!("52fdfc072182654f"))
        .max_fee_per_blob_gas(U256::from(100))
        .blob_versioned_hashes(vec![kzg_to_versioned_hash(&commitment())])
        .build()
}

pub(super) fn zero_blob_sidecar() -> BlobSidecar {
    let proofs = (0..CELLS_PER_EXT_BLOB).map(|i| Bytes48::repeat_byte(i as u8)).collect();
    BlobSidecar::single(Bytes::from(vec![0u8; BYTES_PER_BLOB]), commitment(), proofs)
}

/// Returns a fixed signature and remembers the digest it was asked to sign.
pub(super) struct FakeSigner {
    pub recovery: u8,
    pub seen: RefCell<Option<B256>>,
}

impl FakeSigner {
    pub fn new(recovery: u8) -> Self {
        Self { recovery, seen: RefCell::new(None) }
    }

    pub fn raw(&self) -> [u8; 65] {
        let mut raw = [0u8; 65];
        raw[..32].copy_from_slice(&[0x11; 32]);
        // Leading zeros in `s` must be trimmed on the wire.
        raw[34..64].copy_from_slice(&[0x22; 30]);
        raw[64] = self.recovery;
        raw
    }
}

impl DigestSigner for FakeSigner {
    type Error = std::convert::Infallible;

    fn sign_digest(&self, digest: &B256) -> Result<[u8; 65], Self::Error> {
        *self.seen.borrow_mut() = Some(*digest);
        Ok(self.raw())
    }
}

pub(super) fn signed_tx() -> BlobTransaction {
    let mut tx = sample_tx();
    tx.sign(&FakeSigner::new(1)).unwrap();
    tx
}
