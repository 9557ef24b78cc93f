//! Canonical RLP (recursive length prefix) codec.
//!
//! Supports exactly the shapes a blob transaction needs: byte strings, unsigned
//! integers (up to 256 bits) and lists of those, nested arbitrarily.
//! See <https://ethereum.org/en/developers/docs/data-structures-and-encoding/rlp/>

pub mod decode;
pub mod encode;

use alloy_primitives::{Address, Bytes, FixedBytes, B256, U256};
use thiserror::Error;

pub use decode::{decode, decode_exact, MAX_DEPTH};
pub use encode::{encode, encode_bytes, encode_list, encode_uint};

#[derive(Debug, Error)]
pub enum RlpError {
    #[error("malformed RLP: {0}")]
    Malformed(#[from] alloy_rlp::Error),
    #[error("{0} trailing bytes after RLP item")]
    TrailingBytes(usize),
    #[error("expected a byte string, found a list")]
    ExpectedBytes,
    #[error("expected a list, found a byte string")]
    ExpectedList,
    #[error("integer has leading zero bytes")]
    LeadingZero,
    #[error("integer too large: {0} bytes")]
    Overflow(usize),
    #[error("lists nested deeper than {0} levels")]
    TooDeep(usize),
    #[error("expected {expected} bytes, got {got}")]
    UnexpectedLength { expected: usize, got: usize },
}

/// A value that can be RLP encoded.
///
/// Integers keep their own variant so the encoder is the only place that
/// decides their minimal big-endian form. The decoder cannot tell integers
/// from byte strings and always yields [`RlpItem::Bytes`] for scalars; use
/// [`RlpItem::as_uint`] to read one back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem {
    Bytes(Bytes),
    Uint(U256),
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// Build a byte string item.
    pub fn bytes(data: impl Into<Bytes>) -> Self {
        Self::Bytes(data.into())
    }

    /// Build an integer item from a `u64`.
    pub fn uint(value: u64) -> Self {
        Self::Uint(U256::from(value))
    }

    /// Build a list of byte strings.
    pub fn bytes_list<T: AsRef<[u8]>>(items: &[T]) -> Self {
        Self::List(items.iter().map(|b| Self::Bytes(Bytes::copy_from_slice(b.as_ref()))).collect())
    }

    /// Length of this item once encoded, including its header.
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Bytes(data) => encode::bytes_len(data),
            Self::Uint(value) => encode::uint_len(*value),
            Self::List(items) => encode::list_len(encode::list_payload_len(items)),
        }
    }

    /// Append the canonical encoding of this item to `out`.
    #[inline]
    pub fn encode(&self, out: &mut Vec<u8>) {
        encode::encode(self, out)
    }

    /// Encode into a fresh buffer.
    pub fn to_rlp(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode(&mut buf);
        buf
    }

    /// Replace every [`RlpItem::Uint`] by the byte string it encodes to.
    ///
    /// This is the shape [`decode`] produces, so `decode(x.to_rlp()) == x.canonical()`.
    pub fn canonical(self) -> Self {
        match self {
            Self::Uint(value) => {
                let be = value.to_be_bytes::<32>();
                Self::Bytes(Bytes::copy_from_slice(encode::trim_leading_zeros(&be)))
            }
            Self::List(items) => Self::List(items.into_iter().map(Self::canonical).collect()),
            bytes => bytes,
        }
    }

    pub fn as_bytes(&self) -> Result<&[u8], RlpError> {
        match self {
            Self::Bytes(data) => Ok(&data[..]),
            Self::Uint(_) | Self::List(_) => Err(RlpError::ExpectedBytes),
        }
    }

    pub fn as_list(&self) -> Result<&[RlpItem], RlpError> {
        match self {
            Self::List(items) => Ok(items.as_slice()),
            _ => Err(RlpError::ExpectedList),
        }
    }

    /// Read an unsigned integer, rejecting non-minimal encodings.
    pub fn as_uint(&self) -> Result<U256, RlpError> {
        let data = match self {
            Self::Uint(value) => return Ok(*value),
            Self::Bytes(data) => data,
            Self::List(_) => return Err(RlpError::ExpectedBytes),
        };
        if data.first() == Some(&0) {
            return Err(RlpError::LeadingZero);
        }
        U256::try_from_be_slice(data).ok_or(RlpError::Overflow(data.len()))
    }

    pub fn as_u64(&self) -> Result<u64, RlpError> {
        let value = self.as_uint()?;
        u64::try_from(value).map_err(|_| RlpError::Overflow(value.byte_len()))
    }

    /// Read a byte string of exactly `N` bytes.
    pub fn as_fixed<const N: usize>(&self) -> Result<FixedBytes<N>, RlpError> {
        let data = self.as_bytes()?;
        if data.len() != N {
            return Err(RlpError::UnexpectedLength { expected: N, got: data.len() });
        }
        Ok(FixedBytes::from_slice(data))
    }
}

impl From<U256> for RlpItem {
    fn from(value: U256) -> Self {
        Self::Uint(value)
    }
}

impl From<Bytes> for RlpItem {
    fn from(data: Bytes) -> Self {
        Self::Bytes(data)
    }
}

impl From<Address> for RlpItem {
    fn from(addr: Address) -> Self {
        Self::Bytes(Bytes::copy_from_slice(addr.as_slice()))
    }
}

impl From<B256> for RlpItem {
    fn from(hash: B256) -> Self {
        Self::Bytes(Bytes::copy_from_slice(hash.as_slice()))
    }
}

impl From<Vec<RlpItem>> for RlpItem {
    fn from(items: Vec<RlpItem>) -> Self {
        Self::List(items)
    }
}
