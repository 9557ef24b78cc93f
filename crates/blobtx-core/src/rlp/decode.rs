//! Strict RLP decoding.
//!
//! Header parsing is delegated to `alloy-rlp`, which already rejects every
//! non-canonical form: a single byte below `0x80` wrapped in a string header,
//! long-form headers for payloads under 56 bytes, and lengths with leading zeros.

use alloy_primitives::Bytes;
use alloy_rlp::Header;

use super::{RlpError, RlpItem};

/// Deepest list nesting accepted. A blob transaction needs five levels.
pub const MAX_DEPTH: usize = 64;

/// Decode one item from the front of `buf`, advancing it past the item.
#[inline]
pub fn decode(buf: &mut &[u8]) -> Result<RlpItem, RlpError> {
    decode_at(buf, 0)
}

fn decode_at(buf: &mut &[u8], depth: usize) -> Result<RlpItem, RlpError> {
    let header = Header::decode(buf)?;
    // `Header::decode` guarantees the payload is fully present.
    let (payload, rest) = buf.split_at(header.payload_length);
    *buf = rest;

    if !header.list {
        return Ok(RlpItem::Bytes(Bytes::copy_from_slice(payload)));
    }
    if depth >= MAX_DEPTH {
        return Err(RlpError::TooDeep(MAX_DEPTH));
    }

    let mut payload = payload;
    let mut items = Vec::new();
    while !payload.is_empty() {
        items.push(decode_at(&mut payload, depth + 1)?);
    }
    Ok(RlpItem::List(items))
}

/// Decode a buffer that must hold exactly one item.
pub fn decode_exact(data: &[u8]) -> Result<RlpItem, RlpError> {
    let mut buf = data;
    let item = decode(&mut buf)?;
    if !buf.is_empty() {
        return Err(RlpError::TrailingBytes(buf.len()));
    }
    Ok(item)
}
