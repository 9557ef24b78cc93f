//! RLP encoding.
//!
//! ```text
//! | Prefix      | Meaning                                              |
//! |-------------|------------------------------------------------------|
//! | 0x00..=0x7f | single byte, encoded as itself                       |
//! | 0x80..=0xb7 | string of 0..=55 bytes, prefix = 0x80 + len          |
//! | 0xb8..=0xbf | long string, prefix = 0xb7 + len(len), then len (BE) |
//! | 0xc0..=0xf7 | list with 0..=55 payload bytes, prefix = 0xc0 + len  |
//! | 0xf8..=0xff | long list, prefix = 0xf7 + len(len), then len (BE)   |
//! ```

use alloy_primitives::U256;

use super::RlpItem;

/// Largest payload that still fits a single-byte header.
const SHORT_PAYLOAD_MAX: usize = 55;

const STRING_OFFSET: u8 = 0x80;
const LONG_STRING_OFFSET: u8 = 0xB7;
const LIST_OFFSET: u8 = 0xC0;
const LONG_LIST_OFFSET: u8 = 0xF7;

/// Encode any item into the provided buffer.
pub fn encode(item: &RlpItem, out: &mut Vec<u8>) {
    match item {
        RlpItem::Bytes(data) => encode_bytes(data, out),
        RlpItem::Uint(value) => encode_uint(*value, out),
        RlpItem::List(items) => encode_list(items, out),
    }
}

/// Encode an RLP string (bytes).
#[inline]
pub fn encode_bytes(data: &[u8], out: &mut Vec<u8>) {
    let len = data.len();

    if len == 1 && data[0] < STRING_OFFSET {
        // Single byte < 0x80: encoded as itself
        out.push(data[0]);
    } else if len <= SHORT_PAYLOAD_MAX {
        out.push(STRING_OFFSET + len as u8);
        out.extend_from_slice(data);
    } else {
        encode_long_header(out, LONG_STRING_OFFSET, len);
        out.extend_from_slice(data);
    }
}

/// Encode an unsigned integer as its minimal big-endian byte string.
///
/// Zero is the empty string (`0x80`), never `0x00`.
#[inline]
pub fn encode_uint(value: U256, out: &mut Vec<u8>) {
    let be = value.to_be_bytes::<32>();
    encode_bytes(trim_leading_zeros(&be), out);
}

/// Encode a list: header sized from the items' encoded lengths, then each item.
pub fn encode_list(items: &[RlpItem], out: &mut Vec<u8>) {
    let payload_len = list_payload_len(items);
    out.reserve(list_len(payload_len));

    encode_list_header(out, payload_len);
    for item in items {
        encode(item, out);
    }
}

/// Trim leading zero bytes from a big-endian encoded integer.
/// Returns empty slice for zero values.
#[inline]
pub(crate) fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b != 0) {
        Some(idx) => &bytes[idx..],
        None => &[],
    }
}

/// Calculate the RLP-encoded length of a string/bytes.
#[inline]
pub(crate) const fn bytes_len(data: &[u8]) -> usize {
    let len = data.len();
    if len == 1 && data[0] < STRING_OFFSET {
        1
    } else if len <= SHORT_PAYLOAD_MAX {
        1 + len
    } else {
        1 + len_of_length(len) + len
    }
}

#[inline]
pub(crate) fn uint_len(value: U256) -> usize {
    let be = value.to_be_bytes::<32>();
    bytes_len(trim_leading_zeros(&be))
}

/// Sum of the encoded lengths of the list members.
#[inline]
pub(crate) fn list_payload_len(items: &[RlpItem]) -> usize {
    items.iter().map(RlpItem::encoded_len).sum()
}

/// Encoded length of a list given its payload length.
#[inline]
pub(crate) const fn list_len(payload_len: usize) -> usize {
    if payload_len <= SHORT_PAYLOAD_MAX {
        1 + payload_len
    } else {
        1 + len_of_length(payload_len) + payload_len
    }
}

/// Calculate bytes needed to encode a length value.
#[inline]
pub(crate) const fn len_of_length(len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (usize::BITS as usize - len.leading_zeros() as usize + 7) / 8
    }
}

/// Encode an RLP list header.
#[inline]
fn encode_list_header(out: &mut Vec<u8>, payload_len: usize) {
    if payload_len <= SHORT_PAYLOAD_MAX {
        out.push(LIST_OFFSET + payload_len as u8);
    } else {
        encode_long_header(out, LONG_LIST_OFFSET, payload_len);
    }
}

/// Long form: `offset + len(len)` followed by the minimal big-endian length.
#[inline]
fn encode_long_header(out: &mut Vec<u8>, offset: u8, len: usize) {
    let len_bytes = len_of_length(len);
    let be = len.to_be_bytes();
    out.push(offset + len_bytes as u8);
    out.extend_from_slice(&be[be.len() - len_bytes..]);
}
