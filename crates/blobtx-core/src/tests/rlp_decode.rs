use alloy_primitives::{Bytes, U256};
use alloy_rlp::Header;
use proptest::prelude::*;

use crate::{
    rlp::{decode, decode_exact, RlpError, RlpItem, MAX_DEPTH},
    BlobTransaction, TransactionError,
};

fn nested_sample() -> RlpItem {
    RlpItem::List(vec![
        RlpItem::uint(0),
        RlpItem::uint(1),
        RlpItem::uint(1_000_000),
        RlpItem::Uint(U256::MAX),
        RlpItem::bytes(vec![0x00]),
        RlpItem::bytes(vec![0xff; 1024]),
        RlpItem::List(vec![]),
        RlpItem::List(vec![RlpItem::List(vec![RlpItem::bytes(&b"deep"[..])])]),
    ])
}

#[test]
fn test_roundtrip_yields_canonical_form() {
    let item = nested_sample();
    let decoded = decode_exact(&item.to_rlp()).unwrap();

    assert_eq!(decoded, item.clone().canonical());
    assert_eq!(decoded.to_rlp(), item.to_rlp());
}

fn arb_item() -> impl Strategy<Value = RlpItem> {
    let leaf = prop_oneof![
        prop::collection::vec(any::<u8>(), 0..=300).prop_map(RlpItem::bytes),
        prop::collection::vec(any::<u8>(), 0..=1).prop_map(RlpItem::bytes),
        any::<[u8; 32]>().prop_map(|be| RlpItem::Uint(U256::from_be_bytes(be))),
        any::<u64>().prop_map(RlpItem::uint),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop::collection::vec(inner, 0..8).prop_map(RlpItem::List)
    })
}

proptest! {
    #[test]
    fn test_roundtrip_any_item(item in arb_item()) {
        let encoded = item.to_rlp();

        prop_assert_eq!(item.encoded_len(), encoded.len());
        let decoded = decode_exact(&encoded).unwrap();
        prop_assert_eq!(decoded.to_rlp(), encoded);
        prop_assert_eq!(decoded, item.canonical());
    }
}

fn nested_lists(depth: usize) -> RlpItem {
    (0..depth).fold(RlpItem::List(vec![]), |inner, _| RlpItem::List(vec![inner]))
}

/// `depth` list headers around an empty list, built without recursion.
fn nested_list_bytes(depth: usize) -> Vec<u8> {
    let mut headers = Vec::with_capacity(depth);
    let mut len = 1;
    for _ in 0..depth {
        let header = Header { list: true, payload_length: len };
        len += header.length();
        headers.push(header);
    }
    let mut out = Vec::with_capacity(len);
    for header in headers.iter().rev() {
        header.encode(&mut out);
    }
    out.push(0xc0);
    out
}

#[test]
fn test_nesting_limit() {
    // `nested_lists(n)` holds n + 1 lists.
    assert!(decode_exact(&nested_lists(MAX_DEPTH - 1).to_rlp()).is_ok());
    assert!(matches!(
        decode_exact(&nested_lists(MAX_DEPTH).to_rlp()),
        Err(RlpError::TooDeep(MAX_DEPTH))
    ));
}

#[test]
fn test_deep_nesting_is_an_error() {
    let encoded = nested_list_bytes(200_000);
    assert!(matches!(decode_exact(&encoded), Err(RlpError::TooDeep(_))));

    let mut wire = vec![0x03];
    wire.extend_from_slice(&encoded);
    assert!(matches!(
        BlobTransaction::decode_wire_payload(&wire),
        Err(TransactionError::Rlp(RlpError::TooDeep(_)))
    ));
}

#[test]
fn test_decoded_integers_read_back() {
    let decoded = decode_exact(&nested_sample().to_rlp()).unwrap();
    let fields = decoded.as_list().unwrap();

    assert_eq!(fields[0].as_uint().unwrap(), U256::ZERO);
    assert_eq!(fields[1].as_u64().unwrap(), 1);
    assert_eq!(fields[2].as_u64().unwrap(), 1_000_000);
    assert_eq!(fields[3].as_uint().unwrap(), U256::MAX);
}

#[test]
fn test_decode_advances_buffer() {
    let mut encoded = RlpItem::uint(5).to_rlp();
    encoded.extend(RlpItem::bytes(&b"dog"[..]).to_rlp());

    let mut buf = encoded.as_slice();
    assert_eq!(decode(&mut buf).unwrap(), RlpItem::bytes(vec![5]));
    assert_eq!(decode(&mut buf).unwrap(), RlpItem::bytes(&b"dog"[..]));
    assert!(buf.is_empty());
}

#[test]
fn test_rejects_non_canonical_single_byte() {
    assert!(matches!(decode_exact(&[0x81, 0x05]), Err(RlpError::Malformed(_))));
}

#[test]
fn test_rejects_long_form_for_short_payload() {
    assert!(matches!(decode_exact(&[0xb8, 0x02, 0x01, 0x02]), Err(RlpError::Malformed(_))));
}

#[test]
fn test_rejects_truncated_input() {
    assert!(matches!(decode_exact(&[0x83, b'd']), Err(RlpError::Malformed(_))));
    assert!(matches!(decode_exact(&[0xc3, 0x01]), Err(RlpError::Malformed(_))));
}

#[test]
fn test_rejects_trailing_bytes() {
    assert!(matches!(decode_exact(&[0x80, 0x80]), Err(RlpError::TrailingBytes(1))));
}

#[test]
fn test_uint_accessors_reject_bad_shapes() {
    let padded = RlpItem::Bytes(Bytes::from(vec![0x00, 0x01]));
    assert!(matches!(padded.as_uint(), Err(RlpError::LeadingZero)));

    let wide = RlpItem::Bytes(Bytes::from(vec![0x01; 33]));
    assert!(matches!(wide.as_uint(), Err(RlpError::Overflow(33))));

    let nine = RlpItem::Bytes(Bytes::from(vec![0x01; 9]));
    assert!(matches!(nine.as_u64(), Err(RlpError::Overflow(_))));

    assert!(matches!(RlpItem::List(vec![]).as_uint(), Err(RlpError::ExpectedBytes)));
}

#[test]
fn test_fixed_accessor_checks_width() {
    let item = RlpItem::bytes(vec![0xab; 19]);
    assert!(matches!(
        item.as_fixed::<20>(),
        Err(RlpError::UnexpectedLength { expected: 20, got: 19 })
    ));
    assert!(matches!(item.as_list(), Err(RlpError::ExpectedList)));
}
