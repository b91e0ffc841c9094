// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use hex_literal::hex;
use obex_rs::header::{app_params, decode_all, Header, HeaderValue};

#[test]
fn name_header_matches_reference_bytes() {
    let h = Header::named("Name", HeaderValue::Unicode("IMG001.JPG".into())).unwrap();
    let encoded = h.encode();
    assert_eq!(encoded[0], 0x01);
    let (decoded, consumed) = Header::decode_one(&encoded).unwrap();
    assert_eq!(consumed, encoded.len());
    assert_eq!(decoded.value, HeaderValue::Unicode("IMG001.JPG".into()));
}

#[test]
fn connection_id_header_matches_reference_bytes() {
    let h = Header::named("ConnectionId", HeaderValue::U32(0x0000_0001)).unwrap();
    assert_eq!(h.encode(), hex!("CB 00000001").to_vec());
}

#[test]
fn mixed_header_list_round_trips_through_decode_all() {
    let headers = vec![
        Header::named("ConnectionId", HeaderValue::U32(3)).unwrap(),
        Header::named("Type", HeaderValue::Bytes(b"text/x-vcard\0".to_vec())).unwrap(),
        Header::named("Length", HeaderValue::U32(42)).unwrap(),
        Header::named("Body", HeaderValue::Bytes(vec![1, 2, 3])).unwrap(),
    ];
    let mut buf = Vec::new();
    for h in &headers {
        buf.extend_from_slice(&h.encode());
    }
    let decoded = decode_all(&buf).unwrap();
    assert_eq!(decoded, headers);
}

#[test]
fn app_parameters_round_trip_inside_a_header() {
    let params = vec![
        app_params::AppParameter { tag: 0x01, value: vec![0x00] },
        app_params::AppParameter { tag: 0x02, value: vec![0xAA, 0xBB, 0xCC] },
    ];
    let payload = app_params::encode(&params);
    let h = Header::named("AppParameters", HeaderValue::Bytes(payload.clone())).unwrap();
    let (decoded, _) = Header::decode_one(&h.encode()).unwrap();
    match decoded.value {
        HeaderValue::Bytes(b) => assert_eq!(app_params::decode(&b).unwrap(), params),
        other => panic!("expected bytes, got {other:?}"),
    }
}
