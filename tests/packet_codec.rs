// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use hex_literal::hex;
use obex_rs::{
    header::{Header, HeaderValue},
    opcode::{Opcode, RawOpcode},
    packet::{self, ConnectFields, FixedFields, Packet, RawSetPathFlags, SetPathFields, SetPathFlags},
};
use zerocopy::byteorder::U16;

#[test]
fn empty_disconnect_matches_reference_bytes() {
    let packet = Packet { code: RawOpcode::build(Opcode::Disconnect as u8, true), fixed: FixedFields::Empty, headers: vec![] };
    assert_eq!(packet.encode(), hex!("81 0003").to_vec());
}

#[test]
fn connect_request_matches_reference_bytes() {
    let packet = Packet {
        code: RawOpcode::build(Opcode::Connect as u8, true),
        fixed: FixedFields::Connect(ConnectFields { version: 0x10, flags: 0, max_packet_len: U16::new(0x2000) }),
        headers: vec![],
    };
    assert_eq!(packet.encode(), hex!("80 0007 10 00 2000").to_vec());
}

#[test]
fn setpath_request_round_trips_flags() {
    let mut raw = RawSetPathFlags::from_raw(0);
    raw.set_flags(SetPathFlags::PARENT);
    let packet = Packet {
        code: RawOpcode::build(Opcode::SetPath as u8, true),
        fixed: FixedFields::SetPath(SetPathFields { flags: raw, constants: 0 }),
        headers: vec![Header::named("Name", HeaderValue::Unicode("docs".into())).unwrap()],
    };
    let encoded = packet.encode();
    let decoded = Packet::decode_request(&encoded).unwrap();
    assert_eq!(decoded, packet);
    match decoded.fixed {
        FixedFields::SetPath(f) => assert!(f.flags.flags().contains(SetPathFlags::PARENT)),
        _ => panic!("expected setpath fixed fields"),
    }
}

#[test]
fn probe_len_reads_declared_length_without_requiring_a_whole_packet() {
    let buf = hex!("02 000A 00");
    assert_eq!(packet::probe_len(&buf).unwrap(), 0x000A);
    assert!(!packet::is_complete(&buf));
}

#[test]
fn is_complete_true_once_declared_bytes_present() {
    let packet = Packet {
        code: RawOpcode::build(Opcode::Put as u8, false),
        fixed: FixedFields::Empty,
        headers: vec![Header::named("Body", HeaderValue::Bytes(vec![1, 2, 3])).unwrap()],
    };
    let encoded = packet.encode();
    assert!(packet::is_complete(&encoded));
    assert!(!packet::is_complete(&encoded[..encoded.len() - 1]));
}

#[test]
fn decode_request_rejects_unknown_opcode() {
    let buf = hex!("09 0003");
    assert!(Packet::decode_request(&buf).is_err());
}

#[test]
fn decode_request_rejects_truncated_buffer() {
    let packet = Packet { code: RawOpcode::build(Opcode::Get as u8, true), fixed: FixedFields::Empty, headers: vec![] };
    let encoded = packet.encode();
    assert!(Packet::decode_request(&encoded[..encoded.len() - 1]).is_err());
}

#[test]
fn assemble_builds_the_same_bytes_as_encode() {
    let headers = vec![Header::named("ConnectionId", HeaderValue::U32(9)).unwrap()];
    let via_encode = Packet { code: RawOpcode::build(Opcode::Get as u8, true), fixed: FixedFields::Empty, headers: headers.clone() }
        .encode();
    let blobs: Vec<Vec<u8>> = headers.iter().map(Header::encode).collect();
    let via_assemble = packet::assemble(RawOpcode::build(Opcode::Get as u8, true), &FixedFields::Empty, &blobs);
    assert_eq!(via_encode, via_assemble);
}
