// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::sync::Arc;

use obex_rs::{
    client::Client,
    connection::Action,
    header::{Header, HeaderValue},
    opcode::{Opcode, ResponseCode},
    server::{ConnectionIdMinter, Server, ServerEvent},
};

/// Feeds `request` into `server` until a whole request has arrived, returning
/// the opcode the application must respond to.
fn feed_request(server: &mut Server, request: &[u8]) -> Opcode {
    let (event, ack) = server.input(request);
    assert!(ack.is_empty(), "single-packet requests never need a continue ack");
    match event {
        ServerEvent::RequestReady(op) => op,
        other => panic!("expected RequestReady, got {other:?}"),
    }
}

#[test]
fn client_and_server_complete_a_connect_get_disconnect_session() {
    let mut client = Client::new();
    let mut server = Server::new(Arc::new(ConnectionIdMinter::new()));

    let (_, connect_request) = client.connect(&[]).unwrap();
    let op = feed_request(&mut server, &connect_request);
    assert_eq!(op, Opcode::Connect);
    let connect_response = server.respond(ResponseCode::Ok, &[]).unwrap();
    let (action, _) = client.input(&connect_response);
    assert_eq!(action, Action::Done);
    assert!(client.conn.connected);
    assert_eq!(client.conn.connection_id, server.conn.connection_id);

    let name = Header::named("Name", HeaderValue::Unicode(String::new())).unwrap();
    let (_, get_request) = client.get(&[name]).unwrap();
    let op = feed_request(&mut server, &get_request);
    assert_eq!(op, Opcode::Get);
    assert_eq!(server.headers("Name").len(), 1);
    let get_response = server.respond_content(b"hello world", ResponseCode::Ok, &[]).unwrap();
    let (action, _) = client.input(&get_response);
    assert_eq!(action, Action::Done);
    assert_eq!(client.bodies(), vec![b"hello world".to_vec()]);

    let (_, disconnect_request) = client.disconnect(&[]).unwrap();
    let op = feed_request(&mut server, &disconnect_request);
    assert_eq!(op, Opcode::Disconnect);
    let disconnect_response = server.respond(ResponseCode::Ok, &[]).unwrap();
    let (action, _) = client.input(&disconnect_response);
    assert_eq!(action, Action::Done);
    assert!(!client.conn.connected);
    assert_eq!(server.conn.connection_id, None);
    assert_eq!(server.conn.max_packet_len, obex_rs::connection::DEFAULT_MAX_PACKET_LEN);
}

#[test]
fn server_rejects_a_response_that_does_not_fit_the_negotiated_packet_size() {
    let mut server = Server::new(Arc::new(ConnectionIdMinter::new()));
    let mut client = Client::new();
    let (_, connect_request) = client.connect(&[]).unwrap();
    feed_request(&mut server, &connect_request);
    server.respond(ResponseCode::Ok, &[]).unwrap();

    let name = Header::named("Name", HeaderValue::Unicode(String::new())).unwrap();
    let (_, get_request) = client.get(&[name]).unwrap();
    feed_request(&mut server, &get_request);

    let oversized = vec![0x41; server.conn.max_packet_len as usize * 2];
    assert!(server.respond_content(&oversized, ResponseCode::Ok, &[]).is_err());
}

#[test]
fn two_servers_sharing_a_minter_never_mint_the_same_connection_id() {
    let minter = Arc::new(ConnectionIdMinter::new());
    let mut server_a = Server::new(minter.clone());
    let mut server_b = Server::new(minter);

    let mut client_a = Client::new();
    let mut client_b = Client::new();

    let (_, req_a) = client_a.connect(&[]).unwrap();
    feed_request(&mut server_a, &req_a);
    server_a.respond(ResponseCode::Ok, &[]).unwrap();

    let (_, req_b) = client_b.connect(&[]).unwrap();
    feed_request(&mut server_b, &req_b);
    server_b.respond(ResponseCode::Ok, &[]).unwrap();

    assert_ne!(server_a.conn.connection_id, server_b.conn.connection_id);
}
