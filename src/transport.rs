// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Blocking transport abstraction the synchronous completion adapter drives.
//! The protocol core itself never touches I/O; this is the seam where a
//! concrete byte stream plugs in.

use std::{
    io::{self, Read, Write},
    net::TcpStream,
    time::Duration,
};

/// A duplex byte stream the synchronous adapter can read from and write to.
/// Implemented here for `std::net::TcpStream`; any blocking stream that also
/// supports a read timeout (a Bluetooth RFCOMM socket, an IrDA socket) can
/// implement it directly.
pub trait Transport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()>;
    fn set_read_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()>;
}

impl Transport for TcpStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Read::read(self, buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        Write::write_all(self, buf)
    }

    fn set_read_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()> {
        TcpStream::set_read_timeout(self, timeout)
    }
}
