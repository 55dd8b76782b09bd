// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tokio::io::{DuplexStream, ReadHalf, WriteHalf, duplex, split};

/// Buffer size of the in-memory pipe. Bigger than any frame the tests send.
pub const MOCK_SOCKET_BUFFER_SIZE: usize = 1024;

/// The client (device) and server (host) halves of one in-memory connection.
#[derive(Debug)]
pub struct MockSocket {
    pub client_read: ReadHalf<DuplexStream>,
    pub client_write: WriteHalf<DuplexStream>,
    pub server_read: ReadHalf<DuplexStream>,
    pub server_write: WriteHalf<DuplexStream>,
}

/// Bytes written to `client_write` are read from `server_read`, and bytes written to
/// `server_write` are read from `client_read`.
#[must_use]
pub fn get_mock_socket_halves() -> MockSocket {
    let (client_stream, server_stream) = duplex(MOCK_SOCKET_BUFFER_SIZE);
    let (client_read, client_write) = split(client_stream);
    let (server_read, server_write) = split(server_stream);

    MockSocket {
        client_read,
        client_write,
        server_read,
        server_write,
    }
}
