//! Length-prefixed framed send/recv over a stream socket (C8).

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};

use crate::error::DispatchError;

/// Writes a 4-byte big-endian length prefix followed by `bytes`. `TcpStream`
/// (and `Write` generally) already retries partial writes internally via
/// `write_all`, matching the "must retry until complete" requirement.
pub fn send_frame<W: Write>(mut stream: W, bytes: &[u8]) -> Result<(), DispatchError> {
    let len = bytes.len() as u32;
    stream.write_all(&len.to_be_bytes())?;
    stream.write_all(bytes)?;
    Ok(())
}

/// Reads a 4-byte big-endian length prefix, then exactly that many bytes.
/// Blocks until both stages complete; short reads surface as an I/O error
/// from `read_exact` rather than a partial frame.
pub fn recv_frame<R: Read>(mut stream: R) -> Result<Vec<u8>, DispatchError> {
    let mut len_bytes = [0u8; 4];
    stream.read_exact(&mut len_bytes)?;
    let len = u32::from_be_bytes(len_bytes) as usize;

    let mut payload = vec![0u8; len];
    stream.read_exact(&mut payload)?;
    Ok(payload)
}

/// Binds a passive listening socket with backlog 8, matching the original
/// reference's `create_server_socket`. `TcpListener::bind` already resolves
/// either address family the way `getaddrinfo(AF_UNSPEC)` does; std has no
/// portable backlog knob beyond what the OS default provides, noted in
/// DESIGN.md.
pub fn create_server_socket(port: u16) -> std::io::Result<TcpListener> {
    TcpListener::bind(("0.0.0.0", port))
}

/// Opens an active connection to `host:port`, matching the original
/// reference's `create_client_socket`.
pub fn create_client_socket(host: &str, port: u16) -> std::io::Result<TcpStream> {
    TcpStream::connect((host, port))
}
