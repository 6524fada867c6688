//! Shared helpers for integration tests: a scripted in-process peer.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{Ipv4Addr, SocketAddr, TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use keti::{ClientConfig, Endpoint};

/// Upper bound for any single socket operation in tests, so that a broken
/// test fails instead of hanging.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Accept exactly one connection on a fresh loopback port and hand it to
/// `script`. Returns a config pointing at the peer and the script's result.
pub fn spawn_peer<T, F>(script: F) -> (ClientConfig, JoinHandle<T>)
where
    F: FnOnce(TcpStream) -> T + Send + 'static,
    T: Send + 'static,
{
    let _ = env_logger::builder().is_test(true).try_init();

    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).expect("bind peer");
    let endpoint = endpoint_of(&listener);
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept client");
        stream.set_read_timeout(Some(TEST_TIMEOUT)).unwrap();
        stream.set_write_timeout(Some(TEST_TIMEOUT)).unwrap();
        script(stream)
    });

    (test_config(endpoint), handle)
}

/// A loopback endpoint with nothing listening on it
pub fn dead_endpoint() -> Endpoint {
    // The listener is dropped on return, so the port refuses connections
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).expect("bind probe");
    endpoint_of(&listener)
}

pub fn test_config(endpoint: Endpoint) -> ClientConfig {
    ClientConfig::new(endpoint)
        .with_connect_timeout(Some(Duration::from_secs(2)))
        .with_io_timeout(Some(TEST_TIMEOUT))
}

/// Read one opcode byte, and a `record_length` payload if it is a write
pub fn read_request(stream: &mut TcpStream, record_length: usize) -> (u8, Vec<u8>) {
    let mut op = [0u8; 1];
    stream.read_exact(&mut op).expect("read opcode");
    let mut payload = Vec::new();
    if op[0] == b'w' {
        payload.resize(record_length, 0);
        stream.read_exact(&mut payload).expect("read payload");
    }
    (op[0], payload)
}

/// `token` zero padded or truncated to exactly `len` bytes
pub fn padded(token: &[u8], len: usize) -> Vec<u8> {
    let mut out = token.to_vec();
    out.resize(len, 0);
    out
}

/// Block until the client closes its side. True if it did so cleanly.
pub fn wait_for_close(stream: &mut TcpStream) -> bool {
    let mut buf = [0u8; 64];
    loop {
        match stream.read(&mut buf) {
            Ok(0) => return true,
            Ok(_) => continue,
            Err(_) => return false,
        }
    }
}

pub fn reply(stream: &mut TcpStream, bytes: &[u8]) {
    stream.write_all(bytes).expect("write reply");
    stream.flush().expect("flush reply");
}

fn endpoint_of(listener: &TcpListener) -> Endpoint {
    match listener.local_addr().expect("local addr") {
        SocketAddr::V4(addr) => addr.into(),
        SocketAddr::V6(addr) => panic!("expected an IPv4 listener, got {addr}"),
    }
}
