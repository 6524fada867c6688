//! A scripted in-process remote store for handler tests.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{Ipv4Addr, SocketAddr, TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use keti_engine::{ClientConfig, Endpoint, KetiHton};

pub const TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Serve `conns` connections in order, running `script` on each. Returns a
/// handlerton pointed at the peer and the per-connection results.
pub fn spawn_peer<T, F>(conns: usize, script: F) -> (KetiHton, JoinHandle<Vec<T>>)
where
    F: Fn(TcpStream) -> T + Send + 'static,
    T: Send + 'static,
{
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).expect("bind peer");
    let endpoint = endpoint_of(&listener);
    let handle = thread::spawn(move || {
        (0..conns)
            .map(|_| {
                let (stream, _) = listener.accept().expect("accept client");
                stream.set_read_timeout(Some(TEST_TIMEOUT)).unwrap();
                script(stream)
            })
            .collect()
    });

    (KetiHton::new(config(endpoint)), handle)
}

pub fn dead_hton() -> KetiHton {
    // The listener is dropped on return, so the port refuses connections
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).expect("bind probe");
    KetiHton::new(config(endpoint_of(&listener)))
}

/// Read one request; returns the opcode and, for writes, the payload
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

pub fn reply(stream: &mut TcpStream, bytes: &[u8]) {
    stream.write_all(bytes).expect("write reply");
}

pub fn wait_for_close(stream: &mut TcpStream) {
    let mut buf = [0u8; 64];
    while matches!(stream.read(&mut buf), Ok(n) if n > 0) {}
}

fn config(endpoint: Endpoint) -> ClientConfig {
    ClientConfig::new(endpoint)
        .with_connect_timeout(Some(Duration::from_secs(2)))
        .with_io_timeout(Some(TEST_TIMEOUT))
}

fn endpoint_of(listener: &TcpListener) -> Endpoint {
    match listener.local_addr().expect("local addr") {
        SocketAddr::V4(addr) => addr.into(),
        SocketAddr::V6(addr) => panic!("expected an IPv4 listener, got {addr}"),
    }
}
