//! Single-shot UDP probe.
//!
//! # Responsibilities
//! - Resolve the target and open one socket for this probe only
//! - Send the payload as a single datagram
//! - Wait for one reply, bounded by the socket read timeout
//! - Classify the result
//!
//! # Design Decisions
//! - Blocking std socket with `SO_RCVTIMEO`; async callers run it on the
//!   blocking pool
//! - The socket is connected so ICMP errors surface on `recv`
//! - Socket is dropped on every return path

use std::io::{self, ErrorKind};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};

use crate::config::ProbeConfig;
use crate::probe::payload::render;
use crate::probe::{ProbeError, ProbeOutcome};

/// Receive buffer size. Larger replies are truncated, which is fine since only
/// their arrival matters.
pub const RECV_BUFFER_SIZE: usize = 1024;

/// Send `payload` to the configured target and wait for one reply.
///
/// Returns `Err` only when the local socket cannot be set up. Every failure on
/// the network side maps to a [`ProbeOutcome`].
pub fn probe(config: &ProbeConfig, payload: &[u8]) -> Result<ProbeOutcome, ProbeError> {
    let target = match resolve(&config.host, config.port) {
        Ok(addr) => addr,
        Err(e) => {
            tracing::warn!(
                host = %config.host,
                port = config.port,
                error = %e,
                "UDP target could not be resolved"
            );
            return Ok(ProbeOutcome::Unreachable);
        }
    };

    let socket = bind_for(&target).map_err(ProbeError::SocketAllocation)?;
    socket
        .set_read_timeout(Some(config.socket_timeout()))
        .map_err(ProbeError::SocketAllocation)?;

    tracing::info!(
        target = %target,
        payload = %render(payload),
        timeout_ms = config.timeout_ms,
        "Sending UDP packet"
    );

    if let Err(e) = socket.connect(target).and_then(|_| socket.send(payload)) {
        tracing::warn!(target = %target, error = %e, "UDP port is closed or unreachable");
        return Ok(ProbeOutcome::Unreachable);
    }

    let mut buf = [0u8; RECV_BUFFER_SIZE];
    let outcome = match socket.recv(&mut buf) {
        Ok(size) => {
            tracing::info!(target = %target, size, "Received UDP response");
            ProbeOutcome::Responded
        }
        Err(e) if is_timeout(&e) => {
            tracing::warn!(target = %target, "UDP port is open but no response received within timeout");
            ProbeOutcome::OpenNoResponse
        }
        Err(e) => {
            tracing::warn!(target = %target, error = %e, "UDP port is closed or unreachable");
            ProbeOutcome::Unreachable
        }
    };

    Ok(outcome)
}

/// Resolve `host:port`, preferring IPv4 (see [`pick_address`]).
fn resolve(host: &str, port: u16) -> io::Result<SocketAddr> {
    pick_address((host, port).to_socket_addrs()?).ok_or_else(|| {
        io::Error::new(ErrorKind::NotFound, format!("no addresses found for {}", host))
    })
}

/// First IPv4 address, else the first address of any family.
///
/// Resolvers often list `::1` before `127.0.0.1` for `localhost`; probing the
/// IPv6 loopback would report an IPv4-only service as unreachable.
fn pick_address(addrs: impl IntoIterator<Item = SocketAddr>) -> Option<SocketAddr> {
    let mut fallback = None;
    for addr in addrs {
        if addr.is_ipv4() {
            return Some(addr);
        }
        fallback.get_or_insert(addr);
    }
    fallback
}

/// Bind an ephemeral local port in the target's address family.
fn bind_for(target: &SocketAddr) -> io::Result<UdpSocket> {
    match target {
        SocketAddr::V4(_) => UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)),
        SocketAddr::V6(_) => UdpSocket::bind((Ipv6Addr::UNSPECIFIED, 0)),
    }
}

/// Read timeouts surface as `WouldBlock` on Unix and `TimedOut` on Windows.
fn is_timeout(e: &io::Error) -> bool {
    matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut)
}
