//! Status Pinger
//!
//! Handshake, status and ping exchange over a stream transport.
//!
//! ## Exchange
//! ```text
//! client                                   server
//!   │ ── 0x00 handshake (next state 1) ──►   │
//!   │ ── 0x00 status request ────────────►   │
//!   │ ◄─────────── 0x00 status JSON ──────   │
//!   │ ── 0x01 ping (token) ──────────────►   │
//!   │ ◄─────────── 0x01 pong (token) ─────   │
//! ```
//!
//! The handshake must go first on a fresh connection; status and ping may
//! follow in either order.

use std::time::Instant;

use rand::Rng;

use crate::error::{McStatusError, Result};
use crate::network::StreamTransport;
use crate::protocol::{StatusResponse, WireBuffer};

const HANDSHAKE_ID: u64 = 0x00;
const STATUS_ID: u32 = 0x00;
const PING_ID: u32 = 0x01;

/// Next-state value requesting the status protocol
const NEXT_STATE_STATUS: u64 = 1;

/// Drives the status ping protocol over one stream
pub struct ServerPinger<T: StreamTransport> {
    connection: T,

    /// Host and port announced in the handshake
    host: String,
    port: u16,

    /// Protocol version announced in the handshake
    version: u32,

    /// Token echoed by the server in the ping reply
    ping_token: i64,
}

impl<T: StreamTransport> ServerPinger<T> {
    /// Create a pinger with a token drawn from the thread-local RNG
    pub fn new(connection: T, host: impl Into<String>, port: u16, version: u32) -> Self {
        Self::with_rng(connection, host, port, version, &mut rand::rng())
    }

    /// Create a pinger drawing its 63-bit ping token from `rng`
    pub fn with_rng<R: Rng>(
        connection: T,
        host: impl Into<String>,
        port: u16,
        version: u32,
        rng: &mut R,
    ) -> Self {
        Self {
            connection,
            host: host.into(),
            port,
            version,
            ping_token: rng.random_range(0..i64::MAX),
        }
    }

    /// Send the handshake; the server does not reply
    pub fn handshake(&mut self) -> Result<()> {
        let mut packet = WireBuffer::new();
        packet.write_varint(HANDSHAKE_ID)?;
        packet.write_varint(self.version as u64)?;
        packet.write_utf(&self.host)?;
        packet.write_ushort(self.port);
        packet.write_varint(NEXT_STATE_STATUS)?;

        self.connection.write_buffer(&mut packet)?;
        tracing::debug!(
            "Handshake sent to {}:{} (protocol {})",
            self.host, self.port, self.version
        );
        Ok(())
    }

    /// Request and decode the status document
    pub fn read_status(&mut self) -> Result<StatusResponse> {
        let mut request = WireBuffer::new();
        request.write_varint(STATUS_ID as u64)?;
        self.connection.write_buffer(&mut request)?;

        let mut response = self.connection.read_buffer()?;
        let id = response.read_varint()?;
        if id != STATUS_ID {
            return Err(McStatusError::InvalidStatusPacket(id));
        }

        let raw = response.read_utf()?;
        let status = StatusResponse::from_json(&raw)?;
        tracing::debug!(
            "Status from {}: {}/{} players, version {}",
            self.host, status.players.online, status.players.max, status.version.name
        );
        Ok(status)
    }

    /// Round-trip the ping token and return the latency in seconds
    ///
    /// The token is drawn once when the pinger is built, so every call on
    /// the same pinger sends the same value.
    pub fn test_ping(&mut self) -> Result<f64> {
        let mut request = WireBuffer::new();
        request.write_varint(PING_ID as u64)?;
        request.write_long(self.ping_token);

        let start = Instant::now();
        self.connection.write_buffer(&mut request)?;

        let mut response = self.connection.read_buffer()?;
        let latency = start.elapsed();

        let id = response.read_varint()?;
        if id != PING_ID {
            return Err(McStatusError::InvalidPingPacket(id));
        }

        let received = response.read_long()?;
        if received != self.ping_token {
            return Err(McStatusError::MangledPingPacket {
                expected: self.ping_token,
                received,
            });
        }

        tracing::debug!("Ping to {} took {:?}", self.host, latency);
        Ok(latency.as_secs_f64())
    }

    /// Token the next ping will carry
    pub fn ping_token(&self) -> i64 {
        self.ping_token
    }

    /// Release the transport
    pub fn into_inner(self) -> T {
        self.connection
    }
}
