//! TCP Transport
//!
//! Blocking stream connection used by the status ping exchange.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::error::{McStatusError, Result};
use super::StreamTransport;

/// Upper bound on a single socket read
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// A connected TCP stream with a per-operation timeout
pub struct TcpConnection {
    stream: TcpStream,

    /// Peer address for logging
    peer_addr: String,

    timeout: Duration,
}

impl TcpConnection {
    /// Connect to `host:port`, trying each resolved address in turn
    pub fn open(host: &str, port: u16, timeout: Duration) -> Result<Self> {
        let addr = format!("{}:{}", host, port);
        let connection_failed = |source: std::io::Error| McStatusError::ConnectionFailed {
            addr: addr.clone(),
            source,
        };

        let candidates: Vec<SocketAddr> = (host, port)
            .to_socket_addrs()
            .map_err(connection_failed)?
            .collect();

        let mut last_error = std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "address resolved to nothing",
        );
        for candidate in candidates {
            let attempt = if timeout.is_zero() {
                TcpStream::connect(candidate)
            } else {
                TcpStream::connect_timeout(&candidate, timeout)
            };
            match attempt {
                Ok(stream) => return Self::from_stream(stream, timeout),
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", candidate, e);
                    last_error = e;
                }
            }
        }

        Err(connection_failed(last_error))
    }

    /// Wrap an already connected stream
    pub fn from_stream(stream: TcpStream, timeout: Duration) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Small request/reply packets; don't let Nagle hold them back
        stream.set_nodelay(true)?;

        tracing::debug!("Connected to {}", peer_addr);

        Ok(Self {
            stream,
            peer_addr,
            timeout,
        })
    }

    /// Arm the deadline for the next blocking call
    fn arm_timeouts(&self) -> Result<()> {
        if !self.timeout.is_zero() {
            self.stream.set_read_timeout(Some(self.timeout))?;
            self.stream.set_write_timeout(Some(self.timeout))?;
        }
        Ok(())
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

impl StreamTransport for TcpConnection {
    /// Storage grows only as bytes arrive, so an announced length the peer
    /// never delivers costs at most one chunk.
    fn read_exact(&mut self, length: usize) -> Result<Vec<u8>> {
        let mut result = Vec::with_capacity(length.min(READ_CHUNK_SIZE));
        let mut chunk = [0u8; READ_CHUNK_SIZE];

        while result.len() < length {
            let wanted = (length - result.len()).min(READ_CHUNK_SIZE);
            self.arm_timeouts()?;
            let n = match self.stream.read(&mut chunk[..wanted]) {
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            if n == 0 {
                tracing::debug!(
                    "{} closed after {} of {} bytes",
                    self.peer_addr,
                    result.len(),
                    length
                );
                return Err(McStatusError::PeerClosed);
            }
            result.extend_from_slice(&chunk[..n]);
        }

        tracing::trace!("Read {} bytes from {}", length, self.peer_addr);
        Ok(result)
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.arm_timeouts()?;
        self.stream.write_all(data)?;
        tracing::trace!("Wrote {} bytes to {}", data.len(), self.peer_addr);
        Ok(())
    }
}
