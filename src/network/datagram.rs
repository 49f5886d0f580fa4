//! UDP Transport
//!
//! Connected datagram socket used by the legacy query exchange.

use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;

use crate::error::{McStatusError, Result};
use super::DatagramTransport;

/// Largest payload a UDP datagram can carry
pub const MAX_DATAGRAM_SIZE: usize = 65535;

/// A UDP socket bound to one remote peer
pub struct UdpConnection {
    socket: UdpSocket,

    peer_addr: SocketAddr,

    timeout: Duration,
}

impl UdpConnection {
    /// Resolve `host:port` and bind a local socket connected to it
    pub fn open(host: &str, port: u16, timeout: Duration) -> Result<Self> {
        let addr = format!("{}:{}", host, port);
        let connection_failed = |source: std::io::Error| McStatusError::ConnectionFailed {
            addr: addr.clone(),
            source,
        };

        let peer_addr = (host, port)
            .to_socket_addrs()
            .map_err(connection_failed)?
            .next()
            .ok_or_else(|| {
                connection_failed(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "address resolved to nothing",
                ))
            })?;

        let local: SocketAddr = if peer_addr.is_ipv4() {
            ([0, 0, 0, 0], 0).into()
        } else {
            ([0u16; 8], 0).into()
        };

        let socket = UdpSocket::bind(local).map_err(connection_failed)?;
        socket.connect(peer_addr).map_err(connection_failed)?;

        tracing::debug!("UDP session bound to {}", peer_addr);

        Ok(Self {
            socket,
            peer_addr,
            timeout,
        })
    }

    fn arm_timeouts(&self) -> Result<()> {
        if !self.timeout.is_zero() {
            self.socket.set_read_timeout(Some(self.timeout))?;
            self.socket.set_write_timeout(Some(self.timeout))?;
        }
        Ok(())
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }
}

impl DatagramTransport for UdpConnection {
    fn recv(&mut self) -> Result<Vec<u8>> {
        let mut datagram = vec![0u8; MAX_DATAGRAM_SIZE];

        // A valid reply is never empty; an empty receive is not the answer
        loop {
            self.arm_timeouts()?;
            let n = self.socket.recv(&mut datagram)?;
            if n > 0 {
                datagram.truncate(n);
                tracing::trace!("Received {} byte datagram from {}", n, self.peer_addr);
                return Ok(datagram);
            }
        }
    }

    fn send(&mut self, data: &[u8]) -> Result<()> {
        self.arm_timeouts()?;
        self.socket.send(data)?;
        tracing::trace!("Sent {} byte datagram to {}", data.len(), self.peer_addr);
        Ok(())
    }
}
