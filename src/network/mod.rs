//! Network Module
//!
//! Byte transports the protocol components ride on.
//!
//! ## Architecture
//! - `StreamTransport`: ordered bytes, reads loop until complete (TCP)
//! - `DatagramTransport`: one message per read, boundaries preserved (UDP)
//! - Both re-arm their timeout for every blocking call
//!
//! Pinger and querier are generic over these traits so an exchange can be
//! driven by a scripted peer as easily as by a socket.

mod datagram;
mod stream;

pub use datagram::{UdpConnection, MAX_DATAGRAM_SIZE};
pub use stream::TcpConnection;

use crate::error::Result;
use crate::protocol::varint::{self, VarKind};
use crate::protocol::WireBuffer;

/// Connection-oriented byte stream
pub trait StreamTransport {
    /// Read exactly `length` bytes, looping over short reads
    fn read_exact(&mut self, length: usize) -> Result<Vec<u8>>;

    /// Send `data` in one blocking write
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Read one VarInt-length-framed packet
    ///
    /// The length prefix is pulled a byte at a time so nothing past the
    /// frame is consumed from the stream.
    fn read_buffer(&mut self) -> Result<WireBuffer> {
        let length = varint::decode(VarKind::INT, || Ok(self.read_exact(1)?[0]))? as usize;
        let data = self.read_exact(length)?;
        Ok(WireBuffer::from_received(&data))
    }

    /// Frame `packet` with its length and send it as a single write
    fn write_buffer(&mut self, packet: &mut WireBuffer) -> Result<()> {
        let mut frame = WireBuffer::new();
        frame.write_buffer(packet)?;
        self.write(&frame.flush())
    }
}

/// Connectionless message transport
pub trait DatagramTransport {
    /// Block for one non-empty datagram and return it whole
    fn recv(&mut self) -> Result<Vec<u8>>;

    /// Send `data` as one datagram
    fn send(&mut self, data: &[u8]) -> Result<()>;
}
