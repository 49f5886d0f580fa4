//! Wire Buffer
//!
//! In-memory byte queues with the field primitives both protocols use.
//!
//! ## Queues
//! ```text
//!  write_*()  ──►  sent      ──►  flush()    ──►  transport
//!  transport  ──►  receive() ──►  received   ──►  read_*()
//! ```
//!
//! Multi-byte integers are big-endian (network byte order). Reads never
//! return short results: asking for more than `remaining()` bytes fails
//! with [`McStatusError::TruncatedData`] and leaves the queue untouched.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{McStatusError, Result};
use super::varint::{self, VarKind};

/// Outbound and inbound byte queues for one message
#[derive(Debug, Default, Clone)]
pub struct WireBuffer {
    /// Outbound bytes assembled by `write*`, drained by `flush`
    sent: BytesMut,

    /// Inbound bytes seeded by `receive`, consumed by `read*`
    received: BytesMut,
}

impl WireBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer whose inbound queue holds `data`
    pub fn from_received(data: &[u8]) -> Self {
        let mut buffer = Self::new();
        buffer.receive(data);
        buffer
    }

    // =========================================================================
    // Raw queue operations
    // =========================================================================

    /// Consume exactly `length` bytes from the front of the inbound queue
    pub fn read(&mut self, length: usize) -> Result<Bytes> {
        self.ensure(length)?;
        Ok(self.received.split_to(length).freeze())
    }

    /// Append raw bytes to the outbound queue
    pub fn write(&mut self, data: &[u8]) {
        self.sent.extend_from_slice(data);
    }

    /// Append bytes that arrived from the network to the inbound queue
    pub fn receive(&mut self, data: &[u8]) {
        self.received.extend_from_slice(data);
    }

    /// Bytes left in the inbound queue
    pub fn remaining(&self) -> usize {
        self.received.len()
    }

    /// Take and clear everything written so far
    pub fn flush(&mut self) -> Bytes {
        self.sent.split().freeze()
    }

    /// Discard `length` inbound bytes (fixed headers, constant blocks)
    pub fn skip(&mut self, length: usize) -> Result<()> {
        self.ensure(length)?;
        self.received.advance(length);
        Ok(())
    }

    fn ensure(&self, length: usize) -> Result<()> {
        if self.received.len() < length {
            return Err(McStatusError::TruncatedData {
                requested: length,
                available: self.received.len(),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Variable-length integers
    // =========================================================================

    pub fn read_varint(&mut self) -> Result<u32> {
        let value = varint::decode(VarKind::INT, || self.read_byte())?;
        Ok(value as u32)
    }

    pub fn write_varint(&mut self, value: u64) -> Result<()> {
        varint::encode(value, VarKind::INT, &mut self.sent)
    }

    pub fn read_varlong(&mut self) -> Result<u64> {
        varint::decode(VarKind::LONG, || self.read_byte())
    }

    pub fn write_varlong(&mut self, value: u64) -> Result<()> {
        varint::encode(value, VarKind::LONG, &mut self.sent)
    }

    // =========================================================================
    // Strings
    // =========================================================================

    /// VarInt byte length followed by UTF-8 text
    ///
    /// Invalid sequences are replaced with U+FFFD rather than rejected, so a
    /// server with a badly encoded MOTD still yields a status.
    pub fn read_utf(&mut self) -> Result<String> {
        let length = self.read_varint()? as usize;
        let data = self.read(length)?;
        Ok(String::from_utf8_lossy(&data).into_owned())
    }

    pub fn write_utf(&mut self, value: &str) -> Result<()> {
        self.write_varint(value.len() as u64)?;
        self.write(value.as_bytes());
        Ok(())
    }

    /// NUL-terminated text; the terminator is consumed but not returned
    pub fn read_ascii(&mut self) -> Result<String> {
        let end = self
            .received
            .iter()
            .position(|&b| b == 0x00)
            .ok_or(McStatusError::TruncatedData {
                requested: self.received.len() + 1,
                available: self.received.len(),
            })?;

        let data = self.received.split_to(end);
        self.received.advance(1);
        Ok(String::from_utf8_lossy(&data).into_owned())
    }

    pub fn write_ascii(&mut self, value: &str) {
        self.write(value.as_bytes());
        self.sent.put_u8(0x00);
    }

    // =========================================================================
    // Fixed-width integers (big-endian)
    // =========================================================================

    pub fn read_byte(&mut self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.received.get_u8())
    }

    pub fn write_byte(&mut self, value: u8) {
        self.sent.put_u8(value);
    }

    pub fn read_short(&mut self) -> Result<i16> {
        self.ensure(2)?;
        Ok(self.received.get_i16())
    }

    pub fn write_short(&mut self, value: i16) {
        self.sent.put_i16(value);
    }

    pub fn read_ushort(&mut self) -> Result<u16> {
        self.ensure(2)?;
        Ok(self.received.get_u16())
    }

    pub fn write_ushort(&mut self, value: u16) {
        self.sent.put_u16(value);
    }

    pub fn read_int(&mut self) -> Result<i32> {
        self.ensure(4)?;
        Ok(self.received.get_i32())
    }

    pub fn write_int(&mut self, value: i32) {
        self.sent.put_i32(value);
    }

    pub fn read_uint(&mut self) -> Result<u32> {
        self.ensure(4)?;
        Ok(self.received.get_u32())
    }

    pub fn write_uint(&mut self, value: u32) {
        self.sent.put_u32(value);
    }

    pub fn read_long(&mut self) -> Result<i64> {
        self.ensure(8)?;
        Ok(self.received.get_i64())
    }

    pub fn write_long(&mut self, value: i64) {
        self.sent.put_i64(value);
    }

    pub fn read_ulong(&mut self) -> Result<u64> {
        self.ensure(8)?;
        Ok(self.received.get_u64())
    }

    pub fn write_ulong(&mut self, value: u64) {
        self.sent.put_u64(value);
    }

    // =========================================================================
    // Framing
    // =========================================================================

    /// Read a VarInt-length-prefixed sub-message into a fresh buffer
    pub fn read_buffer(&mut self) -> Result<WireBuffer> {
        let length = self.read_varint()? as usize;
        let data = self.read(length)?;
        Ok(WireBuffer::from_received(&data))
    }

    /// Flush `buffer` and append its bytes behind a VarInt length prefix
    pub fn write_buffer(&mut self, buffer: &mut WireBuffer) -> Result<()> {
        let data = buffer.flush();
        self.sent
            .reserve(varint::encoded_len(data.len() as u64) + data.len());
        self.write_varint(data.len() as u64)?;
        self.write(&data);
        Ok(())
    }
}
