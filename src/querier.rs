//! Legacy Querier
//!
//! Challenge/stat exchange over a datagram transport.
//!
//! ## Full stat reply layout
//! ```text
//! type (1) + session (4)
//! "splitnum" 0x00 0x80 0x00                 (11)
//! key 0x00 value 0x00 ... 0x00              (empty key ends the section)
//! 0x01                                      (section marker)
//! "player_" 0x00 0x00                       (9)
//! name 0x00 name 0x00 ... 0x00              (empty name ends the list)
//! ```

use std::collections::BTreeMap;

use crate::error::{McStatusError, Result};
use crate::network::DatagramTransport;
use crate::protocol::{QueryResponse, WireBuffer};

const MAGIC: [u8; 2] = [0xFE, 0xFD];

const HANDSHAKE_TYPE: u8 = 0x09;
const STAT_TYPE: u8 = 0x00;

/// Session id sent with every packet
const SESSION_ID: u32 = 0;

/// Type byte plus echoed session id at the front of every reply
const REPLY_HEADER_SIZE: usize = 1 + 4;

/// `"splitnum"` + NUL + 2 marker bytes before the key/value section
const KV_PREAMBLE_SIZE: usize = 11;

/// `"player_"` + 2 NUL bytes before the player list
const PLAYER_PREAMBLE_SIZE: usize = 9;

/// Drives the legacy query protocol over one datagram session
pub struct ServerQuerier<T: DatagramTransport> {
    connection: T,

    /// Challenge negotiated by the last handshake (0 before)
    challenge: i32,
}

impl<T: DatagramTransport> ServerQuerier<T> {
    pub fn new(connection: T) -> Self {
        Self {
            connection,
            challenge: 0,
        }
    }

    fn create_packet(&self, packet_type: u8) -> WireBuffer {
        let mut packet = WireBuffer::new();
        packet.write(&MAGIC);
        packet.write_byte(packet_type);
        packet.write_uint(SESSION_ID);
        packet.write_int(self.challenge);
        packet
    }

    fn read_packet(&mut self) -> Result<WireBuffer> {
        let datagram = self.connection.recv()?;
        let mut packet = WireBuffer::from_received(&datagram);
        packet.skip(REPLY_HEADER_SIZE)?;
        Ok(packet)
    }

    /// Request a challenge token and remember it for the stat request
    pub fn handshake(&mut self) -> Result<()> {
        let mut packet = self.create_packet(HANDSHAKE_TYPE);
        self.connection.send(&packet.flush())?;

        let mut reply = self.read_packet()?;
        let token = reply.read_ascii()?;
        self.challenge = token
            .trim()
            .parse()
            .map_err(|_| McStatusError::InvalidChallengeToken(token.clone()))?;

        tracing::debug!("Negotiated query challenge {}", self.challenge);
        Ok(())
    }

    /// Request and decode the full stat response
    pub fn read_query(&mut self) -> Result<QueryResponse> {
        let mut request = self.create_packet(STAT_TYPE);
        request.write_uint(0); // padding requests the full stat
        self.connection.send(&request.flush())?;

        let mut reply = self.read_packet()?;
        reply.skip(KV_PREAMBLE_SIZE)?;

        let mut raw = BTreeMap::new();
        loop {
            let key = reply.read_ascii()?;
            if key.is_empty() {
                break;
            }
            let value = reply.read_ascii()?;
            raw.insert(key, value);
        }
        reply.skip(1)?; // section marker (0x01)

        reply.skip(PLAYER_PREAMBLE_SIZE)?;
        let mut names = Vec::new();
        loop {
            let name = reply.read_ascii()?;
            if name.is_empty() {
                break;
            }
            names.push(name);
        }

        tracing::debug!("Query returned {} keys and {} players", raw.len(), names.len());
        QueryResponse::from_raw(raw, names)
    }

    /// Challenge currently held by this querier
    pub fn challenge(&self) -> i32 {
        self.challenge
    }

    /// Release the transport
    pub fn into_inner(self) -> T {
        self.connection
    }
}
