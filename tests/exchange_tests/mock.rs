//! Scripted transports, resolvers and reply builders shared by the
//! exchange tests.

use std::cell::Cell;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::net::IpAddr;

use mcstatus::network::{DatagramTransport, StreamTransport};
use mcstatus::protocol::WireBuffer;
use mcstatus::{McStatusError, Resolver, Result};

// =============================================================================
// Stream
// =============================================================================

/// Stream peer that replays preloaded bytes and records every write
#[derive(Default)]
pub struct ScriptedStream {
    incoming: VecDeque<u8>,
    pub writes: Vec<Vec<u8>>,
}

impl ScriptedStream {
    pub fn replying(bytes: &[u8]) -> Self {
        Self {
            incoming: bytes.iter().copied().collect(),
            writes: Vec::new(),
        }
    }
}

impl StreamTransport for ScriptedStream {
    fn read_exact(&mut self, length: usize) -> Result<Vec<u8>> {
        if self.incoming.len() < length {
            return Err(McStatusError::PeerClosed);
        }
        Ok(self.incoming.drain(..length).collect())
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.writes.push(data.to_vec());
        Ok(())
    }
}

/// Length-frame a packet the way the server would
pub fn frame(packet: &mut WireBuffer) -> Vec<u8> {
    let mut outer = WireBuffer::new();
    outer.write_buffer(packet).unwrap();
    outer.flush().to_vec()
}

pub fn status_reply(json: &str) -> Vec<u8> {
    let mut packet = WireBuffer::new();
    packet.write_varint(0).unwrap();
    packet.write_utf(json).unwrap();
    frame(&mut packet)
}

pub fn pong_reply(token: i64) -> Vec<u8> {
    let mut packet = WireBuffer::new();
    packet.write_varint(1).unwrap();
    packet.write_long(token);
    frame(&mut packet)
}

pub const STATUS_JSON: &str = r#"{"version":{"name":"1.20.4","protocol":765},"players":{"max":20,"online":2,"sample":[{"name":"Alice","id":"00000000-0000-0000-0000-000000000001"}]},"description":{"text":"Test Server"}}"#;

// =============================================================================
// Datagram
// =============================================================================

/// Datagram peer that answers each receive with the next scripted reply
#[derive(Default)]
pub struct ScriptedDatagram {
    replies: VecDeque<Vec<u8>>,
    pub sent: Vec<Vec<u8>>,
}

impl ScriptedDatagram {
    pub fn replying(replies: Vec<Vec<u8>>) -> Self {
        Self {
            replies: replies.into(),
            sent: Vec::new(),
        }
    }
}

impl DatagramTransport for ScriptedDatagram {
    fn recv(&mut self) -> Result<Vec<u8>> {
        self.replies
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::TimedOut, "no scripted reply").into())
    }

    fn send(&mut self, data: &[u8]) -> Result<()> {
        self.sent.push(data.to_vec());
        Ok(())
    }
}

/// Handshake reply carrying `token` as NUL-terminated text
pub fn challenge_reply(token: &str) -> Vec<u8> {
    let mut packet = WireBuffer::new();
    packet.write_byte(0x09);
    packet.write_uint(0);
    packet.write_ascii(token);
    packet.flush().to_vec()
}

/// Full stat reply with the given key/value section and player list
pub fn stat_reply(pairs: &[(&str, &str)], names: &[&str]) -> Vec<u8> {
    let mut packet = WireBuffer::new();
    packet.write_byte(0x00);
    packet.write_uint(0);
    packet.write(b"splitnum\x00\x80\x00");
    for (key, value) in pairs {
        packet.write_ascii(key);
        packet.write_ascii(value);
    }
    packet.write_ascii("");
    packet.write(b"\x01player_\x00\x00");
    for name in names {
        packet.write_ascii(name);
    }
    packet.write_ascii("");
    packet.flush().to_vec()
}

pub const STAT_PAIRS: &[(&str, &str)] = &[
    ("hostname", "A Minecraft Server"),
    ("gametype", "SMP"),
    ("game_id", "MINECRAFT"),
    ("version", "1.20.4"),
    ("plugins", "CraftBukkit: WorldEdit; WorldGuard"),
    ("map", "world"),
    ("numplayers", "2"),
    ("maxplayers", "20"),
    ("hostport", "25565"),
    ("hostip", "127.0.0.1"),
];

// =============================================================================
// Resolver
// =============================================================================

/// In-memory DNS with call counting
#[derive(Default)]
pub struct StaticResolver {
    pub hosts: HashMap<String, Vec<IpAddr>>,
    pub srv: HashMap<String, (String, u16)>,
    pub fail_srv: bool,
    pub srv_calls: Cell<usize>,
}

impl StaticResolver {
    pub fn with_srv(name: &str, target: &str, port: u16) -> Self {
        let mut resolver = Self::default();
        resolver
            .srv
            .insert(name.to_string(), (target.to_string(), port));
        resolver
    }
}

impl Resolver for StaticResolver {
    fn lookup_host(&self, host: &str) -> io::Result<Vec<IpAddr>> {
        Ok(self.hosts.get(host).cloned().unwrap_or_default())
    }

    fn lookup_srv(&self, name: &str) -> io::Result<Option<(String, u16)>> {
        self.srv_calls.set(self.srv_calls.get() + 1);
        if self.fail_srv {
            return Err(io::Error::new(io::ErrorKind::Other, "SERVFAIL"));
        }
        Ok(self.srv.get(name).cloned())
    }
}
