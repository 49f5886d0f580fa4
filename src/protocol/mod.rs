//! Protocol Module
//!
//! Wire codec and response entities for both server protocols.
//!
//! ## Status Ping (TCP)
//! ```text
//! ┌────────────────┬────────────────┬─────────────────────────────┐
//! │ Len (VarInt)   │ ID (VarInt)    │         Payload             │
//! └────────────────┴────────────────┴─────────────────────────────┘
//! ```
//! - 0x00 handshake: version (VarInt), host (UTF), port (u16), next state 1
//! - 0x00 status:    empty request, reply carries UTF JSON
//! - 0x01 ping:      token (i64), echoed back
//!
//! ## Legacy Query (UDP)
//! ```text
//! ┌──────────┬──────────┬────────────────┬─────────────────────┐
//! │ FE FD    │ Type (1) │ Session (4)    │       Payload       │
//! └──────────┴──────────┴────────────────┴─────────────────────┘
//! ```
//! - 0x09: handshake, reply carries the challenge as NUL-terminated text
//! - 0x00: full stat, reply carries key/value pairs and player names

mod buffer;
mod query;
mod status;
pub mod varint;

pub use buffer::WireBuffer;
pub use query::{QueryPlayers, QueryResponse, Software, VANILLA_BRAND};
pub use status::{Description, PlayerSample, Players, StatusResponse, Version};
