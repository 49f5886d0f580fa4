//! Error types for mcstatus
//!
//! Provides a unified error type for all operations. Every error is terminal
//! for the exchange that raised it.

use thiserror::Error;

/// Result type alias using McStatusError
pub type Result<T> = std::result::Result<T, McStatusError>;

/// Unified error type for mcstatus operations
#[derive(Debug, Error)]
pub enum McStatusError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to connect to {addr}: {source}")]
    ConnectionFailed {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server did not respond with any information")]
    PeerClosed,

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("Truncated data: requested {requested} bytes, {available} available")]
    TruncatedData { requested: usize, available: usize },

    #[error("Server sent a varint that was too big")]
    VarIntTooLarge,

    #[error("Server sent a varlong that was too big")]
    VarLongTooLarge,

    #[error("Value {value} is too big to encode in {max_bytes} bytes")]
    ValueTooLarge { value: u64, max_bytes: usize },

    // -------------------------------------------------------------------------
    // Status Ping Errors
    // -------------------------------------------------------------------------
    #[error("Received invalid status response packet (id {0})")]
    InvalidStatusPacket(u32),

    #[error("Received invalid ping response packet (id {0})")]
    InvalidPingPacket(u32),

    #[error("Received mangled ping response packet (expected token {expected}, received {received})")]
    MangledPingPacket { expected: i64, received: i64 },

    #[error("Received invalid status JSON: {0}")]
    InvalidStatusPayload(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Query Errors
    // -------------------------------------------------------------------------
    #[error("Received invalid challenge token: {0:?}")]
    InvalidChallengeToken(String),

    #[error("Malformed query response: {0}")]
    MalformedQueryResponse(String),

    // -------------------------------------------------------------------------
    // Address Errors
    // -------------------------------------------------------------------------
    #[error("Invalid address '{0}'")]
    InvalidAddress(String),
}
