//! # mcstatus
//!
//! A client for querying Minecraft servers for their public status:
//! - Status ping over TCP (VarInt-framed handshake, status and ping)
//! - Legacy query over UDP (challenge handshake and full stat)
//! - Address resolution with `_minecraft._tcp` SRV discovery
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     MinecraftServer                          │
//! │              (address resolution, dispatch)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌──────────────┐
//!   │ServerPinger │          │ServerQuerier │
//!   │  (status)   │          │   (query)    │
//!   └──────┬──────┘          └──────┬───────┘
//!          │      WireBuffer        │
//!          ▼                        ▼
//!   ┌─────────────┐          ┌──────────────┐
//!   │TcpConnection│          │UdpConnection │
//!   └─────────────┘          └──────────────┘
//! ```
//!
//! Every exchange is synchronous and owns its transport; run independent
//! exchanges on independent threads to query servers concurrently.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod pinger;
pub mod querier;
pub mod server;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{McStatusError, Result};
pub use config::Config;
pub use pinger::ServerPinger;
pub use querier::ServerQuerier;
pub use server::{resolve, MinecraftServer, Resolver, SystemResolver};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of mcstatus
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
