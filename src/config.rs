//! Configuration for mcstatus
//!
//! Centralized configuration with sensible defaults.

use std::time::Duration;

/// Well-known port for both the status ping and the query protocol
pub const DEFAULT_PORT: u16 = 25565;

/// Protocol version sent in the status handshake (1.8, accepted by most servers)
pub const DEFAULT_PROTOCOL_VERSION: u32 = 47;

/// Configuration shared by every exchange against a server
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Per-operation timeout (milliseconds), re-armed before every read/write
    pub timeout_ms: u64,

    /// Port used when the address has none and no SRV record exists
    pub default_port: u16,

    /// Consult `_minecraft._tcp` SRV records for port-less addresses
    pub srv_lookup: bool,

    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// Protocol version announced in the status handshake
    pub protocol_version: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_ms: 3000,
            default_port: DEFAULT_PORT,
            srv_lookup: true,
            protocol_version: DEFAULT_PROTOCOL_VERSION,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the per-operation timeout (in milliseconds)
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.config.timeout_ms = ms;
        self
    }

    /// Set the fallback port
    pub fn default_port(mut self, port: u16) -> Self {
        self.config.default_port = port;
        self
    }

    /// Enable or disable SRV record discovery
    pub fn srv_lookup(mut self, enabled: bool) -> Self {
        self.config.srv_lookup = enabled;
        self
    }

    /// Set the handshake protocol version
    pub fn protocol_version(mut self, version: u32) -> Self {
        self.config.protocol_version = version;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
