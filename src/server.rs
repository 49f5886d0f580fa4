//! Server Facade
//!
//! Resolves an address string and runs exchanges against the result.
//!
//! ## Address forms
//! - `host:port`: used as given
//! - `host`: `_minecraft._tcp.host` SRV record if one exists, otherwise
//!   `host` on the configured default port

use std::io;
use std::net::IpAddr;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};

use crate::config::Config;
use crate::error::{McStatusError, Result};
use crate::network::{TcpConnection, UdpConnection};
use crate::pinger::ServerPinger;
use crate::protocol::{QueryResponse, StatusResponse};
use crate::querier::ServerQuerier;

/// DNS lookups the facade depends on
pub trait Resolver {
    /// Forward lookup; may return no addresses
    fn lookup_host(&self, host: &str) -> io::Result<Vec<IpAddr>>;

    /// First SRV record for `name` as (target, port), if any
    fn lookup_srv(&self, name: &str) -> io::Result<Option<(String, u16)>>;
}

/// Resolver backed by the system DNS configuration
pub struct SystemResolver {
    inner: hickory_resolver::Resolver,
}

impl SystemResolver {
    /// Load `/etc/resolv.conf` (or the platform equivalent), falling back
    /// to the resolver crate's default upstreams
    pub fn new() -> Result<Self> {
        let inner = match hickory_resolver::Resolver::from_system_conf() {
            Ok(resolver) => resolver,
            Err(e) => {
                tracing::warn!("System DNS config unavailable ({}), using defaults", e);
                hickory_resolver::Resolver::new(ResolverConfig::default(), ResolverOpts::default())?
            }
        };
        Ok(Self { inner })
    }
}

impl Resolver for SystemResolver {
    fn lookup_host(&self, host: &str) -> io::Result<Vec<IpAddr>> {
        let lookup = self
            .inner
            .lookup_ip(host)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        Ok(lookup.iter().collect())
    }

    fn lookup_srv(&self, name: &str) -> io::Result<Option<(String, u16)>> {
        let lookup = self
            .inner
            .srv_lookup(name)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        Ok(lookup
            .iter()
            .next()
            .map(|srv| (srv.target().to_utf8(), srv.port())))
    }
}

/// Split `address` into host and port, consulting SRV when no port is given
pub fn resolve<R: Resolver + ?Sized>(
    address: &str,
    config: &Config,
    resolver: &R,
) -> Result<(String, u16)> {
    let invalid = || McStatusError::InvalidAddress(address.to_string());

    let (host, port) = match address.split(':').collect::<Vec<_>>().as_slice() {
        [host] => (*host, None),
        [host, port] => (*host, Some(port.parse::<u16>().map_err(|_| invalid())?)),
        _ => return Err(invalid()),
    };
    if host.is_empty() {
        return Err(invalid());
    }

    if let Some(port) = port {
        return Ok((host.to_string(), port));
    }

    if config.srv_lookup {
        let name = format!("_minecraft._tcp.{}", host);
        match resolver.lookup_srv(&name) {
            Ok(Some((target, port))) => {
                let target = target.trim_end_matches('.').to_string();
                tracing::debug!("SRV {} -> {}:{}", name, target, port);
                return Ok((target, port));
            }
            Ok(None) => {}
            Err(e) => tracing::debug!("SRV lookup for {} failed: {}", name, e),
        }
    }

    Ok((host.to_string(), config.default_port))
}

/// A resolved server and the settings every exchange against it uses
pub struct MinecraftServer<R: Resolver = SystemResolver> {
    host: String,
    port: u16,
    config: Config,
    resolver: R,
}

impl MinecraftServer<SystemResolver> {
    /// Resolve `address` with the system DNS resolver
    pub fn lookup(address: &str, config: Config) -> Result<Self> {
        Self::lookup_with(address, config, SystemResolver::new()?)
    }

    /// Use `host` and `port` as given
    pub fn new(host: impl Into<String>, port: u16, config: Config) -> Result<Self> {
        Ok(Self::with_resolver(host, port, config, SystemResolver::new()?))
    }
}

impl<R: Resolver> MinecraftServer<R> {
    /// Resolve `address` through `resolver`
    pub fn lookup_with(address: &str, config: Config, resolver: R) -> Result<Self> {
        let (host, port) = resolve(address, &config, &resolver)?;
        Ok(Self::with_resolver(host, port, config, resolver))
    }

    pub fn with_resolver(host: impl Into<String>, port: u16, config: Config, resolver: R) -> Self {
        Self {
            host: host.into(),
            port,
            config,
            resolver,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn open_pinger(&self) -> Result<ServerPinger<TcpConnection>> {
        let connection = TcpConnection::open(&self.host, self.port, self.config.timeout())?;
        let mut pinger = ServerPinger::new(
            connection,
            self.host.clone(),
            self.port,
            self.config.protocol_version,
        );
        pinger.handshake()?;
        Ok(pinger)
    }

    /// Handshake and fetch the status document over TCP
    pub fn status(&self) -> Result<StatusResponse> {
        self.open_pinger()?.read_status()
    }

    /// Handshake and measure one ping round-trip (seconds)
    pub fn ping(&self) -> Result<f64> {
        self.open_pinger()?.test_ping()
    }

    /// Run the challenge/stat exchange over UDP
    pub fn query(&self) -> Result<QueryResponse> {
        let ip = match self.resolver.lookup_host(&self.host) {
            Ok(ips) if !ips.is_empty() => ips[0].to_string(),
            Ok(_) => self.host.clone(),
            Err(e) => {
                tracing::warn!("Lookup of {} failed ({}), using it verbatim", self.host, e);
                self.host.clone()
            }
        };

        let connection = UdpConnection::open(&ip, self.port, self.config.timeout())?;
        let mut querier = ServerQuerier::new(connection);
        querier.handshake()?;
        querier.read_query()
    }
}
