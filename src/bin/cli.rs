//! mcstatus CLI
//!
//! Command-line interface for querying one or more servers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mcstatus::{Config, MinecraftServer};
use tracing_subscriber::{fmt, EnvFilter};

/// mcstatus CLI
#[derive(Parser, Debug)]
#[command(name = "mcstatus")]
#[command(about = "Query Minecraft servers for their status")]
#[command(version)]
struct Args {
    /// Per-operation timeout in milliseconds
    #[arg(short, long, default_value = "3000")]
    timeout_ms: u64,

    /// Protocol version announced in the status handshake
    #[arg(short, long, default_value = "47")]
    protocol_version: u32,

    /// Port used when the address has none and no SRV record exists
    #[arg(long, default_value = "25565")]
    default_port: u16,

    /// Skip SRV record discovery
    #[arg(long)]
    no_srv: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    Status,
    Ping,
    Query,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch the status document (MOTD, players, version) over TCP
    Status {
        /// Server addresses (host or host:port)
        #[arg(required = true)]
        addresses: Vec<String>,
    },

    /// Measure round-trip latency over TCP
    Ping {
        #[arg(required = true)]
        addresses: Vec<String>,
    },

    /// Run the legacy UDP query (requires enable-query on the server)
    Query {
        #[arg(required = true)]
        addresses: Vec<String>,
    },
}

impl Commands {
    fn split(self) -> (Mode, Vec<String>) {
        match self {
            Commands::Status { addresses } => (Mode::Status, addresses),
            Commands::Ping { addresses } => (Mode::Ping, addresses),
            Commands::Query { addresses } => (Mode::Query, addresses),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing/logging
    let default_filter = if args.verbose {
        "warn,mcstatus=debug"
    } else {
        "warn,mcstatus=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::builder()
        .timeout_ms(args.timeout_ms)
        .protocol_version(args.protocol_version)
        .default_port(args.default_port)
        .srv_lookup(!args.no_srv)
        .build();

    let (mode, addresses) = args.command.split();

    // One thread per server, each owning its own transport
    let results = crossbeam::thread::scope(|scope| {
        let handles: Vec<_> = addresses
            .iter()
            .map(|address| {
                let config = config.clone();
                scope.spawn(move |_| run(mode, address, config))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|_| Err("worker thread panicked".to_string()))
            })
            .collect::<Vec<_>>()
    });

    let results = match results {
        Ok(results) => results,
        Err(_) => {
            tracing::error!("Worker thread panicked");
            return ExitCode::FAILURE;
        }
    };

    let mut failed = false;
    for (address, result) in addresses.iter().zip(results) {
        match result {
            Ok(report) => println!("{}: {}", address, report),
            Err(e) => {
                failed = true;
                eprintln!("{}: error: {}", address, e);
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(mode: Mode, address: &str, config: Config) -> Result<String, String> {
    let server = MinecraftServer::lookup(address, config).map_err(|e| e.to_string())?;
    tracing::info!("{} resolved to {}:{}", address, server.host(), server.port());

    match mode {
        Mode::Status => {
            let status = server.status().map_err(|e| e.to_string())?;
            Ok(format!(
                "version {} (protocol {}), {}/{} players, motd {:?}",
                status.version.name,
                status.version.protocol,
                status.players.online,
                status.players.max,
                status.description.text
            ))
        }
        Mode::Ping => {
            let latency = server.ping().map_err(|e| e.to_string())?;
            Ok(format!("{:.1} ms", latency * 1000.0))
        }
        Mode::Query => {
            let query = server.query().map_err(|e| e.to_string())?;
            let mut report = format!(
                "{} {} on {}, {}/{} players, motd {:?}",
                query.software.brand,
                query.software.version,
                query.map,
                query.players.online,
                query.players.max,
                query.motd
            );
            if !query.players.names.is_empty() {
                report.push_str(&format!(" [{}]", query.players.names.join(", ")));
            }
            if !query.software.plugins.is_empty() {
                report.push_str(&format!(" plugins: {}", query.software.plugins.join(", ")));
            }
            Ok(report)
        }
    }
}
