//! Roadseal station binary.
//!
//! # Usage
//!
//! ```bash
//! # Protect a payload with the hash-chain scheme
//! roadseal --protocol dlapp protect 42
//!
//! # Verify it in another invocation (freshness is exact to the second)
//! roadseal --protocol dlapp --at 1700000000 protect 42
//! roadseal --protocol dlapp --at 1700000000 verify <frame-hex>
//!
//! # Broadcast ten recorded CAMs at 10 Hz and verify them on loopback
//! roadseal --protocol mfspv run --count 10 --frequency 10
//! ```

mod commands;
mod error;
mod system_env;

use std::{sync::Arc, time::Duration};

use clap::{Parser, Subcommand};
use roadseal_core::{FixtureSource, ProtocolKind, ProtocolSetup};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::system_env::SystemEnv;

/// Roadseal V2X message security station
#[derive(Parser, Debug)]
#[command(name = "roadseal")]
#[command(about = "Protect and verify V2X messages")]
#[command(version)]
struct Args {
    /// Security protocol (none, dlapp/hash-chain, mfspv/pseudonym-mac)
    #[arg(short, long, default_value = "none")]
    protocol: ProtocolKind,

    /// Pin the clock to this epoch second instead of reading the system clock
    #[arg(long)]
    at: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Protect a hex payload and print the frame as hex
    Protect {
        /// Payload bytes as hex
        payload: String,
    },
    /// Verify a hex frame and print the payload as hex
    Verify {
        /// Protected frame as hex
        frame: String,
    },
    /// Show the security fields of a hex frame without verifying it
    Inspect {
        /// Protected frame as hex
        frame: String,
    },
    /// Send recorded CAMs periodically and verify them on loopback
    Run {
        /// Number of CAMs to send
        #[arg(long, default_value = "5")]
        count: usize,

        /// CAM frequency in Hz
        #[arg(long, default_value = "10")]
        frequency: f64,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)).with(filter).init();

    let env = args.at.map_or_else(SystemEnv::new, SystemEnv::pinned);
    let protocol = ProtocolSetup::build(args.protocol, env.clone())?;

    let mut out = std::io::stdout().lock();
    match args.command {
        Command::Protect { payload } => commands::protect(&protocol, &payload, &mut out)?,
        Command::Verify { frame } => commands::verify(&protocol, &frame, &mut out)?,
        Command::Inspect { frame } => commands::inspect(&protocol, &frame, &mut out)?,
        Command::Run { count, frequency } => {
            let period = Duration::from_secs_f64(1.0 / frequency.max(0.001));
            let mut source = FixtureSource::recorded();
            commands::run(Arc::new(protocol), &mut source, &env, count, period, &mut out)?;
        },
    }

    Ok(())
}
