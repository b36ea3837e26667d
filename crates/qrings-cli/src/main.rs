//! qrings Command-Line Interface
//!
//! Connects to the Quantum Rings cloud with credentials from a `.env` file
//! and either prints a diagnostic report for the default backend or draws
//! its coupling map.
//!
//! ```text
//! qrings inspect
//! qrings coupling-map --num_qubits 128 --output-dir images
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::Connection;
use commands::{coupling_map, inspect, version};

/// qrings - Quantum Rings backend inspection and coupling-map rendering
#[derive(Parser)]
#[command(name = "qrings")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Env file holding NAME and TOKEN
    #[arg(long, env = "QRINGS_ENV_FILE", default_value = qrings_hal::DEFAULT_ENV_FILE, global = true)]
    env_file: PathBuf,

    /// API base URL
    #[arg(long, env = "QRINGS_ENDPOINT", default_value = qrings_adapter_cloud::BASE_URL, global = true)]
    endpoint: String,

    /// Backend to open
    #[arg(long, env = "QRINGS_BACKEND", default_value = qrings_hal::DEFAULT_BACKEND, global = true)]
    backend: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect and print provider, platform and backend attributes
    Inspect,

    /// Connect and draw the backend's coupling map as a PNG
    CouplingMap {
        /// Expected qubit count (informational)
        #[arg(long = "num_qubits", default_value_t = coupling_map::DEFAULT_NUM_QUBITS)]
        num_qubits: u32,

        /// Directory the image is written to
        #[arg(short, long, default_value = "images")]
        output_dir: PathBuf,
    },

    /// Show version information
    Version,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let connection = Connection {
        env_file: cli.env_file,
        endpoint: cli.endpoint,
        backend: cli.backend,
    };

    // Execute command
    let result = match cli.command {
        Commands::Inspect => inspect::execute(&connection).await,

        Commands::CouplingMap {
            num_qubits,
            output_dir,
        } => coupling_map::execute(&connection, num_qubits, output_dir).await,

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
