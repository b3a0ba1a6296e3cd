//! pemgrid CLI — generate, inspect, and validate fuel-cell grids.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "pemgrid")]
#[command(version, about = "pemgrid — tagged mesh geometries for fuel-cell simulation")]
struct Cli {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered geometry kinds.
    List,

    /// Generate a grid from a config file.
    Generate {
        /// Path to grid config (TOML).
        #[arg(short, long, default_value = "grid.toml")]
        config: String,

        /// Write the tagged mesh to this JSON file.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print a summary of a mesh file (.json or .msh).
    Inspect {
        /// Path to mesh file.
        path: String,
    },

    /// Validate a grid config or a mesh.
    Validate {
        /// Path to config (.toml) or mesh (.json, .msh) file.
        path: String,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result = match cli.command {
        Commands::List => commands::list(),
        Commands::Generate { config, output } => commands::generate(&config, output.as_deref()),
        Commands::Inspect { path } => commands::inspect(&path),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
