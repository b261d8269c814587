use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "eisenmatrix-cli", version, about = "Eisenmatrix CLI")]
struct Cli {
    /// Config file to use instead of ~/.config/eisenmatrix/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the matrix from a task list
    Matrix(commands::matrix::MatrixArgs),
    /// Classify and position every task in a list
    Place(commands::place::PlaceArgs),
    /// Propose importance and due offset for a task created on the canvas
    Defaults(commands::defaults::DefaultsArgs),
    /// Time axis anchors for the configured canvas
    Ticks,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("EISENMATRIX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Matrix(args) => commands::matrix::run(args, config_path),
        Commands::Place(args) => commands::place::run(args, config_path),
        Commands::Defaults(args) => commands::defaults::run(args, config_path),
        Commands::Ticks => commands::ticks::run(config_path),
        Commands::Config { action } => commands::config::run(action, config_path),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
