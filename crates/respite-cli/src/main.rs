use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "respite", version, about = "Respite break reminder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the break scheduler in the foreground
    Run {
        /// Tick period in milliseconds
        #[arg(long, default_value_t = 1000)]
        tick_ms: u64,
    },
    /// Settings management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Break message pool management
    Messages {
        #[command(subcommand)]
        action: commands::messages::MessagesAction,
    },
    /// Show current settings and schedule context
    Status,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run { tick_ms } => commands::run::run(tick_ms),
        Commands::Config { action } => commands::config::run(action),
        Commands::Messages { action } => commands::messages::run(action),
        Commands::Status => commands::status::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
