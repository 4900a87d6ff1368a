use clap::{Parser, Subcommand};
use std::process;
use tracing::error;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Roster file (CSV with a header row).
    #[arg(global = true, short, long, default_value = "roster.csv")]
    input: String,

    /// Seed for reproducible runs. Unseeded runs draw from entropy and
    /// will legitimately produce different groups each time.
    #[arg(global = true, short = 'S', long)]
    seed: Option<u64>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build maximally diverse groups from the roster.
    Forge(cmd::forge::ForgeArgs),
    /// Re-score an existing group assignment.
    Validate(cmd::validate::ValidateArgs),
    /// Assign random group labels to late sign-ups.
    Assign(cmd::assign::AssignArgs),
}

fn main() {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt::init();
    }

    let result = match &cli.command {
        Commands::Forge(args) => cmd::forge::run(args, &cli.input, cli.seed),
        Commands::Validate(args) => cmd::validate::run(args, &cli.input),
        Commands::Assign(args) => cmd::assign::run(args, &cli.input, cli.seed),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
