use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::context::AppContext;

#[derive(Parser)]
#[command(name = "liftlog")]
#[command(about = "LiftLog CLI - inspect and maintain the workout session journal", long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the journal, overriding the configuration
    #[arg(long, global = true)]
    journal_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and clean the local journal
    Journal {
        #[command(subcommand)]
        action: JournalAction,
    },
    /// Resolve working sessions
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand)]
enum JournalAction {
    /// List journal records after cleanup
    List,
    /// Normalize timestamps and drop duplicate records
    Reconcile {
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },
    /// Remove the free-form record of one day
    Remove {
        /// Day of the record (YYYY-MM-DD)
        date: String,
        /// Session name of the record
        name: String,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Print the session a route would open, as JSON
    Show {
        /// Routine id, or "custom" for a free-form session
        route: String,
        /// Target day (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Member id when opening a member's routine as a trainer
        #[arg(long)]
        member: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let context = AppContext::load(cli.config, cli.journal_dir)?;

    match cli.command {
        Commands::Journal { action } => match action {
            JournalAction::List => commands::journal::list(&context)?,
            JournalAction::Reconcile { dry_run } => commands::journal::reconcile(&context, dry_run)?,
            JournalAction::Remove { date, name } => {
                commands::journal::remove(&context, &date, &name)?
            }
        },
        Commands::Session { action } => match action {
            SessionAction::Show {
                route,
                date,
                member,
            } => commands::session::show(&context, &route, date.as_deref(), member.as_deref())
                .await?,
        },
    }

    Ok(())
}
