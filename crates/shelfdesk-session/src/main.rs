#![forbid(unsafe_code)]

//! Shelfdesk CLI
//!
//! Runs a borrow edit session against in-memory stores.

use anyhow::Result;
use clap::{Parser, Subcommand};
use shelfdesk_core::{Borrow, EntityId, EntityService, TimeoutService};
use shelfdesk_forms::BorrowFormAdapter;
use shelfdesk_session::{BorrowEditSession, BorrowOptionSources, SeedData, ShelfdeskConfig};
use std::path::PathBuf;
use std::sync::Arc;

/// Shelfdesk Command-Line Interface
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "SHELFDESK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a borrow
    NewBorrow {
        /// Borrowing member
        #[arg(long)]
        member: EntityId,

        /// Borrowed book
        #[arg(long)]
        book: EntityId,
    },
    /// Edit an existing borrow
    EditBorrow {
        /// Borrow to edit
        id: EntityId,

        /// New return date, `yyyy-mm-ddThh:mm`
        #[arg(long)]
        return_date: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = ShelfdeskConfig::load(args.config.as_deref())?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let seed = match &config.seed_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading seed data");
            SeedData::load(path)?
        }
        None => SeedData::sample(),
    };
    let stores = seed.into_stores();

    let borrows: Arc<dyn EntityService<Borrow>> = match config.save_timeout() {
        Some(timeout) => Arc::new(TimeoutService::new(stores.borrows.clone(), timeout)),
        None => stores.borrows.clone(),
    };
    let sources = BorrowOptionSources::new(stores.members.clone(), stores.books.clone())
        .with_query(config.option_query());
    let session = BorrowEditSession::new(BorrowFormAdapter::new(), borrows, sources);

    match args.command {
        Command::NewBorrow { member, book } => {
            session.initialize(None).await?;
            let member = stores.members.get(member).await?;
            let book = stores.books.get(book).await?;
            session.update_form(|fields| {
                fields.member = Some(member);
                fields.book = Some(book);
            })?;
        }
        Command::EditBorrow { id, return_date } => {
            session.open(id).await?;
            if let Some(return_date) = return_date {
                session.update_form(|fields| fields.return_date = Some(return_date))?;
            }
        }
    }

    if let Err(e) = session.validate() {
        tracing::warn!(error = %e, "Saving an incomplete borrow");
    }

    let saved = session.save().await?;
    tracing::info!(id = ?saved.id, phase = %session.phase(), "Done");
    println!("{}", serde_json::to_string_pretty(&saved)?);

    Ok(())
}
