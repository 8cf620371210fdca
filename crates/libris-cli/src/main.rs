//! Libris CLI
//!
//! Command-line front end for the lending ledger

use clap::{Parser, Subcommand};
use libris_core::errors::ExError;
use libris_core::logging_facility::{self, Profile};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "libris")]
#[command(about = "Libris - lending library ledger", long_about = None)]
struct Cli {
    /// Database file, overriding LIBRIS_DB_PATH (":memory:" for a scratch ledger)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log format on stderr
    #[arg(long, global = true, env = "LIBRIS_LOG_FORMAT", default_value = "pretty")]
    log_format: Profile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Catalogue operations
    Book(commands::book::BookArgs),
    /// Reader operations
    Reader(commands::reader::ReaderArgs),
    /// Librarian accounts
    User(commands::user::UserArgs),
    /// Lend a copy of a book to a reader
    Borrow(commands::loan::LoanArgs),
    /// Take a lent copy back
    Return(commands::loan::LoanArgs),
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.log_format);

    let db = cli.db;
    let result = match cli.command {
        Commands::Book(args) => commands::book::execute(args, db),
        Commands::Reader(args) => commands::reader::execute(args, db),
        Commands::User(args) => commands::user::execute(args, db),
        Commands::Borrow(args) => commands::loan::execute_borrow(args, db),
        Commands::Return(args) => commands::loan::execute_return(args, db),
    };

    if let Err(e) = result {
        match e.downcast_ref::<ExError>() {
            Some(ex) => eprintln!("{}: {}", ex.code(), ex.message()),
            None => eprintln!("Error: {:#}", e),
        }
        std::process::exit(1);
    }
}
