//! `libris borrow` and `libris return`

use clap::Args;
use libris_core_types::RequestContext;
use libris_engine::{apply_engine_command, EngineCommand, EngineCommandResult};
use std::path::PathBuf;

use super::{open_ledger, print_json};

#[derive(Debug, Args)]
pub struct LoanArgs {
    #[arg(long)]
    pub book: i64,

    #[arg(long)]
    pub reader: i64,

    /// Librarian processing the desk event
    #[arg(long)]
    pub librarian: i64,
}

pub fn execute_borrow(args: LoanArgs, db: Option<PathBuf>) -> anyhow::Result<()> {
    run(
        EngineCommand::BorrowBook {
            book_id: args.book,
            reader_id: args.reader,
            librarian_id: args.librarian,
        },
        db,
    )
}

pub fn execute_return(args: LoanArgs, db: Option<PathBuf>) -> anyhow::Result<()> {
    run(
        EngineCommand::ReturnBook {
            book_id: args.book,
            reader_id: args.reader,
            librarian_id: args.librarian,
        },
        db,
    )
}

fn run(cmd: EngineCommand, db: Option<PathBuf>) -> anyhow::Result<()> {
    let mut conn = open_ledger(db)?;
    let ctx = RequestContext::new();

    match apply_engine_command(cmd, &mut conn, &ctx)? {
        EngineCommandResult::Borrowed(record) | EngineCommandResult::Returned(record) => {
            print_json(&record)
        }
        other => anyhow::bail!("unexpected engine result: {:?}", other),
    }
}
