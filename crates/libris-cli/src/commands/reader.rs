//! `libris reader ...`

use clap::{Args, Subcommand};
use libris_core::model::{NewReader, ReaderPatch};
use libris_core_types::RequestContext;
use libris_engine::commands::{catalog, deletion, queries};
use serde_json::json;
use std::path::PathBuf;

use super::{open_ledger, print_json};

#[derive(Debug, Args)]
pub struct ReaderArgs {
    #[command(subcommand)]
    pub command: ReaderCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReaderCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Reader details with active loans
    Show {
        id: i64,
        /// Include returned loans
        #[arg(long)]
        history: bool,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Remove a reader with no books out
    Delete { id: i64 },
}

pub fn execute(args: ReaderArgs, db: Option<PathBuf>) -> anyhow::Result<()> {
    let mut conn = open_ledger(db)?;
    let ctx = RequestContext::new();

    match args.command {
        ReaderCommand::Add { name, email } => print_json(&catalog::create_reader(
            &conn,
            &ctx,
            NewReader::new(name, email),
        )?),
        ReaderCommand::Show { id, history } => {
            print_json(&queries::get_reader_detail(&conn, &ctx, id, history)?)
        }
        ReaderCommand::Update { id, name, email } => {
            let patch = ReaderPatch { name, email };
            print_json(&catalog::update_reader(&mut conn, &ctx, id, patch)?)
        }
        ReaderCommand::Delete { id } => {
            deletion::delete_reader(&mut conn, &ctx, id)?;
            print_json(&json!({ "deleted": "reader", "id": id }))
        }
    }
}
