//! `libris book ...`

use clap::{Args, Subcommand};
use libris_core::model::{BookPatch, NewBook};
use libris_core_types::RequestContext;
use libris_engine::commands::{catalog, deletion, queries};
use serde_json::json;
use std::path::PathBuf;

use super::{open_ledger, print_json};

#[derive(Debug, Args)]
pub struct BookArgs {
    #[command(subcommand)]
    pub command: BookCommand,
}

#[derive(Debug, Subcommand)]
pub enum BookCommand {
    /// Catalogue a new book
    Add(AddArgs),
    Show {
        id: i64,
    },
    /// Change the given fields of a book
    Update(UpdateArgs),
    /// Remove a book that has never been lent
    Delete {
        id: i64,
    },
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub authors: String,

    #[arg(long)]
    pub year: Option<i32>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub isbn: Option<String>,

    /// Copies on the shelf
    #[arg(long, default_value_t = 1)]
    pub stock: i64,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub id: i64,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub authors: Option<String>,

    #[arg(long)]
    pub year: Option<i32>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub isbn: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    pub stock: Option<i64>,
}

pub fn execute(args: BookArgs, db: Option<PathBuf>) -> anyhow::Result<()> {
    let mut conn = open_ledger(db)?;
    let ctx = RequestContext::new();

    match args.command {
        BookCommand::Add(add) => {
            let new_book = NewBook {
                title: add.title,
                release_year: add.year,
                authors: add.authors,
                description: add.description,
                isbn: add.isbn,
                available_stock: add.stock,
            };
            print_json(&catalog::create_book(&conn, &ctx, new_book)?)
        }
        BookCommand::Show { id } => print_json(&queries::get_book(&conn, &ctx, id)?),
        BookCommand::Update(update) => {
            let patch = BookPatch {
                title: update.title,
                release_year: update.year,
                authors: update.authors,
                description: update.description,
                isbn: update.isbn,
                available_stock: update.stock,
            };
            print_json(&catalog::update_book(&mut conn, &ctx, update.id, patch)?)
        }
        BookCommand::Delete { id } => {
            deletion::delete_book(&mut conn, &ctx, id)?;
            print_json(&json!({ "deleted": "book", "id": id }))
        }
    }
}
