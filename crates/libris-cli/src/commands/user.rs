//! `libris user ...`

use clap::{Args, Subcommand};
use libris_core::model::NewUser;
use libris_core_types::RequestContext;
use libris_engine::commands::{catalog, queries};
use std::path::PathBuf;

use super::{open_ledger, print_json};

#[derive(Debug, Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Register a librarian
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Hash produced by the authentication layer; stored as given
        #[arg(long)]
        password_hash: String,
    },
    /// Look a librarian up by id or by email
    Show {
        #[arg(required_unless_present = "email", conflicts_with = "email")]
        id: Option<i64>,
        #[arg(long)]
        email: Option<String>,
    },
}

pub fn execute(args: UserArgs, db: Option<PathBuf>) -> anyhow::Result<()> {
    let conn = open_ledger(db)?;
    let ctx = RequestContext::new();

    match args.command {
        UserCommand::Add {
            name,
            email,
            password_hash,
        } => print_json(&catalog::register_user(
            &conn,
            &ctx,
            NewUser::new(name, email, password_hash),
        )?),
        UserCommand::Show { id, email } => {
            let user = match (id, email) {
                (Some(id), _) => queries::get_user(&conn, &ctx, id)?,
                (None, Some(email)) => queries::find_user_by_email(&conn, &ctx, &email)?,
                (None, None) => anyhow::bail!("Must specify either an id or --email"),
            };
            print_json(&user)
        }
    }
}
