//! Owner administration CLI commands

use clap::Subcommand;

use crate::error::{PocketError, PocketResult};
use crate::models::OwnerId;
use crate::services::OwnerService;
use crate::storage::Storage;

/// Owner subcommands
#[derive(Subcommand)]
pub enum OwnerCommands {
    /// Delete every account and transaction of an owner
    Purge {
        /// Owner ID
        #[arg(value_name = "OWNER")]
        target: String,
        /// Confirm the deletion
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle an owner command
pub fn handle_owner_command(storage: &Storage, cmd: OwnerCommands) -> PocketResult<()> {
    let service = OwnerService::new(storage);

    match cmd {
        OwnerCommands::Purge { target, force } => {
            let owner = OwnerId::new(target.trim());
            if !force {
                let counts = service.record_counts(&owner)?;
                return Err(PocketError::Validation(format!(
                    "Owner '{}' has {} account(s) and {} transaction(s); use --force to delete them",
                    owner, counts.accounts, counts.transactions
                )));
            }

            let removed = service.purge(&owner)?;
            println!(
                "Purged owner: {} ({} account(s), {} transaction(s) removed)",
                owner, removed.accounts, removed.transactions
            );
        }
    }

    Ok(())
}
