//! Payables CLI command

use crate::config::Settings;
use crate::display::format_payables;
use crate::error::PocketResult;
use crate::models::OwnerId;
use crate::services::PayablesService;
use crate::storage::Storage;

/// Print the owner's payables relative to `date` (today when absent)
pub fn handle_payables_command(
    storage: &Storage,
    settings: &Settings,
    owner: &OwnerId,
    date: Option<&str>,
) -> PocketResult<()> {
    let reference = super::reference_date(date)?;
    let schedule = PayablesService::new(storage, owner).schedule(reference)?;
    let names = super::account_names(storage, owner)?;

    print!("{}", format_payables(&schedule, &names, reference, settings));
    Ok(())
}
