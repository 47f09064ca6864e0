//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod card;
pub mod owner;
pub mod payables;
pub mod report;
pub mod transaction;

pub use account::{handle_account_command, AccountCommands};
pub use card::{handle_card_command, CardCommands};
pub use owner::{handle_owner_command, OwnerCommands};
pub use payables::handle_payables_command;
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::display::AccountNames;
use crate::error::PocketResult;
use crate::models::{parse_transaction_date, OwnerId};
use crate::storage::Storage;

/// Reference day from `--date`, or today in local time
pub(crate) fn reference_date(date: Option<&str>) -> PocketResult<NaiveDate> {
    match date {
        Some(s) => Ok(parse_transaction_date(s)?.date()),
        None => Ok(Local::now().date_naive()),
    }
}

/// Timestamp from `--date`, or now in local time
pub(crate) fn timestamp(date: Option<&str>) -> PocketResult<NaiveDateTime> {
    match date {
        Some(s) => parse_transaction_date(s),
        None => Ok(Local::now().naive_local()),
    }
}

pub(crate) fn account_names(storage: &Storage, owner: &OwnerId) -> PocketResult<AccountNames> {
    Ok(storage
        .accounts
        .get_by_owner(owner)?
        .into_iter()
        .map(|a| (a.id, a.name))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PocketError;

    #[test]
    fn test_reference_date() {
        assert_eq!(
            reference_date(Some("15/03/2024")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
        assert!(matches!(
            reference_date(Some("soon")),
            Err(PocketError::MalformedDate(_))
        ));
        assert_eq!(reference_date(None).unwrap(), Local::now().date_naive());
    }

    #[test]
    fn test_timestamp_keeps_time() {
        let ts = timestamp(Some("2024-03-15 14:30")).unwrap();
        assert_eq!(ts.format("%H:%M").to_string(), "14:30");
    }
}
