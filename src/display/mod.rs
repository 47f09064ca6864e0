//! Display formatting for terminal output
//!
//! Provides utilities for formatting accounts, transactions and payables as
//! plain-text tables, using the currency symbol and date format from the
//! user's settings.

pub mod account;
pub mod payables;
pub mod report;
pub mod transaction;

pub use account::{format_account_details, format_account_list};
pub use payables::format_payables;
pub use transaction::{
    format_transaction_details, format_transaction_register, format_transaction_row, AccountNames,
};
