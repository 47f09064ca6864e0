//! Core data models for Pocketbook
//!
//! This module contains the data structures of the finance domain:
//! accounts (including credit cards), transactions, money and typed IDs.

pub mod account;
pub mod ids;
pub mod money;
pub mod transaction;

pub use account::{Account, AccountType, AccountValidationError, CardTerms};
pub use ids::{AccountId, OwnerId, TransactionId};
pub use money::Money;
pub use transaction::{
    parse_transaction_date, Transaction, TransactionInput, TransactionKind,
    TransactionValidationError,
};
