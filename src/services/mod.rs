//! Service layer for Pocketbook
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, owner scoping, computed fields, and cross-entity
//! operations such as card bill payments.

pub mod account;
pub mod card;
pub mod owner;
pub mod payables;
pub mod transaction;

pub use account::{AccountService, AccountSummary};
pub use card::{CardService, CardStatement, CARD_PAYMENT_CATEGORY};
pub use owner::{OwnerService, PurgeSummary};
pub use payables::PayablesService;
pub use transaction::{TransactionFilter, TransactionService};
