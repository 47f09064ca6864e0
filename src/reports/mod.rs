//! Reports module for Pocketbook
//!
//! Provides the card statement overview for one owner and the
//! administrative activity report and owner list across all owners.

pub mod activity;
pub mod cards;
pub mod owners;

pub use activity::{ActivityReport, CategoryCount};
pub use cards::CardOverviewReport;
pub use owners::{OwnerFilter, OwnerListReport, OwnerRow, OwnerSort};
