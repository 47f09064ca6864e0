//! Pocketbook - personal finance tracking from the terminal
//!
//! This library provides the core functionality for Pocketbook: accounts and
//! credit cards, income and expense records, a payables schedule that sorts
//! unpaid expenses by urgency, and credit card billing cycle computation.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (accounts, transactions, money, IDs)
//! - `scheduling`: Pure date computations (billing cycles, payables buckets)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer, scoped to one owner
//! - `reports`: Card overview, activity and owner list reports
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use pocketbook::config::{paths::PocketPaths, settings::Settings};
//! use pocketbook::services::PayablesService;
//! use pocketbook::storage::Storage;
//!
//! let paths = PocketPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths)?;
//! let owner = settings.owner(None);
//! let schedule = PayablesService::new(&storage, &owner).schedule(today)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod scheduling;
pub mod services;
pub mod storage;

pub use error::{PocketError, PocketResult};
