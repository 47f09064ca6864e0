//! Storage layer for Pocketbook
//!
//! JSON file collections of accounts and transactions, queryable by owner
//! and by account, with atomic writes and automatic directory creation.

pub mod accounts;
pub mod file_io;
pub mod transactions;

pub use accounts::AccountRepository;
pub use file_io::{read_json, write_json_atomic};
pub use transactions::TransactionRepository;

use crate::config::paths::PocketPaths;
use crate::error::PocketError;
use crate::models::OwnerId;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: PocketPaths,
    pub accounts: AccountRepository,
    pub transactions: TransactionRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: PocketPaths) -> Result<Self, PocketError> {
        paths.ensure_directories()?;

        Ok(Self {
            accounts: AccountRepository::new(paths.accounts_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            paths,
        })
    }

    /// Create storage and load everything from disk
    pub fn open(paths: PocketPaths) -> Result<Self, PocketError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &PocketPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), PocketError> {
        self.accounts.load()?;
        self.transactions.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), PocketError> {
        self.accounts.save()?;
        self.transactions.save()?;
        Ok(())
    }

    /// Remove every account and transaction of an owner and save
    ///
    /// Returns the number of accounts and transactions removed.
    pub fn purge_owner(&self, owner_id: &OwnerId) -> Result<(usize, usize), PocketError> {
        let transactions = self.transactions.delete_by_owner(owner_id)?;
        let accounts = self.accounts.delete_by_owner(owner_id)?;
        self.save_all()?;
        Ok((accounts, transactions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountType, Money, Transaction, TransactionKind};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert_eq!(storage.accounts.count().unwrap(), 0);
    }

    #[test]
    fn test_save_all_and_open() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketPaths::with_base_dir(temp_dir.path().to_path_buf());

        let storage = Storage::new(paths.clone()).unwrap();
        storage
            .accounts
            .upsert(Account::new(OwnerId::new("u"), "Wallet", AccountType::Cash))
            .unwrap();
        storage.save_all().unwrap();

        let reopened = Storage::open(paths).unwrap();
        assert_eq!(reopened.accounts.count().unwrap(), 1);
        assert!(reopened.paths().accounts_file().exists());
    }

    #[test]
    fn test_purge_owner_empties_both_collections() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths.clone()).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        for owner in ["alice", "bob"] {
            let account = Account::new(OwnerId::new(owner), "Wallet", AccountType::Cash);
            for cents in [100, 200] {
                storage
                    .transactions
                    .upsert(Transaction::new(
                        OwnerId::new(owner),
                        account.id,
                        TransactionKind::Expense,
                        Money::from_cents(cents),
                        date,
                    ))
                    .unwrap();
            }
            storage.accounts.upsert(account).unwrap();
        }
        storage.save_all().unwrap();

        let alice = OwnerId::new("alice");
        assert_eq!(storage.purge_owner(&alice).unwrap(), (1, 2));

        let reopened = Storage::open(paths).unwrap();
        assert!(reopened.accounts.get_by_owner(&alice).unwrap().is_empty());
        assert!(reopened.transactions.get_by_owner(&alice).unwrap().is_empty());
        let bob = OwnerId::new("bob");
        assert_eq!(reopened.accounts.get_by_owner(&bob).unwrap().len(), 1);
        assert_eq!(reopened.transactions.get_by_owner(&bob).unwrap().len(), 2);
    }
}
