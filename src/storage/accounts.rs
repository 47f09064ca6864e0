//! Account repository for JSON storage
//!
//! Manages loading and saving accounts to accounts.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::PocketError;
use crate::models::{Account, AccountId, OwnerId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable account data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct AccountData {
    accounts: Vec<Account>,
}

/// Repository for account persistence
pub struct AccountRepository {
    path: PathBuf,
    data: RwLock<HashMap<AccountId, Account>>,
}

impl AccountRepository {
    /// Create a new account repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<AccountId, Account>>, PocketError> {
        self.data
            .read()
            .map_err(|e| PocketError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<AccountId, Account>>, PocketError> {
        self.data
            .write()
            .map_err(|e| PocketError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load accounts from disk
    pub fn load(&self) -> Result<(), PocketError> {
        let file_data: AccountData = read_json(&self.path)?;

        let mut data = self.write()?;
        data.clear();
        for account in file_data.accounts {
            data.insert(account.id, account);
        }

        Ok(())
    }

    /// Save accounts to disk
    pub fn save(&self) -> Result<(), PocketError> {
        let data = self.read()?;

        let mut accounts: Vec<_> = data.values().cloned().collect();
        accounts.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.name.cmp(&b.name)));

        write_json_atomic(&self.path, &AccountData { accounts })
    }

    /// Get an account by ID
    pub fn get(&self, id: AccountId) -> Result<Option<Account>, PocketError> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// Get all accounts of every owner, sorted by owner then name
    pub fn get_all(&self) -> Result<Vec<Account>, PocketError> {
        let mut accounts: Vec<_> = self.read()?.values().cloned().collect();
        accounts.sort_by(|a, b| a.owner_id.cmp(&b.owner_id).then(a.name.cmp(&b.name)));
        Ok(accounts)
    }

    /// Get an owner's accounts, sorted by name
    pub fn get_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<Account>, PocketError> {
        let mut accounts: Vec<_> = self
            .read()?
            .values()
            .filter(|a| &a.owner_id == owner_id)
            .cloned()
            .collect();
        accounts.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(accounts)
    }

    /// Get an owner's account by name (case-insensitive)
    pub fn get_by_name(&self, owner_id: &OwnerId, name: &str) -> Result<Option<Account>, PocketError> {
        let name_lower = name.to_lowercase();
        Ok(self
            .read()?
            .values()
            .find(|a| &a.owner_id == owner_id && a.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Insert or update an account
    pub fn upsert(&self, account: Account) -> Result<(), PocketError> {
        self.write()?.insert(account.id, account);
        Ok(())
    }

    /// Delete an account
    pub fn delete(&self, id: AccountId) -> Result<bool, PocketError> {
        Ok(self.write()?.remove(&id).is_some())
    }

    /// Delete every account of an owner, returning how many were removed
    pub fn delete_by_owner(&self, owner_id: &OwnerId) -> Result<usize, PocketError> {
        let mut data = self.write()?;
        let before = data.len();
        data.retain(|_, a| &a.owner_id != owner_id);
        Ok(before - data.len())
    }

    /// Check if an account exists
    pub fn exists(&self, id: AccountId) -> Result<bool, PocketError> {
        Ok(self.read()?.contains_key(&id))
    }

    /// Check if an owner already has an account with this name
    pub fn name_exists(
        &self,
        owner_id: &OwnerId,
        name: &str,
        exclude_id: Option<AccountId>,
    ) -> Result<bool, PocketError> {
        let name_lower = name.to_lowercase();
        Ok(self.read()?.values().any(|a| {
            &a.owner_id == owner_id && a.name.to_lowercase() == name_lower && Some(a.id) != exclude_id
        }))
    }

    pub fn count(&self) -> Result<usize, PocketError> {
        Ok(self.read()?.len())
    }
}
