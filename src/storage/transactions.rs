//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::PocketError;
use crate::models::{AccountId, OwnerId, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence with an account index
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: account_id -> transaction_ids
    by_account: RwLock<HashMap<AccountId, Vec<TransactionId>>>,
}

fn lock_error(kind: &str, e: impl std::fmt::Display) -> PocketError {
    PocketError::Storage(format!("Failed to acquire {} lock: {}", kind, e))
}

/// Newest first, then most recently created
fn newest_first(a: &Transaction, b: &Transaction) -> std::cmp::Ordering {
    b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at))
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_account: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and build the index
    pub fn load(&self) -> Result<(), PocketError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| lock_error("write", e))?;
        let mut by_account = self.by_account.write().map_err(|e| lock_error("write", e))?;

        data.clear();
        by_account.clear();

        for txn in file_data.transactions {
            by_account.entry(txn.account_id).or_default().push(txn.id);
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), PocketError> {
        let data = self.data.read().map_err(|e| lock_error("read", e))?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(newest_first);

        write_json_atomic(&self.path, &TransactionData { transactions })
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, PocketError> {
        let data = self.data.read().map_err(|e| lock_error("read", e))?;
        Ok(data.get(&id).cloned())
    }

    /// Get all transactions of every owner, newest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, PocketError> {
        let data = self.data.read().map_err(|e| lock_error("read", e))?;
        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(newest_first);
        Ok(transactions)
    }

    /// Get an owner's transactions, newest first
    pub fn get_by_owner(&self, owner_id: &OwnerId) -> Result<Vec<Transaction>, PocketError> {
        let data = self.data.read().map_err(|e| lock_error("read", e))?;
        let mut transactions: Vec<_> = data
            .values()
            .filter(|t| &t.owner_id == owner_id)
            .cloned()
            .collect();
        transactions.sort_by(newest_first);
        Ok(transactions)
    }

    /// Get transactions for an account, newest first
    pub fn get_by_account(&self, account_id: AccountId) -> Result<Vec<Transaction>, PocketError> {
        let data = self.data.read().map_err(|e| lock_error("read", e))?;
        let by_account = self.by_account.read().map_err(|e| lock_error("read", e))?;

        let ids = by_account.get(&account_id).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        transactions.sort_by(newest_first);
        Ok(transactions)
    }

    /// Find an owner's transaction by full ID or short display form
    pub fn find(&self, owner_id: &OwnerId, identifier: &str) -> Result<Option<Transaction>, PocketError> {
        let data = self.data.read().map_err(|e| lock_error("read", e))?;

        if let Ok(id) = identifier.parse::<TransactionId>() {
            if let Some(txn) = data.get(&id).filter(|t| &t.owner_id == owner_id) {
                return Ok(Some(txn.clone()));
            }
        }

        let mut matches = data
            .values()
            .filter(|t| &t.owner_id == owner_id && t.id.matches_short(identifier));
        match (matches.next(), matches.next()) {
            (Some(txn), None) => Ok(Some(txn.clone())),
            (Some(_), Some(_)) => Err(PocketError::Validation(format!(
                "Transaction id '{}' is ambiguous; use more characters",
                identifier
            ))),
            _ => Ok(None),
        }
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), PocketError> {
        let mut data = self.data.write().map_err(|e| lock_error("write", e))?;
        let mut by_account = self.by_account.write().map_err(|e| lock_error("write", e))?;

        if let Some(old) = data.get(&txn.id) {
            if let Some(ids) = by_account.get_mut(&old.account_id) {
                ids.retain(|&id| id != txn.id);
            }
        }

        by_account.entry(txn.account_id).or_default().push(txn.id);
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> Result<bool, PocketError> {
        let mut data = self.data.write().map_err(|e| lock_error("write", e))?;
        let mut by_account = self.by_account.write().map_err(|e| lock_error("write", e))?;

        if let Some(txn) = data.remove(&id) {
            if let Some(ids) = by_account.get_mut(&txn.account_id) {
                ids.retain(|&tid| tid != id);
            }
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Delete every transaction of an account, returning how many were removed
    pub fn delete_by_account(&self, account_id: AccountId) -> Result<usize, PocketError> {
        let mut data = self.data.write().map_err(|e| lock_error("write", e))?;
        let mut by_account = self.by_account.write().map_err(|e| lock_error("write", e))?;

        let ids = by_account.remove(&account_id).unwrap_or_default();
        Ok(ids.iter().filter(|id| data.remove(id).is_some()).count())
    }

    /// Delete every transaction of an owner, returning how many were removed
    pub fn delete_by_owner(&self, owner_id: &OwnerId) -> Result<usize, PocketError> {
        let mut data = self.data.write().map_err(|e| lock_error("write", e))?;
        let mut by_account = self.by_account.write().map_err(|e| lock_error("write", e))?;

        let before = data.len();
        data.retain(|_, t| &t.owner_id != owner_id);
        by_account.retain(|_, ids| {
            ids.retain(|id| data.contains_key(id));
            !ids.is_empty()
        });
        Ok(before - data.len())
    }

    pub fn count(&self) -> Result<usize, PocketError> {
        let data = self.data.read().map_err(|e| lock_error("read", e))?;
        Ok(data.len())
    }
}
