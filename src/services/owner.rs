//! Owner administration
//!
//! Operations on whole owners rather than on one owner's records.

use tracing::info;

use crate::error::{PocketError, PocketResult};
use crate::models::OwnerId;
use crate::storage::Storage;

/// Records removed by a purge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurgeSummary {
    pub accounts: usize,
    pub transactions: usize,
}

/// Service for administrative operations across owners
pub struct OwnerService<'a> {
    storage: &'a Storage,
}

impl<'a> OwnerService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Number of accounts and transactions an owner has
    pub fn record_counts(&self, owner: &OwnerId) -> PocketResult<PurgeSummary> {
        Ok(PurgeSummary {
            accounts: self.storage.accounts.get_by_owner(owner)?.len(),
            transactions: self.storage.transactions.get_by_owner(owner)?.len(),
        })
    }

    /// Delete every account and transaction of `owner`
    ///
    /// Fails with `NotFound` when the owner has no records at all.
    pub fn purge(&self, owner: &OwnerId) -> PocketResult<PurgeSummary> {
        let counts = self.record_counts(owner)?;
        if counts.accounts == 0 && counts.transactions == 0 {
            return Err(PocketError::NotFound {
                entity_type: "Owner",
                identifier: owner.to_string(),
            });
        }

        let (accounts, transactions) = self.storage.purge_owner(owner)?;
        info!(%owner, accounts, transactions, "purged owner");
        Ok(PurgeSummary {
            accounts,
            transactions,
        })
    }
}
