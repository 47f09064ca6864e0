//! Transaction service
//!
//! Provides business logic for transaction management: validated creation,
//! filtering, settling payables and deletion.

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::error::{PocketError, PocketResult};
use crate::models::{AccountId, OwnerId, Transaction, TransactionId, TransactionInput, TransactionKind};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
    owner: &'a OwnerId,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by account
    pub account_id: Option<AccountId>,
    /// Filter by income or expense
    pub kind: Option<TransactionKind>,
    /// Only unpaid expenses
    pub unpaid_only: bool,
    /// Filter by date range start (inclusive)
    pub start_date: Option<NaiveDate>,
    /// Filter by date range end (inclusive)
    pub end_date: Option<NaiveDate>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(mut self, account_id: AccountId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn unpaid(mut self) -> Self {
        self.unpaid_only = true;
        self
    }

    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, txn: &Transaction) -> bool {
        self.account_id.map_or(true, |id| txn.account_id == id)
            && self.kind.map_or(true, |kind| txn.kind == kind)
            && (!self.unpaid_only || txn.is_payable())
            && self.start_date.map_or(true, |start| txn.day() >= start)
            && self.end_date.map_or(true, |end| txn.day() <= end)
    }
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service acting for `owner`
    pub fn new(storage: &'a Storage, owner: &'a OwnerId) -> Self {
        Self { storage, owner }
    }

    /// Validate raw input and record the transaction
    pub fn create(&self, input: &TransactionInput) -> PocketResult<Transaction> {
        let txn = self.validate_input(input)?;
        self.require_own_account(txn.account_id)?;
        self.insert(txn)
    }

    /// Replace the fields of an existing transaction with validated input
    ///
    /// The ID, owner and creation time are kept. Moving the transaction to
    /// another account is allowed as long as the owner holds that account.
    pub fn update(&self, id: TransactionId, input: &TransactionInput) -> PocketResult<Transaction> {
        let existing = self
            .get(id)?
            .ok_or_else(|| PocketError::transaction_not_found(id.to_string()))?;

        let mut txn = self.validate_input(input)?;
        self.require_own_account(txn.account_id)?;

        txn.id = existing.id;
        txn.created_at = existing.created_at;
        txn.updated_at = Utc::now();

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        if existing.account_id != txn.account_id {
            info!(
                transaction = %id,
                from = %existing.account_id,
                to = %txn.account_id,
                "moved transaction"
            );
        }
        info!(owner = %self.owner, transaction = %id, amount = %txn.amount, "updated transaction");
        Ok(txn)
    }

    fn validate_input(&self, input: &TransactionInput) -> PocketResult<Transaction> {
        input.validate(self.owner.clone()).map_err(|errors| {
            let message = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            warn!(owner = %self.owner, %message, "rejected transaction input");
            PocketError::Validation(message)
        })
    }

    /// Record an already-built transaction
    pub(crate) fn insert(&self, txn: Transaction) -> PocketResult<Transaction> {
        txn.validate()
            .map_err(|e| PocketError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        info!(
            owner = %self.owner,
            transaction = %txn.id,
            account = %txn.account_id,
            kind = %txn.kind,
            amount = %txn.amount,
            "recorded transaction"
        );
        Ok(txn)
    }

    fn require_own_account(&self, account_id: AccountId) -> PocketResult<()> {
        match self.storage.accounts.get(account_id)? {
            Some(account) if &account.owner_id == self.owner => Ok(()),
            _ => Err(PocketError::account_not_found(account_id.to_string())),
        }
    }

    /// Get one of the owner's transactions by ID
    pub fn get(&self, id: TransactionId) -> PocketResult<Option<Transaction>> {
        Ok(self
            .storage
            .transactions
            .get(id)?
            .filter(|t| &t.owner_id == self.owner))
    }

    /// Find a transaction by full or short ID
    pub fn find(&self, identifier: &str) -> PocketResult<Option<Transaction>> {
        self.storage.transactions.find(self.owner, identifier)
    }

    /// Find a transaction or fail with `NotFound`
    pub fn require(&self, identifier: &str) -> PocketResult<Transaction> {
        self.find(identifier)?
            .ok_or_else(|| PocketError::transaction_not_found(identifier))
    }

    /// The owner's transactions matching `filter`, newest first
    pub fn list(&self, filter: &TransactionFilter) -> PocketResult<Vec<Transaction>> {
        let source = match filter.account_id {
            Some(account_id) => self
                .storage
                .transactions
                .get_by_account(account_id)?
                .into_iter()
                .filter(|t| &t.owner_id == self.owner)
                .collect(),
            None => self.storage.transactions.get_by_owner(self.owner)?,
        };

        let mut transactions: Vec<_> = source.into_iter().filter(|t| filter.matches(t)).collect();
        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        debug!(owner = %self.owner, count = transactions.len(), "listed transactions");
        Ok(transactions)
    }

    /// Mark a transaction as paid
    ///
    /// Already-paid transactions are returned unchanged.
    pub fn mark_paid(&self, id: TransactionId) -> PocketResult<Transaction> {
        let mut txn = self
            .get(id)?
            .ok_or_else(|| PocketError::transaction_not_found(id.to_string()))?;

        if txn.is_paid {
            debug!(transaction = %id, "transaction already paid");
            return Ok(txn);
        }

        txn.mark_paid();
        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        info!(owner = %self.owner, transaction = %id, "marked transaction paid");
        Ok(txn)
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> PocketResult<Transaction> {
        let txn = self
            .get(id)?
            .ok_or_else(|| PocketError::transaction_not_found(id.to_string()))?;

        self.storage.transactions.delete(id)?;
        self.storage.transactions.save()?;

        info!(owner = %self.owner, transaction = %id, "deleted transaction");
        Ok(txn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PocketPaths;
    use crate::models::{AccountType, Money};
    use crate::services::AccountService;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn input(account_id: AccountId, amount: &str, date: &str) -> TransactionInput {
        TransactionInput {
            account_id: Some(account_id),
            kind: TransactionKind::Expense,
            description: "Rent".into(),
            amount: amount.into(),
            date: date.into(),
            category: "Housing".into(),
            is_paid: false,
        }
    }

    #[test]
    fn test_create_and_reload() {
        let (temp_dir, storage) = create_test_storage();
        let owner = OwnerId::new("alice");
        let account = AccountService::new(&storage, &owner)
            .create("Main", AccountType::Checking, Money::zero())
            .unwrap();

        let service = TransactionService::new(&storage, &owner);
        let txn = service.create(&input(account.id, "1200,50", "2024-03-10")).unwrap();
        assert_eq!(txn.amount.cents(), 120050);
        assert_eq!(txn.description, "Rent");

        let reopened =
            Storage::open(PocketPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        assert!(reopened.transactions.get(txn.id).unwrap().is_some());
    }

    #[test]
    fn test_create_collects_all_errors() {
        let (_temp_dir, storage) = create_test_storage();
        let owner = OwnerId::new("alice");
        let service = TransactionService::new(&storage, &owner);

        let bad = TransactionInput {
            amount: "-3".into(),
            date: "yesterday".into(),
            ..Default::default()
        };
        let err = service.create(&bad).unwrap_err();
        let message = err.to_string();
        assert!(err.is_validation());
        assert!(message.contains("Description"));
        assert!(message.contains("account"));
        assert!(message.contains("yesterday"));
    }

    #[test]
    fn test_create_rejects_foreign_account() {
        let (_temp_dir, storage) = create_test_storage();
        let alice = OwnerId::new("alice");
        let bob = OwnerId::new("bob");
        let account = AccountService::new(&storage, &alice)
            .create("Main", AccountType::Checking, Money::zero())
            .unwrap();

        let err = TransactionService::new(&storage, &bob)
            .create(&input(account.id, "10", "2024-03-10"))
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(storage.transactions.count().unwrap(), 0);
    }

    #[test]
    fn test_list_filters() {
        let (_temp_dir, storage) = create_test_storage();
        let owner = OwnerId::new("alice");
        let accounts = AccountService::new(&storage, &owner);
        let main = accounts.create("Main", AccountType::Checking, Money::zero()).unwrap();
        let cash = accounts.create("Cash", AccountType::Cash, Money::zero()).unwrap();

        let service = TransactionService::new(&storage, &owner);
        service.create(&input(main.id, "10", "2024-03-01")).unwrap();
        service.create(&input(main.id, "20", "2024-03-15")).unwrap();
        let mut paid = input(cash.id, "30", "2024-03-20");
        paid.is_paid = true;
        service.create(&paid).unwrap();

        assert_eq!(service.list(&TransactionFilter::new()).unwrap().len(), 3);
        assert_eq!(
            service.list(&TransactionFilter::new().account(main.id)).unwrap().len(),
            2
        );
        assert_eq!(service.list(&TransactionFilter::new().unpaid()).unwrap().len(), 2);

        let march_first_half = TransactionFilter::new().date_range(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        );
        assert_eq!(service.list(&march_first_half).unwrap().len(), 2);

        let newest = service.list(&TransactionFilter::new().limit(1)).unwrap();
        assert_eq!(newest[0].amount.cents(), 3000);
    }

    #[test]
    fn test_mark_paid_and_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let owner = OwnerId::new("alice");
        let account = AccountService::new(&storage, &owner)
            .create("Main", AccountType::Checking, Money::zero())
            .unwrap();

        let service = TransactionService::new(&storage, &owner);
        let txn = service.create(&input(account.id, "10", "2024-03-01")).unwrap();

        let paid = service.mark_paid(txn.id).unwrap();
        assert!(paid.is_paid);
        assert!(service.mark_paid(txn.id).unwrap().is_paid);

        let other = OwnerId::new("bob");
        assert!(TransactionService::new(&storage, &other)
            .delete(txn.id)
            .unwrap_err()
            .is_not_found());

        service.delete(txn.id).unwrap();
        assert!(service.get(txn.id).unwrap().is_none());
    }

    #[test]
    fn test_update_moves_between_accounts() {
        let (_temp_dir, storage) = create_test_storage();
        let owner = OwnerId::new("alice");
        let accounts = AccountService::new(&storage, &owner);
        let main = accounts.create("Main", AccountType::Checking, Money::zero()).unwrap();
        let cash = accounts.create("Cash", AccountType::Cash, Money::zero()).unwrap();

        let service = TransactionService::new(&storage, &owner);
        let txn = service.create(&input(main.id, "10", "2024-03-01")).unwrap();

        let mut edited = TransactionInput::from_transaction(&txn);
        edited.account_id = Some(cash.id);
        edited.amount = "25,90".into();
        edited.description = "Market".into();
        let updated = service.update(txn.id, &edited).unwrap();

        assert_eq!(updated.id, txn.id);
        assert_eq!(updated.created_at, txn.created_at);
        assert_eq!(updated.amount.cents(), 2590);
        assert_eq!(updated.description, "Market");
        assert!(storage.transactions.get_by_account(main.id).unwrap().is_empty());
        let moved = storage.transactions.get_by_account(cash.id).unwrap();
        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].id, txn.id);
        assert_eq!(storage.transactions.count().unwrap(), 1);
    }

    #[test]
    fn test_update_validates_input() {
        let (_temp_dir, storage) = create_test_storage();
        let owner = OwnerId::new("alice");
        let account = AccountService::new(&storage, &owner)
            .create("Main", AccountType::Checking, Money::zero())
            .unwrap();

        let service = TransactionService::new(&storage, &owner);
        let txn = service.create(&input(account.id, "10", "2024-03-01")).unwrap();

        let mut edited = TransactionInput::from_transaction(&txn);
        edited.amount = "0".into();
        edited.date = "31/02/2024".into();
        let err = service.update(txn.id, &edited).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Amount must be positive"));

        let stored = service.get(txn.id).unwrap().unwrap();
        assert_eq!(stored.amount.cents(), 1000);
    }

    #[test]
    fn test_update_is_scoped_to_owner() {
        let (_temp_dir, storage) = create_test_storage();
        let alice = OwnerId::new("alice");
        let bob = OwnerId::new("bob");
        let alice_main = AccountService::new(&storage, &alice)
            .create("Main", AccountType::Checking, Money::zero())
            .unwrap();
        let bob_main = AccountService::new(&storage, &bob)
            .create("Main", AccountType::Checking, Money::zero())
            .unwrap();

        let txn = TransactionService::new(&storage, &alice)
            .create(&input(alice_main.id, "10", "2024-03-01"))
            .unwrap();

        let edited = TransactionInput::from_transaction(&txn);
        assert!(TransactionService::new(&storage, &bob)
            .update(txn.id, &edited)
            .unwrap_err()
            .is_not_found());

        let mut to_foreign = edited.clone();
        to_foreign.account_id = Some(bob_main.id);
        assert!(TransactionService::new(&storage, &alice)
            .update(txn.id, &to_foreign)
            .unwrap_err()
            .is_not_found());
        assert_eq!(
            storage.transactions.get(txn.id).unwrap().unwrap().account_id,
            alice_main.id
        );
    }
}
