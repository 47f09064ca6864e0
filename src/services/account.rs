//! Account service
//!
//! Provides business logic for account management including CRUD operations,
//! balance calculation, and validation. Every call is scoped to one owner.

use tracing::{debug, info};

use crate::error::{PocketError, PocketResult};
use crate::models::{Account, AccountId, AccountType, CardTerms, Money, OwnerId};
use crate::storage::Storage;

/// Service for account management
pub struct AccountService<'a> {
    storage: &'a Storage,
    owner: &'a OwnerId,
}

/// Summary of an account with computed fields
#[derive(Debug, Clone)]
pub struct AccountSummary {
    pub account: Account,
    /// Initial balance plus paid income minus paid expenses
    pub balance: Money,
    /// Number of transactions on the account
    pub transaction_count: usize,
    /// Unpaid expenses still to settle
    pub pending: Money,
}

impl<'a> AccountService<'a> {
    /// Create a new account service acting for `owner`
    pub fn new(storage: &'a Storage, owner: &'a OwnerId) -> Self {
        Self { storage, owner }
    }

    /// Create a new standard account
    pub fn create(
        &self,
        name: &str,
        account_type: AccountType,
        initial_balance: Money,
    ) -> PocketResult<Account> {
        if account_type.is_credit_card() {
            return Err(PocketError::Validation(
                "Credit cards need a closing day, due day and limit; use the card form".into(),
            ));
        }

        let name = self.check_new_name(name, None)?;
        let account =
            Account::with_initial_balance(self.owner.clone(), name, account_type, initial_balance);
        self.insert(account)
    }

    /// Create a new credit card account
    pub fn create_card(
        &self,
        name: &str,
        close_day: u32,
        due_day: u32,
        limit: Money,
    ) -> PocketResult<Account> {
        let terms = CardTerms::new(close_day, due_day, limit)?;
        let name = self.check_new_name(name, None)?;
        self.insert(Account::credit_card(self.owner.clone(), name, terms))
    }

    fn check_new_name(&self, name: &str, exclude: Option<AccountId>) -> PocketResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PocketError::Validation("Account name cannot be empty".into()));
        }

        if self.storage.accounts.name_exists(self.owner, name, exclude)? {
            return Err(PocketError::Duplicate {
                entity_type: "Account",
                identifier: name.to_string(),
            });
        }

        Ok(name.to_string())
    }

    fn insert(&self, account: Account) -> PocketResult<Account> {
        account
            .validate()
            .map_err(|e| PocketError::Validation(e.to_string()))?;

        self.storage.accounts.upsert(account.clone())?;
        self.storage.accounts.save()?;

        info!(
            owner = %self.owner,
            account = %account.id,
            account_type = %account.account_type,
            "created account"
        );
        Ok(account)
    }

    /// Get one of the owner's accounts by ID
    pub fn get(&self, id: AccountId) -> PocketResult<Option<Account>> {
        Ok(self
            .storage
            .accounts
            .get(id)?
            .filter(|a| &a.owner_id == self.owner))
    }

    /// Find an account by name, full ID or short ID
    pub fn find(&self, identifier: &str) -> PocketResult<Option<Account>> {
        if let Some(account) = self.storage.accounts.get_by_name(self.owner, identifier)? {
            return Ok(Some(account));
        }

        if let Ok(id) = identifier.parse::<AccountId>() {
            if let Some(account) = self.get(id)? {
                return Ok(Some(account));
            }
        }

        Ok(self
            .list()?
            .into_iter()
            .find(|a| a.id.matches_short(identifier)))
    }

    /// Find an account or fail with `NotFound`
    pub fn require(&self, identifier: &str) -> PocketResult<Account> {
        self.find(identifier)?
            .ok_or_else(|| PocketError::account_not_found(identifier))
    }

    /// All of the owner's accounts, sorted by name
    pub fn list(&self) -> PocketResult<Vec<Account>> {
        self.storage.accounts.get_by_owner(self.owner)
    }

    /// The owner's credit cards, sorted by name
    pub fn list_cards(&self) -> PocketResult<Vec<Account>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(Account::is_credit_card)
            .collect())
    }

    /// All accounts with their computed balances
    pub fn list_with_balances(&self) -> PocketResult<Vec<AccountSummary>> {
        self.list()?
            .into_iter()
            .map(|account| self.get_summary(&account))
            .collect()
    }

    /// Account summary with computed balance
    pub fn get_summary(&self, account: &Account) -> PocketResult<AccountSummary> {
        let transactions = self.storage.transactions.get_by_account(account.id)?;

        let mut balance = account.initial_balance;
        let mut pending = Money::zero();
        for txn in &transactions {
            if txn.is_paid {
                balance += txn.signed_amount();
            } else if txn.is_expense() {
                pending += txn.amount;
            }
        }

        debug!(account = %account.id, %balance, "computed account balance");

        Ok(AccountSummary {
            account: account.clone(),
            balance,
            transaction_count: transactions.len(),
            pending,
        })
    }

    /// Rename an account
    pub fn rename(&self, id: AccountId, new_name: &str) -> PocketResult<Account> {
        let mut account = self.require_id(id)?;
        account.name = self.check_new_name(new_name, Some(id))?;
        self.save_changes(account, "renamed account")
    }

    /// Replace the closing day, due day and limit of a credit card
    pub fn update_card_terms(
        &self,
        id: AccountId,
        close_day: u32,
        due_day: u32,
        limit: Money,
    ) -> PocketResult<Account> {
        let mut account = self.require_id(id)?;
        account.card_terms()?;
        account.card = Some(CardTerms::new(close_day, due_day, limit)?);
        self.save_changes(account, "updated card terms")
    }

    /// Change the opening balance of a standard account
    pub fn update_initial_balance(&self, id: AccountId, balance: Money) -> PocketResult<Account> {
        let mut account = self.require_id(id)?;
        if account.is_credit_card() {
            return Err(PocketError::Validation(format!(
                "'{}' is a credit card and has no opening balance",
                account.name
            )));
        }
        account.initial_balance = balance;
        self.save_changes(account, "updated opening balance")
    }

    fn require_id(&self, id: AccountId) -> PocketResult<Account> {
        self.get(id)?
            .ok_or_else(|| PocketError::account_not_found(id.to_string()))
    }

    fn save_changes(&self, mut account: Account, action: &'static str) -> PocketResult<Account> {
        account.updated_at = chrono::Utc::now();
        account
            .validate()
            .map_err(|e| PocketError::Validation(e.to_string()))?;

        self.storage.accounts.upsert(account.clone())?;
        self.storage.accounts.save()?;

        info!(owner = %self.owner, account = %account.id, "{}", action);
        Ok(account)
    }

    /// Delete an account together with its transactions
    ///
    /// Returns the number of transactions removed.
    pub fn delete(&self, id: AccountId) -> PocketResult<usize> {
        let account = self.require_id(id)?;

        let removed = self.storage.transactions.delete_by_account(account.id)?;
        self.storage.accounts.delete(account.id)?;
        self.storage.save_all()?;

        info!(
            owner = %self.owner,
            account = %account.id,
            transactions = removed,
            "deleted account"
        );
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PocketPaths;
    use crate::models::{Transaction, TransactionKind};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn add_txn(storage: &Storage, account: &Account, kind: TransactionKind, cents: i64, paid: bool) {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut txn = Transaction::new(
            account.owner_id.clone(),
            account.id,
            kind,
            Money::from_cents(cents),
            date,
        );
        txn.is_paid = paid;
        storage.transactions.upsert(txn).unwrap();
    }

    #[test]
    fn test_create_account() {
        let (_temp_dir, storage) = create_test_storage();
        let owner = OwnerId::new("alice");
        let service = AccountService::new(&storage, &owner);

        let account = service
            .create("  Checking  ", AccountType::Checking, Money::from_cents(100000))
            .unwrap();

        assert_eq!(account.name, "Checking");
        assert_eq!(account.owner_id, owner);
        assert_eq!(account.initial_balance.cents(), 100000);
    }

    #[test]
    fn test_create_rejects_duplicates_and_card_type() {
        let (_temp_dir, storage) = create_test_storage();
        let owner = OwnerId::new("alice");
        let service = AccountService::new(&storage, &owner);

        service.create("Wallet", AccountType::Cash, Money::zero()).unwrap();
        let dup = service.create("wallet", AccountType::Cash, Money::zero());
        assert!(matches!(dup, Err(PocketError::Duplicate { .. })));

        let card = service.create("Visa", AccountType::CreditCard, Money::zero());
        assert!(card.unwrap_err().is_validation());

        let empty = service.create("   ", AccountType::Cash, Money::zero());
        assert!(empty.unwrap_err().is_validation());
    }

    #[test]
    fn test_create_card_validates_days() {
        let (_temp_dir, storage) = create_test_storage();
        let owner = OwnerId::new("alice");
        let service = AccountService::new(&storage, &owner);

        let card = service
            .create_card("Nubank", 3, 10, Money::from_cents(500000))
            .unwrap();
        assert!(card.is_credit_card());
        assert_eq!(card.card_terms().unwrap().close_day, 3);

        let bad = service.create_card("Other", 0, 10, Money::zero());
        assert!(matches!(bad, Err(PocketError::InvalidDayOfMonth { day: 0, .. })));
    }

    #[test]
    fn test_accounts_are_owner_scoped() {
        let (_temp_dir, storage) = create_test_storage();
        let alice = OwnerId::new("alice");
        let bob = OwnerId::new("bob");

        let account = AccountService::new(&storage, &alice)
            .create("Savings", AccountType::Savings, Money::zero())
            .unwrap();

        let bobs = AccountService::new(&storage, &bob);
        assert!(bobs.get(account.id).unwrap().is_none());
        assert!(bobs.find("Savings").unwrap().is_none());
        assert!(bobs.list().unwrap().is_empty());

        // Same name is fine for a different owner
        bobs.create("Savings", AccountType::Savings, Money::zero()).unwrap();
    }

    #[test]
    fn test_find_by_short_id() {
        let (_temp_dir, storage) = create_test_storage();
        let owner = OwnerId::new("alice");
        let service = AccountService::new(&storage, &owner);
        let account = service.create("Main", AccountType::Checking, Money::zero()).unwrap();

        let found = service.find(&account.id.to_string()).unwrap().unwrap();
        assert_eq!(found.id, account.id);
        assert!(service.require("missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_balance_counts_only_paid() {
        let (_temp_dir, storage) = create_test_storage();
        let owner = OwnerId::new("alice");
        let service = AccountService::new(&storage, &owner);
        let account = service
            .create("Main", AccountType::Checking, Money::from_cents(10000))
            .unwrap();

        add_txn(&storage, &account, TransactionKind::Income, 5000, true);
        add_txn(&storage, &account, TransactionKind::Expense, 2000, true);
        add_txn(&storage, &account, TransactionKind::Expense, 9999, false);

        let summary = service.get_summary(&account).unwrap();
        assert_eq!(summary.balance.cents(), 13000);
        assert_eq!(summary.pending.cents(), 9999);
        assert_eq!(summary.transaction_count, 3);
    }

    #[test]
    fn test_rename() {
        let (_temp_dir, storage) = create_test_storage();
        let owner = OwnerId::new("alice");
        let service = AccountService::new(&storage, &owner);
        let a = service.create("A", AccountType::Cash, Money::zero()).unwrap();
        service.create("B", AccountType::Cash, Money::zero()).unwrap();

        let renamed = service.rename(a.id, "Carteira").unwrap();
        assert_eq!(renamed.name, "Carteira");
        assert!(matches!(
            service.rename(a.id, "b"),
            Err(PocketError::Duplicate { .. })
        ));
        // Renaming to its own name with different case is allowed
        service.rename(a.id, "CARTEIRA").unwrap();
    }

    #[test]
    fn test_delete_cascades() {
        let (_temp_dir, storage) = create_test_storage();
        let owner = OwnerId::new("alice");
        let service = AccountService::new(&storage, &owner);
        let doomed = service.create("Old", AccountType::Cash, Money::zero()).unwrap();
        let kept = service.create("New", AccountType::Cash, Money::zero()).unwrap();

        add_txn(&storage, &doomed, TransactionKind::Expense, 100, false);
        add_txn(&storage, &doomed, TransactionKind::Income, 100, true);
        add_txn(&storage, &kept, TransactionKind::Expense, 100, false);

        assert_eq!(service.delete(doomed.id).unwrap(), 2);
        assert!(service.get(doomed.id).unwrap().is_none());
        assert_eq!(storage.transactions.count().unwrap(), 1);

        let other = OwnerId::new("bob");
        let err = AccountService::new(&storage, &other).delete(kept.id).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_card_terms() {
        let (_temp_dir, storage) = create_test_storage();
        let owner = OwnerId::new("alice");
        let service = AccountService::new(&storage, &owner);
        let card = service.create_card("Visa", 3, 10, Money::zero()).unwrap();

        let updated = service
            .update_card_terms(card.id, 20, 28, Money::from_cents(300000))
            .unwrap();
        let terms = updated.card_terms().unwrap();
        assert_eq!((terms.close_day, terms.due_day), (20, 28));
        assert_eq!(terms.limit.cents(), 300000);

        assert!(matches!(
            service.update_card_terms(card.id, 20, 32, Money::zero()),
            Err(PocketError::InvalidDayOfMonth { field: "due day", day: 32 })
        ));
        let stored = service.get(card.id).unwrap().unwrap();
        assert_eq!(stored.card_terms().unwrap().due_day, 28);

        let main = service.create("Main", AccountType::Checking, Money::zero()).unwrap();
        assert!(matches!(
            service.update_card_terms(main.id, 1, 10, Money::zero()),
            Err(PocketError::InvalidAccountType { .. })
        ));
    }

    #[test]
    fn test_update_initial_balance() {
        let (_temp_dir, storage) = create_test_storage();
        let owner = OwnerId::new("alice");
        let service = AccountService::new(&storage, &owner);
        let account = service
            .create("Main", AccountType::Checking, Money::from_cents(1000))
            .unwrap();
        add_txn(&storage, &account, TransactionKind::Income, 500, true);

        let updated = service
            .update_initial_balance(account.id, Money::from_cents(-2000))
            .unwrap();
        assert_eq!(service.get_summary(&updated).unwrap().balance.cents(), -1500);

        let card = service.create_card("Visa", 3, 10, Money::zero()).unwrap();
        assert!(service
            .update_initial_balance(card.id, Money::from_cents(100))
            .unwrap_err()
            .is_validation());

        let other = OwnerId::new("bob");
        assert!(AccountService::new(&storage, &other)
            .update_initial_balance(account.id, Money::zero())
            .unwrap_err()
            .is_not_found());
    }
}
