//! Credit card service
//!
//! Statement figures for card accounts and bill payments from standard
//! accounts.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use crate::error::{PocketError, PocketResult};
use crate::models::{Account, Money, OwnerId, Transaction, TransactionKind};
use crate::scheduling::{bill_total, compute_cycle, statement_due_date, BillingCycle};
use crate::storage::Storage;

use super::{AccountService, TransactionService};

/// Category given to recorded card bill payments
pub const CARD_PAYMENT_CATEGORY: &str = "Card Payment";

/// Statement figures of one card for a reference date
#[derive(Debug, Clone)]
pub struct CardStatement {
    pub card: Account,
    pub cycle: BillingCycle,
    pub due_date: NaiveDate,
    /// Sum of the card's transactions dated inside the cycle
    pub bill: Money,
    pub limit: Money,
    /// `limit - bill`; negative when the card is over its limit
    pub available: Money,
}

impl CardStatement {
    pub fn is_over_limit(&self) -> bool {
        self.available.is_negative()
    }
}

/// Service for credit card statements and payments
pub struct CardService<'a> {
    storage: &'a Storage,
    owner: &'a OwnerId,
}

impl<'a> CardService<'a> {
    /// Create a new card service acting for `owner`
    pub fn new(storage: &'a Storage, owner: &'a OwnerId) -> Self {
        Self { storage, owner }
    }

    /// Statement of `card` for the cycle containing `reference`
    pub fn statement(&self, card: &Account, reference: NaiveDate) -> PocketResult<CardStatement> {
        let terms = card.card_terms()?;
        let cycle = compute_cycle(card, reference)?;
        let due_date = statement_due_date(terms, &cycle)?;

        let transactions = self.storage.transactions.get_by_account(card.id)?;
        let bill = bill_total(card.id, &transactions, &cycle);

        debug!(card = %card.id, %cycle, %bill, "computed card statement");

        Ok(CardStatement {
            card: card.clone(),
            cycle,
            due_date,
            bill,
            limit: terms.limit,
            available: terms.limit - bill,
        })
    }

    /// Statements of every card the owner has, sorted by card name
    pub fn statements(&self, reference: NaiveDate) -> PocketResult<Vec<CardStatement>> {
        AccountService::new(self.storage, self.owner)
            .list_cards()?
            .iter()
            .map(|card| self.statement(card, reference))
            .collect()
    }

    /// Pay a card bill from a standard account
    ///
    /// Records a paid expense on `source`. When `amount` is `None` the bill
    /// of the cycle containing `at` is paid. Between a closing day and the
    /// following due day that is the new, still open cycle rather than the
    /// statement that just closed; pass `amount` to settle a closed one.
    pub fn pay_bill(
        &self,
        card: &Account,
        source: &Account,
        amount: Option<Money>,
        at: NaiveDateTime,
    ) -> PocketResult<Transaction> {
        card.card_terms()?;

        if source.is_credit_card() {
            return Err(PocketError::Validation(format!(
                "Card bills must be paid from a standard account; '{}' is a credit card",
                source.name
            )));
        }
        if &source.owner_id != self.owner || &card.owner_id != self.owner {
            return Err(PocketError::account_not_found(source.name.clone()));
        }

        let amount = match amount {
            Some(amount) => amount,
            None => self.statement(card, at.date())?.bill,
        };
        if !amount.is_positive() {
            return Err(PocketError::Validation(format!(
                "Nothing to pay on '{}': amount is {}",
                card.name, amount
            )));
        }

        let mut payment = Transaction::new(
            self.owner.clone(),
            source.id,
            TransactionKind::Expense,
            amount,
            at,
        );
        payment.description = format!("Card payment: {}", card.name);
        payment.category = CARD_PAYMENT_CATEGORY.to_string();
        payment.is_paid = true;

        let payment = TransactionService::new(self.storage, self.owner).insert(payment)?;
        info!(card = %card.id, source = %source.id, %amount, "paid card bill");
        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PocketPaths;
    use crate::models::AccountType;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn purchase(storage: &Storage, card: &Account, day: NaiveDate, cents: i64) {
        let txn = Transaction::new(
            card.owner_id.clone(),
            card.id,
            TransactionKind::Expense,
            Money::from_cents(cents),
            day.and_hms_opt(12, 0, 0).unwrap(),
        );
        storage.transactions.upsert(txn).unwrap();
    }

    #[test]
    fn test_statement_sums_only_current_cycle() {
        let (_temp_dir, storage) = create_test_storage();
        let owner = OwnerId::new("alice");
        let card = AccountService::new(&storage, &owner)
            .create_card("Nubank", 3, 10, Money::from_cents(100000))
            .unwrap();

        // Cycle for 2024-03-15 runs 2024-03-04..2024-04-03
        purchase(&storage, &card, date(2024, 3, 3), 1000);
        purchase(&storage, &card, date(2024, 3, 4), 2000);
        purchase(&storage, &card, date(2024, 4, 3), 3000);
        purchase(&storage, &card, date(2024, 4, 4), 4000);

        let statement = CardService::new(&storage, &owner)
            .statement(&card, date(2024, 3, 15))
            .unwrap();

        assert_eq!(statement.cycle.start, date(2024, 3, 4));
        assert_eq!(statement.cycle.end, date(2024, 4, 3));
        assert_eq!(statement.due_date, date(2024, 4, 10));
        assert_eq!(statement.bill.cents(), 5000);
        assert_eq!(statement.available.cents(), 95000);
        assert!(!statement.is_over_limit());
    }

    #[test]
    fn test_available_can_go_negative() {
        let (_temp_dir, storage) = create_test_storage();
        let owner = OwnerId::new("alice");
        let card = AccountService::new(&storage, &owner)
            .create_card("Tiny", 10, 20, Money::from_cents(1000))
            .unwrap();
        purchase(&storage, &card, date(2024, 5, 5), 1500);

        let statement = CardService::new(&storage, &owner)
            .statement(&card, date(2024, 5, 6))
            .unwrap();
        assert_eq!(statement.available.cents(), -500);
        assert!(statement.is_over_limit());
    }

    #[test]
    fn test_statement_of_standard_account_fails() {
        let (_temp_dir, storage) = create_test_storage();
        let owner = OwnerId::new("alice");
        let account = AccountService::new(&storage, &owner)
            .create("Main", AccountType::Checking, Money::zero())
            .unwrap();

        let err = CardService::new(&storage, &owner)
            .statement(&account, date(2024, 1, 1))
            .unwrap_err();
        assert!(matches!(err, PocketError::InvalidAccountType { .. }));
    }

    #[test]
    fn test_statements_lists_only_cards() {
        let (_temp_dir, storage) = create_test_storage();
        let owner = OwnerId::new("alice");
        let accounts = AccountService::new(&storage, &owner);
        accounts.create("Main", AccountType::Checking, Money::zero()).unwrap();
        accounts.create_card("Visa", 5, 15, Money::zero()).unwrap();
        accounts.create_card("Amex", 20, 1, Money::zero()).unwrap();

        let statements = CardService::new(&storage, &owner)
            .statements(date(2024, 6, 1))
            .unwrap();
        let names: Vec<_> = statements.iter().map(|s| s.card.name.as_str()).collect();
        assert_eq!(names, vec!["Amex", "Visa"]);
    }

    #[test]
    fn test_pay_bill_records_paid_expense() {
        let (_temp_dir, storage) = create_test_storage();
        let owner = OwnerId::new("alice");
        let accounts = AccountService::new(&storage, &owner);
        let main = accounts
            .create("Main", AccountType::Checking, Money::from_cents(100000))
            .unwrap();
        let card = accounts.create_card("Nubank", 3, 10, Money::from_cents(50000)).unwrap();
        purchase(&storage, &card, date(2024, 3, 10), 12345);

        let at = date(2024, 3, 20).and_hms_opt(9, 0, 0).unwrap();
        let payment = CardService::new(&storage, &owner)
            .pay_bill(&card, &main, None, at)
            .unwrap();

        assert_eq!(payment.account_id, main.id);
        assert_eq!(payment.amount.cents(), 12345);
        assert_eq!(payment.description, "Card payment: Nubank");
        assert_eq!(payment.category, CARD_PAYMENT_CATEGORY);
        assert!(payment.is_paid);
        assert!(payment.is_expense());

        let balance = accounts.get_summary(&main).unwrap().balance;
        assert_eq!(balance.cents(), 100000 - 12345);
    }

    #[test]
    fn test_pay_bill_rejects_card_source_and_empty_bill() {
        let (_temp_dir, storage) = create_test_storage();
        let owner = OwnerId::new("alice");
        let accounts = AccountService::new(&storage, &owner);
        let main = accounts.create("Main", AccountType::Checking, Money::zero()).unwrap();
        let card = accounts.create_card("Visa", 5, 15, Money::zero()).unwrap();
        let other = accounts.create_card("Amex", 5, 15, Money::zero()).unwrap();
        let at = date(2024, 3, 20).and_hms_opt(0, 0, 0).unwrap();

        let service = CardService::new(&storage, &owner);
        assert!(service
            .pay_bill(&card, &other, Some(Money::from_cents(100)), at)
            .unwrap_err()
            .is_validation());
        assert!(service.pay_bill(&card, &main, None, at).unwrap_err().is_validation());
        assert!(matches!(
            service.pay_bill(&main, &main, Some(Money::from_cents(100)), at),
            Err(PocketError::InvalidAccountType { .. })
        ));
    }

    #[test]
    fn test_changing_close_day_moves_cycle() {
        let (_temp_dir, storage) = create_test_storage();
        let owner = OwnerId::new("alice");
        let accounts = AccountService::new(&storage, &owner);
        let card = accounts.create_card("Nubank", 3, 10, Money::from_cents(100000)).unwrap();
        purchase(&storage, &card, date(2024, 3, 1), 700);
        purchase(&storage, &card, date(2024, 3, 10), 1100);

        let service = CardService::new(&storage, &owner);
        let before = service.statement(&card, date(2024, 3, 15)).unwrap();
        assert_eq!(before.cycle.start, date(2024, 3, 4));
        assert_eq!(before.cycle.end, date(2024, 4, 3));
        assert_eq!(before.bill.cents(), 1100);

        let card = accounts.update_card_terms(card.id, 20, 28, Money::from_cents(100000)).unwrap();
        let after = service.statement(&card, date(2024, 3, 15)).unwrap();
        assert_eq!(after.cycle.start, date(2024, 2, 21));
        assert_eq!(after.cycle.end, date(2024, 3, 20));
        assert_eq!(after.due_date, date(2024, 3, 28));
        assert_eq!(after.bill.cents(), 1800);
    }

    #[test]
    fn test_pay_bill_between_close_and_due_targets_open_cycle() {
        let (_temp_dir, storage) = create_test_storage();
        let owner = OwnerId::new("alice");
        let accounts = AccountService::new(&storage, &owner);
        let main = accounts.create("Main", AccountType::Checking, Money::zero()).unwrap();
        let card = accounts.create_card("Nubank", 3, 10, Money::zero()).unwrap();
        // Closed statement 2024-03-04..2024-04-03, due 2024-04-10
        purchase(&storage, &card, date(2024, 3, 20), 4000);

        let service = CardService::new(&storage, &owner);
        let at = date(2024, 4, 5).and_hms_opt(9, 0, 0).unwrap();
        assert_eq!(service.statement(&card, at.date()).unwrap().cycle.start, date(2024, 4, 4));
        assert!(service.pay_bill(&card, &main, None, at).unwrap_err().is_validation());

        let closed = service.statement(&card, date(2024, 4, 3)).unwrap();
        assert_eq!(closed.due_date, date(2024, 4, 10));
        let payment = service
            .pay_bill(&card, &main, Some(closed.bill), at)
            .unwrap();
        assert_eq!(payment.amount.cents(), 4000);
    }
}
