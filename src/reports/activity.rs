//! Activity Report
//!
//! Usage figures across every owner in the store: how many owners are
//! active, money moved, and which categories are used most.

use std::collections::{BTreeSet, HashMap};

use chrono::{Duration, NaiveDate};

use crate::display::report::{double_separator, separator, truncate};
use crate::error::PocketResult;
use crate::models::{Account, Money, OwnerId, Transaction};
use crate::storage::Storage;

/// Days an owner stays active after their latest transaction
pub const ACTIVE_WINDOW_DAYS: i64 = 30;

/// Number of categories listed in the report
pub const TOP_CATEGORY_COUNT: usize = 6;

/// Label for transactions without a category
pub const UNCATEGORIZED: &str = "Other";

/// Transaction count of one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Activity Report
#[derive(Debug, Clone)]
pub struct ActivityReport {
    pub reference: NaiveDate,
    /// Distinct owners with at least one account or transaction
    pub total_owners: usize,
    /// Owners with a transaction dated within the active window
    pub active_owners: usize,
    /// `active_owners / total_owners` as a rounded percentage
    pub retention_rate: u32,
    pub total_transactions: usize,
    pub total_income: Money,
    pub total_expenses: Money,
    /// `(income - expenses) / total_owners`
    pub average_net_per_owner: Money,
    /// Most used categories, most used first
    pub top_categories: Vec<CategoryCount>,
}

impl ActivityReport {
    /// Generate the report from everything in storage
    pub fn generate(storage: &Storage, reference: NaiveDate) -> PocketResult<Self> {
        let accounts = storage.accounts.get_all()?;
        let transactions = storage.transactions.get_all()?;
        Ok(Self::from_records(&accounts, &transactions, reference))
    }

    /// Build the report from a snapshot of records
    pub fn from_records(
        accounts: &[Account],
        transactions: &[Transaction],
        reference: NaiveDate,
    ) -> Self {
        let owners = known_owners(accounts, transactions);
        let active = active_owners(transactions, reference);

        let total_income: Money = transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .sum();
        let total_expenses: Money = transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .sum();

        let total_owners = owners.len();
        Self {
            reference,
            total_owners,
            active_owners: active.len(),
            retention_rate: retention_rate(active.len(), total_owners),
            total_transactions: transactions.len(),
            total_income,
            total_expenses,
            average_net_per_owner: (total_income - total_expenses).divide(total_owners as i64),
            top_categories: top_categories(transactions, TOP_CATEGORY_COUNT),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Activity Report ({})\n", self.reference));
        output.push_str(&double_separator(50));
        output.push('\n');

        output.push_str(&format!("Owners:              {:>12}\n", self.total_owners));
        output.push_str(&format!("Active (30 days):    {:>12}\n", self.active_owners));
        output.push_str(&format!("Retention:           {:>11}%\n", self.retention_rate));
        output.push_str(&format!("Transactions:        {:>12}\n", self.total_transactions));
        output.push_str(&separator(50));
        output.push('\n');
        output.push_str(&format!(
            "Total income:        {:>12}\n",
            self.total_income.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Total expenses:      {:>12}\n",
            self.total_expenses.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "Average net/owner:   {:>12}\n",
            self.average_net_per_owner.format_with_symbol(currency)
        ));

        if !self.top_categories.is_empty() {
            output.push('\n');
            output.push_str("Top categories\n");
            output.push_str(&separator(50));
            output.push('\n');
            for entry in &self.top_categories {
                output.push_str(&format!(
                    "  {:<30} {:>8}\n",
                    truncate(&entry.category, 30),
                    entry.count
                ));
            }
        }

        output
    }
}

/// Distinct owners with at least one account or transaction
pub fn known_owners<'r>(
    accounts: &'r [Account],
    transactions: &'r [Transaction],
) -> BTreeSet<&'r OwnerId> {
    accounts
        .iter()
        .map(|a| &a.owner_id)
        .chain(transactions.iter().map(|t| &t.owner_id))
        .collect()
}

/// Owners with a transaction dated strictly after `reference` minus the window
pub fn active_owners(transactions: &[Transaction], reference: NaiveDate) -> BTreeSet<&OwnerId> {
    let window_start = reference - Duration::days(ACTIVE_WINDOW_DAYS);
    transactions
        .iter()
        .filter(|t| t.day() > window_start)
        .map(|t| &t.owner_id)
        .collect()
}

/// Rounded percentage of active owners, half rounding up
fn retention_rate(active: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((active * 200 + total) / (total * 2)) as u32
}

/// Categories by transaction count, ties broken by name
fn top_categories(transactions: &[Transaction], limit: usize) -> Vec<CategoryCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for txn in transactions {
        let category = match txn.category.trim() {
            "" => UNCATEGORIZED,
            name => name,
        };
        *counts.entry(category).or_insert(0) += 1;
    }

    let mut ranked: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountId, AccountType, TransactionKind};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(owner: &str, kind: TransactionKind, cents: i64, day: NaiveDate, category: &str) -> Transaction {
        let mut t = Transaction::new(
            OwnerId::new(owner),
            AccountId::new(),
            kind,
            Money::from_cents(cents),
            day.and_hms_opt(10, 0, 0).unwrap(),
        );
        t.category = category.to_string();
        t
    }

    #[test]
    fn test_empty_store() {
        let report = ActivityReport::from_records(&[], &[], date(2024, 6, 1));
        assert_eq!(report.total_owners, 0);
        assert_eq!(report.retention_rate, 0);
        assert!(report.average_net_per_owner.is_zero());
        assert!(report.top_categories.is_empty());
    }

    #[test]
    fn test_active_window_is_strict() {
        let reference = date(2024, 6, 30);
        let transactions = vec![
            // Exactly 30 days before: not active
            txn("a", TransactionKind::Expense, 100, date(2024, 5, 31), "Food"),
            // 29 days before: active
            txn("b", TransactionKind::Expense, 100, date(2024, 6, 1), "Food"),
        ];
        let accounts = vec![Account::new(OwnerId::new("c"), "Idle", AccountType::Cash)];

        let report = ActivityReport::from_records(&accounts, &transactions, reference);
        assert_eq!(report.total_owners, 3);
        assert_eq!(report.active_owners, 1);
        assert_eq!(report.retention_rate, 33);
    }

    #[test]
    fn test_retention_rounds_half_up() {
        assert_eq!(retention_rate(1, 2), 50);
        assert_eq!(retention_rate(2, 3), 67);
        assert_eq!(retention_rate(1, 8), 13);
        assert_eq!(retention_rate(0, 5), 0);
        assert_eq!(retention_rate(4, 4), 100);
    }

    #[test]
    fn test_totals_and_average() {
        let day = date(2024, 6, 10);
        let transactions = vec![
            txn("a", TransactionKind::Income, 500000, day, "Salary"),
            txn("a", TransactionKind::Expense, 120000, day, "Rent"),
            txn("b", TransactionKind::Expense, 80000, day, "Rent"),
        ];

        let report = ActivityReport::from_records(&[], &transactions, date(2024, 6, 15));
        assert_eq!(report.total_transactions, 3);
        assert_eq!(report.total_income.cents(), 500000);
        assert_eq!(report.total_expenses.cents(), 200000);
        assert_eq!(report.average_net_per_owner.cents(), 150000);
    }

    #[test]
    fn test_top_categories() {
        let day = date(2024, 6, 10);
        let mut transactions = Vec::new();
        for (category, n) in [
            ("Food", 5),
            ("", 4),
            ("Rent", 3),
            ("Fun", 3),
            ("Health", 2),
            ("Travel", 2),
            ("Books", 1),
        ] {
            for _ in 0..n {
                transactions.push(txn("a", TransactionKind::Expense, 100, day, category));
            }
        }

        let top = top_categories(&transactions, TOP_CATEGORY_COUNT);
        let names: Vec<_> = top.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Food", "Other", "Fun", "Rent", "Health", "Travel"]);
        assert_eq!(top[1].count, 4);
    }

    #[test]
    fn test_format_terminal() {
        let transactions = vec![txn("a", TransactionKind::Income, 1000, date(2024, 6, 10), "Gift")];
        let report = ActivityReport::from_records(&[], &transactions, date(2024, 6, 15));

        let output = report.format_terminal("$");
        assert!(output.contains("Retention:"));
        assert!(output.contains("100%"));
        assert!(output.contains("$ 10.00"));
        assert!(output.contains("Gift"));
    }
}
