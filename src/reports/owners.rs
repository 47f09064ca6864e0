//! Owner List Report
//!
//! One row per owner in the store with record counts and latest activity,
//! filtered by the same active window the activity report uses.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::display::report::{column_width, separator};
use crate::error::PocketResult;
use crate::models::{Account, OwnerId, Transaction};
use crate::storage::Storage;

use super::activity::{active_owners, known_owners, ACTIVE_WINDOW_DAYS};

/// Which owners to include
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OwnerFilter {
    #[default]
    All,
    Active,
    Inactive,
}

/// Row order of the owner list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OwnerSort {
    /// By owner ID
    #[default]
    Name,
    /// Most transactions first, ties by owner ID
    Transactions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerRow {
    pub owner: OwnerId,
    pub accounts: usize,
    pub transactions: usize,
    /// Day of the owner's latest transaction
    pub last_activity: Option<NaiveDate>,
    pub active: bool,
}

/// Owner List Report
#[derive(Debug, Clone)]
pub struct OwnerListReport {
    pub reference: NaiveDate,
    pub rows: Vec<OwnerRow>,
}

impl OwnerListReport {
    /// Generate the list from everything in storage
    pub fn generate(
        storage: &Storage,
        reference: NaiveDate,
        filter: OwnerFilter,
        sort: OwnerSort,
    ) -> PocketResult<Self> {
        let accounts = storage.accounts.get_all()?;
        let transactions = storage.transactions.get_all()?;
        Ok(Self::from_records(&accounts, &transactions, reference, filter, sort))
    }

    pub fn from_records(
        accounts: &[Account],
        transactions: &[Transaction],
        reference: NaiveDate,
        filter: OwnerFilter,
        sort: OwnerSort,
    ) -> Self {
        let active = active_owners(transactions, reference);

        let mut account_counts: HashMap<&OwnerId, usize> = HashMap::new();
        for account in accounts {
            *account_counts.entry(&account.owner_id).or_insert(0) += 1;
        }
        let mut activity: HashMap<&OwnerId, (usize, NaiveDate)> = HashMap::new();
        for txn in transactions {
            let entry = activity.entry(&txn.owner_id).or_insert((0, txn.day()));
            entry.0 += 1;
            entry.1 = entry.1.max(txn.day());
        }

        let mut rows: Vec<OwnerRow> = known_owners(accounts, transactions)
            .into_iter()
            .map(|owner| OwnerRow {
                owner: owner.clone(),
                accounts: account_counts.get(owner).copied().unwrap_or(0),
                transactions: activity.get(owner).map_or(0, |(count, _)| *count),
                last_activity: activity.get(owner).map(|(_, day)| *day),
                active: active.contains(owner),
            })
            .filter(|row| match filter {
                OwnerFilter::All => true,
                OwnerFilter::Active => row.active,
                OwnerFilter::Inactive => !row.active,
            })
            .collect();

        // Rows come out of the owner set already ordered by ID
        if sort == OwnerSort::Transactions {
            rows.sort_by(|a, b| b.transactions.cmp(&a.transactions));
        }

        Self { reference, rows }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, date_format: &str) -> String {
        if self.rows.is_empty() {
            return "No owners found.\n".to_string();
        }

        let owner_width = column_width(self.rows.iter().map(|r| r.owner.as_str()), 5);
        let mut output = String::new();
        output.push_str(&format!(
            "Owners as of {} (active within {} days)\n",
            self.reference, ACTIVE_WINDOW_DAYS
        ));
        output.push_str(&format!(
            "{:<owner_width$}  {:>8}  {:>12}  {:<12}  {}\n",
            "Owner", "Accounts", "Transactions", "Last active", "Status",
        ));
        output.push_str(&separator(owner_width + 48));
        output.push('\n');

        for row in &self.rows {
            let last = row
                .last_activity
                .map(|d| d.format(date_format).to_string())
                .unwrap_or_else(|| "-".to_string());
            output.push_str(&format!(
                "{:<owner_width$}  {:>8}  {:>12}  {:<12}  {}\n",
                row.owner.as_str(),
                row.accounts,
                row.transactions,
                last,
                if row.active { "active" } else { "inactive" },
            ));
        }

        output.push_str(&format!("\n{} owner(s)\n", self.rows.len()));
        output
    }
}
