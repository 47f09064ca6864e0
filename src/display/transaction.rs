//! Transaction display formatting
//!
//! Register views and detail output for transactions.

use std::collections::HashMap;

use crate::config::Settings;
use crate::models::{AccountId, Transaction};

use super::report::truncate;

/// Account names keyed by ID, used to label transaction rows
pub type AccountNames = HashMap<AccountId, String>;

fn status_label(txn: &Transaction) -> &'static str {
    match (txn.is_paid, txn.is_income()) {
        (true, _) => "paid",
        (false, true) => "due",
        (false, false) => "open",
    }
}

/// Format a single transaction as a register row
pub fn format_transaction_row(txn: &Transaction, account_name: &str, settings: &Settings) -> String {
    format!(
        "{:<13} {:<10} {:<24} {:<16} {:<14} {:>14} {}",
        txn.id.to_string(),
        txn.date.format(&settings.date_format).to_string(),
        truncate(&txn.description, 24),
        truncate(account_name, 16),
        truncate(&txn.category, 14),
        txn.signed_amount().format_with_symbol(&settings.currency_symbol),
        status_label(txn),
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(
    transactions: &[Transaction],
    names: &AccountNames,
    settings: &Settings,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<13} {:<10} {:<24} {:<16} {:<14} {:>14} {}\n",
        "ID", "Date", "Description", "Account", "Category", "Amount", "Status"
    ));
    output.push_str(&"-".repeat(104));
    output.push('\n');

    for txn in transactions {
        let account_name = names.get(&txn.account_id).map_or("?", String::as_str);
        output.push_str(&format_transaction_row(txn, account_name, settings));
        output.push('\n');
    }

    output
}

/// Format a single transaction's details
pub fn format_transaction_details(txn: &Transaction, account_name: &str, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("  Description:  {}\n", txn.description));
    output.push_str(&format!("  Type:         {}\n", txn.kind));
    output.push_str(&format!(
        "  Amount:       {}\n",
        txn.amount.format_with_symbol(&settings.currency_symbol)
    ));
    output.push_str(&format!(
        "  Date:         {}\n",
        txn.date.format(&settings.date_format)
    ));
    output.push_str(&format!("  Account:      {}\n", account_name));
    output.push_str(&format!("  Category:     {}\n", txn.category));
    output.push_str(&format!(
        "  Paid:         {}\n",
        if txn.is_paid { "Yes" } else { "No" }
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, OwnerId, TransactionKind};
    use chrono::NaiveDate;

    fn sample() -> Transaction {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut txn = Transaction::new(
            OwnerId::new("alice"),
            AccountId::new(),
            TransactionKind::Expense,
            Money::from_cents(4590),
            date,
        );
        txn.description = "Groceries".into();
        txn.category = "Food".into();
        txn
    }

    #[test]
    fn test_row_uses_settings() {
        let row = format_transaction_row(&sample(), "Main", &Settings::default());
        assert!(row.contains("05/03/2024"));
        assert!(row.contains("-R$ 45.90"));
        assert!(row.ends_with("open"));
    }

    #[test]
    fn test_register_labels_accounts() {
        let txn = sample();
        let mut names = AccountNames::new();
        names.insert(txn.account_id, "Nubank".into());

        let output = format_transaction_register(&[txn], &names, &Settings::default());
        assert!(output.starts_with("ID"));
        assert!(output.contains("Nubank"));
        assert!(output.contains("Groceries"));
    }

    #[test]
    fn test_empty_register() {
        let output = format_transaction_register(&[], &AccountNames::new(), &Settings::default());
        assert_eq!(output, "No transactions found.\n");
    }
}
