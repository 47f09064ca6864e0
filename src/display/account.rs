//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use crate::config::Settings;
use crate::services::{AccountSummary, CardStatement};

use super::report::column_width;

/// Format a list of accounts with balances as a table
pub fn format_account_list(summaries: &[AccountSummary], settings: &Settings) -> String {
    if summaries.is_empty() {
        return "No accounts found.\n".to_string();
    }

    let symbol = settings.currency_symbol.as_str();
    let name_width = column_width(summaries.iter().map(|s| s.account.name.as_str()), 4);
    let types: Vec<String> = summaries
        .iter()
        .map(|s| s.account.account_type.to_string())
        .collect();
    let type_width = column_width(types.iter().map(String::as_str), 4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<type_width$}  {:>14}  {:>14}  {}\n",
        "Name", "Type", "Balance", "Pending", "ID",
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<type_width$}  {:->14}  {:->14}  {:-<12}\n",
        "", "", "", "", "",
    ));

    for (summary, account_type) in summaries.iter().zip(&types) {
        // A card's balance has no meaning; its statement is shown by `card list`
        let balance = if summary.account.is_credit_card() {
            "-".to_string()
        } else {
            summary.balance.format_with_symbol(symbol)
        };

        output.push_str(&format!(
            "{:<name_width$}  {:<type_width$}  {:>14}  {:>14}  {}\n",
            summary.account.name,
            account_type,
            balance,
            summary.pending.format_with_symbol(symbol),
            summary.account.id,
        ));
    }

    let total: crate::models::Money = summaries
        .iter()
        .filter(|s| !s.account.is_credit_card())
        .map(|s| s.balance)
        .sum();

    output.push_str(&format!(
        "{:-<name_width$}  {:-<type_width$}  {:->14}\n",
        "", "", "",
    ));
    output.push_str(&format!(
        "{:<name_width$}  {:<type_width$}  {:>14}\n",
        "TOTAL",
        "",
        total.format_with_symbol(symbol),
    ));

    output
}

/// Format a single account's details, with its statement for cards
pub fn format_account_details(
    summary: &AccountSummary,
    statement: Option<&CardStatement>,
    settings: &Settings,
) -> String {
    let account = &summary.account;
    let symbol = settings.currency_symbol.as_str();
    let date_format = settings.date_format.as_str();

    let mut output = String::new();
    output.push_str(&format!("Account: {}\n", account.name));
    output.push_str(&format!("  Type:           {}\n", account.account_type));
    output.push_str(&format!("  ID:             {}\n", account.id));
    output.push_str(&format!("  Transactions:   {}\n", summary.transaction_count));
    output.push_str(&format!(
        "  Pending:        {}\n",
        summary.pending.format_with_symbol(symbol)
    ));

    match (&account.card, statement) {
        (Some(terms), Some(statement)) => {
            output.push_str(&format!("  Closing day:    {}\n", terms.close_day));
            output.push_str(&format!("  Due day:        {}\n", terms.due_day));
            output.push_str(&format!(
                "  Cycle:          {} to {}\n",
                statement.cycle.start.format(date_format),
                statement.cycle.end.format(date_format)
            ));
            output.push_str(&format!(
                "  Due date:       {}\n",
                statement.due_date.format(date_format)
            ));
            output.push_str(&format!(
                "  Current bill:   {}\n",
                statement.bill.format_with_symbol(symbol)
            ));
            output.push_str(&format!(
                "  Limit:          {}\n",
                statement.limit.format_with_symbol(symbol)
            ));
            output.push_str(&format!(
                "  Available:      {}\n",
                statement.available.format_with_symbol(symbol)
            ));
        }
        _ => {
            output.push_str(&format!(
                "  Initial:        {}\n",
                account.initial_balance.format_with_symbol(symbol)
            ));
            output.push_str(&format!(
                "  Balance:        {}\n",
                summary.balance.format_with_symbol(symbol)
            ));
        }
    }

    output.push_str(&format!(
        "  Created:        {}\n",
        account.created_at.format("%Y-%m-%d %H:%M")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountType, Money, OwnerId};

    fn summary(account: Account, balance: i64) -> AccountSummary {
        AccountSummary {
            account,
            balance: Money::from_cents(balance),
            transaction_count: 0,
            pending: Money::zero(),
        }
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(
            format_account_list(&[], &Settings::default()),
            "No accounts found.\n"
        );
    }

    #[test]
    fn test_list_totals_standard_accounts() {
        let owner = OwnerId::new("alice");
        let rows = vec![
            summary(Account::new(owner.clone(), "Main", AccountType::Checking), 150000),
            summary(Account::new(owner.clone(), "Wallet", AccountType::Cash), 2550),
        ];

        let output = format_account_list(&rows, &Settings::default());
        assert!(output.contains("Main"));
        assert!(output.contains("R$ 1500.00"));
        assert!(output.contains("R$ 1525.50"));
    }

    #[test]
    fn test_details_of_standard_account() {
        let account = Account::with_initial_balance(
            OwnerId::new("alice"),
            "Savings",
            AccountType::Savings,
            Money::from_cents(1000),
        );
        let output = format_account_details(&summary(account, 4000), None, &Settings::default());

        assert!(output.contains("Account: Savings"));
        assert!(output.contains("Initial:        R$ 10.00"));
        assert!(output.contains("Balance:        R$ 40.00"));
    }
}
