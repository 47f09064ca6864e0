//! Payables display formatting

use chrono::NaiveDate;

use crate::config::Settings;
use crate::scheduling::{days_until_due, Bucket, PayablesSchedule};

use super::report::{double_separator, truncate};
use super::transaction::AccountNames;

/// Format the payables schedule, one section per non-empty bucket
pub fn format_payables(
    schedule: &PayablesSchedule,
    names: &AccountNames,
    reference: NaiveDate,
    settings: &Settings,
) -> String {
    let symbol = settings.currency_symbol.as_str();
    let mut output = String::new();

    output.push_str(&format!(
        "Payables as of {}\n",
        reference.format(&settings.date_format)
    ));
    output.push_str(&double_separator(72));
    output.push('\n');

    if schedule.is_empty() {
        output.push_str("Nothing to pay in the next 30 days.\n");
        return output;
    }

    for (bucket, transactions) in schedule.buckets() {
        if transactions.is_empty() {
            continue;
        }

        output.push_str(&format!(
            "\n{} ({}) {}\n",
            bucket,
            transactions.len(),
            schedule.total(bucket).format_with_symbol(symbol)
        ));

        for txn in transactions {
            let days = days_until_due(txn, reference);
            let when = match bucket {
                Bucket::Overdue => format!("{}d late", -days),
                Bucket::DueToday => "today".to_string(),
                _ => format!("in {}d", days),
            };
            let account = names.get(&txn.account_id).map_or("?", String::as_str);

            output.push_str(&format!(
                "  {:<13} {:<10} {:<9} {:<24} {:<16} {:>14}\n",
                txn.id.to_string(),
                txn.date.format(&settings.date_format).to_string(),
                when,
                truncate(&txn.description, 24),
                truncate(account, 16),
                txn.amount.format_with_symbol(symbol),
            ));
        }
    }

    output.push('\n');
    output.push_str(&format!(
        "Total due: {}\n",
        schedule.total_due().format_with_symbol(symbol)
    ));

    output
}
