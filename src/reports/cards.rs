//! Card Overview Report
//!
//! Current statement of every credit card an owner holds, with totals.

use chrono::NaiveDate;

use crate::config::Settings;
use crate::display::report::{column_width, separator};
use crate::error::PocketResult;
use crate::models::{Money, OwnerId};
use crate::services::{CardService, CardStatement};
use crate::storage::Storage;

/// Card Overview Report
#[derive(Debug, Clone)]
pub struct CardOverviewReport {
    pub reference: NaiveDate,
    pub statements: Vec<CardStatement>,
    pub total_bill: Money,
    pub total_limit: Money,
    pub total_available: Money,
}

impl CardOverviewReport {
    /// Generate the overview for `owner` as of `reference`
    pub fn generate(storage: &Storage, owner: &OwnerId, reference: NaiveDate) -> PocketResult<Self> {
        let statements = CardService::new(storage, owner).statements(reference)?;
        Ok(Self::from_statements(statements, reference))
    }

    pub fn from_statements(statements: Vec<CardStatement>, reference: NaiveDate) -> Self {
        let total_bill = statements.iter().map(|s| s.bill).sum();
        let total_limit = statements.iter().map(|s| s.limit).sum();
        let total_available = statements.iter().map(|s| s.available).sum();

        Self {
            reference,
            statements,
            total_bill,
            total_limit,
            total_available,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        if self.statements.is_empty() {
            return "No credit cards found.\n".to_string();
        }

        let symbol = settings.currency_symbol.as_str();
        let fmt_date = |d: NaiveDate| d.format(&settings.date_format).to_string();
        let name_width = column_width(self.statements.iter().map(|s| s.card.name.as_str()), 4);

        let mut output = String::new();
        output.push_str(&format!(
            "{:<name_width$}  {:<23}  {:<10}  {:>14}  {:>14}  {:>14}\n",
            "Card", "Cycle", "Due", "Bill", "Limit", "Available",
        ));
        output.push_str(&separator(name_width + 87));
        output.push('\n');

        for statement in &self.statements {
            let marker = if statement.is_over_limit() { " !" } else { "" };
            output.push_str(&format!(
                "{:<name_width$}  {:<23}  {:<10}  {:>14}  {:>14}  {:>14}{}\n",
                statement.card.name,
                format!("{} - {}", fmt_date(statement.cycle.start), fmt_date(statement.cycle.end)),
                fmt_date(statement.due_date),
                statement.bill.format_with_symbol(symbol),
                statement.limit.format_with_symbol(symbol),
                statement.available.format_with_symbol(symbol),
                marker,
            ));
        }

        output.push_str(&separator(name_width + 87));
        output.push('\n');
        output.push_str(&format!(
            "{:<name_width$}  {:<23}  {:<10}  {:>14}  {:>14}  {:>14}\n",
            "TOTAL",
            "",
            "",
            self.total_bill.format_with_symbol(symbol),
            self.total_limit.format_with_symbol(symbol),
            self.total_available.format_with_symbol(symbol),
        ));

        output
    }
}
