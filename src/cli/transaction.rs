//! Transaction CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_register};
use crate::error::PocketResult;
use crate::models::{OwnerId, TransactionInput, TransactionKind};
use crate::services::{AccountService, TransactionFilter, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// Account name or ID
        account: String,
        /// Amount, always positive (e.g., "49.90" or "49,90")
        amount: String,
        /// What the money was for
        #[arg(short, long)]
        description: String,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// Purchase or due date (YYYY-MM-DD or DD/MM/YYYY), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Record as income instead of an expense
        #[arg(long)]
        income: bool,
        /// Record as already paid
        #[arg(long)]
        paid: bool,
    },
    /// List transactions, newest first
    List {
        /// Filter by account
        #[arg(short, long)]
        account: Option<String>,
        /// Only unpaid expenses
        #[arg(long)]
        unpaid: bool,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show transaction details
    Show {
        /// Transaction ID (full or short form)
        id: String,
    },
    /// Change fields of a recorded transaction
    Edit {
        /// Transaction ID (full or short form)
        id: String,
        /// Move to another account (name or ID)
        #[arg(short, long)]
        account: Option<String>,
        /// New amount
        #[arg(long)]
        amount: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(long)]
        date: Option<String>,
        /// Make it an income
        #[arg(long, conflicts_with = "expense")]
        income: bool,
        /// Make it an expense
        #[arg(long)]
        expense: bool,
        /// Mark as paid
        #[arg(long, conflicts_with = "unpaid")]
        paid: bool,
        /// Mark as not yet paid
        #[arg(long)]
        unpaid: bool,
    },
    /// Mark a payable as paid
    Pay {
        /// Transaction ID (full or short form)
        id: String,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID (full or short form)
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    owner: &OwnerId,
    cmd: TransactionCommands,
) -> PocketResult<()> {
    let service = TransactionService::new(storage, owner);
    let accounts = AccountService::new(storage, owner);

    match cmd {
        TransactionCommands::Add {
            account,
            amount,
            description,
            category,
            date,
            income,
            paid,
        } => {
            let target = accounts.require(&account)?;
            let date = match date {
                Some(date) => date,
                None => chrono::Local::now().format("%Y-%m-%d").to_string(),
            };

            let input = TransactionInput {
                account_id: Some(target.id),
                kind: if income {
                    TransactionKind::Income
                } else {
                    TransactionKind::Expense
                },
                description,
                amount,
                date,
                category,
                is_paid: paid,
            };

            let txn = service.create(&input)?;
            println!("Recorded transaction: {}", txn.id);
            print!("{}", format_transaction_details(&txn, &target.name, settings));
        }

        TransactionCommands::List {
            account,
            unpaid,
            limit,
        } => {
            let mut filter = TransactionFilter::new().limit(limit);
            if let Some(account) = account {
                filter = filter.account(accounts.require(&account)?.id);
            }
            if unpaid {
                filter = filter.unpaid();
            }

            let transactions = service.list(&filter)?;
            let names = super::account_names(storage, owner)?;
            print!("{}", format_transaction_register(&transactions, &names, settings));
        }

        TransactionCommands::Show { id } => {
            let txn = service.require(&id)?;
            let account_name = accounts
                .get(txn.account_id)?
                .map(|a| a.name)
                .unwrap_or_default();
            print!("{}", format_transaction_details(&txn, &account_name, settings));
        }

        TransactionCommands::Edit {
            id,
            account,
            amount,
            description,
            category,
            date,
            income,
            expense,
            paid,
            unpaid,
        } => {
            let txn = service.require(&id)?;
            let mut input = TransactionInput::from_transaction(&txn);

            if let Some(account) = account {
                input.account_id = Some(accounts.require(&account)?.id);
            }
            if let Some(amount) = amount {
                input.amount = amount;
            }
            if let Some(description) = description {
                input.description = description;
            }
            if let Some(category) = category {
                input.category = category;
            }
            if let Some(date) = date {
                input.date = date;
            }
            if income {
                input.kind = TransactionKind::Income;
            } else if expense {
                input.kind = TransactionKind::Expense;
            }
            if paid {
                input.is_paid = true;
            } else if unpaid {
                input.is_paid = false;
            }

            let updated = service.update(txn.id, &input)?;
            let account_name = accounts
                .get(updated.account_id)?
                .map(|a| a.name)
                .unwrap_or_default();
            println!("Updated transaction: {}", updated.id);
            print!("{}", format_transaction_details(&updated, &account_name, settings));
        }

        TransactionCommands::Pay { id } => {
            let txn = service.require(&id)?;
            let was_paid = txn.is_paid;
            let txn = service.mark_paid(txn.id)?;

            if was_paid {
                println!("Already paid: {} {}", txn.id, txn.description);
            } else {
                println!(
                    "Paid: {} {} {}",
                    txn.id,
                    txn.description,
                    txn.amount.format_with_symbol(&settings.currency_symbol)
                );
            }
        }

        TransactionCommands::Delete { id } => {
            let txn = service.require(&id)?;
            let deleted = service.delete(txn.id)?;
            println!("Deleted transaction: {} {}", deleted.id, deleted.description);
        }
    }

    Ok(())
}
