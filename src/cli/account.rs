//! Account CLI commands
//!
//! Implements CLI commands for account management.

use clap::Subcommand;
use tracing::warn;

use crate::config::Settings;
use crate::display::account::{format_account_details, format_account_list};
use crate::error::{PocketError, PocketResult};
use crate::models::{AccountType, Money, OwnerId};
use crate::services::{AccountService, CardService};
use crate::storage::Storage;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        /// Account name
        name: String,
        /// Account type (checking, savings, cash, investment, credit_card)
        #[arg(short = 't', long, default_value = "checking")]
        account_type: String,
        /// Opening balance (e.g., "1000.00" or "1000,00")
        #[arg(short, long, default_value = "0")]
        balance: String,
        /// Statement closing day, credit cards only (1-31)
        #[arg(long)]
        close_day: Option<u32>,
        /// Bill due day, credit cards only (1-31)
        #[arg(long)]
        due_day: Option<u32>,
        /// Credit limit, credit cards only
        #[arg(long, default_value = "0")]
        limit: String,
    },
    /// List all accounts with balances
    List,
    /// Show account details
    Show {
        /// Account name or ID
        account: String,
    },
    /// Rename an account
    Rename {
        /// Account name or ID
        account: String,
        /// New name
        new_name: String,
    },
    /// Change an account's name, opening balance or card terms
    Edit {
        /// Account name or ID
        account: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New opening balance, standard accounts only
        #[arg(short, long)]
        balance: Option<String>,
        /// New statement closing day, credit cards only (1-31)
        #[arg(long)]
        close_day: Option<u32>,
        /// New bill due day, credit cards only (1-31)
        #[arg(long)]
        due_day: Option<u32>,
        /// New credit limit, credit cards only
        #[arg(long)]
        limit: Option<String>,
    },
    /// Delete an account and all of its transactions
    Delete {
        /// Account name or ID
        account: String,
        /// Delete even if the account has transactions
        #[arg(short, long)]
        force: bool,
    },
}

fn parse_money(field: &str, value: &str) -> PocketResult<Money> {
    Money::parse(value).map_err(|e| {
        PocketError::Validation(format!(
            "Invalid {} '{}'. Use format like '1000.00' or '1000,00'. Error: {}",
            field, value, e
        ))
    })
}

/// Handle an account command
pub fn handle_account_command(
    storage: &Storage,
    settings: &Settings,
    owner: &OwnerId,
    cmd: AccountCommands,
) -> PocketResult<()> {
    let service = AccountService::new(storage, owner);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        AccountCommands::Create {
            name,
            account_type,
            balance,
            close_day,
            due_day,
            limit,
        } => {
            let account_type = AccountType::parse(&account_type).ok_or_else(|| {
                PocketError::Validation(format!(
                    "Invalid account type: '{}'. Valid types: checking, savings, cash, investment, credit_card",
                    account_type
                ))
            })?;

            let account = if account_type.is_credit_card() {
                let (close_day, due_day) = match (close_day, due_day) {
                    (Some(close), Some(due)) => (close, due),
                    _ => {
                        return Err(PocketError::Validation(
                            "Credit cards need --close-day and --due-day".into(),
                        ))
                    }
                };
                service.create_card(&name, close_day, due_day, parse_money("limit", &limit)?)?
            } else {
                if close_day.is_some() || due_day.is_some() {
                    warn!("--close-day/--due-day ignored for a {} account", account_type);
                }
                service.create(&name, account_type, parse_money("balance", &balance)?)?
            };

            println!("Created account: {}", account.name);
            println!("  Type: {}", account.account_type);
            match &account.card {
                Some(terms) => {
                    println!("  Closing day: {}", terms.close_day);
                    println!("  Due day: {}", terms.due_day);
                    println!("  Limit: {}", terms.limit.format_with_symbol(symbol));
                }
                None => println!(
                    "  Opening balance: {}",
                    account.initial_balance.format_with_symbol(symbol)
                ),
            }
            println!("  ID: {}", account.id);
        }

        AccountCommands::List => {
            let summaries = service.list_with_balances()?;
            print!("{}", format_account_list(&summaries, settings));
        }

        AccountCommands::Show { account } => {
            let found = service.require(&account)?;
            let summary = service.get_summary(&found)?;

            let statement = if found.is_credit_card() {
                Some(CardService::new(storage, owner).statement(&found, super::reference_date(None)?)?)
            } else {
                None
            };
            print!(
                "{}",
                format_account_details(&summary, statement.as_ref(), settings)
            );
        }

        AccountCommands::Rename { account, new_name } => {
            let found = service.require(&account)?;
            let updated = service.rename(found.id, &new_name)?;
            println!("Renamed account: {} -> {}", found.name, updated.name);
        }

        AccountCommands::Edit {
            account,
            name,
            balance,
            close_day,
            due_day,
            limit,
        } => {
            let mut found = service.require(&account)?;
            let mut changed = false;

            // Reject mismatched options before anything is saved
            let edits_terms = close_day.is_some() || due_day.is_some() || limit.is_some();
            if edits_terms {
                found.card_terms()?;
            }
            if balance.is_some() && found.is_credit_card() {
                return Err(PocketError::Validation(format!(
                    "'{}' is a credit card; use --limit instead of --balance",
                    found.name
                )));
            }

            if let Some(name) = name {
                found = service.rename(found.id, &name)?;
                changed = true;
            }
            if let Some(balance) = balance {
                found = service.update_initial_balance(found.id, parse_money("balance", &balance)?)?;
                changed = true;
            }
            if edits_terms {
                let terms = *found.card_terms()?;
                let limit = match limit {
                    Some(limit) => parse_money("limit", &limit)?,
                    None => terms.limit,
                };
                found = service.update_card_terms(
                    found.id,
                    close_day.unwrap_or(terms.close_day),
                    due_day.unwrap_or(terms.due_day),
                    limit,
                )?;
                changed = true;
            }

            if !changed {
                return Err(PocketError::Validation(
                    "Nothing to change; pass --name, --balance, --close-day, --due-day or --limit"
                        .into(),
                ));
            }

            println!("Updated account: {}", found.name);
            match &found.card {
                Some(terms) => println!(
                    "  Closes on day {}, due on day {}, limit {}",
                    terms.close_day,
                    terms.due_day,
                    terms.limit.format_with_symbol(symbol)
                ),
                None => println!(
                    "  Opening balance: {}",
                    found.initial_balance.format_with_symbol(symbol)
                ),
            }
        }

        AccountCommands::Delete { account, force } => {
            let found = service.require(&account)?;
            let count = storage.transactions.get_by_account(found.id)?.len();

            if count > 0 && !force {
                return Err(PocketError::Validation(format!(
                    "Account '{}' has {} transaction(s); use --force to delete them too",
                    found.name, count
                )));
            }

            let removed = service.delete(found.id)?;
            println!(
                "Deleted account: {} ({} transaction(s) removed)",
                found.name, removed
            );
        }
    }

    Ok(())
}
