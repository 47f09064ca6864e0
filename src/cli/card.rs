//! Credit card CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{PocketError, PocketResult};
use crate::models::{Money, OwnerId};
use crate::reports::CardOverviewReport;
use crate::services::{AccountService, CardService};
use crate::storage::Storage;

/// Card subcommands
#[derive(Subcommand)]
pub enum CardCommands {
    /// Show the current statement of every card
    List {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Pay a card bill from a standard account
    Pay {
        /// Card name or ID
        card: String,
        /// Account the money comes from
        #[arg(short, long)]
        from: String,
        /// Amount to pay, defaults to the current bill
        #[arg(short, long)]
        amount: Option<String>,
        /// Payment date, defaults to now
        #[arg(long)]
        date: Option<String>,
    },
}

/// Handle a card command
pub fn handle_card_command(
    storage: &Storage,
    settings: &Settings,
    owner: &OwnerId,
    cmd: CardCommands,
) -> PocketResult<()> {
    match cmd {
        CardCommands::List { date } => {
            let reference = super::reference_date(date.as_deref())?;
            let report = CardOverviewReport::generate(storage, owner, reference)?;
            print!("{}", report.format_terminal(settings));
        }

        CardCommands::Pay {
            card,
            from,
            amount,
            date,
        } => {
            let accounts = AccountService::new(storage, owner);
            let card = accounts.require(&card)?;
            let source = accounts.require(&from)?;

            let amount = amount
                .map(|a| {
                    Money::parse(&a).map_err(|e| {
                        PocketError::Validation(format!("Invalid amount '{}': {}", a, e))
                    })
                })
                .transpose()?;
            let at = super::timestamp(date.as_deref())?;

            let payment = CardService::new(storage, owner).pay_bill(&card, &source, amount, at)?;
            println!(
                "Paid {} of '{}' from '{}'",
                payment.amount.format_with_symbol(&settings.currency_symbol),
                card.name,
                source.name
            );
            println!("  Transaction: {}", payment.id);
        }
    }

    Ok(())
}
