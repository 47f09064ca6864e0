use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use pocketbook::cli::{
    handle_account_command, handle_card_command, handle_owner_command, handle_payables_command,
    handle_report_command, handle_transaction_command,
};
use pocketbook::config::{paths::PocketPaths, settings::Settings};
use pocketbook::storage::Storage;

/// Environment variable holding the log filter (e.g. `debug`, `pocketbook=info`)
const LOG_ENV: &str = "POCKETBOOK_LOG";

#[derive(Parser)]
#[command(
    name = "pocketbook",
    version,
    about = "Personal finance tracker for accounts, payables and credit cards",
    long_about = "Pocketbook records income and expenses across accounts and \
                  credit cards, shows which bills are overdue or coming due, \
                  and works out each card's current billing cycle and bill."
)]
struct Cli {
    /// Owner to act as (defaults to `default_owner` in settings)
    #[arg(long, global = true, env = "POCKETBOOK_OWNER")]
    owner: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Account management commands
    #[command(subcommand)]
    Account(pocketbook::cli::AccountCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Txn(pocketbook::cli::TransactionCommands),

    /// Show overdue and upcoming unpaid expenses
    Payables {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// Credit card statements and bill payments
    #[command(subcommand)]
    Card(pocketbook::cli::CardCommands),

    /// Reports
    #[command(subcommand)]
    Report(pocketbook::cli::ReportCommands),

    /// Owner administration
    #[command(subcommand)]
    Owner(pocketbook::cli::OwnerCommands),

    /// Create the data directory and settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let paths = PocketPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let owner = settings.owner(cli.owner.as_deref());
    debug!(base_dir = %paths.base_dir().display(), %owner, "starting");

    let storage = Storage::open(paths.clone())?;

    match cli.command {
        Some(Commands::Account(cmd)) => {
            handle_account_command(&storage, &settings, &owner, cmd)?;
        }
        Some(Commands::Txn(cmd)) => {
            handle_transaction_command(&storage, &settings, &owner, cmd)?;
        }
        Some(Commands::Payables { date }) => {
            handle_payables_command(&storage, &settings, &owner, date.as_deref())?;
        }
        Some(Commands::Card(cmd)) => {
            handle_card_command(&storage, &settings, &owner, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Owner(cmd)) => {
            handle_owner_command(&storage, cmd)?;
        }
        Some(Commands::Init) => {
            println!("Initializing Pocketbook at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            storage.save_all()?;
            println!("Initialization complete!");
            println!();
            println!("Next steps:");
            println!("  pocketbook account create \"Main\" --balance 1000");
            println!("  pocketbook account create \"Card\" -t credit_card --close-day 3 --due-day 10 --limit 5000");
        }
        Some(Commands::Config) => {
            println!("Pocketbook Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Initialized:      {}", if paths.is_initialized() { "yes" } else { "no" });
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Default owner:   {}", settings.default_owner);
            println!("  Acting as:       {}", owner);
        }
        None => {
            println!("Pocketbook - accounts, payables and credit cards");
            println!();
            println!("Run 'pocketbook --help' for usage information.");
        }
    }

    Ok(())
}
