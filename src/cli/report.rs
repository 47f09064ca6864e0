//! Report CLI commands

use clap::{Subcommand, ValueEnum};

use crate::config::Settings;
use crate::error::PocketResult;
use crate::reports::{ActivityReport, OwnerFilter, OwnerListReport, OwnerSort};
use crate::storage::Storage;

/// Row order for `report owners`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OwnerSortArg {
    Name,
    Transactions,
}

impl From<OwnerSortArg> for OwnerSort {
    fn from(arg: OwnerSortArg) -> Self {
        match arg {
            OwnerSortArg::Name => OwnerSort::Name,
            OwnerSortArg::Transactions => OwnerSort::Transactions,
        }
    }
}

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Usage across all owners (administrative)
    Activity {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// List every owner with record counts (administrative)
    Owners {
        /// Only owners with a transaction in the last 30 days
        #[arg(long, conflicts_with = "inactive")]
        active: bool,
        /// Only owners without a transaction in the last 30 days
        #[arg(long)]
        inactive: bool,
        /// Row order
        #[arg(long, value_enum, default_value = "name")]
        sort: OwnerSortArg,
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> PocketResult<()> {
    match cmd {
        ReportCommands::Activity { date } => {
            let reference = super::reference_date(date.as_deref())?;
            let report = ActivityReport::generate(storage, reference)?;
            print!("{}", report.format_terminal(&settings.currency_symbol));
        }
        ReportCommands::Owners {
            active,
            inactive,
            sort,
            date,
        } => {
            let reference = super::reference_date(date.as_deref())?;
            let filter = match (active, inactive) {
                (true, _) => OwnerFilter::Active,
                (_, true) => OwnerFilter::Inactive,
                _ => OwnerFilter::All,
            };
            let report = OwnerListReport::generate(storage, reference, filter, sort.into())?;
            print!("{}", report.format_terminal(&settings.date_format));
        }
    }

    Ok(())
}
