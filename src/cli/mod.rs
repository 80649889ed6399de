pub mod add;
pub mod categories;
pub mod clear;
pub mod delete;
pub mod export;
pub mod init;
pub mod list;
pub mod load;
pub mod month;
#[cfg(feature = "ocr")]
pub mod ocr;
pub mod receipt;
pub mod status;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::month::MonthCursor;
use crate::settings::{get_data_dir, ledgers_dir, load_settings};
use crate::store::LedgerStore;

/// Open the ledger store of the configured data directory and resolve the
/// month a command works on.
pub(crate) fn open_month(month: Option<&str>) -> Result<(LedgerStore, MonthCursor)> {
    let settings = load_settings();
    let cursor = MonthCursor::resolve(month, settings.active_month.as_deref())?;
    let store = LedgerStore::open(&ledgers_dir(&get_data_dir()))?;
    Ok((store, cursor))
}

#[derive(Parser)]
#[command(name = "quickclaims", about = "Track expense claims month by month and export them.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and create it.
    Init {
        /// Path for quickclaims data (default: ~/Documents/quickclaims)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Switch to an existing data directory.
    Load {
        /// Path to a data directory containing ledgers/
        path: String,
    },
    /// Record an expense.
    Add {
        /// Amount, stored as entered
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "")]
        merchant: String,
        /// Category label (see `quickclaims categories`)
        #[arg(long, default_value = "Other")]
        category: String,
        #[arg(long, default_value = "")]
        note: String,
        /// Date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Receipt image to attach
        #[arg(long)]
        image: Option<String>,
        /// Month ledger: YYYY-MM (default: the date's month, else the active month)
        #[arg(long)]
        month: Option<String>,
    },
    /// List a month's expenses with totals.
    List {
        /// Month: YYYY-MM
        #[arg(long)]
        month: Option<String>,
    },
    /// Delete an expense.
    Delete {
        /// Row number from `quickclaims list`, or an id prefix
        reference: String,
        #[arg(long)]
        month: Option<String>,
    },
    /// Attach or replace an expense's receipt image.
    ReplaceImage {
        /// Row number from `quickclaims list`, or an id prefix
        reference: String,
        /// Path to the new image
        image: String,
        #[arg(long)]
        month: Option<String>,
    },
    /// Delete every expense of a month.
    Clear {
        #[arg(long)]
        month: Option<String>,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Export a month to CSV or a zip with receipts.
    Export {
        #[command(subcommand)]
        command: ExportCommands,
    },
    /// Move or show the active month.
    Month {
        #[command(subcommand)]
        command: MonthCommands,
    },
    /// List suggested category labels.
    Categories,
    /// Show data directory and stored months.
    Status,
    /// Extract text from a receipt image with the OCR.space API.
    #[cfg(feature = "ocr")]
    Ocr {
        /// Image to read
        image: String,
        /// API key (default: from settings)
        #[arg(long)]
        key: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ExportCommands {
    /// Write claims.csv.
    Csv {
        #[arg(long)]
        month: Option<String>,
        /// Output file path
        #[arg(long)]
        output: Option<String>,
    },
    /// Write claims_YYYY-MM.zip with claims.csv and receipt images.
    Zip {
        #[arg(long)]
        month: Option<String>,
        /// Output file path
        #[arg(long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum MonthCommands {
    /// Show the active month.
    Show,
    /// Step forward one month.
    Next,
    /// Step back one month.
    Prev,
    /// Jump to a month.
    Set {
        /// Month: YYYY-MM
        month: String,
    },
    /// Follow the calendar again.
    Reset,
}
