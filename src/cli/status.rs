use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::fmt::{format_bytes, money};
use crate::month::MonthCursor;
use crate::settings::{ledgers_dir, load_settings};
use crate::store::{summarize, LedgerStore};

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = std::path::PathBuf::from(&settings.data_dir);
    let ledgers = ledgers_dir(&data_dir);
    let active = MonthCursor::resolve(None, settings.active_month.as_deref())?;

    println!("Data dir:     {}", data_dir.display());
    println!("Active month: {}", active.label());

    if !ledgers.is_dir() {
        println!();
        println!("No ledgers found. Run `quickclaims init` to set up.");
        return Ok(());
    }

    let store = LedgerStore::open(&ledgers)?;
    let keys = store.keys()?;
    if keys.is_empty() {
        println!();
        println!("No expenses recorded yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Month", "Expenses", "Total", "Unlinked", "Size"]);
    for key in keys {
        let label = MonthCursor::from_key(&key).map(|c| c.suffix()).unwrap_or_else(|| key.clone());
        let s = summarize(&store.load(&key));
        let size = store.size(&key);
        table.add_row(vec![
            Cell::new(label),
            Cell::new(s.count),
            Cell::new(money(s.total)),
            Cell::new(s.unlinked),
            Cell::new(format_bytes(size)),
        ]);
    }
    println!();
    println!("{table}");
    Ok(())
}
