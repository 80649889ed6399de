use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::open_month;
use crate::error::Result;
use crate::fmt::{money, short_id};
use crate::store::summarize;

pub fn run(month: Option<&str>) -> Result<()> {
    let (store, cursor) = open_month(month)?;
    let records = store.load(&cursor.key());

    println!("{}", cursor.label().bold());
    if records.is_empty() {
        println!("No expenses recorded.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "ID", "Date", "Merchant", "Amount", "Category", "Note", "Receipt"]);
    for (i, r) in records.iter().enumerate() {
        let receipt = match r.image_name.as_deref() {
            Some(name) if !r.is_unlinked() => name.to_string(),
            _ => "\u{2014}".yellow().to_string(),
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(short_id(&r.id)),
            Cell::new(&r.date),
            Cell::new(&r.merchant),
            Cell::new(&r.amount),
            Cell::new(r.display_category()),
            Cell::new(&r.note),
            Cell::new(receipt),
        ]);
    }
    println!("{table}");

    let s = summarize(&records);
    println!("Expenses:  {}", s.count);
    println!("Total:     {}", money(s.total).green());
    if s.unlinked > 0 {
        println!("Unlinked:  {}", s.unlinked.to_string().yellow());
    } else {
        println!("Unlinked:  0");
    }
    if s.unparsed_amounts > 0 {
        let note = format!(
            "{} amount(s) are not numbers and were left out of the total",
            s.unparsed_amounts
        );
        println!("{}", note.yellow());
    }
    Ok(())
}
