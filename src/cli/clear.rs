use std::io::Write;

use crate::cli::open_month;
use crate::error::Result;

pub fn run(month: Option<&str>, yes: bool) -> Result<()> {
    let (store, cursor) = open_month(month)?;
    let key = cursor.key();
    let count = store.load(&key).len();

    if count == 0 && !store.exists(&key) {
        println!("Nothing to clear for {}.", cursor.label());
        return Ok(());
    }

    if !yes {
        print!(
            "Delete all {count} expense(s) for {}? This cannot be undone. [y/N]: ",
            cursor.label()
        );
        std::io::stdout().flush()?;
        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        if !matches!(input.trim().to_lowercase().as_str(), "y" | "yes") {
            println!("Aborted.");
            return Ok(());
        }
    }

    store.clear(&key)?;
    println!("Cleared {count} expense(s) for {}.", cursor.label());
    Ok(())
}
