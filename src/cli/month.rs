use crate::cli::MonthCommands;
use crate::error::Result;
use crate::month::MonthCursor;
use crate::settings::{load_settings, save_settings};

pub fn run(command: MonthCommands) -> Result<()> {
    let mut settings = load_settings();
    let cursor = MonthCursor::resolve(None, settings.active_month.as_deref())?;

    let moved = match command {
        MonthCommands::Show => {
            let follows = if settings.active_month.is_none() { " (current)" } else { "" };
            println!("{}{follows}", cursor.label());
            return Ok(());
        }
        MonthCommands::Next => Some(cursor.next()),
        MonthCommands::Prev => Some(cursor.prev()),
        MonthCommands::Set { month } => Some(MonthCursor::parse(&month)?),
        MonthCommands::Reset => None,
    };

    settings.active_month = moved.map(|c| c.suffix());
    save_settings(&settings)?;
    let active = moved.unwrap_or_else(MonthCursor::current);
    println!("Active month: {}", active.label());
    Ok(())
}
