use std::path::Path;

use crate::cli::open_month;
use crate::error::{ClaimsError, Result};
use crate::fmt::short_id;
use crate::models::ExpenseRecord;
use crate::receipt::encode_file;

pub struct NewExpense {
    pub amount: String,
    pub merchant: String,
    pub category: String,
    pub note: String,
    pub date: Option<String>,
    pub image: Option<String>,
    pub month: Option<String>,
}

pub fn run(input: NewExpense) -> Result<()> {
    let (date, date_month) = match &input.date {
        Some(d) => {
            let parsed = chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d").map_err(|_| {
                ClaimsError::Other(format!("Invalid date: {d} (expected YYYY-MM-DD)"))
            })?;
            (
                parsed.format("%Y-%m-%d").to_string(),
                Some(parsed.format("%Y-%m").to_string()),
            )
        }
        None => (chrono::Local::now().format("%Y-%m-%d").to_string(), None),
    };

    // An explicit month wins; otherwise a given date picks its own month.
    let month = input.month.clone().or(date_month);
    let (store, cursor) = open_month(month.as_deref())?;

    let mut record = ExpenseRecord::new(
        &date,
        &input.amount,
        &input.merchant,
        &input.category,
        &input.note,
    );
    if record.parsed_amount().is_none() {
        tracing::warn!(amount = %input.amount, "amount is not a number; storing as entered");
    }
    if let Some(image) = &input.image {
        let (name, data_url) = encode_file(Path::new(image))?;
        record = record.with_image(&name, &data_url);
    }

    let id = store.add(&cursor.key(), record)?;
    println!("Added expense {} to {}", short_id(&id), cursor.label());
    Ok(())
}
