use crate::cli::open_month;
use crate::error::Result;
use crate::fmt::short_id;
use crate::store::{resolve_ref, RecordRef};

pub fn run(reference: &str, month: Option<&str>) -> Result<()> {
    let (store, cursor) = open_month(month)?;
    let key = cursor.key();
    let records = store.load(&key);

    let removed = match resolve_ref(&records, reference)? {
        RecordRef::Row(idx) => store.delete_at(&key, idx)?,
        RecordRef::Id(id) => store.delete(&key, &id)?,
    };
    println!(
        "Deleted {} ({} {} {})",
        short_id(&removed.id),
        removed.date,
        removed.merchant,
        removed.amount
    );
    Ok(())
}
