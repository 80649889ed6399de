use std::path::Path;

use crate::cli::open_month;
use crate::error::Result;
use crate::fmt::short_id;
use crate::receipt::encode_file;
use crate::store::{resolve_ref, RecordRef};

pub fn replace(reference: &str, image: &str, month: Option<&str>) -> Result<()> {
    let (store, cursor) = open_month(month)?;
    let key = cursor.key();
    let records = store.load(&key);
    let target = resolve_ref(&records, reference)?;

    let (name, data_url) = encode_file(Path::new(image))?;
    let id = match target {
        RecordRef::Row(idx) => {
            store.replace_image_at(&key, idx, &name, &data_url)?;
            records[idx].id.clone()
        }
        RecordRef::Id(id) => {
            store.replace_image(&key, &id, &name, &data_url)?;
            id
        }
    };
    println!("Attached {name} to {}", short_id(&id));
    Ok(())
}
