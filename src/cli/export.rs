use std::path::{Path, PathBuf};

use crate::cli::open_month;
use crate::error::Result;
use crate::export::{to_archive, to_csv, CSV_NAME};
use crate::fmt::format_bytes;
use crate::settings::{exports_dir, get_data_dir};

fn default_path(name: &str) -> PathBuf {
    exports_dir(&get_data_dir()).join(name)
}

fn write_file(bytes: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    println!("Wrote {} ({})", path.display(), format_bytes(bytes.len() as u64));
    Ok(())
}

pub fn csv(month: Option<&str>, output: Option<String>) -> Result<()> {
    let (store, cursor) = open_month(month)?;
    let records = store.load(&cursor.key());
    let text = to_csv(&records)?;
    let path = output.map(PathBuf::from).unwrap_or_else(|| default_path(CSV_NAME));
    write_file(text.as_bytes(), &path)
}

pub fn zip(month: Option<&str>, output: Option<String>) -> Result<()> {
    let (store, cursor) = open_month(month)?;
    let records = store.load(&cursor.key());
    let bytes = to_archive(&records)?;
    let path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| default_path(&format!("claims_{}.zip", cursor.suffix())));
    write_file(&bytes, &path)
}
