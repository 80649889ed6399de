use std::collections::HashSet;
use std::io::{Cursor, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::{ClaimsError, Result};
use crate::models::ExpenseRecord;
use crate::receipt::decode_data_url;

pub const CSV_HEADER: [&str; 6] = [
    "Date",
    "Merchant",
    "Amount",
    "Category",
    "Notes",
    "ReceiptLink",
];
pub const CSV_NAME: &str = "claims.csv";
pub const RECEIPTS_DIR: &str = "receipts";

/// Quote a field iff it contains a comma, a double quote or a newline.
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Final path component of a stored image name, so an entry can never land
/// outside `receipts/`.
fn safe_file_name(name: &str) -> String {
    let normalized = name.replace('\\', "/");
    Path::new(&normalized)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("receipt")
        .to_string()
}

/// `r.png` -> `r-2.png`
fn numbered(name: &str, n: usize) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}-{n}.{ext}"),
        _ => format!("{name}-{n}"),
    }
}

/// Entry name under `receipts/` for each record with an attached image, in
/// ledger order. A name already taken by an earlier record gets a numeric
/// suffix, so every CSV link points at its own archive entry.
pub fn receipt_names(records: &[ExpenseRecord]) -> Vec<Option<String>> {
    let mut used: HashSet<String> = HashSet::new();
    records
        .iter()
        .map(|r| {
            let base = safe_file_name(r.receipt_name()?);
            let mut candidate = base.clone();
            let mut n = 2;
            while !used.insert(candidate.clone()) {
                candidate = numbered(&base, n);
                n += 1;
            }
            Some(candidate)
        })
        .collect()
}

/// Render a ledger as CSV. Text fields are escaped by [`escape_field`];
/// `date` and `amount` are written verbatim.
pub fn to_csv(records: &[ExpenseRecord]) -> Result<String> {
    // Quoting is decided per field above, so the writer must not add its own.
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)?;
    for (r, name) in records.iter().zip(receipt_names(records)) {
        let link = name
            .map(|n| format!("{RECEIPTS_DIR}/{n}"))
            .unwrap_or_default();
        wtr.write_record([
            r.date.clone(),
            escape_field(&r.merchant),
            r.amount.clone(),
            escape_field(&r.category),
            escape_field(&r.note),
            escape_field(&link),
        ])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| ClaimsError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Build a zip with `claims.csv` at the root and one `receipts/<name>` entry
/// per record that carries a decodable image, named as in the CSV links.
/// Records without an image, or with an undecodable one, are skipped.
pub fn to_archive(records: &[ExpenseRecord]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file(CSV_NAME, options)?;
    zip.write_all(to_csv(records)?.as_bytes())?;

    for (r, name) in records.iter().zip(receipt_names(records)) {
        let (Some(name), Some(url)) = (name, r.image_data_url.as_deref()) else {
            continue;
        };
        let Some(bytes) = decode_data_url(url) else {
            tracing::warn!(id = %r.id, name = %name, "skipping undecodable receipt image");
            continue;
        };
        zip.start_file(format!("{RECEIPTS_DIR}/{name}"), options)?;
        zip.write_all(&bytes)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
