use std::path::{Path, PathBuf};

use crate::error::{ClaimsError, Result};
use crate::models::{new_id, ExpenseRecord};
use crate::month::KEY_PREFIX;

/// Month-partitioned ledger storage: one JSON file per store key.
///
/// Reads are tolerant: a missing or undecodable ledger is an empty ledger.
/// Every mutation loads the whole month, changes it in memory and writes it
/// back, so two processes editing the same month can lose updates.
pub struct LedgerStore {
    dir: PathBuf,
}

impl LedgerStore {
    pub fn open(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn exists(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }

    /// Bytes on disk for a ledger, 0 if absent.
    pub fn size(&self, key: &str) -> u64 {
        std::fs::metadata(self.path_for(key)).map(|m| m.len()).unwrap_or(0)
    }

    pub fn load(&self, key: &str) -> Vec<ExpenseRecord> {
        let path = self.path_for(key);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(key, error = %e, "unreadable ledger treated as empty");
                }
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<ExpenseRecord>>(&content) {
            Ok(mut records) => {
                tracing::debug!(key, count = records.len(), "loaded ledger");
                self.assign_missing_ids(key, &mut records);
                records
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "corrupt ledger treated as empty");
                Vec::new()
            }
        }
    }

    /// Give id-less records an id and write it back, so the same record
    /// keeps the same id on every later load.
    fn assign_missing_ids(&self, key: &str, records: &mut [ExpenseRecord]) {
        let mut assigned = 0;
        for r in records.iter_mut().filter(|r| r.id.is_empty()) {
            r.id = new_id();
            assigned += 1;
        }
        if assigned == 0 {
            return;
        }
        match self.save(key, records) {
            Ok(()) => tracing::debug!(key, assigned, "assigned ids to records"),
            Err(e) => tracing::warn!(key, error = %e, "could not persist assigned record ids"),
        }
    }

    pub fn save(&self, key: &str, records: &[ExpenseRecord]) -> Result<()> {
        let json = serde_json::to_string(records)?;
        std::fs::write(self.path_for(key), json)?;
        tracing::debug!(key, count = records.len(), "saved ledger");
        Ok(())
    }

    /// Irreversible. Callers confirm with the user first.
    pub fn clear(&self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => {
                tracing::debug!(key, "cleared ledger");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Keys with a persisted ledger, oldest month first.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = std::fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                name.strip_suffix(".json")
                    .filter(|stem| stem.starts_with(KEY_PREFIX))
                    .map(str::to_string)
            })
            .collect();
        keys.sort();
        Ok(keys)
    }

    // -----------------------------------------------------------------------
    // Load-mutate-save helpers
    // -----------------------------------------------------------------------

    pub fn add(&self, key: &str, record: ExpenseRecord) -> Result<String> {
        let mut records = self.load(key);
        let id = record.id.clone();
        records.push(record);
        self.save(key, &records)?;
        Ok(id)
    }

    pub fn delete(&self, key: &str, id: &str) -> Result<ExpenseRecord> {
        let mut records = self.load(key);
        let idx = position_of(&records, id)?;
        let removed = records.remove(idx);
        self.save(key, &records)?;
        Ok(removed)
    }

    pub fn delete_at(&self, key: &str, index: usize) -> Result<ExpenseRecord> {
        let mut records = self.load(key);
        if index >= records.len() {
            return Err(ClaimsError::UnknownRecord(format!("row {}", index + 1)));
        }
        let removed = records.remove(index);
        self.save(key, &records)?;
        Ok(removed)
    }

    pub fn replace_image(&self, key: &str, id: &str, name: &str, data_url: &str) -> Result<()> {
        let mut records = self.load(key);
        let idx = position_of(&records, id)?;
        set_image(&mut records[idx], name, data_url);
        self.save(key, &records)
    }

    pub fn replace_image_at(
        &self,
        key: &str,
        index: usize,
        name: &str,
        data_url: &str,
    ) -> Result<()> {
        let mut records = self.load(key);
        let record = records
            .get_mut(index)
            .ok_or_else(|| ClaimsError::UnknownRecord(format!("row {}", index + 1)))?;
        set_image(record, name, data_url);
        self.save(key, &records)
    }
}

fn set_image(record: &mut ExpenseRecord, name: &str, data_url: &str) {
    record.image_name = Some(name.to_string());
    record.image_data_url = Some(data_url.to_string());
}

fn position_of(records: &[ExpenseRecord], id: &str) -> Result<usize> {
    records
        .iter()
        .position(|r| r.id == id)
        .ok_or_else(|| ClaimsError::UnknownRecord(id.to_string()))
}

/// A record as named on the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordRef {
    /// 0-based position in the ledger.
    Row(usize),
    Id(String),
}

/// Resolve a user-supplied reference: a 1-based row number, or an id prefix
/// of at least four characters that matches exactly one record.
pub fn resolve_ref(records: &[ExpenseRecord], reference: &str) -> Result<RecordRef> {
    let reference = reference.trim();
    if let Ok(row) = reference.parse::<usize>() {
        if row >= 1 && row <= records.len() {
            return Ok(RecordRef::Row(row - 1));
        }
        if reference.len() < 4 {
            return Err(ClaimsError::UnknownRecord(format!("row {row}")));
        }
    }
    if reference.len() < 4 {
        return Err(ClaimsError::UnknownRecord(reference.to_string()));
    }
    let matches: Vec<&ExpenseRecord> = records
        .iter()
        .filter(|r| r.id.starts_with(reference))
        .collect();
    match matches.as_slice() {
        [r] => Ok(RecordRef::Id(r.id.clone())),
        [] => Err(ClaimsError::UnknownRecord(reference.to_string())),
        _ => Err(ClaimsError::Other(format!("Ambiguous record id: {reference}"))),
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub total: f64,
    pub unlinked: usize,
    pub unparsed_amounts: usize,
}

pub fn summarize(records: &[ExpenseRecord]) -> Summary {
    let mut s = Summary {
        count: records.len(),
        ..Summary::default()
    };
    for r in records {
        match r.parsed_amount() {
            Some(v) => s.total += v,
            None => s.unparsed_amounts += 1,
        }
        if r.is_unlinked() {
            s.unlinked += 1;
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::month::key_for;

    fn test_store() -> (tempfile::TempDir, LedgerStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::open(&dir.path().join("ledgers")).unwrap();
        (dir, store)
    }

    fn sample() -> Vec<ExpenseRecord> {
        vec![
            ExpenseRecord::new("2024-03-01", "12.50", "Cafe", "Meals", "lunch"),
            ExpenseRecord::new("2024-03-02", "300", "Hotel", "Lodging", "")
                .with_image("r1.png", "data:image/png;base64,AAAA"),
            ExpenseRecord::new("2024-03-03", "8", "Bus", "Transport", "airport"),
        ]
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let (_dir, store) = test_store();
        let key = key_for(2024, 3);
        let records = sample();
        store.save(&key, &records).unwrap();
        assert_eq!(store.load(&key), records);
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let (_dir, store) = test_store();
        assert!(store.load(&key_for(1999, 1)).is_empty());
    }

    #[test]
    fn test_load_corrupt_ledger_is_empty() {
        let (_dir, store) = test_store();
        let key = key_for(2024, 3);
        store.save(&key, &sample()).unwrap();
        let path = store.path_for(&key);
        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::write(&path, &content[..content.len() / 2]).unwrap();
        assert!(store.load(&key).is_empty());

        std::fs::write(&path, r#"{"not":"a list"}"#).unwrap();
        assert!(store.load(&key).is_empty());
    }

    #[test]
    fn test_clear_then_load_is_empty() {
        let (_dir, store) = test_store();
        let key = key_for(2024, 3);
        store.save(&key, &sample()).unwrap();
        store.clear(&key).unwrap();
        assert!(store.load(&key).is_empty());
        assert!(!store.exists(&key));
        // clearing an absent month is not an error
        store.clear(&key).unwrap();
    }

    #[test]
    fn test_months_are_isolated() {
        let (_dir, store) = test_store();
        store.save(&key_for(2024, 3), &sample()).unwrap();
        assert!(store.load(&key_for(2024, 4)).is_empty());
        assert_eq!(store.load(&key_for(2024, 3)).len(), 3);
    }

    #[test]
    fn test_delete_at_preserves_order() {
        let (_dir, store) = test_store();
        let key = key_for(2024, 3);
        let records = sample();
        store.save(&key, &records).unwrap();
        let removed = store.delete_at(&key, 1).unwrap();
        assert_eq!(removed.merchant, "Hotel");
        let left = store.load(&key);
        assert_eq!(left.len(), 2);
        assert_eq!(left[0], records[0]);
        assert_eq!(left[1], records[2]);
    }

    #[test]
    fn test_delete_at_out_of_range() {
        let (_dir, store) = test_store();
        let key = key_for(2024, 3);
        store.save(&key, &sample()).unwrap();
        assert!(matches!(store.delete_at(&key, 3), Err(ClaimsError::UnknownRecord(_))));
        assert_eq!(store.load(&key).len(), 3);
    }

    #[test]
    fn test_delete_by_id() {
        let (_dir, store) = test_store();
        let key = key_for(2024, 3);
        let records = sample();
        store.save(&key, &records).unwrap();
        store.delete(&key, &records[2].id).unwrap();
        let left = store.load(&key);
        assert_eq!(left, records[..2].to_vec());
        assert!(store.delete(&key, "no-such-id").is_err());
    }

    #[test]
    fn test_add_creates_ledger() {
        let (_dir, store) = test_store();
        let key = key_for(2024, 5);
        assert!(!store.exists(&key));
        let id = store
            .add(&key, ExpenseRecord::new("2024-05-01", "5", "Shop", "Supplies", ""))
            .unwrap();
        let loaded = store.load(&key);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, id);
    }

    #[test]
    fn test_replace_image() {
        let (_dir, store) = test_store();
        let key = key_for(2024, 3);
        let records = sample();
        store.save(&key, &records).unwrap();
        store
            .replace_image(&key, &records[0].id, "new.jpg", "data:image/jpeg;base64,AA==")
            .unwrap();
        store
            .replace_image_at(&key, 2, "bus.png", "data:image/png;base64,AA==")
            .unwrap();
        let loaded = store.load(&key);
        assert_eq!(loaded[0].image_name.as_deref(), Some("new.jpg"));
        assert_eq!(loaded[2].image_name.as_deref(), Some("bus.png"));
        assert_eq!(loaded[1], records[1]);
    }

    #[test]
    fn test_keys_lists_persisted_months() {
        let (_dir, store) = test_store();
        store.save(&key_for(2024, 4), &sample()).unwrap();
        store.save(&key_for(2023, 12), &sample()).unwrap();
        assert_eq!(store.keys().unwrap(), vec!["quickclaims-2023-12", "quickclaims-2024-04"]);
    }

    #[test]
    fn test_resolve_ref() {
        let records = sample();
        assert_eq!(resolve_ref(&records, "2").unwrap(), RecordRef::Row(1));
        assert_eq!(
            resolve_ref(&records, &records[2].id[..8]).unwrap(),
            RecordRef::Id(records[2].id.clone())
        );
        assert!(resolve_ref(&records, "4").is_err());
        assert!(resolve_ref(&records, "0").is_err());
        assert!(resolve_ref(&records, "ab").is_err());
    }

    #[test]
    fn test_records_without_ids_keep_assigned_ids() {
        let (_dir, store) = test_store();
        let key = key_for(2024, 3);
        let legacy = r#"[
            {"date":"2024-03-01","amount":12.5,"merchant":"Cafe","category":"Meals","note":""},
            {"date":"2024-03-02","amount":"8","merchant":"Bus","category":"Transport","note":""}
        ]"#;
        std::fs::write(store.path_for(&key), legacy).unwrap();

        let first = store.load(&key);
        assert!(first.iter().all(|r| !r.id.is_empty()));
        assert_ne!(first[0].id, first[1].id);
        let second = store.load(&key);
        assert_eq!(first, second);

        store.delete(&key, &first[0].id).unwrap();
        let left = store.load(&key);
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id, first[1].id);
        assert_eq!(left[0].amount, "8");
    }

    #[test]
    fn test_summarize_counts_unlinked() {
        let mut records = sample();
        records.push(ExpenseRecord::new("2024-03-04", "ten-ish", "", "", ""));
        let s = summarize(&records);
        assert_eq!(s.count, 4);
        assert_eq!(s.unlinked, 3);
        assert_eq!(s.unparsed_amounts, 1);
        assert!((s.total - 320.5).abs() < 1e-9);
    }
}
