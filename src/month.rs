use chrono::Datelike;

use crate::error::{ClaimsError, Result};

pub const KEY_PREFIX: &str = "quickclaims-";

/// Store key for one month's ledger: `quickclaims-YYYY-MM`.
pub fn key_for(year: i32, month: u32) -> String {
    format!("{KEY_PREFIX}{year:04}-{month:02}")
}

/// The month a command operates on. Resolved once per invocation and passed
/// to whatever reads or mutates a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || !(1..=9999).contains(&year) {
            return Err(ClaimsError::InvalidMonth(format!("{year}-{month}")));
        }
        Ok(Self { year, month })
    }

    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// Parse `YYYY-MM`.
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = || ClaimsError::InvalidMonth(raw.to_string());
        let (y, m) = raw.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }

    /// Recover a cursor from a store key, if it is one.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::parse(key.strip_prefix(KEY_PREFIX)?).ok()
    }

    /// Resolution order: explicit flag, persisted active month, today.
    pub fn resolve(flag: Option<&str>, persisted: Option<&str>) -> Result<Self> {
        if let Some(m) = flag {
            return Self::parse(m);
        }
        match persisted.map(Self::parse) {
            Some(Ok(cursor)) => Ok(cursor),
            Some(Err(_)) => {
                tracing::warn!(value = ?persisted, "ignoring unparseable active month");
                Ok(Self::current())
            }
            None => Ok(Self::current()),
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn key(&self) -> String {
        key_for(self.year, self.month)
    }

    /// `YYYY-MM`, the year-month portion of the store key.
    pub fn suffix(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Human label, e.g. "October 2026".
    pub fn label(&self) -> String {
        chrono::NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| self.suffix())
    }
}

impl std::fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.suffix())
    }
}
