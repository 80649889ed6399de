use serde::{Deserialize, Deserializer, Serialize};

/// Labels offered at entry time. Categories are stored as free text, so
/// anything else a user types is kept as-is.
pub const CATEGORIES: &[&str] = &[
    "Travel",
    "Meals",
    "Lodging",
    "Transport",
    "Supplies",
    "Software",
    "Other",
];

pub const FALLBACK_CATEGORY: &str = "Other";

/// One user-entered claim line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    /// Empty for records written before ids existed; the store assigns one.
    #[serde(default)]
    pub id: String,
    pub date: String,
    /// Kept exactly as entered; never parsed on the storage path.
    #[serde(default, deserialize_with = "amount_text")]
    pub amount: String,
    #[serde(default)]
    pub merchant: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data_url: Option<String>,
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Older ledgers stored the amount as a JSON number.
fn amount_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
        Null(()),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
        Raw::Null(()) => String::new(),
    })
}

impl ExpenseRecord {
    pub fn new(date: &str, amount: &str, merchant: &str, category: &str, note: &str) -> Self {
        Self {
            id: new_id(),
            date: date.to_string(),
            amount: amount.to_string(),
            merchant: merchant.to_string(),
            category: category.to_string(),
            note: note.to_string(),
            image_name: None,
            image_data_url: None,
        }
    }

    pub fn with_image(mut self, name: &str, data_url: &str) -> Self {
        self.image_name = Some(name.to_string());
        self.image_data_url = Some(data_url.to_string());
        self
    }

    /// No receipt image attached.
    pub fn is_unlinked(&self) -> bool {
        self.image_data_url.is_none()
    }

    /// Name under `receipts/` when the record has both an image and a filename.
    pub fn receipt_name(&self) -> Option<&str> {
        match (&self.image_name, &self.image_data_url) {
            (Some(name), Some(_)) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn display_category(&self) -> &str {
        if self.category.trim().is_empty() {
            FALLBACK_CATEGORY
        } else {
            &self.category
        }
    }

    /// Amount as a number, if the entered text is one.
    pub fn parsed_amount(&self) -> Option<f64> {
        let s = self.amount.trim().replace(['$', ','], "");
        s.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}
