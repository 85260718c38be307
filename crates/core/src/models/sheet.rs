use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Cell range imported when the operator leaves the field blank.
pub const DEFAULT_SHEET_RANGE: &str = "A1:Z1000";

/// Backend identifier of a registered sheet.
///
/// The backend emits numeric ids, but nothing here does arithmetic on them,
/// so both numbers and strings are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SheetId(String);

impl SheetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SheetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for SheetId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for SheetId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Serialize for SheetId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SheetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => SheetId(n.to_string()),
            RawId::Text(s) => SheetId(s),
        })
    }
}

/// A Google Sheets reference registered in the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetRecord {
    pub id: SheetId,

    /// Display name (usually the operator's name)
    pub name: String,

    /// Spreadsheet id from the Google Sheets URL
    pub google_sheet_id: String,

    /// A1-notation range imported from the spreadsheet
    #[serde(default)]
    pub range: String,

    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `POST /api/sheets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSheet {
    pub name: String,

    #[serde(rename = "googleSheetId")]
    pub google_sheet_id: String,

    pub range: String,
}
