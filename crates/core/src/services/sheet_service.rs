use crate::errors::CoreError;
use crate::models::sheet::{NewSheet, SheetId, SheetRecord, DEFAULT_SHEET_RANGE};

impl NewSheet {
    /// Build a registration request from raw form input.
    ///
    /// Name and spreadsheet id are required; a blank range falls back to
    /// [`DEFAULT_SHEET_RANGE`].
    pub fn validated(name: &str, google_sheet_id: &str, range: &str) -> Result<Self, CoreError> {
        let name = name.trim();
        let google_sheet_id = google_sheet_id.trim();
        if name.is_empty() || google_sheet_id.is_empty() {
            return Err(CoreError::ValidationError(
                "Nome e ID da planilha são obrigatórios".into(),
            ));
        }

        let range = range.trim();
        Ok(Self {
            name: name.to_string(),
            google_sheet_id: google_sheet_id.to_string(),
            range: if range.is_empty() {
                DEFAULT_SHEET_RANGE.to_string()
            } else {
                range.to_string()
            },
        })
    }
}

/// Local copy of the registered sheets, kept in sync with backend mutations.
#[derive(Debug, Clone, Default)]
pub struct SheetList {
    sheets: Vec<SheetRecord>,
}

impl SheetList {
    pub fn new(sheets: Vec<SheetRecord>) -> Self {
        Self { sheets }
    }

    pub fn all(&self) -> &[SheetRecord] {
        &self.sheets
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn first_id(&self) -> Option<&SheetId> {
        self.sheets.first().map(|s| &s.id)
    }

    pub fn get(&self, id: &SheetId) -> Option<&SheetRecord> {
        self.sheets.iter().find(|s| &s.id == id)
    }

    pub fn replace(&mut self, sheets: Vec<SheetRecord>) {
        self.sheets = sheets;
    }

    /// Newly created sheets go on top.
    pub fn prepend(&mut self, sheet: SheetRecord) {
        self.sheets.insert(0, sheet);
    }

    /// Returns `true` if a sheet was removed.
    pub fn remove(&mut self, id: &SheetId) -> bool {
        let before = self.sheets.len();
        self.sheets.retain(|s| &s.id != id);
        self.sheets.len() != before
    }
}
