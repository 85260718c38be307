use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::overview::{GeneralOverview, SheetOverview};
use crate::models::range::DateRange;
use crate::models::sheet::{NewSheet, SheetId, SheetRecord};

/// The backend the dashboard reads from.
///
/// Aggregation (grouping per operator/house/sport, yield, green rate) and
/// spreadsheet ingestion live behind this trait. `HttpBackend` talks to the
/// real service; tests plug in their own implementations.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait DashboardBackend: Send + Sync {
    /// Human-readable name of this backend (for logs/errors).
    fn name(&self) -> &str;

    /// KPIs, per-operator table and daily profit over every registered sheet.
    async fn overview_all(&self, range: &DateRange) -> Result<GeneralOverview, CoreError>;

    /// KPIs, per-house/per-sport tables and daily profit for one sheet.
    async fn sheet_overview(
        &self,
        sheet_id: &SheetId,
        range: &DateRange,
    ) -> Result<SheetOverview, CoreError>;

    /// Ask the backend to re-import every source spreadsheet.
    async fn refresh_sheets(&self) -> Result<(), CoreError>;

    async fn list_sheets(&self) -> Result<Vec<SheetRecord>, CoreError>;

    async fn create_sheet(&self, sheet: &NewSheet) -> Result<SheetRecord, CoreError>;

    async fn delete_sheet(&self, id: &SheetId) -> Result<(), CoreError>;
}
