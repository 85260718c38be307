pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use chrono::NaiveDate;
use log::{debug, info, warn};
use models::{
    chart::{ChartGeometry, Tooltip},
    overview::{GeneralOverview, SheetOverview},
    range::{DateRange, PresetTag},
    series::CumulativeProfitPoint,
    settings::Settings,
    sheet::{NewSheet, SheetId, SheetRecord},
};
use providers::{
    http::{HttpBackend, FALLBACK_LIST_SHEETS},
    traits::DashboardBackend,
};
use services::{
    chart_service::ChartService,
    dashboard_service::{DashboardView, LoadTicket},
    hover_service::{scale_pointer, HoverState},
    sheet_service::SheetList,
};

use errors::CoreError;

/// The two dashboard pages that carry a cumulative-profit chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Every sheet consolidated, with the per-operator table
    General,
    /// One operator's sheet, with per-house and per-sport tables
    Operators,
}

/// Main entry point for the surebet dashboard core.
/// Holds the state of every page and the backend they read from.
#[must_use]
pub struct SurebetDashboard {
    settings: Settings,
    backend: Box<dyn DashboardBackend>,
    chart_service: ChartService,
    general: DashboardView<GeneralOverview>,
    general_hover: HoverState,
    operators: DashboardView<SheetOverview>,
    operators_hover: HoverState,
    selected_sheet: Option<SheetId>,
    sheets: SheetList,
}

impl std::fmt::Debug for SurebetDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurebetDashboard")
            .field("backend", &self.backend.name())
            .field("api_url", &self.settings.api_url)
            .field("sheets", &self.sheets.len())
            .field("selected_sheet", &self.selected_sheet)
            .finish()
    }
}

impl SurebetDashboard {
    /// Connect to the HTTP backend described by `settings`.
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        let backend = HttpBackend::new(&settings)?;
        info!("dashboard backend at {}", backend.base_url());
        Self::with_backend(settings, Box::new(backend))
    }

    /// Use any backend implementation (tests, offline fixtures).
    pub fn with_backend(
        settings: Settings,
        backend: Box<dyn DashboardBackend>,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        let chart_service =
            ChartService::new(settings.canvas).with_currency_prefix(settings.currency_prefix.clone());
        Ok(Self {
            settings,
            backend,
            chart_service,
            general: DashboardView::new(),
            general_hover: HoverState::new(),
            operators: DashboardView::new(),
            operators_hover: HoverState::new(),
            selected_sheet: None,
            sheets: SheetList::default(),
        })
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── General dashboard ───────────────────────────────────────────

    #[must_use]
    pub fn general(&self) -> &DashboardView<GeneralOverview> {
        &self.general
    }

    /// First visit: load today's numbers.
    pub async fn open_general(&mut self, today: NaiveDate) -> bool {
        self.select_general_preset(PresetTag::Daily, today).await
    }

    /// Select a period preset; every preset but `Custom` reloads.
    /// Returns `true` if a response was applied to the page.
    pub async fn select_general_preset(&mut self, preset: PresetTag, today: NaiveDate) -> bool {
        match self.general.select_preset(preset, today) {
            Some(ticket) => self.run_general_load(ticket).await,
            None => false,
        }
    }

    /// Fill the custom date inputs (blank means no bound).
    pub fn set_general_custom_range(&mut self, from: &str, to: &str) -> Result<(), CoreError> {
        self.general.set_custom_from(from)?;
        self.general.set_custom_to(to)
    }

    /// Explicit apply with the current preset.
    pub async fn apply_general(&mut self, today: NaiveDate) -> bool {
        let ticket = self.general.apply(today);
        self.run_general_load(ticket).await
    }

    /// Ask the backend to re-import the spreadsheets, then reload the
    /// general dashboard with the current preset.
    pub async fn refresh_and_reload(&mut self, today: NaiveDate) -> Result<(), CoreError> {
        info!("refreshing sheets via {}", self.backend.name());
        if let Err(e) = self.backend.refresh_sheets().await {
            self.general.set_error(&e);
            return Err(e);
        }
        let ticket = self.general.apply(today);
        self.run_general_load(ticket).await;
        Ok(())
    }

    async fn run_general_load(&mut self, ticket: LoadTicket) -> bool {
        let result = self.backend.overview_all(ticket.range()).await;
        let applied = self.general.complete_load(ticket, result);
        if applied {
            self.general_hover.pointer_leave();
        }
        applied
    }

    // ── Per-operator dashboard ──────────────────────────────────────

    #[must_use]
    pub fn operators(&self) -> &DashboardView<SheetOverview> {
        &self.operators
    }

    #[must_use]
    pub fn selected_sheet(&self) -> Option<&SheetRecord> {
        self.selected_sheet.as_ref().and_then(|id| self.sheets.get(id))
    }

    /// First visit: fetch the sheet list, select the first sheet and load
    /// it with the current preset.
    pub async fn open_operators(&mut self, today: NaiveDate) -> bool {
        if let Err(e) = self.reload_sheets().await {
            // Only backend-reported messages reach the page; transport and
            // decode failures show the generic sheet-list message.
            let e = match e {
                CoreError::Api { .. } => e,
                other => {
                    warn!("sheet list unavailable: {other}");
                    CoreError::Api {
                        endpoint: "GET /api/sheets".to_string(),
                        message: FALLBACK_LIST_SHEETS.to_string(),
                    }
                }
            };
            self.operators.set_error(&e);
            return false;
        }
        match self.sheets.first_id().cloned() {
            Some(first) => {
                self.selected_sheet = Some(first);
                self.load_operators(today).await
            }
            None => {
                debug!("no sheets registered; operator dashboard stays empty");
                false
            }
        }
    }

    /// Switch to another sheet and reload it with the current preset.
    pub async fn select_sheet(&mut self, id: &SheetId, today: NaiveDate) -> Result<bool, CoreError> {
        if self.sheets.get(id).is_none() {
            return Err(CoreError::ValidationError(format!("Unknown sheet id {id}")));
        }
        self.selected_sheet = Some(id.clone());
        Ok(self.load_operators(today).await)
    }

    /// Select a period preset on the operator page. Without a selected sheet
    /// the preset is remembered but nothing loads.
    pub async fn select_operator_preset(&mut self, preset: PresetTag, today: NaiveDate) -> bool {
        if self.selected_sheet.is_none() {
            self.operators.set_preset(preset);
            return false;
        }
        match self.operators.select_preset(preset, today) {
            Some(ticket) => self.run_operator_load(ticket).await,
            None => false,
        }
    }

    pub fn set_operator_custom_range(&mut self, from: &str, to: &str) -> Result<(), CoreError> {
        self.operators.set_custom_from(from)?;
        self.operators.set_custom_to(to)
    }

    pub async fn apply_operators(&mut self, today: NaiveDate) -> bool {
        self.load_operators(today).await
    }

    async fn load_operators(&mut self, today: NaiveDate) -> bool {
        if self.selected_sheet.is_none() {
            return false;
        }
        let ticket = self.operators.apply(today);
        self.run_operator_load(ticket).await
    }

    async fn run_operator_load(&mut self, ticket: LoadTicket) -> bool {
        let result = match self.selected_sheet.as_ref() {
            Some(id) => self.backend.sheet_overview(id, ticket.range()).await,
            None => Err(CoreError::SheetNotSelected),
        };
        let applied = self.operators.complete_load(ticket, result);
        if applied {
            self.operators_hover.pointer_leave();
        }
        applied
    }

    // ── Sheets ──────────────────────────────────────────────────────

    #[must_use]
    pub fn sheets(&self) -> &[SheetRecord] {
        self.sheets.all()
    }

    /// Replace the local sheet list with the backend's.
    pub async fn reload_sheets(&mut self) -> Result<(), CoreError> {
        let sheets = self.backend.list_sheets().await?;
        debug!("{} sheet(s) registered", sheets.len());
        self.sheets.replace(sheets);
        if let Some(id) = &self.selected_sheet {
            if self.sheets.get(id).is_none() {
                self.selected_sheet = None;
            }
        }
        Ok(())
    }

    /// Register a spreadsheet. The created record goes on top of the list.
    pub async fn register_sheet(
        &mut self,
        name: &str,
        google_sheet_id: &str,
        range: &str,
    ) -> Result<SheetRecord, CoreError> {
        let new_sheet = NewSheet::validated(name, google_sheet_id, range)?;
        let created = self.backend.create_sheet(&new_sheet).await?;
        info!("registered sheet '{}' ({})", created.name, created.id);
        self.sheets.prepend(created.clone());
        Ok(created)
    }

    /// Remove a spreadsheet reference. If it was the selected sheet of the
    /// operator page, the selection moves to the first remaining sheet.
    pub async fn remove_sheet(&mut self, id: &SheetId) -> Result<(), CoreError> {
        self.backend.delete_sheet(id).await?;
        if !self.sheets.remove(id) {
            warn!("sheet {id} removed in the backend but was not in the local list");
        }
        if self.selected_sheet.as_ref() == Some(id) {
            self.selected_sheet = self.sheets.first_id().cloned();
        }
        Ok(())
    }

    // ── Charts ──────────────────────────────────────────────────────

    #[must_use]
    pub fn chart_service(&self) -> &ChartService {
        &self.chart_service
    }

    /// Cumulative-profit series currently loaded on `page`.
    #[must_use]
    pub fn cumulative(&self, page: Page) -> &[CumulativeProfitPoint] {
        match page {
            Page::General => self.general.cumulative(),
            Page::Operators => self.operators.cumulative(),
        }
    }

    /// Geometry of the chart on `page`; `None` when there is nothing to draw.
    #[must_use]
    pub fn chart_geometry(&self, page: Page) -> Option<ChartGeometry> {
        self.chart_service.geometry(self.cumulative(page))
    }

    /// SVG of the chart on `page`, including the hover tooltip if any.
    #[must_use]
    pub fn render_chart(&self, page: Page) -> Option<String> {
        self.chart_service
            .render_svg(self.cumulative(page), self.hover(page).index())
    }

    /// Track the pointer over the chart of `page`.
    ///
    /// `pointer_x` is measured from the chart's left edge on an element
    /// `rendered_width` wide; it is scaled to canvas units first.
    pub fn pointer_move(&mut self, page: Page, pointer_x: f64, rendered_width: f64) -> Option<Tooltip> {
        let geometry = self.chart_geometry(page)?;
        let x = scale_pointer(pointer_x, rendered_width, geometry.canvas.width);
        let hover = match page {
            Page::General => &mut self.general_hover,
            Page::Operators => &mut self.operators_hover,
        };
        hover.pointer_move(&geometry, x);
        let hover = *hover;
        hover.tooltip(&geometry, self.cumulative(page))
    }

    pub fn pointer_leave(&mut self, page: Page) {
        match page {
            Page::General => self.general_hover.pointer_leave(),
            Page::Operators => self.operators_hover.pointer_leave(),
        }
    }

    /// Tooltip currently shown on `page`, if any.
    #[must_use]
    pub fn tooltip(&self, page: Page) -> Option<Tooltip> {
        let geometry = self.chart_geometry(page)?;
        self.hover(page).tooltip(&geometry, self.cumulative(page))
    }

    fn hover(&self, page: Page) -> &HoverState {
        match page {
            Page::General => &self.general_hover,
            Page::Operators => &self.operators_hover,
        }
    }

    // ── Convenience Helpers ─────────────────────────────────────────

    /// Range a preset would resolve to on `today` for the given page,
    /// without starting a load.
    #[must_use]
    pub fn preview_range(&self, page: Page, preset: PresetTag, today: NaiveDate) -> DateRange {
        let current = match page {
            Page::General => *self.general.range(),
            Page::Operators => *self.operators.range(),
        };
        services::range_service::compute_range(preset, today, current)
    }
}
