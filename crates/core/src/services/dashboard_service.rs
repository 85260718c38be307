use chrono::NaiveDate;
use log::{debug, warn};

use crate::errors::CoreError;
use crate::models::overview::DashboardData;
use crate::models::range::{parse_optional_date, DateRange, PresetTag};
use crate::models::series::CumulativeProfitPoint;
use crate::services::range_service::compute_range;
use crate::services::report_service::KpiSummary;
use crate::services::series_service::build_cumulative;

/// Proof that a load was started, carrying the range it was started for.
///
/// Only the ticket of the most recent load may update the page; responses
/// for older tickets are dropped on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct LoadTicket {
    generation: u64,
    range: DateRange,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }
}

/// State of one dashboard page: period filter, loaded data, loading and
/// error flags.
///
/// Each page owns its own view; nothing is shared between pages.
#[derive(Debug, Clone)]
pub struct DashboardView<T> {
    preset: PresetTag,
    range: DateRange,
    data: Option<T>,
    cumulative: Vec<CumulativeProfitPoint>,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl<T> Default for DashboardView<T> {
    fn default() -> Self {
        Self {
            preset: PresetTag::default(),
            range: DateRange::unbounded(),
            data: None,
            cumulative: Vec::new(),
            loading: false,
            error: None,
            generation: 0,
        }
    }
}

impl<T: DashboardData> DashboardView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Filter ──────────────────────────────────────────────────────

    pub fn preset(&self) -> PresetTag {
        self.preset
    }

    /// Current date-input values. For non-custom presets these mirror the
    /// last computed preset range.
    pub fn range(&self) -> &DateRange {
        &self.range
    }

    /// Select a preset. Non-custom presets start a load right away and
    /// return its ticket; `Custom` only unlocks the date inputs.
    pub fn select_preset(&mut self, preset: PresetTag, today: NaiveDate) -> Option<LoadTicket> {
        self.set_preset(preset);
        if preset.triggers_reload() {
            Some(self.begin_load(today))
        } else {
            None
        }
    }

    /// Change the preset without loading anything.
    pub fn set_preset(&mut self, preset: PresetTag) {
        self.preset = preset;
    }

    /// Edit the "from" date input. Ignored unless the preset is `Custom`.
    pub fn set_custom_from(&mut self, raw: &str) -> Result<(), CoreError> {
        if self.preset != PresetTag::Custom {
            return Ok(());
        }
        self.range.from = parse_optional_date(raw)?;
        Ok(())
    }

    /// Edit the "to" date input. Ignored unless the preset is `Custom`.
    pub fn set_custom_to(&mut self, raw: &str) -> Result<(), CoreError> {
        if self.preset != PresetTag::Custom {
            return Ok(());
        }
        self.range.to = parse_optional_date(raw)?;
        Ok(())
    }

    /// Explicit "apply": reload with whatever preset is selected.
    pub fn apply(&mut self, today: NaiveDate) -> LoadTicket {
        self.begin_load(today)
    }

    // ── Loading ─────────────────────────────────────────────────────

    /// Start a load: resolve the range, raise the loading flag, clear the
    /// previous error and invalidate every earlier ticket.
    pub fn begin_load(&mut self, today: NaiveDate) -> LoadTicket {
        let range = compute_range(self.preset, today, self.range);
        if self.preset != PresetTag::Custom {
            self.range = range;
        }
        if self.preset == PresetTag::Custom && !range.is_bounded() {
            debug!("custom range {range} is open-ended; leaving the missing bounds to the backend");
        }

        self.generation += 1;
        self.loading = true;
        self.error = None;
        debug!("load #{} started for {range}", self.generation);

        LoadTicket {
            generation: self.generation,
            range,
        }
    }

    /// Finish a load. Returns `false` (and changes nothing) when a newer load
    /// has been started since `ticket` was issued.
    ///
    /// On failure the previous data stays in place and the error message is
    /// exposed through [`DashboardView::error`].
    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<T, CoreError>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "dropping response of load #{} (latest is #{})",
                ticket.generation, self.generation
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(data) => {
                self.cumulative = build_cumulative(data.daily_profit());
                self.data = Some(data);
            }
            Err(e) => {
                warn!("load #{} failed: {e}", ticket.generation);
                self.error = Some(e.user_message());
            }
        }
        true
    }

    /// Record a failure that did not come from a load (e.g. a refresh
    /// request), without touching the loading flag or the data.
    pub fn set_error(&mut self, error: &CoreError) {
        self.error = Some(error.user_message());
    }

    // ── Read side ───────────────────────────────────────────────────

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Last successfully loaded data, regardless of the loading flag.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Data to display: hidden while a load is in flight.
    pub fn visible(&self) -> Option<&T> {
        if self.loading {
            None
        } else {
            self.data.as_ref()
        }
    }

    /// Running profit of the last loaded series.
    pub fn cumulative(&self) -> &[CumulativeProfitPoint] {
        &self.cumulative
    }

    /// KPI cards for the loaded data over the current period.
    pub fn kpis(&self) -> Option<KpiSummary> {
        let overview = self.data.as_ref()?.overview()?;
        Some(KpiSummary::from_overview(overview, &self.range))
    }
}
