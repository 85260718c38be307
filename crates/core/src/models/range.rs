use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Wire/display format of every calendar date exchanged with the backend.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Period preset selected on a dashboard page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PresetTag {
    /// Today only
    #[default]
    #[serde(rename = "daily")]
    Daily,
    /// Inclusive 7-day window ending today
    #[serde(rename = "7d", alias = "last7days")]
    Last7Days,
    /// From the first day of the current month up to today
    #[serde(rename = "monthly")]
    Monthly,
    /// User-supplied bounds
    #[serde(rename = "custom")]
    Custom,
}

impl PresetTag {
    /// All presets, in the order the period picker shows them.
    pub const ALL: [PresetTag; 4] = [
        PresetTag::Daily,
        PresetTag::Last7Days,
        PresetTag::Monthly,
        PresetTag::Custom,
    ];

    /// Stable tag used on the wire and in saved state.
    pub fn tag(&self) -> &'static str {
        match self {
            PresetTag::Daily => "daily",
            PresetTag::Last7Days => "7d",
            PresetTag::Monthly => "monthly",
            PresetTag::Custom => "custom",
        }
    }

    /// Button label shown in the period picker.
    pub fn label(&self) -> &'static str {
        match self {
            PresetTag::Daily => "Diário",
            PresetTag::Last7Days => "Últimos 7 dias",
            PresetTag::Monthly => "Mensal",
            PresetTag::Custom => "Personalizado",
        }
    }

    /// Selecting any preset but `Custom` reloads immediately;
    /// `Custom` waits for an explicit apply.
    pub fn triggers_reload(&self) -> bool {
        !matches!(self, PresetTag::Custom)
    }
}

impl std::fmt::Display for PresetTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl std::str::FromStr for PresetTag {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(PresetTag::Daily),
            "7d" | "last7days" => Ok(PresetTag::Last7Days),
            "monthly" => Ok(PresetTag::Monthly),
            "custom" => Ok(PresetTag::Custom),
            other => Err(CoreError::ValidationError(format!(
                "Unknown period preset '{other}'"
            ))),
        }
    }
}

/// A period filter. Either bound may be absent for a custom range the
/// operator has not filled in yet; absent bounds are left out of queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// A range covering a single day.
    pub fn single_day(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    /// No bounds at all.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Build a range from raw date-input values. Blank values mean "no bound".
    pub fn parse(from: &str, to: &str) -> Result<Self, CoreError> {
        Ok(Self {
            from: parse_optional_date(from)?,
            to: parse_optional_date(to)?,
        })
    }

    pub fn is_bounded(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }

    /// Number of calendar days covered, both ends included.
    /// `None` when a bound is missing or `to` precedes `from`.
    pub fn days_inclusive(&self) -> Option<i64> {
        let (from, to) = (self.from?, self.to?);
        let days = (to - from).num_days() + 1;
        (days > 0).then_some(days)
    }

    /// Query parameters for this range, skipping absent bounds.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(2);
        if let Some(from) = self.from {
            params.push(("from", from.format(DATE_FORMAT).to_string()));
        }
        if let Some(to) = self.to {
            params.push(("to", to.format(DATE_FORMAT).to_string()));
        }
        params
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fmt_bound = |d: Option<NaiveDate>| {
            d.map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_else(|| "…".to_string())
        };
        write!(f, "{} → {}", fmt_bound(self.from), fmt_bound(self.to))
    }
}

/// Parse a date-input value: blank → `None`, otherwise strict `YYYY-MM-DD`.
pub fn parse_optional_date(raw: &str) -> Result<Option<NaiveDate>, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(Some)
        .map_err(|_| CoreError::InvalidDate(trimmed.to_string()))
}
