use serde::{Deserialize, Serialize};

use crate::models::overview::{BreakdownRow, Overview};
use crate::models::range::DateRange;
use crate::models::settings::DEFAULT_CURRENCY_PREFIX;

/// KPI cards of a dashboard page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_bets: u64,
    pub total_profit: f64,
    pub green_percent: f64,
    pub yield_percent: f64,

    /// Calendar days in the selected period, both ends included
    pub days_in_period: Option<i64>,

    /// `total_profit / days_in_period`, when the period is known
    pub average_daily_profit: Option<f64>,
}

impl KpiSummary {
    pub fn from_overview(overview: &Overview, range: &DateRange) -> Self {
        let days_in_period = range.days_inclusive();
        Self {
            total_bets: overview.total_bets,
            total_profit: overview.total_profit,
            green_percent: overview.green_percent,
            yield_percent: overview.yield_percent,
            days_in_period,
            average_daily_profit: days_in_period.map(|days| overview.total_profit / days as f64),
        }
    }

    /// Caption of the average-per-day card.
    pub fn average_caption(&self) -> String {
        match self.days_in_period {
            Some(days) => format!("Lucro total dividido por {days} dia(s) do período."),
            None => "Defina um período para calcular.".to_string(),
        }
    }
}

/// Breakdown rows ordered by profit, best first. The input is left as is.
pub fn sorted_by_profit(rows: &[BreakdownRow]) -> Vec<BreakdownRow> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| b.profit.total_cmp(&a.profit));
    sorted
}

/// `R$ 1234.50` style money, two decimals.
pub fn format_money(value: f64) -> String {
    format_money_with(DEFAULT_CURRENCY_PREFIX, value)
}

pub fn format_money_with(prefix: &str, value: f64) -> String {
    format!("{prefix} {value:.2}")
}

/// `12.3 %` style percentage.
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$} %")
}
