use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Profit closed on one calendar day, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyProfitPoint {
    pub date: NaiveDate,

    /// Net profit of the day
    #[serde(rename = "lucro")]
    pub profit: f64,
}

impl DailyProfitPoint {
    pub fn new(date: NaiveDate, profit: f64) -> Self {
        Self { date, profit }
    }
}

/// A daily point extended with the running total up to and including it.
///
/// Derived on every load; never sent back to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeProfitPoint {
    pub date: NaiveDate,
    pub profit: f64,
    pub cumulative: f64,
}
