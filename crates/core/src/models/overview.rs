use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use super::series::DailyProfitPoint;

/// Headline KPIs for a period, aggregated by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overview {
    /// Number of entries (operations) in the period
    #[serde(rename = "totalApostas", deserialize_with = "count")]
    pub total_bets: u64,

    /// Consolidated profit
    #[serde(rename = "totalLucro")]
    pub total_profit: f64,

    /// Share of entries that closed positive, in percent
    #[serde(rename = "greenPercent")]
    pub green_percent: f64,

    /// Profit over total stake, in percent
    #[serde(rename = "yieldPercent")]
    pub yield_percent: f64,
}

/// One row of a per-operator, per-house or per-sport table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakdownRow {
    /// Operator, house or sport name, depending on the table
    #[serde(alias = "operador", alias = "casa", alias = "esporte")]
    pub name: String,

    #[serde(rename = "entradas", deserialize_with = "count")]
    pub entries: u64,

    pub stake_total: f64,

    #[serde(rename = "lucro")]
    pub profit: f64,

    pub yield_percent: f64,
}

impl BreakdownRow {
    /// Rows in the red are highlighted.
    pub fn is_negative(&self) -> bool {
        self.profit < 0.0
    }
}

/// Response of `GET /api/dashboard/overview-all`: every sheet consolidated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralOverview {
    #[serde(default)]
    pub overview: Option<Overview>,

    #[serde(rename = "porOperador", default, deserialize_with = "null_as_default")]
    pub by_operator: Vec<BreakdownRow>,

    #[serde(rename = "lucroPorDia", default, deserialize_with = "null_as_default")]
    pub daily_profit: Vec<DailyProfitPoint>,
}

/// Response of `GET /api/dashboard/overview`: a single operator's sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetOverview {
    #[serde(default)]
    pub overview: Option<Overview>,

    #[serde(rename = "porCasa", default, deserialize_with = "null_as_default")]
    pub by_house: Vec<BreakdownRow>,

    #[serde(rename = "porEsporte", default, deserialize_with = "null_as_default")]
    pub by_sport: Vec<BreakdownRow>,

    #[serde(rename = "lucroPorDia", default, deserialize_with = "null_as_default")]
    pub daily_profit: Vec<DailyProfitPoint>,
}

/// Anything a dashboard page loads: KPIs plus the per-day profit series.
pub trait DashboardData {
    fn overview(&self) -> Option<&Overview>;
    fn daily_profit(&self) -> &[DailyProfitPoint];
}

impl DashboardData for GeneralOverview {
    fn overview(&self) -> Option<&Overview> {
        self.overview.as_ref()
    }

    fn daily_profit(&self) -> &[DailyProfitPoint] {
        &self.daily_profit
    }
}

impl DashboardData for SheetOverview {
    fn overview(&self) -> Option<&Overview> {
        self.overview.as_ref()
    }

    fn daily_profit(&self) -> &[DailyProfitPoint] {
        &self.daily_profit
    }
}

// `null` and a missing key both mean "empty" for list fields.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Counts come from SQL aggregates and may be serialized as strings
// (`"12"`) instead of numbers. `null` counts as zero.
fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCount {
        Int(u64),
        Float(f64),
        Text(String),
    }

    match Option::<RawCount>::deserialize(deserializer)? {
        None => Ok(0),
        Some(RawCount::Int(n)) => Ok(n),
        Some(RawCount::Float(f)) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => {
            Ok(f as u64)
        }
        Some(RawCount::Float(f)) => Err(D::Error::custom(format!("invalid count {f}"))),
        Some(RawCount::Text(s)) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| D::Error::custom(format!("invalid count '{s}'"))),
    }
}
