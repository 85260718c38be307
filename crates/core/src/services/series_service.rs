use crate::models::series::{CumulativeProfitPoint, DailyProfitPoint};

/// Attach a running profit total to each point of a daily series.
///
/// Input order is taken as chronological and preserved; the series is not
/// re-sorted. Feeding the output back in is not supported (it would count
/// every day twice).
pub fn build_cumulative(series: &[DailyProfitPoint]) -> Vec<CumulativeProfitPoint> {
    let mut total = 0.0;
    series
        .iter()
        .map(|point| {
            total += point.profit;
            CumulativeProfitPoint {
                date: point.date,
                profit: point.profit,
                cumulative: total,
            }
        })
        .collect()
}

/// Sum of all daily profits, i.e. the last cumulative value.
pub fn total_profit(series: &[DailyProfitPoint]) -> f64 {
    series.iter().map(|p| p.profit).sum()
}
