use chrono::{Datelike, Days, NaiveDate};

use crate::models::range::{DateRange, PresetTag};

/// Resolve a period preset against `today`.
///
/// - `Daily`: today only.
/// - `Last7Days`: the 7 days ending today, both ends included.
/// - `Monthly`: first day of today's month up to today.
/// - `Custom`: `existing_custom`, untouched (bounds may be absent).
pub fn compute_range(preset: PresetTag, today: NaiveDate, existing_custom: DateRange) -> DateRange {
    match preset {
        PresetTag::Daily => DateRange::single_day(today),
        PresetTag::Last7Days => {
            let from = today.checked_sub_days(Days::new(6)).unwrap_or(NaiveDate::MIN);
            DateRange::new(from, today)
        }
        PresetTag::Monthly => {
            // Day 1 exists in every month, `with_day` cannot fail here.
            let from = today.with_day(1).unwrap_or(today);
            DateRange::new(from, today)
        }
        PresetTag::Custom => existing_custom,
    }
}

/// Today's date in the operator's local time zone, which is what the
/// period presets are defined against.
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
