//! Reduces the provider's 3-hour forecast to one sample per day.

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use std::collections::HashSet;

use crate::model::{Condition, ForecastDay};

const LABEL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single 3-hour interval as reported by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSlot {
    pub dt: i64,
    /// Provider's timestamp label, e.g. `2024-05-01 12:00:00`.
    pub label: String,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub condition: Condition,
    pub icon: String,
}

/// Keeps the slots labelled noon, first one wins for a given date.
/// Slots with an unreadable label are dropped. Input order is preserved.
pub fn daily_at_noon(slots: impl IntoIterator<Item = ForecastSlot>) -> Vec<ForecastDay> {
    let mut seen = HashSet::new();

    slots
        .into_iter()
        .filter_map(|slot| {
            let labelled = match NaiveDateTime::parse_from_str(&slot.label, LABEL_FORMAT) {
                Ok(ndt) => ndt,
                Err(err) => {
                    tracing::debug!(label = %slot.label, %err, "skipping forecast slot");
                    return None;
                }
            };

            if !is_noon(&labelled) || !seen.insert(labelled.date()) {
                return None;
            }

            let timestamp =
                DateTime::<Utc>::from_timestamp(slot.dt, 0).unwrap_or_else(|| labelled.and_utc());

            Some(ForecastDay {
                timestamp,
                date: labelled.date(),
                temp_min_c: slot.temp_min_c,
                temp_max_c: slot.temp_max_c,
                condition: slot.condition,
                icon: slot.icon,
            })
        })
        .collect()
}

fn is_noon(labelled: &NaiveDateTime) -> bool {
    labelled.hour() == 12 && labelled.minute() == 0 && labelled.second() == 0
}
