//! Immutable snapshot of what the widget shows.
//!
//! Every fetch outcome is a transition that consumes the previous snapshot and
//! returns the next one, so the Idle → Loading → Success/Error cycle can be
//! tested without any I/O or rendering.

use crate::model::{CurrentConditions, ForecastDay};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    city: String,
    current: Option<CurrentConditions>,
    forecast: Vec<ForecastDay>,
    error: Option<String>,
    loading: bool,
}

impl AppState {
    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn current(&self) -> Option<&CurrentConditions> {
        self.current.as_ref()
    }

    pub fn forecast(&self) -> &[ForecastDay] {
        &self.forecast
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn status(&self) -> Status {
        if self.loading {
            Status::Loading
        } else if self.error.is_some() {
            Status::Error
        } else if self.current.is_some() {
            Status::Success
        } else {
            Status::Idle
        }
    }

    /// The text field changed.
    pub fn with_city(self, city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            ..self
        }
    }

    /// A current-conditions request started. Displayed data is kept until it resolves.
    pub fn loading(self) -> Self {
        Self {
            loading: true,
            ..self
        }
    }

    pub fn current_loaded(self, current: CurrentConditions) -> Self {
        Self {
            current: Some(current),
            error: None,
            loading: false,
            ..self
        }
    }

    /// Current conditions failed: show the message and drop everything displayed.
    pub fn current_failed(self, message: impl Into<String>) -> Self {
        Self {
            current: None,
            forecast: Vec::new(),
            error: Some(message.into()),
            loading: false,
            ..self
        }
    }

    pub fn forecast_loaded(self, forecast: Vec<ForecastDay>) -> Self {
        Self { forecast, ..self }
    }

    /// Forecast failures are invisible to the user; the previous forecast stays.
    pub fn forecast_failed(self) -> Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, Coordinates};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn paris() -> CurrentConditions {
        CurrentConditions {
            temperature_c: 18.4,
            humidity_pct: 60,
            wind_speed_mps: 3.6,
            description: "clear sky".into(),
            condition: Condition::Clear,
            icon: "01d".into(),
            place: "Paris".into(),
            country: "FR".into(),
            coordinates: Coordinates::new(48.85, 2.35),
        }
    }

    fn day() -> ForecastDay {
        ForecastDay {
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            temp_min_c: 10.0,
            temp_max_c: 20.0,
            condition: Condition::Rain,
            icon: "10d".into(),
        }
    }

    #[test]
    fn starts_idle() {
        let state = AppState::default();
        assert_eq!(state.status(), Status::Idle);
        assert!(state.current().is_none());
        assert!(state.forecast().is_empty());
        assert!(state.error().is_none());
    }

    #[test]
    fn loading_then_success() {
        let state = AppState::default().with_city("Paris").loading();
        assert_eq!(state.status(), Status::Loading);

        let state = state.current_loaded(paris());
        assert_eq!(state.status(), Status::Success);
        assert!(!state.is_loading());
        assert_eq!(state.city(), "Paris");
    }

    #[test]
    fn success_clears_previous_error() {
        let state = AppState::default()
            .current_failed("City not found")
            .loading()
            .current_loaded(paris());

        assert!(state.error().is_none());
        assert_eq!(state.status(), Status::Success);
    }

    #[test]
    fn failure_clears_current_and_forecast() {
        let state = AppState::default()
            .current_loaded(paris())
            .forecast_loaded(vec![day()])
            .loading()
            .current_failed("City not found");

        assert_eq!(state.status(), Status::Error);
        assert_eq!(state.error(), Some("City not found"));
        assert!(state.current().is_none());
        assert!(state.forecast().is_empty());
        assert!(!state.is_loading());
    }

    #[test]
    fn forecast_failure_leaves_everything_in_place() {
        let before = AppState::default()
            .current_loaded(paris())
            .forecast_loaded(vec![day()]);

        let after = before.clone().forecast_failed();

        assert_eq!(before, after);
    }

    #[test]
    fn forecast_replaced_wholesale() {
        let state = AppState::default()
            .forecast_loaded(vec![day(), day()])
            .forecast_loaded(vec![day()]);

        assert_eq!(state.forecast().len(), 1);
    }
}
