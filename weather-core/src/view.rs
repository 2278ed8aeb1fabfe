//! Plain-text rendering of an [`AppState`].

use std::fmt::Write as _;

use crate::{
    model::{CurrentConditions, ForecastDay, round_celsius},
    palette::{CardArt, card_art, card_background},
    state::AppState,
};

pub const LOADING: &str = "Loading...";
pub const EMPTY_HINT: &str = "Enter a city, or use your current location.";
pub const FORECAST_TITLE: &str = "5-Day Forecast";

/// One forecast card, ready to paint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub weekday: String,
    pub art: CardArt,
    pub temperatures: String,
    pub background: &'static str,
}

impl Card {
    pub fn from_day(day: &ForecastDay) -> Self {
        Self {
            weekday: day.date.format("%a").to_string(),
            art: card_art(&day.condition, &day.icon),
            temperatures: format!(
                "{}°C / {}°C",
                round_celsius(day.temp_min_c),
                round_celsius(day.temp_max_c)
            ),
            background: card_background(&day.condition),
        }
    }

    pub fn art_label(&self) -> &str {
        match &self.art {
            CardArt::Sun => "☀",
            CardArt::Rain => "🌧",
            CardArt::Snow => "❄",
            CardArt::Icon(url) => url,
        }
    }
}

/// Lines describing the current conditions block.
pub fn current_lines(current: &CurrentConditions) -> Vec<String> {
    vec![
        format!("{}°C", current.display_temperature()),
        capitalize_words(&current.description),
        format!(
            "💧 {}% | 💨 {} m/s",
            current.humidity_pct, current.wind_speed_mps
        ),
        format!("📍 {}, {}", current.place, current.country),
    ]
}

pub fn cards(state: &AppState) -> Vec<Card> {
    state.forecast().iter().map(Card::from_day).collect()
}

/// Renders every section that applies to `state`, without colors.
pub fn render(state: &AppState) -> String {
    let mut out = String::new();

    if state.is_loading() {
        let _ = writeln!(out, "{LOADING}");
    }
    if let Some(error) = state.error() {
        let _ = writeln!(out, "{error}");
    }

    match state.current() {
        Some(current) => {
            for line in current_lines(current) {
                let _ = writeln!(out, "{line}");
            }
        }
        None if !state.is_loading() && state.error().is_none() => {
            let _ = writeln!(out, "{EMPTY_HINT}");
        }
        None => {}
    }

    let cards = cards(state);
    if !cards.is_empty() {
        let _ = writeln!(out, "\n{FORECAST_TITLE}");
        for card in &cards {
            let _ = writeln!(
                out,
                "{}  {}  {}  [{}]",
                card.weekday,
                card.art_label(),
                card.temperatures,
                card.background
            );
        }
    }

    out
}

/// Upper-cases the first letter of each word: `clear sky` → `Clear Sky`.
pub fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
