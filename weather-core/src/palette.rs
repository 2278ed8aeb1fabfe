//! Decorative styling for forecast cards.

use crate::{model::Condition, provider::openweather::icon_url};

pub const CLEAR: &str = "#f39c12";
pub const RAIN: &str = "#3498db";
pub const SNOW: &str = "#5dade2";
pub const CLOUDS: &str = "#95a5a6";
pub const FALLBACK: &str = "#7f8c8d";

/// Background color for a forecast card.
pub fn card_background(condition: &Condition) -> &'static str {
    match condition {
        Condition::Clear => CLEAR,
        Condition::Rain => RAIN,
        Condition::Snow => SNOW,
        Condition::Clouds => CLOUDS,
        Condition::Other(_) => FALLBACK,
    }
}

/// Same mapping for a raw keyword string.
pub fn keyword_background(keyword: &str) -> &'static str {
    card_background(&Condition::from(keyword))
}

/// Artwork drawn on a forecast card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardArt {
    Sun,
    Rain,
    Snow,
    /// Provider icon image URL.
    Icon(String),
}

pub fn card_art(condition: &Condition, icon: &str) -> CardArt {
    match condition {
        Condition::Clear => CardArt::Sun,
        Condition::Rain => CardArt::Rain,
        Condition::Snow => CardArt::Snow,
        Condition::Clouds | Condition::Other(_) => CardArt::Icon(icon_url(icon)),
    }
}

/// Parses `#rrggbb` into its components.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
