use crossterm::style::{Color, Stylize};
use weather_core::{AppState, palette, view};

/// Prints `state` with colored forecast cards, or as plain text.
pub fn print_state(state: &AppState, plain: bool) {
    if plain {
        print!("{}", view::render(state));
        return;
    }

    if let Some(error) = state.error() {
        println!("{}", error.red());
    }

    match state.current() {
        Some(current) => {
            let mut lines = view::current_lines(current).into_iter();
            if let Some(temperature) = lines.next() {
                println!("{}", temperature.bold());
            }
            for line in lines {
                println!("{line}");
            }
        }
        None if state.error().is_none() => println!("{}", view::EMPTY_HINT.dim()),
        None => {}
    }

    let cards = view::cards(state);
    if cards.is_empty() {
        return;
    }

    println!("\n{}", view::FORECAST_TITLE.bold());
    for card in cards {
        let text = format!(
            " {:<4} {:<2} {} ",
            card.weekday,
            art_glyph(&card),
            card.temperatures
        );
        println!("{}", text.with(Color::White).on(card_color(card.background)));
    }
}

/// Loading line shown while a request is in flight.
pub fn print_loading(state: &AppState) {
    if state.is_loading() {
        println!("{}", view::LOADING.italic());
    }
}

fn art_glyph(card: &view::Card) -> &str {
    match card.art {
        palette::CardArt::Icon(_) => "🖼",
        _ => card.art_label(),
    }
}

fn card_color(hex: &str) -> Color {
    palette::hex_to_rgb(hex)
        .map(|(r, g, b)| Color::Rgb { r, g, b })
        .unwrap_or(Color::DarkGrey)
}
