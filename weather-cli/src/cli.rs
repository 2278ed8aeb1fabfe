use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, InquireError, Password, PasswordDisplayMode, Text};
use weather_core::{
    Config, Coordinates, LocationResolver, WeatherApp, provider_from_config, resolver_from_config,
};

use crate::render;

const HERE_COMMAND: &str = ":here";
const QUIT_COMMAND: &str = ":quit";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather and 5-day forecast")]
pub struct Cli {
    /// Print without colors.
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key and an optional fixed location.
    Configure,

    /// Show weather for a city.
    Show {
        /// City name, e.g. "Paris".
        city: String,
    },

    /// Show weather for your current location.
    Here,

    /// Prompt for cities until you quit.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let plain = self.plain;

        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => {
                let mut app = build_app(plain)?;
                app.set_city(city);
                if app.search().await {
                    render::print_state(app.state(), plain);
                }
                Ok(())
            }
            Command::Here => {
                let config = Config::load()?;
                let resolver = resolver_from_config(&config.geolocation);
                let mut app = app_from_config(&config, plain)?;
                locate(&mut app, resolver.as_ref(), plain).await;
                Ok(())
            }
            Command::Interactive => interactive(plain).await,
        }
    }
}

fn build_app(plain: bool) -> anyhow::Result<WeatherApp> {
    let config = Config::load()?;
    app_from_config(&config, plain)
}

fn app_from_config(config: &Config, plain: bool) -> anyhow::Result<WeatherApp> {
    let provider = provider_from_config(config)?;
    let app = WeatherApp::new(provider);

    Ok(if plain {
        app
    } else {
        app.on_change(render::print_loading)
    })
}

async fn locate(app: &mut WeatherApp, resolver: &dyn LocationResolver, plain: bool) {
    match app.use_location(resolver).await {
        Ok(()) => render::print_state(app.state(), plain),
        Err(err) => eprintln!("{err}"),
    }
}

async fn interactive(plain: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let resolver = resolver_from_config(&config.geolocation);
    let mut app = app_from_config(&config, plain)?;

    loop {
        let input = Text::new("City:")
            .with_initial_value(app.state().city())
            .with_help_message("`:here` uses your location, `:quit` or Esc exits")
            .prompt();

        let input = match input {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city"),
        };

        match input.trim() {
            QUIT_COMMAND => break,
            HERE_COMMAND => locate(&mut app, resolver.as_ref(), plain).await,
            _ => {
                app.set_city(input);
                if app.search().await {
                    render::print_state(app.state(), plain);
                }
            }
        }
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);

    let pin = Confirm::new("Use a fixed location instead of IP lookup for `weather here`?")
        .with_default(config.geolocation.pinned().is_some())
        .prompt()
        .context("Failed to read answer")?;

    if pin {
        let lat = CustomType::<f64>::new("Latitude:")
            .with_error_message("Please enter a number, e.g. 48.85")
            .prompt()
            .context("Failed to read latitude")?;
        let lon = CustomType::<f64>::new("Longitude:")
            .with_error_message("Please enter a number, e.g. 2.35")
            .prompt()
            .context("Failed to read longitude")?;
        config.geolocation.pin(Coordinates::new(lat, lon));
    } else {
        config.geolocation.latitude = None;
        config.geolocation.longitude = None;
    }

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_show_with_plain_flag() {
        let cli = Cli::try_parse_from(["weather", "show", "Paris", "--plain"]).unwrap();
        assert!(cli.plain);
        assert!(matches!(cli.command, Command::Show { city } if city == "Paris"));
    }

    #[test]
    fn parses_here() {
        let cli = Cli::try_parse_from(["weather", "here"]).unwrap();
        assert!(matches!(cli.command, Command::Here));
    }
}
