use anyhow::Context;
use clap::{Parser, Subcommand};
use clima_core::{
    Config, Units, WeatherWidget, provider::provider_from_config, widget::FetchTicket,
};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use std::fmt;

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "clima", version, about = "Weather lookup with city autocomplete")]
pub struct Cli {
    /// OpenWeather API key; overrides the stored one.
    #[arg(long, global = true, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Units system: metric, imperial or standard.
    #[arg(long, global = true)]
    pub units: Option<String>,

    /// Response language code, e.g. "es" or "en".
    #[arg(long, global = true)]
    pub lang: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and display preferences.
    Configure,

    /// Show current weather for a city name.
    Show {
        /// City name, e.g. "Madrid".
        city: String,
    },

    /// List autocomplete candidates for partial input.
    Suggest {
        text: String,
    },

    /// Look up candidates for `text` and show weather for the n-th one.
    Pick {
        text: String,

        /// 1-based position in the candidate list.
        n: usize,
    },

    /// Prompt for cities until an empty line or Esc.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let overrides = Overrides {
            api_key: self.api_key,
            units: self.units,
            lang: self.lang,
        };

        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(),
            Command::Show { city } => {
                let (mut widget, config) = overrides.open()?;

                widget.set_query(city);
                if let Some(ticket) = widget.begin_submit() {
                    output::print_state(&widget, &config);
                    widget.resolve(ticket).await;
                }
                output::print_state(&widget, &config);
                Ok(())
            }
            Command::Suggest { text } => {
                let (mut widget, _) = overrides.open()?;

                widget.input(text).await;
                output::print_suggestions(&widget);
                Ok(())
            }
            Command::Pick { text, n } => {
                let index = n.checked_sub(1).context("Position starts at 1")?;
                let (mut widget, config) = overrides.open()?;

                widget.input(text).await;
                if !widget.select_suggestion(index).await {
                    anyhow::bail!(
                        "No candidate #{n} for '{}' ({} found)",
                        widget.query(),
                        widget.suggestions().len()
                    );
                }
                output::print_state(&widget, &config);
                Ok(())
            }
            Command::Interactive => {
                let (mut widget, config) = overrides.open()?;
                interactive(&mut widget, &config).await
            }
        }
    }
}

/// Command-line values layered on top of the stored config.
#[derive(Debug, Default)]
struct Overrides {
    api_key: Option<String>,
    units: Option<String>,
    lang: Option<String>,
}

impl Overrides {
    fn apply(self, config: Config) -> anyhow::Result<Config> {
        let mut config = config.with_api_key(self.api_key);

        if let Some(units) = self.units {
            config.units = Units::try_from(units.as_str())?;
        }
        if let Some(lang) = self.lang.filter(|l| !l.trim().is_empty()) {
            config.lang = lang;
        }

        Ok(config)
    }

    fn open(self) -> anyhow::Result<(WeatherWidget, Config)> {
        let key_source = if self.api_key.is_some() { "flag/env" } else { "config file" };
        let config = self.apply(Config::load()?)?;
        tracing::debug!(
            api_key_from = key_source,
            units = %config.units,
            lang = %config.lang,
            "Resolved configuration"
        );

        let provider = provider_from_config(&config)?;

        Ok((WeatherWidget::new(provider, &config), config))
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    config.api_key = Some(api_key.trim().to_string());

    config.units = Select::new("Units:", Units::all().to_vec()).prompt()?;

    let lang = Text::new("Language code:")
        .with_default(&config.lang)
        .prompt()?;
    config.lang = lang.trim().to_string();

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

/// One row of the suggestion picker.
#[derive(Debug, Clone, PartialEq)]
enum Choice {
    Suggestion(usize, String),
    ByName(String),
}

impl Choice {
    /// Every current suggestion followed by a plain search for the typed text.
    fn for_widget(widget: &WeatherWidget) -> Vec<Choice> {
        let mut choices: Vec<Choice> = widget
            .suggestions()
            .iter()
            .enumerate()
            .map(|(i, s)| Choice::Suggestion(i, s.detailed_label()))
            .collect();
        choices.push(Choice::ByName(widget.query().trim().to_string()));
        choices
    }

    fn begin(&self, widget: &mut WeatherWidget) -> Option<FetchTicket> {
        match self {
            Choice::Suggestion(index, _) => widget.begin_select(*index),
            Choice::ByName(_) => widget.begin_submit(),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Suggestion(_, label) => f.write_str(label),
            Choice::ByName(text) => write!(f, "Buscar \"{text}\""),
        }
    }
}

async fn interactive(widget: &mut WeatherWidget, config: &Config) -> anyhow::Result<()> {
    loop {
        let Some(text) = Text::new("Ciudad:")
            .with_placeholder("Ingresa la ciudad...")
            .prompt_skippable()?
        else {
            break;
        };
        if text.trim().is_empty() {
            break;
        }

        widget.input(text).await;

        let ticket = if widget.suggestions_visible() {
            let choices = Choice::for_widget(widget);
            match Select::new("Sugerencias:", choices).prompt_skippable()? {
                Some(choice) => choice.begin(widget),
                None => continue,
            }
        } else {
            widget.begin_submit()
        };

        if let Some(ticket) = ticket {
            output::print_state(widget, config);
            widget.resolve(ticket).await;
        }
        output::print_state(widget, config);
    }

    Ok(())
}
