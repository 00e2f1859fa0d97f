//! Human-friendly rendering of the widget state.

use chrono::Local;
use clima_core::{Config, ReadingView, ViewState, WeatherReading, WeatherWidget};

pub fn print_state(widget: &WeatherWidget, config: &Config) {
    match widget.state() {
        ViewState::Idle => {}
        ViewState::Loading => println!("Cargando..."),
        ViewState::Error(message) => eprintln!("Error: {message}"),
        ViewState::Ready(reading) => print!("{}", render_reading(reading, config)),
    }
}

pub fn print_suggestions(widget: &WeatherWidget) {
    for (i, suggestion) in widget.suggestions().iter().enumerate() {
        println!(
            "{:>2}. {}  ({:.2}, {:.2})",
            i + 1,
            suggestion.detailed_label(),
            suggestion.lat,
            suggestion.lon
        );
    }
}

fn render_reading(reading: &WeatherReading, config: &Config) -> String {
    let view = ReadingView::new(reading, config);

    let mut out = format!("\n{}  [{}]\n", view.heading, view.style);
    out.push_str(&format!("  Temperatura:  {}\n", view.temperature));
    out.push_str(&format!("  Humedad:      {}\n", view.humidity));
    out.push_str(&format!("  Descripción:  {}\n", view.description));
    out.push_str(&format!("  Viento:       {}\n", view.wind));
    out.push_str(&format!("  Icono:        {}\n", view.icon_url));

    if let Some(observed) = reading.observed_at {
        let local = observed.with_timezone(&Local);
        out.push_str(&format!("  Actualizado:  {}\n", local.format("%Y-%m-%d %H:%M")));
    }

    out
}
