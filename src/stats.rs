use crate::models::{MONTHS, MonthlySeries, Station};
use serde::{Deserialize, Serialize};

/// Yearly aggregates shown next to the diagram.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    /// Arithmetic mean of the monthly temperatures.
    pub mean_temperature: f64,
    /// Sum of the monthly precipitation.
    pub total_precipitation: f64,
    pub temperature_label: String,
    pub precipitation_label: String,
    /// `"Name (123 m)"`, when a station is known.
    pub location_label: Option<String>,
}

/// Compute the aggregates and their labels.
pub fn summarize(
    temps: &MonthlySeries,
    precs: &MonthlySeries,
    station: Option<&Station>,
) -> Summary {
    // Divide per month so twelve huge values can't overflow the mean.
    let mean_temperature = temps.iter().map(|t| t / MONTHS as f64).sum::<f64>();
    let total_precipitation = precs.iter().sum::<f64>().clamp(-f64::MAX, f64::MAX);
    Summary {
        mean_temperature,
        total_precipitation,
        temperature_label: format!("{}°C", fmt_number(mean_temperature)),
        precipitation_label: format!("{} mm", fmt_number(total_precipitation)),
        location_label: station.map(location_label),
    }
}

pub fn location_label(station: &Station) -> String {
    format!("{} ({} m)", station.name, station.elevation_m)
}

/// Up to 4 decimals, trailing zeros and a trailing dot trimmed.
pub fn fmt_number(v: f64) -> String {
    let s = format!("{:.4}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}
