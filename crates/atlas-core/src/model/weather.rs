// ── Current weather ──

use serde::{Deserialize, Serialize};

/// Current conditions for a city, metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub city: String,
    /// Primary condition; upstream may send none.
    pub condition: Option<Condition>,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u32,
    pub pressure_hpa: u32,
    /// Wind speed in m/s as reported upstream.
    pub wind_speed_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

impl Weather {
    /// Wind speed in km/h, rounded to the nearest integer.
    pub fn wind_kmh(&self) -> f64 {
        (self.wind_speed_ms * 3.6).round()
    }

    /// `"18°C (feels like 18°C)"`
    pub fn temperature_summary(&self) -> String {
        format!(
            "{:.0}°C (feels like {:.0}°C)",
            self.temperature_c.round(),
            self.feels_like_c.round()
        )
    }

    /// `"Clouds - broken clouds"`, or `"Unknown"` with no condition.
    pub fn condition_summary(&self) -> String {
        self.condition.as_ref().map_or_else(
            || "Unknown".to_owned(),
            |c| format!("{} - {}", c.main, c.description),
        )
    }

    pub fn icon_url(&self) -> Option<String> {
        self.condition
            .as_ref()
            .map(|c| atlas_api::weather::icon_url(&c.icon))
    }
}
