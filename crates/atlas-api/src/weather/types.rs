// Wire types for the current-weather endpoint. Only the fields the
// domain uses are decoded; everything else in the payload is ignored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResponse {
    #[serde(default)]
    pub weather: Vec<ConditionResponse>,
    pub main: MainResponse,
    pub wind: WindResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionResponse {
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainResponse {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u32,
    pub pressure: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindResponse {
    pub speed: f64,
}

/// Error body: `{"cod": "404", "message": "city not found"}`. `cod` is a
/// string on some errors and a number on others, so it is not decoded.
#[derive(Debug, Deserialize)]
pub(crate) struct WeatherErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
}
