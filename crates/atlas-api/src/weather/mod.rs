// Current-weather API (OpenWeatherMap v2.5)
//
// One read-only endpoint keyed by city name. Auth: `appid` query param.

mod client;
pub mod types;

pub use client::{DEFAULT_BASE_URL, WeatherClient, icon_url};
