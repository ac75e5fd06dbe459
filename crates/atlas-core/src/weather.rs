// ── Weather lookups ──

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cancel::run_cancellable;
use crate::error::CoreError;
use crate::gateway::WeatherGateway;
use crate::model::{Country, Weather};

/// Current weather in the country's first capital.
///
/// Returns `Ok(None)` without a lookup when the country has no capital.
pub async fn weather_for_country<G: WeatherGateway>(
    gateway: &G,
    country: &Country,
    cancel: &CancellationToken,
) -> Result<Option<Weather>, CoreError> {
    let Some(capital) = country.first_capital() else {
        debug!(country = %country.name.common, "no capital, skipping weather lookup");
        return Ok(None);
    };
    weather_for_city(gateway, capital, cancel).await.map(Some)
}

pub async fn weather_for_city<G: WeatherGateway>(
    gateway: &G,
    city: &str,
    cancel: &CancellationToken,
) -> Result<Weather, CoreError> {
    if city.trim().is_empty() {
        return Err(CoreError::ValidationFailed {
            field: "city".into(),
            reason: "must not be empty".into(),
        });
    }
    run_cancellable(cancel, gateway.current(city)).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::model::country::fixtures::country;

    #[derive(Default)]
    struct FakeWeather {
        asked: Mutex<Vec<String>>,
    }

    impl WeatherGateway for FakeWeather {
        async fn current(&self, city: &str) -> Result<Weather, CoreError> {
            self.asked.lock().unwrap().push(city.to_owned());
            Ok(Weather {
                city: city.to_owned(),
                condition: None,
                temperature_c: 20.0,
                feels_like_c: 19.0,
                humidity_pct: 50,
                pressure_hpa: 1013,
                wind_speed_ms: 1.0,
            })
        }
    }

    #[tokio::test]
    async fn looks_up_first_capital() {
        let gw = FakeWeather::default();
        let mut c = country("South Africa", "ZAF", "Africa", Some("Pretoria"));
        c.capitals.push("Cape Town".into());

        let w = weather_for_country(&gw, &c, &CancellationToken::new()).await.unwrap().unwrap();

        assert_eq!(w.city, "Pretoria");
        assert_eq!(*gw.asked.lock().unwrap(), vec!["Pretoria".to_owned()]);
    }

    #[tokio::test]
    async fn no_capital_means_no_lookup() {
        let gw = FakeWeather::default();
        let c = country("Antarctica", "ATA", "Antarctic", None);

        let w = weather_for_country(&gw, &c, &CancellationToken::new()).await.unwrap();

        assert!(w.is_none());
        assert!(gw.asked.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_city_is_rejected() {
        let gw = FakeWeather::default();
        let err = weather_for_city(&gw, "  ", &CancellationToken::new()).await.unwrap_err();
        assert!(matches!(err, CoreError::ValidationFailed { .. }));
    }
}
