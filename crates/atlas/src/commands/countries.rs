//! Country directory command handlers.

use serde::Serialize;
use tabled::Tabled;
use tokio_util::sync::CancellationToken;

use atlas_core::view;
use atlas_core::{Atlas, Country, CoreError, ViewFilter, Weather, project};

use crate::cli::{CountriesArgs, CountriesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct CountryRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Capital")]
    capital: String,
    #[tabled(rename = "Population")]
    population: String,
}

impl From<&Country> for CountryRow {
    fn from(c: &Country) -> Self {
        Self {
            name: c.name.common.clone(),
            code: c.code.clone(),
            region: c.region.clone(),
            capital: c.first_capital().unwrap_or("-").to_owned(),
            population: util::group_thousands(c.population),
        }
    }
}

#[derive(Tabled)]
struct RegionRow {
    #[tabled(rename = "Region")]
    region: String,
}

// ── Detail view ─────────────────────────────────────────────────────

/// What `countries show` renders: the country plus its capital's
/// weather, when that could be fetched.
#[derive(Serialize)]
struct CountryDetail<'a> {
    #[serde(flatten)]
    country: &'a Country,
    weather: Option<Weather>,
}

fn detail(view: &CountryDetail<'_>, paint: Painter) -> String {
    let c = view.country;
    let region = match &c.subregion {
        Some(sub) => format!("{} / {sub}", c.region),
        None => c.region.clone(),
    };
    let capitals = if c.capitals.is_empty() {
        "None".to_owned()
    } else {
        c.capitals.join(", ")
    };

    let mut lines = vec![
        paint.heading(&c.name.common),
        format!("  {}{}", paint.label("Official"), c.name.official),
        format!("  {}{}", paint.label("Code"), c.code),
        format!("  {}{region}", paint.label("Region")),
        format!("  {}{capitals}", paint.label("Capital")),
        format!("  {}{}", paint.label("Population"), util::group_thousands(c.population)),
        format!("  {}{}", paint.label("Currencies"), c.currency_summary()),
        format!("  {}{}", paint.label("Languages"), c.language_summary()),
        format!(
            "  {}{} {}",
            paint.label("Flag"),
            c.flags.png,
            paint.muted(&format!("({})", c.flag_alt()))
        ),
    ];

    if let Some(w) = &view.weather {
        lines.push(String::new());
        lines.push(weather_block(w, paint));
    }
    lines.join("\n")
}

/// Shared with `atlas weather`.
pub(super) fn weather_block(w: &Weather, paint: Painter) -> String {
    [
        paint.heading(&format!("Weather in {}", w.city)),
        format!("  {}{}", paint.label("Conditions"), w.condition_summary()),
        format!("  {}{}", paint.label("Temperature"), w.temperature_summary()),
        format!("  {}{}%", paint.label("Humidity"), w.humidity_pct),
        format!("  {}{} hPa", paint.label("Pressure"), w.pressure_hpa),
        format!("  {}{} km/h", paint.label("Wind"), w.wind_kmh()),
    ]
    .join("\n")
}

fn empty_message(filter: &ViewFilter) -> String {
    let mut parts = Vec::new();
    if !filter.search.trim().is_empty() {
        parts.push(format!("search '{}'", filter.search));
    }
    if let Some(region) = filter.region.as_deref().filter(|r| !r.is_empty()) {
        parts.push(format!("region '{region}'"));
    }
    if parts.is_empty() {
        "No countries available".into()
    } else {
        format!("No countries match {}", parts.join(" and "))
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    atlas: &Atlas,
    args: CountriesArgs,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    let format = global.output();

    match args.command {
        CountriesCommand::List { search, region } => {
            let countries = util::load_countries(atlas, global, cancel).await?;
            let filter = ViewFilter::new(search.unwrap_or_default(), region);
            let projection = project(&countries, &filter);

            if projection.is_empty() {
                return output::print_empty(global, &empty_message(&filter));
            }

            let out = output::render_list(
                &format,
                &projection.visible,
                |c| CountryRow::from(*c),
                |c| c.name.common.clone(),
            )?;
            output::print_output(&out, global.quiet);
            if filter.is_active() {
                output::status(global, &projection.summary());
            }
            Ok(())
        }

        CountriesCommand::Regions => {
            let countries = util::load_countries(atlas, global, cancel).await?;
            let regions = view::regions(&countries);
            if regions.is_empty() {
                return output::print_empty(global, "No regions available");
            }

            let out = output::render_list(
                &format,
                &regions,
                |r| RegionRow { region: r.clone() },
                Clone::clone,
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CountriesCommand::Show { name, no_weather } => {
            let country = util::find_country(atlas, &name, global, cancel).await?;

            let weather = if no_weather {
                None
            } else {
                capital_weather(atlas, &country, global, cancel).await?
            };

            let paint = Painter::new(global);
            let view = CountryDetail {
                country: &country,
                weather,
            };
            let out = output::render_single(
                &format,
                &view,
                |d| detail(d, paint),
                |d| d.country.name.common.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

/// Weather for the first capital. Failures are reported on stderr and
/// leave the rest of the detail view intact; only cancellation aborts.
async fn capital_weather(
    atlas: &Atlas,
    country: &Country,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<Option<Weather>, CliError> {
    let _spinner = util::Spinner::start(global, "Fetching weather...");
    match atlas.weather_for(country, cancel).await {
        Ok(weather) => Ok(weather),
        Err(CoreError::Cancelled) => Err(CliError::Cancelled),
        Err(e) => {
            tracing::debug!(error = %e, country = %country.name.common, "weather lookup failed");
            output::status(global, &e.user_message("fetch weather data"));
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_names_active_filters() {
        assert_eq!(
            empty_message(&ViewFilter::new("zzz", Some("Europe".into()))),
            "No countries match search 'zzz' and region 'Europe'"
        );
        assert_eq!(
            empty_message(&ViewFilter::new("  ", Some("Antarctic".into()))),
            "No countries match region 'Antarctic'"
        );
        assert_eq!(empty_message(&ViewFilter::default()), "No countries available");
    }
}
