//! Favourites command handlers.

use std::sync::Arc;

use serde::Serialize;
use tabled::Tabled;
use tokio_util::sync::CancellationToken;

use atlas_core::{Atlas, Country, CoreError, DisplayCountry, FavouriteStatus, FavouriteToggle};

use crate::cli::{FavouritesArgs, FavouritesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util::{self, Spinner};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct FavouriteRow {
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
    #[tabled(rename = "Source")]
    source: &'static str,
}

fn favourite_row(d: &DisplayCountry<'_>) -> FavouriteRow {
    let placeholder = d.is_placeholder();
    FavouriteRow {
        name: d.common_name().to_owned(),
        code: d.code().to_owned(),
        region: d.region().to_owned(),
        capital: d.first_capital().unwrap_or("-").to_owned(),
        population: if placeholder {
            "-".into()
        } else {
            util::group_thousands(d.population())
        },
        source: if placeholder { "stored" } else { "directory" },
    }
}

/// Result of add/remove/toggle.
#[derive(Serialize)]
struct FavouriteChange {
    country: String,
    status: FavouriteStatus,
    changed: bool,
}

impl FavouriteChange {
    fn message(&self) -> String {
        match (self.status, self.changed) {
            (FavouriteStatus::Favourite, true) => format!("Added {} to favourites", self.country),
            (FavouriteStatus::Favourite, false) => format!("{} is already a favourite", self.country),
            (_, true) => format!("Removed {} from favourites", self.country),
            (_, false) => format!("{} is not a favourite", self.country),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    atlas: &Atlas,
    args: FavouritesArgs,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    match args.command {
        FavouritesCommand::List => list(atlas, global, cancel).await,

        FavouritesCommand::Add { name } => {
            let country = util::find_country(atlas, &name, global, cancel).await?;
            let change = set(atlas, FavouriteToggle::new(&country), true, cancel)
                .await
                .map_err(CliError::during("add favourite"))?;
            print_change(global, &change)
        }

        FavouritesCommand::Remove { name } => {
            let records = {
                let _spinner = Spinner::start(global, "Loading favourites...");
                atlas
                    .favourites(cancel)
                    .await
                    .map_err(CliError::during("load favourites"))?
            };
            let needle = name.to_lowercase();
            let toggle = match records
                .records()
                .iter()
                .find(|r| r.country_name.to_lowercase() == needle)
            {
                Some(record) => FavouriteToggle::new(record),
                // Not stored: resolve the name so the no-op names the country.
                None => {
                    let country = util::find_country(atlas, &name, global, cancel).await?;
                    FavouriteToggle::new(&country)
                }
            };

            let change = set(atlas, toggle, false, cancel)
                .await
                .map_err(CliError::during("remove favourite"))?;
            print_change(global, &change)
        }

        FavouritesCommand::Toggle { name } => {
            let country = util::find_country(atlas, &name, global, cancel).await?;
            let backend = atlas.backend("update favourites")?;
            let mut toggle = FavouriteToggle::new(&country);
            let now = toggle
                .toggle(&backend, cancel)
                .await
                .map_err(CliError::during("update favourite"))?;
            print_change(
                global,
                &FavouriteChange {
                    country: country.name.common,
                    status: now.into(),
                    changed: true,
                },
            )
        }
    }
}

async fn list(atlas: &Atlas, global: &GlobalOpts, cancel: &CancellationToken) -> Result<(), CliError> {
    // Stored favourites still list (as placeholders) without the directory.
    let countries = match util::load_countries(atlas, global, cancel).await {
        Ok(countries) => countries,
        Err(CliError::Cancelled) => return Err(CliError::Cancelled),
        Err(e) => {
            tracing::warn!(error = %e, "country directory unavailable, showing stored favourites only");
            Arc::from(Vec::<Country>::new())
        }
    };

    let favourites = {
        let _spinner = Spinner::start(global, "Loading favourites...");
        atlas
            .favourites(cancel)
            .await
            .map_err(CliError::during("load favourites"))?
    };
    if favourites.is_empty() {
        return output::print_empty(global, "You have no favourites yet");
    }

    let rows = favourites.reconcile(&countries);
    let out = output::render_list(
        &global.output(),
        &rows,
        favourite_row,
        |d| d.common_name().to_owned(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Bring one country to the `desired` state, noting whether a backend
/// write happened.
async fn set(
    atlas: &Atlas,
    mut toggle: FavouriteToggle,
    desired: bool,
    cancel: &CancellationToken,
) -> Result<FavouriteChange, CoreError> {
    let backend = atlas.backend("update favourites")?;
    let before = toggle.refresh(&backend, cancel).await?;
    let now = toggle.set(&backend, desired, cancel).await?;
    Ok(FavouriteChange {
        country: toggle.country_name().to_owned(),
        status: now.into(),
        changed: before != now,
    })
}

fn print_change(global: &GlobalOpts, change: &FavouriteChange) -> Result<(), CliError> {
    let out = output::render_single(
        &global.output(),
        change,
        FavouriteChange::message,
        |c| <&'static str>::from(c.status).to_owned(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(status: FavouriteStatus, changed: bool) -> FavouriteChange {
        FavouriteChange {
            country: "Japan".into(),
            status,
            changed,
        }
    }

    #[test]
    fn change_messages() {
        assert_eq!(change(FavouriteStatus::Favourite, true).message(), "Added Japan to favourites");
        assert_eq!(
            change(FavouriteStatus::Favourite, false).message(),
            "Japan is already a favourite"
        );
        assert_eq!(
            change(FavouriteStatus::NotFavourite, true).message(),
            "Removed Japan from favourites"
        );
    }
}
