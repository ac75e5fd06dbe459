//! Weather command handler.

use tokio_util::sync::CancellationToken;

use atlas_core::{Atlas, CoreError};

use crate::cli::{GlobalOpts, WeatherArgs};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::countries::weather_block;
use super::util::Spinner;

pub async fn handle(
    atlas: &Atlas,
    args: WeatherArgs,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    let weather = {
        let _spinner = Spinner::start(global, "Fetching weather...");
        atlas.weather_for_city(&args.city, cancel).await
    };

    let weather = match weather {
        Ok(w) => w,
        Err(CoreError::NotFound { .. }) => {
            return Err(CliError::NotFound {
                resource_type: "City".into(),
                identifier: args.city,
                hint: "Check the spelling, or try the capital shown by: atlas countries show <name>".into(),
            });
        }
        Err(e) => return Err(CliError::during("fetch weather data")(e)),
    };

    let paint = Painter::new(global);
    let out = output::render_single(
        &global.output(),
        &weather,
        |w| weather_block(w, paint),
        |w| w.condition_summary(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
