//! Protected data command handlers.

use tabled::Tabled;
use tokio_util::sync::CancellationToken;

use atlas_core::{Atlas, NewProtectedRecord, ProtectedRecord};

use crate::cli::{GlobalOpts, ProtectedArgs, ProtectedCommand};
use crate::error::CliError;
use crate::output;

use super::util::Spinner;

#[derive(Tabled)]
struct ProtectedRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Active")]
    active: &'static str,
    #[tabled(rename = "Created")]
    created: String,
}

fn protected_row(r: &ProtectedRecord) -> ProtectedRow {
    ProtectedRow {
        id: r.id,
        name: r.name.clone(),
        description: r.description.clone().unwrap_or_default(),
        active: if r.is_active { "yes" } else { "no" },
        created: r.created_at.map_or_else(
            || "-".into(),
            |t| t.format("%Y-%m-%d %H:%M").to_string(),
        ),
    }
}

pub async fn handle(
    atlas: &Atlas,
    args: ProtectedArgs,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    let service = atlas.protected()?;

    let (records, empty_message) = match args.command {
        ProtectedCommand::List => {
            let _spinner = Spinner::start(global, "Loading protected data...");
            let records = service
                .list(cancel)
                .await
                .map_err(CliError::during("load protected data"))?;
            (records, "No protected records yet")
        }
        ProtectedCommand::Create { name, description } => {
            let record = NewProtectedRecord::new(name, description)?;
            let created = service
                .create(&record, cancel)
                .await
                .map_err(CliError::during("save protected data"))?;
            output::status(global, &format!("Created '{}'", record.name()));
            (created, "The backend returned no stored rows")
        }
    };

    if records.is_empty() {
        return output::print_empty(global, empty_message);
    }
    let out = output::render_list(
        &global.output(),
        &records,
        protected_row,
        |r| r.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
