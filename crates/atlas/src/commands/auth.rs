//! Auth command handlers.

use tokio_util::sync::CancellationToken;

use atlas_core::{Atlas, User};

use crate::cli::{AuthArgs, AuthCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Painter};

fn detail(user: &User, paint: Painter) -> String {
    [
        paint.heading("Signed in"),
        format!("  {}{}", paint.label("User ID"), user.id),
        format!(
            "  {}{}",
            paint.label("Email"),
            user.email.as_deref().unwrap_or("-")
        ),
    ]
    .join("\n")
}

pub async fn handle(
    atlas: &Atlas,
    args: AuthArgs,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    match args.command {
        AuthCommand::Whoami => {
            let user = atlas
                .session()?
                .verify(cancel)
                .await
                .map_err(CliError::during("verify the session"))?;

            let paint = Painter::new(global);
            let out = output::render_single(
                &global.output(),
                &user,
                |u| detail(u, paint),
                |u| u.email.clone().unwrap_or_else(|| u.id.to_string()),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
