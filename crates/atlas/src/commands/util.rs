//! Shared helpers for command handlers.

use std::io::{self, IsTerminal};
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;

use atlas_core::{Atlas, Country};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Stderr spinner shown while a request is in flight. Cleared on drop;
/// a no-op when quiet or when stderr is not a terminal.
pub struct Spinner(Option<ProgressBar>);

impl Spinner {
    pub fn start(global: &GlobalOpts, message: &str) -> Self {
        if global.quiet || !io::stderr().is_terminal() {
            return Self(None);
        }
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(message.to_owned());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self(Some(bar))
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(bar) = self.0.take() {
            bar.finish_and_clear();
        }
    }
}

/// Load the country directory behind a spinner.
pub async fn load_countries(
    atlas: &Atlas,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<Arc<[Country]>, CliError> {
    let _spinner = Spinner::start(global, "Loading countries...");
    atlas
        .countries(cancel)
        .await
        .map_err(CliError::during("load countries"))
}

/// Look one country up by common name (case-insensitive).
pub async fn find_country(
    atlas: &Atlas,
    name: &str,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<Country, CliError> {
    let _spinner = Spinner::start(global, "Loading countries...");
    atlas
        .country(name, cancel)
        .await
        .map_err(CliError::during("load countries"))
}

/// `67391582` -> `"67,391,582"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(67_391_582), "67,391,582");
    }
}
