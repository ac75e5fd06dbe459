// ── Cancellation helpers ──

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::CoreError;

/// Drive `fut` unless `cancel` fires first.
///
/// A result that completes after cancellation was requested is
/// discarded, so callers never publish work the user abandoned.
pub async fn run_cancellable<T, F>(cancel: &CancellationToken, fut: F) -> Result<T, CoreError>
where
    F: Future<Output = Result<T, CoreError>>,
{
    let out = tokio::select! {
        biased;
        () = cancel.cancelled() => return Err(CoreError::Cancelled),
        out = fut => out,
    };
    if cancel.is_cancelled() {
        return Err(CoreError::Cancelled);
    }
    out
}
