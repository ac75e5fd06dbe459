// ── Protected data ──
//
// Thin service over the protected-data gateway. Rows are owned and
// filtered by the backend; nothing is derived locally.

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::cancel::run_cancellable;
use crate::error::CoreError;
use crate::gateway::ProtectedDataGateway;
use crate::model::{NewProtectedRecord, ProtectedRecord};

pub struct ProtectedData<G> {
    gateway: G,
}

impl<G: ProtectedDataGateway> ProtectedData<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, cancel: &CancellationToken) -> Result<Vec<ProtectedRecord>, CoreError> {
        let rows = run_cancellable(cancel, self.gateway.list())
            .await
            .inspect_err(|e| warn!(error = %e, "failed to list protected data"))?;
        debug!(count = rows.len(), "protected data loaded");
        Ok(rows)
    }

    /// Insert one record and return what the backend stored.
    pub async fn create(
        &self,
        record: &NewProtectedRecord,
        cancel: &CancellationToken,
    ) -> Result<Vec<ProtectedRecord>, CoreError> {
        run_cancellable(cancel, self.gateway.create(record))
            .await
            .inspect_err(|e| warn!(name = record.name(), error = %e, "failed to create protected data"))
    }
}
