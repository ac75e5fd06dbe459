// Protected data table endpoints.

use reqwest::Method;

use super::client::{BackendClient, Session};
use super::types::{NewProtectedRow, ProtectedRow};
use crate::error::Error;

const TABLE: &str = "rest/v1/protected_data";

impl BackendClient {
    /// Every protected row visible to the session.
    pub async fn list_protected(&self, session: &Session) -> Result<Vec<ProtectedRow>, Error> {
        let req = self
            .request(Method::GET, TABLE, Some(session))?
            .query(&[("select", "*")]);
        self.send(req).await
    }

    /// Insert a protected row and return what the backend stored.
    pub async fn insert_protected(
        &self,
        session: &Session,
        row: &NewProtectedRow,
    ) -> Result<Vec<ProtectedRow>, Error> {
        let req = self
            .request(Method::POST, TABLE, Some(session))?
            .header("Prefer", "return=representation")
            .json(&[row]);
        self.send(req).await
    }
}
