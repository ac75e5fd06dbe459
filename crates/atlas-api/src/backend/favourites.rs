// Favourites table endpoints.
//
// Rows are scoped to the signed-in user by the backend's row-level
// security policy; no owner filter is sent from here.

use reqwest::Method;
use serde::de::IgnoredAny;

use super::client::{BackendClient, Session};
use super::types::{FavouriteRow, NewFavouriteRow};
use crate::error::Error;

const TABLE: &str = "rest/v1/favorites";

impl BackendClient {
    /// All of the user's favourites, oldest first.
    pub async fn list_favourites(&self, session: &Session) -> Result<Vec<FavouriteRow>, Error> {
        let req = self
            .request(Method::GET, TABLE, Some(session))?
            .query(&[("select", "*"), ("order", "created_at.asc")]);
        self.send(req).await
    }

    /// Whether a favourite row exists for the given country name.
    pub async fn favourite_exists(
        &self,
        session: &Session,
        country_name: &str,
    ) -> Result<bool, Error> {
        let req = self
            .request(Method::GET, TABLE, Some(session))?
            .query(&[
                ("select", "id".to_owned()),
                ("country_name", format!("eq.{country_name}")),
                ("limit", "1".to_owned()),
            ]);
        let rows: Vec<IgnoredAny> = self.send(req).await?;
        Ok(!rows.is_empty())
    }

    /// Insert a favourite and return the stored row.
    pub async fn insert_favourite(
        &self,
        session: &Session,
        row: &NewFavouriteRow,
    ) -> Result<FavouriteRow, Error> {
        let req = self
            .request(Method::POST, TABLE, Some(session))?
            .header("Prefer", "return=representation")
            .json(row);
        let mut rows: Vec<FavouriteRow> = self.send(req).await?;
        rows.pop().ok_or_else(|| Error::Deserialization {
            message: "insert returned no rows".into(),
            body: String::new(),
        })
    }

    /// Delete the favourite row(s) for the given country name.
    pub async fn delete_favourite(&self, session: &Session, country_name: &str) -> Result<(), Error> {
        let req = self
            .request(Method::DELETE, TABLE, Some(session))?
            .query(&[("country_name", format!("eq.{country_name}"))]);
        self.send_empty(req).await
    }
}
