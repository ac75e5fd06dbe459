// Token auth endpoints (password grant, logout, current user).

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::debug;

use super::client::{BackendClient, Session};
use super::types::{TokenResponse, UserResponse};
use crate::error::Error;

impl BackendClient {
    /// Sign in with email + password.
    ///
    /// Any 4xx from the token endpoint is reported as
    /// [`Error::Authentication`] with the service's message.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Session, Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            email: &'a str,
            password: &'a str,
        }

        let req = self
            .request(Method::POST, "auth/v1/token", None)?
            .query(&[("grant_type", "password")])
            .json(&Body {
                email,
                password: password.expose_secret(),
            });

        let token: TokenResponse = match self.send(req).await {
            Ok(token) => token,
            Err(Error::Backend {
                status: 400..=499,
                message,
                ..
            }) => return Err(Error::Authentication { message }),
            Err(e) => return Err(e),
        };

        debug!(user = %token.user.id, "signed in");
        Ok(Session {
            access_token: SecretString::from(token.access_token),
            refresh_token: token.refresh_token.map(SecretString::from),
            expires_in: token.expires_in,
            user: token.user,
        })
    }

    /// Revoke the session's tokens.
    pub async fn sign_out(&self, session: &Session) -> Result<(), Error> {
        let req = self.request(Method::POST, "auth/v1/logout", Some(session))?;
        self.send_empty(req).await?;
        debug!(user = %session.user.id, "signed out");
        Ok(())
    }

    /// Fetch the user the session belongs to (validates the token).
    pub async fn current_user(&self, session: &Session) -> Result<UserResponse, Error> {
        let req = self.request(Method::GET, "auth/v1/user", Some(session))?;
        self.send(req).await
    }
}
