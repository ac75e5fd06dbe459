// ── Auth session holder ──
//
// Tracks the signed-in session and publishes changes on a `watch`
// channel so gated views (favourites, protected data) can re-evaluate.

use atlas_api::Session;
use secrecy::SecretString;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::cancel::run_cancellable;
use crate::error::CoreError;
use crate::gateway::AuthGateway;
use crate::model::User;

pub struct SessionHolder<A> {
    auth: A,
    session: watch::Sender<Option<Session>>,
}

impl<A: AuthGateway> SessionHolder<A> {
    pub fn new(auth: A) -> Self {
        let (session, _) = watch::channel(None);
        Self { auth, session }
    }

    pub fn auth(&self) -> &A {
        &self.auth
    }

    pub async fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
        cancel: &CancellationToken,
    ) -> Result<User, CoreError> {
        let session = run_cancellable(cancel, self.auth.sign_in(email, password)).await?;
        let user = User::from(&session);
        info!(user = %user.id, "signed in");
        self.session.send_replace(Some(session));
        Ok(user)
    }

    /// Drop the local session and revoke it remotely.
    ///
    /// The local session is always cleared; a failed remote revoke is
    /// only logged.
    pub async fn sign_out(&self) {
        let Some(session) = self.session.send_replace(None) else {
            return;
        };
        match self.auth.sign_out(&session).await {
            Ok(()) => info!(user = %session.user.id, "signed out"),
            Err(e) => warn!(error = %e, "remote sign-out failed; local session cleared"),
        }
    }

    /// The signed-in user, if any. Does not contact the backend.
    pub fn current_user(&self) -> Option<User> {
        self.session.borrow().as_ref().map(User::from)
    }

    /// Ask the backend who the current token belongs to.
    pub async fn verify(&self, cancel: &CancellationToken) -> Result<User, CoreError> {
        let session = self.require("look up the current user")?;
        run_cancellable(cancel, self.auth.current_user(&session)).await
    }

    pub fn session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.borrow().is_some()
    }

    /// The session, or [`CoreError::NotSignedIn`] naming `action`.
    pub fn require(&self, action: &str) -> Result<Session, CoreError> {
        self.session().ok_or_else(|| CoreError::NotSignedIn {
            action: action.to_owned(),
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.session.subscribe()
    }
}
