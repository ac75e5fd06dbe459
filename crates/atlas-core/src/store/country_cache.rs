// ── Load-once country cache ──
//
// State lives in a `watch` channel: the claim that turns Idle/Failed
// into Loading is a single `send_if_modified`, so exactly one caller
// fetches while every concurrent caller waits on the same channel for
// the outcome.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cancel::run_cancellable;
use crate::convert::dedupe_by_code;
use crate::error::CoreError;
use crate::gateway::CountryGateway;
use crate::model::Country;

const LOAD_ACTION: &str = "load countries";

/// Lifecycle of the cached directory.
#[derive(Debug, Clone, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum CacheState {
    Idle,
    Loading,
    /// Upstream order, unique codes.
    Loaded(Arc<[Country]>),
    /// User-facing failure message.
    Failed(String),
}

impl CacheState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    fn name(&self) -> &'static str {
        self.into()
    }
}

/// Fetches the country directory at most once per successful load and
/// serves it to every reader.
pub struct CountryCache<G> {
    gateway: G,
    state: watch::Sender<CacheState>,
}

impl<G: CountryGateway> CountryCache<G> {
    pub fn new(gateway: G) -> Self {
        let (state, _) = watch::channel(CacheState::Idle);
        Self { gateway, state }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Current state snapshot.
    pub fn state(&self) -> CacheState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state transition.
    pub fn subscribe(&self) -> watch::Receiver<CacheState> {
        self.state.subscribe()
    }

    /// The loaded list, or an empty one in any other state.
    pub fn countries(&self) -> Arc<[Country]> {
        match &*self.state.borrow() {
            CacheState::Loaded(list) => Arc::clone(list),
            _ => Arc::from(Vec::new()),
        }
    }

    /// Case-insensitive lookup by common name in the loaded list.
    pub fn find_by_name(&self, name: &str) -> Option<Country> {
        self.countries().iter().find(|c| c.has_name(name)).cloned()
    }

    /// Make sure the directory is loaded and return the resulting state.
    ///
    /// A non-empty loaded list is returned as-is. If another caller is
    /// already loading, this waits for that load instead of starting a
    /// second fetch. Failure is reported as [`CacheState::Failed`], not
    /// as an `Err`; cancelling the caller that is fetching puts the
    /// cache back to [`CacheState::Idle`].
    pub async fn load(&self, cancel: &CancellationToken) -> CacheState {
        loop {
            let mut claimed = false;
            self.state.send_if_modified(|state| match state {
                CacheState::Loading => false,
                CacheState::Loaded(list) if !list.is_empty() => false,
                _ => {
                    *state = CacheState::Loading;
                    claimed = true;
                    true
                }
            });

            if claimed {
                return self.fetch(cancel).await;
            }

            let current = self.state();
            if !current.is_loading() {
                return current;
            }

            debug!("country load already in flight, waiting");
            let mut rx = self.state.subscribe();
            let settled = async {
                rx.wait_for(|s| !s.is_loading()).await.map(|_| ())
            };
            tokio::select! {
                biased;
                () = cancel.cancelled() => return self.state(),
                res = settled => {
                    if res.is_err() {
                        return self.state();
                    }
                }
            }

            // Idle here means the fetching caller was cancelled; go
            // around and try to claim the load.
            let outcome = self.state();
            if outcome != CacheState::Idle {
                return outcome;
            }
        }
    }

    async fn fetch(&self, cancel: &CancellationToken) -> CacheState {
        let mut guard = ResetOnDrop {
            state: &self.state,
            armed: true,
        };

        let next = match run_cancellable(cancel, self.gateway.fetch_all()).await {
            Ok(list) => {
                let list = dedupe_by_code(list);
                info!(count = list.len(), "country directory loaded");
                CacheState::Loaded(list.into())
            }
            Err(CoreError::Cancelled) => {
                debug!("country load cancelled");
                CacheState::Idle
            }
            Err(e) => {
                warn!(error = %e, "country load failed");
                CacheState::Failed(e.user_message(LOAD_ACTION))
            }
        };

        guard.armed = false;
        debug!(state = next.name(), "country cache transition");
        self.state.send_replace(next.clone());
        next
    }
}

/// Puts the cache back to Idle if a fetch is dropped before it settles.
struct ResetOnDrop<'a> {
    state: &'a watch::Sender<CacheState>,
    armed: bool,
}

impl Drop for ResetOnDrop<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state.send_replace(CacheState::Idle);
        }
    }
}
