//! Shared authentication state and its lifecycle
//!
//! [`AuthStateManager`] owns the single [`AuthState`] snapshot. Views hold an
//! [`AuthHandle`] issued by the manager, read the snapshot through it and get
//! woken whenever a refresh or sign-out replaces it.
//!
//! Every write replaces the whole snapshot through a `watch` channel, so a
//! subscriber never observes a half-updated state. Refreshes are tagged with a
//! generation number taken under the channel lock; a refresh that resolves after
//! a newer refresh (or a sign-out) has started is dropped instead of published.

use crate::config::{ManagerConfig, MissingProfilePolicy};
use crate::error::{AuthError, Result};
use crate::provider::{Navigator, ProfileStore, SessionProvider};
use crate::types::{AuthState, Identity, Profile, UserInfo};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Owner of the shared authentication state
pub struct AuthStateManager {
    session: Arc<dyn SessionProvider>,
    profiles: Arc<dyn ProfileStore>,
    navigator: Arc<dyn Navigator>,
    config: ManagerConfig,
    state: watch::Sender<AuthState>,
    generation: AtomicU64,
    scope: CancellationToken,
}

impl AuthStateManager {
    /// Create a manager in the initial loading state.
    ///
    /// Nothing is fetched until [`refresh_auth`](Self::refresh_auth) runs; use
    /// [`spawn`](Self::spawn) to start the initial load on the tokio runtime.
    pub fn new(
        session: Arc<dyn SessionProvider>,
        profiles: Arc<dyn ProfileStore>,
        navigator: Arc<dyn Navigator>,
        config: ManagerConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            session,
            profiles,
            navigator,
            config,
            state: watch::Sender::new(AuthState::initial()),
            generation: AtomicU64::new(0),
            scope: CancellationToken::new(),
        })
    }

    /// Create a manager and kick off the initial load in the background
    #[cfg(not(target_arch = "wasm32"))]
    pub fn spawn(
        session: Arc<dyn SessionProvider>,
        profiles: Arc<dyn ProfileStore>,
        navigator: Arc<dyn Navigator>,
        config: ManagerConfig,
    ) -> Arc<Self> {
        let manager = Self::new(session, profiles, navigator, config);
        manager.start();
        manager
    }

    /// Run the initial load as a task bound to the manager's scope
    #[cfg(not(target_arch = "wasm32"))]
    pub fn start(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let manager = Arc::clone(self);
        tokio::spawn(async move {
            let scope = manager.scope.clone();
            tokio::select! {
                biased;
                () = scope.cancelled() => debug!("initial auth load cancelled"),
                () = manager.refresh_auth() => {}
            }
        })
    }

    /// Issue a subscriber capability for this manager
    pub fn subscribe(self: &Arc<Self>) -> AuthHandle {
        AuthHandle {
            manager: Arc::downgrade(self),
            receiver: self.state.subscribe(),
        }
    }

    /// Current snapshot
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub const fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// End the manager's scope.
    ///
    /// Pending refreshes stop publishing and every issued handle starts
    /// failing with [`AuthError::OutOfScope`].
    pub fn close(&self) {
        if !self.scope.is_cancelled() {
            debug!("closing auth state scope");
            self.scope.cancel();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.scope.is_cancelled()
    }

    /// Re-derive the snapshot from the session provider and profile store.
    ///
    /// Lookup failures resolve to the signed-out state and are never returned.
    pub async fn refresh_auth(&self) {
        if self.is_closed() {
            debug!("refresh requested after scope closed");
            return;
        }

        let generation = self.begin_refresh();
        let next = self.resolve().await;
        self.publish(generation, next);
    }

    /// Terminate the session, reset the snapshot, then redirect to the landing route.
    ///
    /// A provider failure is logged and otherwise ignored: the local state is
    /// cleared either way, so it may disagree with the provider until the next refresh.
    /// Does nothing once the scope is closed.
    pub async fn sign_out(&self) {
        if self.is_closed() {
            debug!("sign-out requested after scope closed");
            return;
        }

        if let Err(err) = self.session.terminate_session().await {
            warn!(error = %err, "session termination failed, clearing local auth state anyway");
        }

        self.state.send_modify(|current| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            *current = AuthState::signed_out();
        });
        info!(landing_route = %self.config.landing_route, "signed out");

        self.navigator.redirect_replacing(&self.config.landing_route);
    }

    fn begin_refresh(&self) -> u64 {
        let mut generation = 0;
        self.state.send_if_modified(|current| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            if current.is_loading() {
                return false;
            }
            *current = current.loading();
            true
        });
        generation
    }

    fn publish(&self, generation: u64, next: AuthState) {
        let published = self.state.send_if_modified(|current| {
            if self.scope.is_cancelled() {
                return false;
            }
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *current = next;
            true
        });

        if published {
            debug!(generation, "auth state refreshed");
        } else {
            debug!(generation, "discarding superseded auth refresh");
        }
    }

    async fn resolve(&self) -> AuthState {
        let identity = match self.session.current_identity().await {
            Ok(Some(identity)) => identity,
            Ok(None) => {
                debug!("no active session");
                return AuthState::signed_out();
            }
            Err(err) => {
                debug!(error = %err, "session lookup failed, treating as signed out");
                return AuthState::signed_out();
            }
        };

        let profile = match self.profiles.get_profile(&identity.id).await {
            Ok(profile) => profile,
            Err(err) => {
                warn!(user_id = %identity.id, error = %err, "profile lookup failed");
                None
            }
        };

        self.compose(&identity, profile.as_ref())
    }

    fn compose(&self, identity: &Identity, profile: Option<&Profile>) -> AuthState {
        if profile.is_none() {
            warn!(
                user_id = %identity.id,
                policy = ?self.config.missing_profile,
                "no profile for signed-in identity"
            );
            if self.config.missing_profile == MissingProfilePolicy::SignedOut {
                return AuthState::signed_out();
            }
        }

        AuthState::signed_in(UserInfo::compose(identity, profile))
    }
}

/// Subscriber capability issued by [`AuthStateManager::subscribe`].
///
/// Every operation fails with [`AuthError::OutOfScope`] once the manager has
/// been closed or dropped.
#[derive(Clone)]
pub struct AuthHandle {
    manager: Weak<AuthStateManager>,
    receiver: watch::Receiver<AuthState>,
}

impl AuthHandle {
    fn manager(&self) -> Result<Arc<AuthStateManager>> {
        self.manager
            .upgrade()
            .filter(|manager| !manager.is_closed())
            .ok_or(AuthError::OutOfScope)
    }

    /// Current snapshot
    pub fn state(&self) -> Result<AuthState> {
        self.manager()?;
        Ok(self.receiver.borrow().clone())
    }

    /// Wait for the next snapshot replacement and return it
    pub async fn changed(&mut self) -> Result<AuthState> {
        let scope = self.manager()?.scope.clone();

        let changed = tokio::select! {
            biased;
            () = scope.cancelled() => return Err(AuthError::OutOfScope),
            changed = self.receiver.changed() => changed,
        };
        changed.map_err(|_| AuthError::OutOfScope)?;

        Ok(self.receiver.borrow_and_update().clone())
    }

    /// See [`AuthStateManager::refresh_auth`]
    pub async fn refresh_auth(&self) -> Result<()> {
        self.manager()?.refresh_auth().await;
        Ok(())
    }

    /// See [`AuthStateManager::sign_out`]
    pub async fn sign_out(&self) -> Result<()> {
        self.manager()?.sign_out().await;
        Ok(())
    }

    /// Whether both handles were issued by the same manager
    pub fn same_scope(&self, other: &Self) -> bool {
        self.manager.ptr_eq(&other.manager)
    }
}
