//! Global authentication context and provider

use super::subscription::{follow, ManagerRef};
use authstate_core::{AuthHandle, AuthState, AuthStateManager};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Authentication context data
///
/// Holds the snapshot the tree is currently rendering plus the capability used
/// to act on it.
#[derive(Clone)]
pub struct AuthContext {
    pub auth_state: AuthState,
    handle: AuthHandle,
}

impl PartialEq for AuthContext {
    fn eq(&self, other: &Self) -> bool {
        self.auth_state == other.auth_state && self.handle.same_scope(&other.handle)
    }
}

impl AuthContext {
    pub const fn new(auth_state: AuthState, handle: AuthHandle) -> Self {
        Self { auth_state, handle }
    }

    pub const fn handle(&self) -> &AuthHandle {
        &self.handle
    }

    /// Re-read the session in the background
    pub fn refresh_auth(&self) {
        let handle = self.handle.clone();
        spawn_local(async move {
            if let Err(err) = handle.refresh_auth().await {
                warn!(error = %err, "refresh requested after manager closed");
            }
        });
    }

    /// Sign out in the background; the manager redirects once state is cleared
    pub fn sign_out(&self) {
        let handle = self.handle.clone();
        spawn_local(async move {
            if let Err(err) = handle.sign_out().await {
                warn!(error = %err, "sign-out requested after manager closed");
            }
        });
    }
}

/// Auth provider props
///
/// The manager is owned by the caller. The provider subscribes on mount,
/// requests a refresh, and drops its subscription on unmount; closing the
/// manager is left to whoever created it.
#[derive(Properties)]
pub struct AuthProviderProps {
    pub manager: Arc<AuthStateManager>,
    pub children: Children,
}

impl PartialEq for AuthProviderProps {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.manager, &other.manager) && self.children == other.children
    }
}

/// Auth provider component
#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let manager = ManagerRef(props.manager.clone());
    let handle = use_memo(manager.clone(), |manager| manager.0.subscribe());
    let auth_state = use_state(|| props.manager.state());

    // Refresh on mount and whenever a different manager is passed in, then
    // follow that manager until unmount or the next switch
    {
        let auth_state = auth_state.clone();
        use_effect_with(manager, move |manager| {
            let stop = CancellationToken::new();

            {
                let manager = manager.0.clone();
                spawn_local(async move {
                    manager.refresh_auth().await;
                });
            }

            spawn_local(follow(manager.0.subscribe(), stop.clone(), move |state| {
                auth_state.set(state);
            }));

            // Cleanup on unmount or manager switch
            move || stop.cancel()
        });
    }

    let context = AuthContext::new((*auth_state).clone(), (*handle).clone());

    html! {
        <ContextProvider<AuthContext> context={context}>
            {props.children.clone()}
        </ContextProvider<AuthContext>>
    }
}

fn require_context(context: Option<AuthContext>) -> AuthContext {
    context.expect("AuthContext not found. Make sure to wrap your component with AuthProvider")
}

/// Hook to use auth context
///
/// # Panics
///
/// Panics when called from a component that is not inside an [`AuthProvider`].
#[hook]
pub fn use_auth() -> AuthContext {
    require_context(use_context::<AuthContext>())
}

/// Hook to get current auth state
#[hook]
pub fn use_auth_state() -> AuthState {
    let auth = use_auth();
    auth.auth_state
}

/// Hook to check if authenticated
#[hook]
pub fn use_is_authenticated() -> bool {
    let auth = use_auth();
    auth.auth_state.is_authenticated()
}
