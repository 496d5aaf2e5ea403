//! Collaborators consumed by [`crate::AuthStateManager`]

use crate::{Identity, Profile, ProviderResult};
use async_trait::async_trait;

/// Session/identity service holding the ambient login session
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait SessionProvider: Send + Sync {
    /// Identity behind the current session, `None` when nobody is signed in
    async fn current_identity(&self) -> ProviderResult<Option<Identity>>;

    /// End the current session with the provider
    async fn terminate_session(&self) -> ProviderResult<()>;
}

/// Keyed lookup of display fields
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, user_id: &str) -> ProviderResult<Option<Profile>>;
}

/// Navigation effect run after sign-out
pub trait Navigator: Send + Sync {
    /// Navigate to `path` without leaving the current entry in history
    fn redirect_replacing(&self, path: &str);
}

// Mock implementations for testing
#[cfg(test)]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub SessionProvider {}

        #[async_trait]
        impl SessionProvider for SessionProvider {
            async fn current_identity(&self) -> ProviderResult<Option<Identity>>;
            async fn terminate_session(&self) -> ProviderResult<()>;
        }
    }

    mock! {
        pub ProfileStore {}

        #[async_trait]
        impl ProfileStore for ProfileStore {
            async fn get_profile(&self, user_id: &str) -> ProviderResult<Option<Profile>>;
        }
    }

    mock! {
        pub Navigator {}

        impl Navigator for Navigator {
            fn redirect_replacing(&self, path: &str);
        }
    }
}
