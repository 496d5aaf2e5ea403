//! Shared authentication state for a tree of views
//!
//! [`AuthStateManager`] derives an [`AuthState`] snapshot from a
//! [`SessionProvider`] and a [`ProfileStore`], publishes every replacement to
//! the [`AuthHandle`]s it has issued, and signs out through the provider before
//! redirecting with a [`Navigator`].

pub mod config;
pub mod error;
pub mod manager;
pub mod memory;
pub mod provider;
pub mod types;

#[cfg(all(feature = "tracing-init", not(target_arch = "wasm32")))]
pub mod tracing;

#[cfg(test)]
mod tests;

pub use crate::config::{ManagerConfig, MissingProfilePolicy};
pub use error::{AuthError, ProviderError, ProviderResult, Result};
pub use manager::{AuthHandle, AuthStateManager};
pub use provider::{Navigator, ProfileStore, SessionProvider};
pub use types::{AuthState, AuthStateView, Identity, Profile, UserInfo};
