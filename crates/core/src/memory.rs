//! In-memory collaborators
//!
//! These store data and behave like real backends, which makes them suitable for
//! local development and for tests that need realistic behavior rather than
//! call-by-call expectations.

use crate::provider::{Navigator, ProfileStore, SessionProvider};
use crate::{Identity, Profile, ProviderError, ProviderResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Session provider holding at most one signed-in identity
#[derive(Default)]
pub struct InMemorySession {
    identity: Mutex<Option<Identity>>,
    failure: Mutex<Option<ProviderError>>,
    terminations: Mutex<usize>,
}

impl InMemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session already signed in as `identity`
    pub fn signed_in(identity: Identity) -> Self {
        let session = Self::new();
        session.sign_in(identity);
        session
    }

    pub fn sign_in(&self, identity: Identity) {
        *lock(&self.identity) = Some(identity);
    }

    /// Make every subsequent call fail with `error`, or recover with `None`
    pub fn set_failure(&self, error: Option<ProviderError>) {
        *lock(&self.failure) = error;
    }

    /// Number of successful `terminate_session` calls
    pub fn terminations(&self) -> usize {
        *lock(&self.terminations)
    }

    fn check(&self) -> ProviderResult<()> {
        lock(&self.failure).clone().map_or(Ok(()), Err)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl SessionProvider for InMemorySession {
    async fn current_identity(&self) -> ProviderResult<Option<Identity>> {
        self.check()?;
        Ok(lock(&self.identity).clone())
    }

    async fn terminate_session(&self) -> ProviderResult<()> {
        self.check()?;
        *lock(&self.identity) = None;
        *lock(&self.terminations) += 1;
        Ok(())
    }
}

/// Profile rows keyed by user id
#[derive(Default)]
pub struct InMemoryProfiles {
    rows: Mutex<HashMap<String, Profile>>,
}

impl InMemoryProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_profile(self, user_id: impl Into<String>, profile: Profile) -> Self {
        self.insert(user_id, profile);
        self
    }

    pub fn insert(&self, user_id: impl Into<String>, profile: Profile) {
        lock(&self.rows).insert(user_id.into(), profile);
    }

    pub fn remove(&self, user_id: &str) -> Option<Profile> {
        lock(&self.rows).remove(user_id)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ProfileStore for InMemoryProfiles {
    async fn get_profile(&self, user_id: &str) -> ProviderResult<Option<Profile>> {
        Ok(lock(&self.rows).get(user_id).cloned())
    }
}

/// Navigator that records every redirect instead of performing it
#[derive(Default)]
pub struct RecordingNavigator {
    redirects: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths redirected to, oldest first
    pub fn redirects(&self) -> Vec<String> {
        lock(&self.redirects).clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect_replacing(&self, path: &str) {
        lock(&self.redirects).push(path.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_sign_in_and_terminate() {
        let session = InMemorySession::signed_in(Identity::new("u1"));
        assert_eq!(
            session.current_identity().await.unwrap(),
            Some(Identity::new("u1"))
        );

        session.terminate_session().await.unwrap();
        assert_eq!(session.current_identity().await.unwrap(), None);
        assert_eq!(session.terminations(), 1);
    }

    #[tokio::test]
    async fn test_session_failure() {
        let session = InMemorySession::signed_in(Identity::new("u1"));
        session.set_failure(Some(ProviderError::transport("offline")));

        assert!(session.current_identity().await.is_err());
        assert!(session.terminate_session().await.is_err());
        assert_eq!(session.terminations(), 0);

        session.set_failure(None);
        assert!(session.current_identity().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_profiles_lookup() {
        let profiles = InMemoryProfiles::new().with_profile("u1", Profile::new("Ann", "Lee"));

        assert_eq!(
            profiles.get_profile("u1").await.unwrap(),
            Some(Profile::new("Ann", "Lee"))
        );
        assert_eq!(profiles.get_profile("u2").await.unwrap(), None);

        profiles.remove("u1");
        assert_eq!(profiles.get_profile("u1").await.unwrap(), None);
    }

    #[test]
    fn test_recording_navigator() {
        let navigator = RecordingNavigator::new();
        navigator.redirect_replacing("/");
        navigator.redirect_replacing("/login");
        assert_eq!(navigator.redirects(), vec!["/", "/login"]);
    }
}
