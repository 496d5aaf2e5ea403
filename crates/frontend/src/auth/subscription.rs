//! Binding between a mounted provider and the manager it renders

use authstate_core::{AuthError, AuthHandle, AuthState, AuthStateManager};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Manager compared by identity, used as a hook dependency
#[derive(Clone)]
pub struct ManagerRef(pub Arc<AuthStateManager>);

impl PartialEq for ManagerRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Report the current snapshot, then every replacement, until `stop` is
/// cancelled or the manager closes.
///
/// Cancelling `stop` only ends this subscription; the manager and its other
/// subscribers are unaffected.
pub async fn follow(mut handle: AuthHandle, stop: CancellationToken, on_change: impl Fn(AuthState)) {
    match stop.run_until_cancelled(forward(&mut handle, &on_change)).await {
        None => debug!("auth subscription detached"),
        Some(Err(err)) => debug!(error = %err, "auth subscription ended"),
        Some(Ok(())) => {}
    }
}

async fn forward(handle: &mut AuthHandle, on_change: &impl Fn(AuthState)) -> Result<(), AuthError> {
    on_change(handle.state()?);
    loop {
        on_change(handle.changed().await?);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authstate_core::memory::{InMemoryProfiles, InMemorySession, RecordingNavigator};
    use authstate_core::{Identity, ManagerConfig, Profile, UserInfo};
    use tokio::sync::mpsc;

    fn manager() -> Arc<AuthStateManager> {
        AuthStateManager::new(
            Arc::new(InMemorySession::signed_in(
                Identity::new("u1").with_email("a@x.com"),
            )),
            Arc::new(InMemoryProfiles::new().with_profile("u1", Profile::new("Ann", "Lee"))),
            Arc::new(RecordingNavigator::new()),
            ManagerConfig::default(),
        )
    }

    fn ann_lee() -> AuthState {
        AuthState::signed_in(UserInfo {
            name: "Ann Lee".to_string(),
            email: "a@x.com".to_string(),
        })
    }

    /// Subscribe and follow the way `AuthProvider` does on mount
    fn mount(
        manager: &Arc<AuthStateManager>,
    ) -> (CancellationToken, mpsc::UnboundedReceiver<AuthState>, tokio::task::JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let stop = CancellationToken::new();
        let task = tokio::spawn(follow(manager.subscribe(), stop.clone(), move |state| {
            let _ = tx.send(state);
        }));
        (stop, rx, task)
    }

    #[test]
    fn test_manager_ref_compares_identity() {
        let first = manager();
        let second = manager();

        assert!(ManagerRef(first.clone()) == ManagerRef(first.clone()));
        assert!(ManagerRef(first) != ManagerRef(second));
    }

    #[tokio::test]
    async fn test_follow_reports_current_then_refreshed_state() {
        let manager = manager();
        let (_stop, mut states, _task) = mount(&manager);

        assert_eq!(states.recv().await, Some(AuthState::initial()));

        manager.refresh_auth().await;
        assert_eq!(states.recv().await, Some(ann_lee()));
    }

    #[tokio::test]
    async fn test_detach_leaves_manager_open() {
        let manager = manager();
        let (stop, mut states, task) = mount(&manager);
        assert_eq!(states.recv().await, Some(AuthState::initial()));

        stop.cancel();
        task.await.unwrap();

        assert!(!manager.is_closed());
        manager.refresh_auth().await;
        assert_eq!(manager.state(), ann_lee());
        // Detached subscription no longer receives updates
        assert_eq!(states.recv().await, None);
    }

    #[tokio::test]
    async fn test_remount_same_manager_resolves() {
        let manager = manager();

        let (stop, _states, task) = mount(&manager);
        stop.cancel();
        task.await.unwrap();

        let (_stop, mut states, _task) = mount(&manager);
        assert_eq!(states.recv().await, Some(AuthState::initial()));
        manager.refresh_auth().await;

        assert_eq!(states.recv().await, Some(ann_lee()));
        assert!(manager.subscribe().state().is_ok());
    }

    #[tokio::test]
    async fn test_follow_ends_when_manager_closes() {
        let manager = manager();
        let (_stop, mut states, task) = mount(&manager);
        assert_eq!(states.recv().await, Some(AuthState::initial()));

        manager.close();
        task.await.unwrap();
        assert_eq!(states.recv().await, None);
    }

    #[tokio::test]
    async fn test_switching_managers_follows_the_new_one() {
        let first = manager();
        let second = AuthStateManager::new(
            Arc::new(InMemorySession::new()),
            Arc::new(InMemoryProfiles::new()),
            Arc::new(RecordingNavigator::new()),
            ManagerConfig::default(),
        );

        let (stop, _old, task) = mount(&first);
        first.refresh_auth().await;
        stop.cancel();
        task.await.unwrap();

        let (_stop, mut states, _task) = mount(&second);
        assert_eq!(states.recv().await, Some(AuthState::initial()));
        second.refresh_auth().await;
        assert_eq!(states.recv().await, Some(AuthState::signed_out()));
    }
}
