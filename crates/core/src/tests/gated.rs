//! Session provider whose lookups can be held open by the test
//!
//! Mockall expectations return immediately, which cannot express two refreshes
//! overlapping in time. Each scripted lookup here can signal when it has been
//! entered and wait for an explicit release before resolving.

use crate::{Identity, ProviderResult, SessionProvider};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::oneshot;

struct Step {
    entered: Option<oneshot::Sender<()>>,
    release: Option<oneshot::Receiver<()>>,
    result: ProviderResult<Option<Identity>>,
}

/// Controls for one held lookup
pub struct Gate {
    entered: oneshot::Receiver<()>,
    release: oneshot::Sender<()>,
}

impl Gate {
    /// Wait until the lookup has started
    pub async fn entered(&mut self) {
        (&mut self.entered).await.expect("gated lookup dropped");
    }

    /// Let the lookup resolve
    pub fn release(self) {
        let _ = self.release.send(());
    }
}

#[derive(Default)]
pub struct GatedSession {
    steps: Mutex<VecDeque<Step>>,
    terminate: Mutex<Option<ProviderResult<()>>>,
}

impl GatedSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a lookup that resolves immediately
    pub fn push_ready(&self, result: ProviderResult<Option<Identity>>) {
        self.steps.lock().unwrap().push_back(Step {
            entered: None,
            release: None,
            result,
        });
    }

    /// Queue a lookup that waits for its gate to be released
    pub fn push_gated(&self, result: ProviderResult<Option<Identity>>) -> Gate {
        let (entered_tx, entered_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        self.steps.lock().unwrap().push_back(Step {
            entered: Some(entered_tx),
            release: Some(release_rx),
            result,
        });
        Gate {
            entered: entered_rx,
            release: release_tx,
        }
    }

    pub fn set_terminate(&self, result: ProviderResult<()>) {
        *self.terminate.lock().unwrap() = Some(result);
    }
}

#[async_trait]
impl SessionProvider for GatedSession {
    async fn current_identity(&self) -> ProviderResult<Option<Identity>> {
        let step = self
            .steps
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected session lookup");

        if let Some(entered) = step.entered {
            let _ = entered.send(());
        }
        if let Some(release) = step.release {
            let _ = release.await;
        }
        step.result
    }

    async fn terminate_session(&self) -> ProviderResult<()> {
        self.terminate.lock().unwrap().take().unwrap_or(Ok(()))
    }
}
