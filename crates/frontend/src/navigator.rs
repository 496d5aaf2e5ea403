//! Browser navigation for sign-out redirects

use authstate_core::Navigator;
use tracing::warn;

/// Navigates with `location.replace`, so the page being left is not kept in history
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn redirect_replacing(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            warn!(path, "no window available for redirect");
            return;
        };

        if let Err(err) = window.location().replace(path) {
            warn!(path, error = ?err, "redirect failed");
        }
    }
}
