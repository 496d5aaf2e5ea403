//! Auth API client methods

use super::{ClientError, SessionClient};
use crate::types::UserResponse;
use authstate_core::Identity;
use reqwest::Method;
use tracing::debug;

impl SessionClient {
    /// Identity behind the stored session token.
    ///
    /// Returns `None` without a request when no token is stored, and `None`
    /// when the server rejects the token.
    pub async fn get_user(&self) -> Result<Option<Identity>, ClientError> {
        if !self.has_session() {
            debug!("no session token stored");
            return Ok(None);
        }

        let request = self.request(Method::GET, "/auth/v1/user");
        match Self::execute::<UserResponse>(request).await {
            Ok(user) => Ok(Some(user.into())),
            Err(err) if err.is_unauthorized() => {
                debug!(error = %err, "session token rejected");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Revoke the stored session.
    ///
    /// The token is dropped locally before the request is made, so the client is
    /// signed out even if the server call fails.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let Some(token) = self.access_token.swap(None) else {
            debug!("logout without a stored session");
            return Ok(());
        };

        let request = self
            .client
            .request(Method::POST, format!("{}/auth/v1/logout", self.base_url))
            .header(super::API_KEY_HEADER, &self.api_key)
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"));
        Self::execute_empty(request).await
    }
}
