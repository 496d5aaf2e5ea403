//! Session and profile API client

pub mod auth;
pub mod error;
pub mod profiles;

use arc_swap::ArcSwapOption;
use error::ClientError;
use reqwest::{Client, ClientBuilder, header};
use std::sync::Arc;
use std::time::Duration;

/// Header carrying the project API key on every request
pub const API_KEY_HEADER: &str = "apikey";

/// Default table holding display names
pub const DEFAULT_PROFILES_TABLE: &str = "profiles";

/// Client for the auth and REST APIs.
///
/// Clones share the session token, so signing out through one clone signs out
/// all of them.
#[derive(Clone)]
pub struct SessionClient {
    client: Client,
    base_url: String,
    api_key: String,
    profiles_table: String,
    access_token: Arc<ArcSwapOption<String>>,
}

impl SessionClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).api_key(api_key).build()
    }

    /// Create a new client builder
    pub fn builder() -> SessionClientBuilder {
        SessionClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn profiles_table(&self) -> &str {
        &self.profiles_table
    }

    /// Install or clear the access token of the ambient session
    pub fn set_access_token(&self, token: Option<String>) {
        self.access_token.store(token.map(Arc::new));
    }

    pub fn access_token(&self) -> Option<Arc<String>> {
        self.access_token.load_full()
    }

    pub fn has_session(&self) -> bool {
        self.access_token.load().is_some()
    }

    /// Create a request builder carrying the API key and the best available bearer
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let bearer = self
            .access_token()
            .map_or_else(|| self.api_key.clone(), |token| token.as_ref().clone());

        self.client
            .request(method, url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {bearer}"))
    }

    /// Execute a request and decode its JSON body
    pub async fn execute<T: serde::de::DeserializeOwned>(
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = Self::send(request).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Execute a request whose body is irrelevant
    pub async fn execute_empty(request: reqwest::RequestBuilder) -> Result<(), ClientError> {
        Self::send(request).await?;
        Ok(())
    }

    async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            Err(ClientError::from_status(status, message))
        }
    }
}

/// Builder for SessionClient
#[derive(Default)]
pub struct SessionClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    access_token: Option<String>,
    profiles_table: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl SessionClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the project API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Start with an existing session token
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set the table profile rows are read from
    pub fn profiles_table(mut self, table: impl Into<String>) -> Self {
        self.profiles_table = Some(table.into());
        self
    }

    /// Set the request timeout
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<SessionClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;
        let api_key = self
            .api_key
            .ok_or_else(|| ClientError::Configuration("api_key is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut client_builder = ClientBuilder::new();

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        if let Some(user_agent) = self.user_agent {
            client_builder = client_builder.user_agent(user_agent);
        } else {
            client_builder = client_builder.user_agent(concat!(
                "authstate-http/",
                env!("CARGO_PKG_VERSION")
            ));
        }

        let client = client_builder.build()?;

        Ok(SessionClient {
            client,
            base_url,
            api_key,
            profiles_table: self
                .profiles_table
                .unwrap_or_else(|| DEFAULT_PROFILES_TABLE.to_string()),
            access_token: Arc::new(ArcSwapOption::from(self.access_token.map(Arc::new))),
        })
    }
}
