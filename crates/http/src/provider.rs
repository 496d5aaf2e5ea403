use crate::SessionClient;
use authstate_core::{
    Identity, Profile, ProfileStore, ProviderError, ProviderResult, SessionProvider,
};
use async_trait::async_trait;

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl SessionProvider for SessionClient {
    async fn current_identity(&self) -> ProviderResult<Option<Identity>> {
        self.get_user()
            .await
            .map_err(|err| err.into_provider_error(|message| ProviderError::session(message)))
    }

    async fn terminate_session(&self) -> ProviderResult<()> {
        self.logout()
            .await
            .map_err(|err| err.into_provider_error(|message| ProviderError::session(message)))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ProfileStore for SessionClient {
    async fn get_profile(&self, user_id: &str) -> ProviderResult<Option<Profile>> {
        self.fetch_profile(user_id)
            .await
            .map_err(|err| err.into_provider_error(|message| ProviderError::profile(message)))
    }
}
