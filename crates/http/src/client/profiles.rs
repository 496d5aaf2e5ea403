//! REST API client methods for profile rows

use super::{ClientError, SessionClient};
use crate::types::ProfileRow;
use authstate_core::Profile;
use reqwest::Method;

/// Columns selected from the profiles table
const PROFILE_COLUMNS: &str = "first_name,last_name";

impl SessionClient {
    /// Profile row keyed by `user_id`, or `None` when the table has no such row
    pub async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>, ClientError> {
        let request = self
            .request(Method::GET, &format!("/rest/v1/{}", self.profiles_table))
            .query(&[
                ("id", format!("eq.{user_id}").as_str()),
                ("select", PROFILE_COLUMNS),
            ]);

        let rows: Vec<ProfileRow> = Self::execute(request).await?;
        Ok(rows.into_iter().next().map(Profile::from))
    }
}
