//! Authentication state and the records it is derived from

use serde::{Deserialize, Serialize};

/// Identity record returned by a session provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique user id, also the key into the profile store
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
        }
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Display fields held by the profile store
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl Profile {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// First and last name joined by a single space, skipping empty parts
    pub fn display_name(&self) -> String {
        [self.first_name.trim(), self.last_name.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Signed-in user as seen by views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub email: String,
}

impl UserInfo {
    /// Compose the view record from an identity and its profile row.
    ///
    /// A missing profile yields an empty name; a missing email yields `""`.
    pub fn compose(identity: &Identity, profile: Option<&Profile>) -> Self {
        Self {
            name: profile.map(Profile::display_name).unwrap_or_default(),
            email: identity.email.clone().unwrap_or_default(),
        }
    }
}

/// Snapshot of the current authentication status.
///
/// `is_authenticated` is derived from `user`, so a snapshot with a user is
/// always authenticated and one without never is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    is_loading: bool,
    user: Option<UserInfo>,
}

impl AuthState {
    /// State before the first refresh resolves
    pub const fn initial() -> Self {
        Self {
            is_loading: true,
            user: None,
        }
    }

    pub const fn signed_out() -> Self {
        Self {
            is_loading: false,
            user: None,
        }
    }

    pub const fn signed_in(user: UserInfo) -> Self {
        Self {
            is_loading: false,
            user: Some(user),
        }
    }

    /// Same resolved fields, loading flag raised
    #[must_use]
    pub fn loading(&self) -> Self {
        Self {
            is_loading: true,
            user: self.user.clone(),
        }
    }

    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub const fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Serializes an [`AuthState`] with the derived `isAuthenticated` flag included
pub struct AuthStateView<'a>(pub &'a AuthState);

impl Serialize for AuthStateView<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("AuthState", 3)?;
        state.serialize_field("isAuthenticated", &self.0.is_authenticated())?;
        state.serialize_field("isLoading", &self.0.is_loading)?;
        state.serialize_field("user", &self.0.user)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = AuthState::initial();
        assert!(state.is_loading());
        assert!(!state.is_authenticated());
        assert!(state.user().is_none());
        assert_eq!(state, AuthState::default());
    }

    #[test]
    fn test_compose_user() {
        let identity = Identity::new("u1").with_email("a@x.com");
        let profile = Profile::new("Ann", "Lee");

        let user = UserInfo::compose(&identity, Some(&profile));
        assert_eq!(user.name, "Ann Lee");
        assert_eq!(user.email, "a@x.com");
    }

    #[test]
    fn test_compose_without_email_or_profile() {
        let identity = Identity::new("u1");

        let user = UserInfo::compose(&identity, None);
        assert_eq!(user.name, "");
        assert_eq!(user.email, "");
    }

    #[test]
    fn test_display_name_skips_blank_parts() {
        assert_eq!(Profile::new("Ann", "").display_name(), "Ann");
        assert_eq!(Profile::new("", "Lee").display_name(), "Lee");
        assert_eq!(Profile::default().display_name(), "");
    }

    #[test]
    fn test_loading_keeps_previous_user() {
        let user = UserInfo {
            name: "Ann Lee".to_string(),
            email: "a@x.com".to_string(),
        };
        let state = AuthState::signed_in(user.clone()).loading();

        assert!(state.is_loading());
        assert!(state.is_authenticated());
        assert_eq!(state.user(), Some(&user));
    }

    #[test]
    fn test_view_serialization() {
        let state = AuthState::signed_in(UserInfo {
            name: "Ann Lee".to_string(),
            email: "a@x.com".to_string(),
        });

        let json = serde_json::to_value(AuthStateView(&state)).unwrap();
        assert_eq!(json["isAuthenticated"], true);
        assert_eq!(json["isLoading"], false);
        assert_eq!(json["user"]["name"], "Ann Lee");

        let json = serde_json::to_value(AuthStateView(&AuthState::signed_out())).unwrap();
        assert_eq!(json["isAuthenticated"], false);
        assert!(json["user"].is_null());
    }
}
