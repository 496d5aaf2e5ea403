pub mod auth;
pub mod components;
pub mod logging;
pub mod navigator;

pub use auth::{
    use_auth, use_auth_state, use_is_authenticated, AuthContext, AuthProvider, AuthProviderProps,
};
pub use components::{Spinner, UserMenu};
pub use logging::init_logging;
pub use navigator::BrowserNavigator;
