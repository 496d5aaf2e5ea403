//! Authentication module

pub mod context;
pub mod subscription;

// Re-export commonly used items
pub use context::{
    use_auth, use_auth_state, use_is_authenticated, AuthContext, AuthProvider, AuthProviderProps,
};
pub use subscription::{follow, ManagerRef};
