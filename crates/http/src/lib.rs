//! REST backend for authstate
//!
//! [`SessionClient`] talks to a GoTrue-style auth API (`/auth/v1`) for the
//! current session and to a PostgREST-style API (`/rest/v1`) for profile rows,
//! and implements both [`authstate_core::SessionProvider`] and
//! [`authstate_core::ProfileStore`] on top of them.

pub mod client;
pub mod config;
mod provider;
pub mod types;

pub use client::{SessionClient, SessionClientBuilder, error::ClientError};
pub use crate::config::ClientConfig;
