//! Client for the managed auth + database backend.
//!
//! - [`store::DataStore`] -- paginated reads and the vote upsert (REST API).
//! - [`identity::IdentityProvider`] -- OAuth sign-in, code exchange, current
//!   user and session refresh (auth API).
//! - [`client::SupabaseClient`] -- the HTTP implementation of both traits,
//!   configured once from [`config::BackendConfig`].
//! - [`repositories`] -- typed queries for images, captions and votes.

pub mod client;
pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod pkce;
pub mod repositories;
pub mod store;

pub use client::SupabaseClient;
pub use config::{BackendConfig, ConfigError};
pub use error::BackendError;
pub use identity::{IdentityProvider, Session, User};
pub use store::{DataStore, ListQuery, Page};
