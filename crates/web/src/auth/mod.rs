//! Session handling on top of the backend's auth API.
//!
//! - [`cookies`] -- reading and writing the session and PKCE cookies.
//! - [`session`] -- resolving (and refreshing) the signed-in user.

pub mod cookies;
pub mod session;

pub use session::{resolve_session, AuthUser, CurrentUser};
