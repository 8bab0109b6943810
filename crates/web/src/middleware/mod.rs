//! Request middleware.
//!
//! - [`session_gate::session_gate`] -- requires a session on protected paths.

pub mod session_gate;
