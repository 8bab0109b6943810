//! Domain logic shared by the backend client and the web server.
//!
//! Nothing in here performs I/O: page arithmetic, vote values and the common
//! error type live in this crate so they can be tested in isolation.

pub mod error;
pub mod pagination;
pub mod types;
pub mod vote;
