//! Row types for the backend tables this application reads and writes.

pub mod caption;
pub mod image;
pub mod vote;
