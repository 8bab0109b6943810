pub mod assets;
pub mod auth;
pub mod captions;
pub mod gallery;
pub mod images;
pub mod votes;
