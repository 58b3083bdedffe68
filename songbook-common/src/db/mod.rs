//! Database models and queries

pub mod init;
pub mod models;
pub mod songs;
pub mod users;

pub use init::*;
pub use models::*;
