//! # Songbook Common Library
//!
//! Shared code for the songbook service:
//! - Configuration resolution (CLI, environment, TOML, defaults)
//! - Database initialization and the song/user repositories
//! - Error types

pub mod config;
pub mod db;
pub mod error;
pub mod time;

pub use error::{Error, Result};
