//! Error type shared by the songbook crates

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Creating the data folder failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A submitted song did not pass validation
    #[error("Invalid song: {0}")]
    InvalidSong(String),

    /// The session store could not be read or written
    #[error("Session store error: {0}")]
    Session(String),

    /// Stored data that should never have been written
    #[error("Corrupt data: {0}")]
    Corrupt(String),
}
