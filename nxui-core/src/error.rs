use std::io;

use thiserror::Error;

/// Errors raised while loading or saving nxui configuration files.
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("option `{key}` holds a {found}, expected a {expected}")]
    OptionType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
