//! Fault kinds surfaced by the library.
//!
//! The binary stays fail-fast (any error aborts the run with a non-zero
//! exit), but callers embedding this crate can still tell a network fault
//! from a malformed response or a hole in the data.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("stationboard fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("stationboard response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("departure entry is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("unparseable timestamp `{value}`: {source}")]
    BadTimestamp {
        value: String,
        source: chrono::ParseError,
    },
}
