//! JSON parser for stationboard responses.

use crate::error::CheckError;
use crate::model::Stationboard;

/// Decodes a stationboard response from raw bytes.
///
/// # Errors
///
/// Returns [`CheckError::Parse`] if the bytes are not valid JSON or do not
/// carry a `stationboard` sequence.
pub fn parse_stationboard(bytes: &[u8]) -> Result<Stationboard, CheckError> {
    Ok(serde_json::from_slice(bytes)?)
}
