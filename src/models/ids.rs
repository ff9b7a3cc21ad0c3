//! Player identifiers.
//!
//! Players carry two ids: the numeric primary `player_id` used to key
//! battles, and the short public Polaris id players search by.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum length of a Polaris id after trimming.
pub const POLARIS_ID_MAX_LEN: usize = 12;

/// Width that primary player ids are left-padded to.
pub const PLAYER_ID_WIDTH: usize = 18;

/// Rejected Polaris id. The message is stable and shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid Polaris Id")]
pub struct InvalidPolarisId;

/// A validated, trimmed Polaris id.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolarisId(String);

impl PolarisId {
    /// Validate a raw id supplied by a caller.
    ///
    /// Surrounding whitespace is trimmed. The trimmed id must be non-empty,
    /// at most 12 characters and consist only of ASCII letters and digits.
    pub fn parse(raw: &str) -> Result<Self, InvalidPolarisId> {
        let trimmed = raw.trim();
        if trimmed.is_empty()
            || trimmed.len() > POLARIS_ID_MAX_LEN
            || !trimmed.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(InvalidPolarisId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Validate an id that may be missing altogether.
    pub fn parse_optional(raw: Option<&str>) -> Result<Self, InvalidPolarisId> {
        raw.ok_or(InvalidPolarisId).and_then(Self::parse)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PolarisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for PolarisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PolarisId({})", self.0)
    }
}

/// Left-pad a stored primary id with zeros to [`PLAYER_ID_WIDTH`].
/// Ids that are already at least that long are returned unchanged.
pub fn normalize_player_id(raw: &str) -> String {
    format!("{:0>width$}", raw, width = PLAYER_ID_WIDTH)
}
