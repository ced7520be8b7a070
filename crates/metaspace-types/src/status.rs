//! Object lifecycle status.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};

/// The statuses an object may be in.
///
/// Values are stored as single-character tokens. They are intentionally not
/// contiguous so statuses can be added between them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ObjectStatus {
    /// The object is being uploaded, or the client failed during upload.
    /// A failed upload may be continued later.
    Pending = 1,
    /// The object is finished and visible to general listing.
    Committed = 3,
}

const PENDING_TOKEN: &str = "1";
const COMMITTED_TOKEN: &str = "3";

impl ObjectStatus {
    /// Storage token for this status.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Pending => PENDING_TOKEN,
            Self::Committed => COMMITTED_TOKEN,
        }
    }

    pub fn from_token(token: &str) -> TypeResult<Self> {
        match token {
            PENDING_TOKEN => Ok(Self::Pending),
            COMMITTED_TOKEN => Ok(Self::Committed),
            other => Err(TypeError::InvalidStatus(other.to_string())),
        }
    }

    pub fn as_byte(&self) -> u8 {
        *self as u8
    }

    pub fn from_byte(b: u8) -> TypeResult<Self> {
        match b {
            1 => Ok(Self::Pending),
            3 => Ok(Self::Committed),
            other => Err(TypeError::InvalidStatus(other.to_string())),
        }
    }

    /// Returns `true` if objects in this status appear in general listing.
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::Committed)
    }
}

impl fmt::Display for ObjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Committed => f.write_str("committed"),
        }
    }
}
