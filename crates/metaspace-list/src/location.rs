//! Namespace locations addressed by listing and the filesystem interface.
//!
//! A [`Location`] is either a local path or a remote `(bucket, key)` pair,
//! written `sj://bucket/key`. Keys use `/` as the path delimiter; there is no
//! real directory structure underneath, only shared key prefixes.

use std::fmt;

use serde::{Deserialize, Serialize};

use metaspace_types::DELIMITER;

use crate::error::{ListError, ListResult};

/// URL scheme marking a remote location.
pub const REMOTE_SCHEME: &str = "sj://";

/// A local path or a bucket-qualified remote key.
///
/// Ordering is total: local locations sort before remote ones, remote
/// locations sort by bucket then by key bytes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Location {
    Local { path: String },
    Remote { bucket: String, key: String },
}

impl Location {
    pub fn local(path: impl Into<String>) -> Self {
        Self::Local { path: path.into() }
    }

    pub fn remote(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self::Remote {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Parse `sj://bucket/key` into a remote location, anything else into a
    /// local path.
    ///
    /// # Examples
    ///
    /// ```
    /// use metaspace_list::Location;
    ///
    /// assert_eq!(Location::parse("sj://photos/2024/a.jpg").unwrap(),
    ///            Location::remote("photos", "2024/a.jpg"));
    /// assert_eq!(Location::parse("sj://photos").unwrap(), Location::remote("photos", ""));
    /// assert_eq!(Location::parse("/tmp/x").unwrap(), Location::local("/tmp/x"));
    /// assert!(Location::parse("sj:///key").is_err());
    /// ```
    pub fn parse(s: &str) -> ListResult<Self> {
        let Some(rest) = s.strip_prefix(REMOTE_SCHEME) else {
            return Ok(Self::local(s));
        };
        let (bucket, key) = rest.split_once(DELIMITER).unwrap_or((rest, ""));
        if bucket.is_empty() {
            return Err(ListError::InvalidLocation {
                input: s.to_string(),
                reason: "bucket name must not be empty".into(),
            });
        }
        Ok(Self::remote(bucket, key))
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }

    /// Bucket and key of a remote location.
    pub fn remote_parts(&self) -> Option<(&str, &str)> {
        match self {
            Self::Remote { bucket, key } => Some((bucket, key)),
            Self::Local { .. } => None,
        }
    }

    /// The path of a local location or the key of a remote one.
    pub fn key(&self) -> &str {
        match self {
            Self::Local { path } => path,
            Self::Remote { key, .. } => key,
        }
    }

    /// Same location with the key (or path) replaced.
    pub fn with_key(&self, key: impl Into<String>) -> Self {
        match self {
            Self::Local { .. } => Self::Local { path: key.into() },
            Self::Remote { bucket, .. } => Self::Remote {
                bucket: bucket.clone(),
                key: key.into(),
            },
        }
    }

    /// Returns `true` if `prefix` is the same kind of location, in the same
    /// bucket, and its key is a byte prefix of this key.
    pub fn has_prefix(&self, prefix: &Location) -> bool {
        match (self, prefix) {
            (Self::Local { path }, Self::Local { path: pre }) => path.starts_with(pre.as_str()),
            (Self::Remote { bucket, key }, Self::Remote { bucket: b, key: pre }) => {
                bucket == b && key.starts_with(pre.as_str())
            }
            _ => false,
        }
    }

    /// The first path component of this key after `prefix`.
    ///
    /// Returns the component including its trailing delimiter and `true` when
    /// another delimiter follows the prefix, otherwise the whole remainder and
    /// `false`. A key outside `prefix` is treated as entirely remainder.
    pub fn list_key_name(&self, prefix: &Location) -> (String, bool) {
        let key = self.key();
        let rest = key.strip_prefix(prefix.key()).unwrap_or(key);
        match rest.find(DELIMITER) {
            Some(idx) => (rest[..idx + DELIMITER.len_utf8()].to_string(), true),
            None => (rest.to_string(), false),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local { path } => f.write_str(path),
            Self::Remote { bucket, key } => write!(f, "{REMOTE_SCHEME}{bucket}/{key}"),
        }
    }
}
