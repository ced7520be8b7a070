//! Hierarchical locations and their flat key encodings.
//!
//! A [`SegmentLocation`] encodes to a [`SegmentKey`] of four `/`-joined
//! components:
//!
//! ```text
//! <project id>/{l|s<index>}/<bucket name>/<object key>
//! ```
//!
//! The object key is the last component, so it may itself contain `/` bytes.
//! The last segment is always written as the literal `l`, never as a number,
//! so byte order of keys does not follow numeric segment order across the
//! last-segment boundary. Numbered tokens are not zero padded either (`s10`
//! sorts before `s2`). Callers order segments by their decoded index or by
//! [`crate::SegmentPosition`], never by key bytes.
//!
//! A [`BucketLocation`] encodes to a [`BucketPrefix`] `<project id>/<bucket name>`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};
use crate::ids::ProjectId;

/// Separator between key components.
pub const DELIMITER: char = '/';
/// Token used for the last segment in a [`SegmentKey`].
pub const LAST_SEGMENT_NAME: &str = "l";
/// Integer form of [`SegmentIndex::Last`].
pub const LAST_SEGMENT_INDEX: i64 = -1;
/// Index of the first segment of an object.
pub const FIRST_SEGMENT_INDEX: i64 = 0;

const DELIMITER_BYTE: u8 = DELIMITER as u8;
const NUMBERED_SEGMENT_TAG: char = 's';

/// Encoded bucket location: `<project id>/<bucket name>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BucketPrefix(String);

impl BucketPrefix {
    /// Wrap an already-encoded prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the prefix back into its bucket location.
    ///
    /// Fails unless the prefix splits into exactly two `/`-separated
    /// components and the first is a valid project id.
    pub fn parse(&self) -> TypeResult<BucketLocation> {
        let invalid = |reason: String| TypeError::InvalidBucketPrefix {
            prefix: self.0.clone(),
            reason,
        };

        let elements: Vec<&str> = self.0.split(DELIMITER).collect();
        if elements.len() != 2 {
            return Err(invalid(format!(
                "expected 2 components, got {}",
                elements.len()
            )));
        }

        let project_id = ProjectId::parse(elements[0]).map_err(|e| invalid(e.to_string()))?;

        Ok(BucketLocation {
            project_id,
            bucket_name: elements[1].to_string(),
        })
    }
}

impl fmt::Display for BucketPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A bucket that belongs to a project.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BucketLocation {
    pub project_id: ProjectId,
    pub bucket_name: String,
}

impl BucketLocation {
    pub fn new(project_id: ProjectId, bucket_name: impl Into<String>) -> Self {
        Self {
            project_id,
            bucket_name: bucket_name.into(),
        }
    }

    /// Encode into `<project id>/<bucket name>`.
    pub fn prefix(&self) -> BucketPrefix {
        BucketPrefix(format!("{}{DELIMITER}{}", self.project_id, self.bucket_name))
    }

    /// Check that both components are present.
    pub fn verify(&self) -> TypeResult<()> {
        if self.project_id.is_zero() {
            return Err(TypeError::InvalidRequest("ProjectID missing".into()));
        }
        if self.bucket_name.is_empty() {
            return Err(TypeError::InvalidRequest("BucketName missing".into()));
        }
        Ok(())
    }
}

/// Encrypted object key.
///
/// The key is an arbitrary byte string and is not guaranteed to be printable.
/// Equality and ordering are byte-wise.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectKey(Vec<u8>);

impl ObjectKey {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Debug for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectKey({:?})", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl From<&str> for ObjectKey {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for ObjectKey {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Decoded object location: project, bucket and object key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectLocation {
    pub project_id: ProjectId,
    pub bucket_name: String,
    pub object_key: ObjectKey,
}

impl ObjectLocation {
    pub fn new(
        project_id: ProjectId,
        bucket_name: impl Into<String>,
        object_key: impl Into<ObjectKey>,
    ) -> Self {
        Self {
            project_id,
            bucket_name: bucket_name.into(),
            object_key: object_key.into(),
        }
    }

    /// The bucket this object belongs to.
    pub fn bucket(&self) -> BucketLocation {
        BucketLocation {
            project_id: self.project_id,
            bucket_name: self.bucket_name.clone(),
        }
    }

    pub fn first_segment(&self) -> SegmentLocation {
        self.segment_at(SegmentIndex::Numbered(0))
    }

    pub fn last_segment(&self) -> SegmentLocation {
        self.segment_at(SegmentIndex::Last)
    }

    /// Segment location for an integer index, where `-1` is the last segment.
    pub fn segment(&self, index: i64) -> TypeResult<SegmentLocation> {
        Ok(self.segment_at(SegmentIndex::from_i64(index)?))
    }

    /// Segment location for an already-validated index.
    pub fn segment_at(&self, index: SegmentIndex) -> SegmentLocation {
        SegmentLocation {
            project_id: self.project_id,
            bucket_name: self.bucket_name.clone(),
            index,
            object_key: self.object_key.clone(),
        }
    }

    /// Check that every component is present.
    pub fn verify(&self) -> TypeResult<()> {
        if self.project_id.is_zero() {
            return Err(TypeError::InvalidRequest("ProjectID missing".into()));
        }
        if self.bucket_name.is_empty() {
            return Err(TypeError::InvalidRequest("BucketName missing".into()));
        }
        if self.object_key.is_empty() {
            return Err(TypeError::InvalidRequest("ObjectKey missing".into()));
        }
        Ok(())
    }
}

/// Position of a segment within an object.
///
/// The last segment is addressed independently of how many segments the
/// object actually has.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentIndex {
    /// The final segment of the object.
    Last,
    /// A numbered segment, starting at 0.
    Numbered(u64),
}

impl SegmentIndex {
    /// Convert from the integer form, where `-1` is [`SegmentIndex::Last`].
    pub fn from_i64(index: i64) -> TypeResult<Self> {
        match index {
            LAST_SEGMENT_INDEX => Ok(Self::Last),
            i if i >= 0 => Ok(Self::Numbered(i as u64)),
            i => Err(TypeError::InvalidSegmentIndex(i)),
        }
    }

    /// Integer form, where the last segment is `-1`.
    ///
    /// Numbered indexes above `i64::MAX` saturate. Decoded keys never carry
    /// such an index.
    pub fn as_i64(&self) -> i64 {
        match self {
            Self::Last => LAST_SEGMENT_INDEX,
            Self::Numbered(n) => i64::try_from(*n).unwrap_or(i64::MAX),
        }
    }

    pub fn is_last(&self) -> bool {
        matches!(self, Self::Last)
    }

    pub fn is_first(&self) -> bool {
        matches!(self, Self::Numbered(0))
    }

    /// Parse the key token: `l` or `s` followed by decimal digits that fit
    /// in an `i64`.
    fn parse_token(token: &str) -> Option<Self> {
        if token == LAST_SEGMENT_NAME {
            return Some(Self::Last);
        }
        let digits = token.strip_prefix(NUMBERED_SEGMENT_TAG)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let index: i64 = digits.parse().ok()?;
        u64::try_from(index).ok().map(Self::Numbered)
    }
}

impl fmt::Display for SegmentIndex {
    /// Writes the key token (`l` or `s<index>`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Last => f.write_str(LAST_SEGMENT_NAME),
            Self::Numbered(n) => write!(f, "{NUMBERED_SEGMENT_TAG}{n}"),
        }
    }
}

/// Encoded segment location, used as the key in the metadata key-value store.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentKey(Vec<u8>);

impl SegmentKey {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Decode into a segment location. See [`SegmentLocation::decode`].
    pub fn parse(&self) -> TypeResult<SegmentLocation> {
        SegmentLocation::decode(self)
    }
}

impl fmt::Debug for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SegmentKey({:?})", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl From<&str> for SegmentKey {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for SegmentKey {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Decoded segment key information.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentLocation {
    pub project_id: ProjectId,
    pub bucket_name: String,
    pub index: SegmentIndex,
    pub object_key: ObjectKey,
}

impl SegmentLocation {
    /// The bucket this segment belongs to.
    pub fn bucket(&self) -> BucketLocation {
        BucketLocation {
            project_id: self.project_id,
            bucket_name: self.bucket_name.clone(),
        }
    }

    /// The object this segment belongs to.
    pub fn object(&self) -> ObjectLocation {
        ObjectLocation {
            project_id: self.project_id,
            bucket_name: self.bucket_name.clone(),
            object_key: self.object_key.clone(),
        }
    }

    pub fn is_last(&self) -> bool {
        self.index.is_last()
    }

    pub fn is_first(&self) -> bool {
        self.index.is_first()
    }

    /// Encode into a segment key. Never fails.
    pub fn encode(&self) -> SegmentKey {
        let head = format!(
            "{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}",
            self.project_id, self.index, self.bucket_name
        );
        let mut bytes = Vec::with_capacity(head.len() + self.object_key.len());
        bytes.extend_from_slice(head.as_bytes());
        bytes.extend_from_slice(self.object_key.as_bytes());
        SegmentKey(bytes)
    }

    /// Decode a segment key.
    ///
    /// The key is split into at most four components; the fourth keeps any
    /// further `/` bytes as part of the object key.
    pub fn decode(key: &SegmentKey) -> TypeResult<Self> {
        let invalid = |reason: String| TypeError::InvalidSegmentKey {
            key: key.to_string(),
            reason,
        };

        let elements: Vec<&[u8]> = key.0.splitn(4, |b| *b == DELIMITER_BYTE).collect();
        if elements.len() < 4 {
            return Err(invalid(format!(
                "expected 4 components, got {}",
                elements.len()
            )));
        }

        let project = std::str::from_utf8(elements[0])
            .map_err(|_| invalid("project id is not utf-8".into()))?;
        let project_id = ProjectId::parse(project).map_err(|e| invalid(e.to_string()))?;

        let token = std::str::from_utf8(elements[1])
            .map_err(|_| invalid("segment number is not utf-8".into()))?;
        let index = SegmentIndex::parse_token(token)
            .ok_or_else(|| invalid(format!("segment number {token:?}")))?;

        let bucket_name = std::str::from_utf8(elements[2])
            .map_err(|_| invalid("bucket name is not utf-8".into()))?
            .to_string();

        Ok(Self {
            project_id,
            bucket_name,
            index,
            object_key: ObjectKey(elements[3].to_vec()),
        })
    }
}
