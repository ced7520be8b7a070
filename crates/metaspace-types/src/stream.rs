use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};
use crate::ids::{ProjectId, StreamId};
use crate::location::{ObjectKey, ObjectLocation};

/// Distinguishes objects stored under the same key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Version(pub i64);

impl Version {
    /// The version should be chosen automatically. Never stored on a
    /// committed object.
    pub const NEXT: Version = Version(0);

    pub fn is_next(&self) -> bool {
        *self == Self::NEXT
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Uniquely identifies one upload stream of an object.
///
/// Several streams (and versions) may share the same [`ObjectLocation`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectStream {
    pub project_id: ProjectId,
    pub bucket_name: String,
    pub object_key: ObjectKey,
    pub version: Version,
    pub stream_id: StreamId,
}

impl ObjectStream {
    /// Check that every identifier is present and the version is not negative.
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
        if self.version.0 < 0 {
            return Err(TypeError::InvalidRequest(format!(
                "Version invalid: {}",
                self.version
            )));
        }
        if self.stream_id.is_zero() {
            return Err(TypeError::InvalidRequest("StreamID missing".into()));
        }
        Ok(())
    }

    /// The object location this stream uploads to.
    pub fn location(&self) -> ObjectLocation {
        ObjectLocation {
            project_id: self.project_id,
            bucket_name: self.bucket_name.clone(),
            object_key: self.object_key.clone(),
        }
    }
}
