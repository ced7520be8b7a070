use std::io::{Read, Write};

use metaspace_list::{ListOptions, Location, ObjectInfo, ObjectListing};

use crate::error::StoreResult;

/// Filesystem-style storage interface.
///
/// Implementations must satisfy these invariants:
/// - Listings are ordered by [`Location`] and observe a consistent snapshot:
///   no entry is seen half-way between pending and committed.
/// - Pending uploads never appear in [`list_objects`](Self::list_objects);
///   committed files never appear in [`list_uploads`](Self::list_uploads).
/// - Creating into a remote location requires its bucket to be registered.
///   Buckets are never created implicitly.
pub trait Filesystem: Send + Sync {
    /// Open the committed file at `location` for reading.
    ///
    /// Returns `StoreError::NotFound` if nothing is committed there.
    fn open(&self, location: &Location) -> StoreResult<Box<dyn ReadHandle>>;

    /// Start a new pending upload to `location`.
    ///
    /// Returns `StoreError::BucketNotFound` if `location` is remote and its
    /// bucket is not registered; the pending set is left unchanged.
    fn create(&self, location: &Location) -> StoreResult<Box<dyn WriteHandle>>;

    /// Delete the committed file at `location`. Pending uploads are untouched.
    fn remove(&self, location: &Location) -> StoreResult<()>;

    /// List committed files.
    fn list_objects_with(&self, options: &ListOptions) -> StoreResult<ObjectListing>;

    /// List pending uploads, one entry per open write handle.
    fn list_uploads_with(&self, options: &ListOptions) -> StoreResult<ObjectListing>;

    /// List every committed file under `prefix`, without a page limit.
    fn list_objects(&self, prefix: &Location, recursive: bool) -> StoreResult<ObjectListing> {
        self.list_objects_with(&ListOptions::new(prefix.clone()).recursive(recursive))
    }

    /// List every pending upload under `prefix`, without a page limit.
    fn list_uploads(&self, prefix: &Location, recursive: bool) -> StoreResult<ObjectListing> {
        self.list_uploads_with(&ListOptions::new(prefix.clone()).recursive(recursive))
    }
}

/// Reader over a committed file.
pub trait ReadHandle: Read + Send {
    /// Listing entry of the file being read.
    fn info(&self) -> &ObjectInfo;
}

/// Writer for a pending upload.
///
/// Bytes written are buffered until [`commit`](Self::commit). A handle can be
/// finalized at most once.
pub trait WriteHandle: Write + Send {
    /// Publish the written bytes as the committed file.
    fn commit(&mut self) -> StoreResult<()>;

    /// Discard the upload.
    fn abort(&mut self) -> StoreResult<()>;

    /// The location this handle uploads to.
    fn location(&self) -> &Location;

    /// Listing entry of this pending upload.
    fn info(&self) -> ObjectInfo;
}
