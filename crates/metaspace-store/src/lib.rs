//! Storage collaborator for Metaspace.
//!
//! This crate exposes the filesystem-style contract the listing and write
//! protocol are consumed through (open, create, remove, list objects, list
//! pending uploads) and an in-memory implementation of it.
//!
//! # Write protocol
//!
//! [`Filesystem::create`] registers a new pending write handle for a
//! location. Any number of handles may be pending for the same location.
//! Each handle is finalized exactly once:
//!
//! - [`WriteHandle::commit`] stores the handle's bytes as the committed file
//!   for its location (last committer wins) and drops the handle from the
//!   pending set.
//! - [`WriteHandle::abort`] drops the handle from the pending set only.
//!
//! A second finalization fails with [`StoreError::AlreadyFinalized`].
//!
//! # Storage Backends
//!
//! - [`InMemoryFilesystem`] -- map-based store for tests and embedding

pub mod config;
pub mod error;
pub mod memory;
pub mod traits;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use memory::{HandleId, InMemoryFilesystem, MemReadHandle, MemWriteHandle};
pub use traits::{Filesystem, ReadHandle, WriteHandle};
