//! Foundation types for Metaspace.
//!
//! This crate defines the hierarchical identifiers of the object-storage
//! metadata layer (project, bucket, object, segment, piece) and the codec that
//! flattens them into byte-sortable keys for an ordered key-value store. Every
//! other Metaspace crate depends on `metaspace-types`.
//!
//! # Key Types
//!
//! - [`ProjectId`] / [`StreamId`] -- UUID identifiers, nil means "missing"
//! - [`BucketLocation`] / [`BucketPrefix`] -- `<project>/<bucket>`
//! - [`ObjectLocation`] -- project, bucket and opaque [`ObjectKey`]
//! - [`SegmentLocation`] / [`SegmentKey`] -- `<project>/{l|s<n>}/<bucket>/<key>`
//! - [`ObjectStream`] -- one upload instance of an object, with a [`Version`]
//! - [`SegmentPosition`] -- `(part, index)` packed into a sortable `u64`
//! - [`ObjectStatus`] -- pending or committed, stored as a one-character token
//! - [`Pieces`] -- piece-to-node assignments compared without regard to order

pub mod error;
pub mod ids;
pub mod location;
pub mod pieces;
pub mod position;
pub mod status;
pub mod stream;

pub use error::{TypeError, TypeResult};
pub use ids::{NodeId, ProjectId, StreamId};
pub use location::{
    BucketLocation, BucketPrefix, ObjectKey, ObjectLocation, SegmentIndex, SegmentKey,
    SegmentLocation, DELIMITER, FIRST_SEGMENT_INDEX, LAST_SEGMENT_INDEX, LAST_SEGMENT_NAME,
};
pub use pieces::{Piece, Pieces};
pub use position::SegmentPosition;
pub use status::ObjectStatus;
pub use stream::{ObjectStream, Version};

/// Maximum number of items a client can request from a single listing.
pub const MAX_LIST_LIMIT: usize = 1000;
