//! Listing engine for Metaspace.
//!
//! Turns a key-ordered stream of flat locations into either a verbatim
//! (recursive) listing or a directory-style listing where every group of
//! siblings sharing the next path component is collapsed into a single
//! prefix entry.
//!
//! # Modules
//!
//! - [`location`] -- [`Location`]: a local path or a bucket-qualified remote key
//! - [`info`] -- [`ObjectInfo`]: one listing entry
//! - [`iterator`] -- [`ObjectIterator`] and the lazy [`ObjectListing`]
//! - [`collapse`] -- the [`Collapse`] adaptor
//! - [`listing`] -- [`ListOptions`] and the [`list`] pipeline (filter, collapse, paginate)
//!
//! # Preconditions
//!
//! Collapsing only merges *consecutive* entries. The input must already be
//! sorted by [`Location`]; unsorted input yields duplicate or out-of-order
//! prefix entries and is not detected.

pub mod collapse;
pub mod error;
pub mod info;
pub mod iterator;
pub mod listing;
pub mod location;

pub use collapse::{collapse, Collapse};
pub use error::{ListError, ListResult};
pub use info::{is_sorted_by_location, ObjectInfo};
pub use iterator::{ObjectIterator, ObjectListing};
pub use listing::{list, ListOptions};
pub use location::Location;
