//! The listing pipeline: prefix filter, optional collapse, pagination.

use serde::{Deserialize, Serialize};

use crate::collapse::collapse;
use crate::error::ListResult;
use crate::info::ObjectInfo;
use crate::iterator::ObjectListing;
use crate::location::Location;

/// Parameters of a single listing request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    /// Only entries whose location has this prefix are listed.
    pub prefix: Location,
    /// List every key verbatim instead of collapsing into prefix entries.
    pub recursive: bool,
    /// Maximum number of entries in the page.
    pub limit: Option<usize>,
    /// Resume after this location. Compared against collapsed entries, so a
    /// prefix entry used as cursor skips everything under it.
    pub cursor: Option<Location>,
}

impl ListOptions {
    pub fn new(prefix: Location) -> Self {
        Self {
            prefix,
            recursive: false,
            limit: None,
            cursor: None,
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn cursor(mut self, cursor: Location) -> Self {
        self.cursor = Some(cursor);
        self
    }
}

type Entries = Box<dyn Iterator<Item = ListResult<ObjectInfo>> + Send>;

/// Build a lazy listing over a key-ordered source.
///
/// Entries outside `options.prefix` are dropped. Non-recursive listings are
/// collapsed, then the cursor and limit are applied to the collapsed entries.
pub fn list<I>(source: I, options: &ListOptions) -> ObjectListing
where
    I: IntoIterator<Item = ListResult<ObjectInfo>>,
    I::IntoIter: Send + 'static,
{
    let prefix = options.prefix.clone();
    let filtered = source.into_iter().filter(move |entry| match entry {
        Ok(info) => info.location.has_prefix(&prefix),
        Err(_) => true,
    });

    let mut entries: Entries = if options.recursive {
        Box::new(filtered)
    } else {
        Box::new(collapse(&options.prefix, filtered))
    };

    if let Some(cursor) = options.cursor.clone() {
        entries = Box::new(entries.skip_while(
            move |entry| matches!(entry, Ok(info) if info.location <= cursor),
        ));
    }

    if let Some(limit) = options.limit {
        entries = Box::new(entries.take(limit));
    }

    ObjectListing::new(entries)
}
