//! Pull-based iteration over listing results.
//!
//! Consumers call [`ObjectIterator::advance`] until it returns `false`, read
//! each entry through [`ObjectIterator::item`], and check
//! [`ObjectIterator::err`] once iteration has ended. Entries are produced on
//! demand; stopping early is the only form of cancellation.

use crate::error::{ListError, ListResult};
use crate::info::ObjectInfo;

/// A forward-only, single-pass sequence of listing entries.
pub trait ObjectIterator: Send {
    /// Move to the next entry. Returns `false` once the sequence is exhausted
    /// or has failed.
    fn advance(&mut self) -> bool;

    /// The entry reached by the last successful [`advance`](Self::advance).
    fn item(&self) -> Option<&ObjectInfo>;

    /// The error that ended iteration, if any.
    fn err(&self) -> Option<&ListError>;
}

type Source = Box<dyn Iterator<Item = ListResult<ObjectInfo>> + Send>;

/// Lazy [`ObjectIterator`] over a fallible source.
///
/// The first source error is stored and ends iteration.
pub struct ObjectListing {
    source: Source,
    current: Option<ObjectInfo>,
    err: Option<ListError>,
    done: bool,
}

impl ObjectListing {
    pub fn new<I>(source: I) -> Self
    where
        I: Iterator<Item = ListResult<ObjectInfo>> + Send + 'static,
    {
        Self {
            source: Box::new(source),
            current: None,
            err: None,
            done: false,
        }
    }

    /// Listing over an already materialized set of entries.
    pub fn from_infos(infos: Vec<ObjectInfo>) -> Self {
        Self::new(infos.into_iter().map(Ok))
    }

    pub fn empty() -> Self {
        Self::from_infos(Vec::new())
    }

    /// Drain the remaining entries, failing with the terminal error if one
    /// occurred.
    pub fn collect_all(mut self) -> ListResult<Vec<ObjectInfo>> {
        let mut out = Vec::new();
        while self.advance() {
            if let Some(info) = self.current.take() {
                out.push(info);
            }
        }
        match self.err {
            Some(e) => Err(e),
            None => Ok(out),
        }
    }
}

impl ObjectIterator for ObjectListing {
    fn advance(&mut self) -> bool {
        if self.done {
            return false;
        }
        match self.source.next() {
            Some(Ok(info)) => {
                self.current = Some(info);
                true
            }
            Some(Err(e)) => {
                self.err = Some(e);
                self.current = None;
                self.done = true;
                false
            }
            None => {
                self.current = None;
                self.done = true;
                false
            }
        }
    }

    fn item(&self) -> Option<&ObjectInfo> {
        self.current.as_ref()
    }

    fn err(&self) -> Option<&ListError> {
        self.err.as_ref()
    }
}

impl std::fmt::Debug for ObjectListing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectListing")
            .field("current", &self.current)
            .field("err", &self.err)
            .field("done", &self.done)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;
    use std::time::UNIX_EPOCH;

    fn info(key: &str) -> ObjectInfo {
        ObjectInfo::new(Location::remote("b", key), UNIX_EPOCH)
    }

    #[test]
    fn pulls_items_in_order() {
        let mut it = ObjectListing::from_infos(vec![info("a"), info("b")]);
        assert!(it.item().is_none());

        assert!(it.advance());
        assert_eq!(it.item().unwrap().location.key(), "a");
        assert!(it.advance());
        assert_eq!(it.item().unwrap().location.key(), "b");
        assert!(!it.advance());
        assert!(it.item().is_none());
        assert!(it.err().is_none());
    }

    #[test]
    fn exhausted_iterator_stays_exhausted() {
        let mut it = ObjectListing::empty();
        assert!(!it.advance());
        assert!(!it.advance());
        assert!(it.err().is_none());
    }

    #[test]
    fn source_error_ends_iteration() {
        let source = vec![
            Ok(info("a")),
            Err(ListError::Source("disk on fire".into())),
            Ok(info("b")),
        ];
        let mut it = ObjectListing::new(source.into_iter());
        assert!(it.advance());
        assert!(!it.advance());
        assert!(!it.advance());
        assert_eq!(it.err(), Some(&ListError::Source("disk on fire".into())));
    }

    #[test]
    fn source_is_pulled_lazily() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let pulled = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&pulled);
        let source = (0..100).map(move |i| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(info(&format!("k{i:03}")))
        });

        let mut it = ObjectListing::new(source);
        assert_eq!(pulled.load(Ordering::SeqCst), 0);
        assert!(it.advance());
        assert!(it.advance());
        assert_eq!(pulled.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn collect_all_reports_error() {
        let source = vec![Ok(info("a")), Err(ListError::Source("boom".into()))];
        let result = ObjectListing::new(source.into_iter()).collect_all();
        assert_eq!(result, Err(ListError::Source("boom".into())));

        let all = ObjectListing::from_infos(vec![info("a"), info("b")])
            .collect_all()
            .unwrap();
        assert_eq!(all.len(), 2);
    }
}
