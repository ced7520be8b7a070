//! Common-prefix collapsing.
//!
//! For every entry, the first path component after the query prefix is
//! computed. Leaves (no further delimiter) pass through untouched. Anything
//! deeper becomes a prefix entry whose key is cut after that component, and
//! consecutive entries mapping to the same component are merged into the
//! first one.

use crate::info::ObjectInfo;
use crate::location::Location;

/// Lazy collapsing adaptor. See the [module docs](self).
///
/// Errors from the inner iterator are passed through unchanged.
#[derive(Debug)]
pub struct Collapse<I> {
    inner: I,
    prefix: Location,
    current: Option<String>,
}

impl<I> Collapse<I> {
    pub fn new(prefix: Location, inner: I) -> Self {
        Self {
            inner,
            prefix,
            current: None,
        }
    }
}

impl<I, E> Iterator for Collapse<I>
where
    I: Iterator<Item = Result<ObjectInfo, E>>,
{
    type Item = Result<ObjectInfo, E>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut info = match self.inner.next()? {
                Ok(info) => info,
                Err(e) => return Some(Err(e)),
            };

            let (name, is_dir) = info.location.list_key_name(&self.prefix);
            if is_dir {
                if self.current.as_deref() == Some(name.as_str()) {
                    continue;
                }
                info.location = info
                    .location
                    .with_key(format!("{}{}", self.prefix.key(), name));
                info.is_prefix = true;
                self.current = Some(name);
            }
            return Some(Ok(info));
        }
    }
}

/// Collapse a key-ordered sequence of entries under `prefix`.
pub fn collapse<I, E>(prefix: &Location, entries: I) -> Collapse<I::IntoIter>
where
    I: IntoIterator<Item = Result<ObjectInfo, E>>,
{
    Collapse::new(prefix.clone(), entries.into_iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::convert::Infallible;
    use std::time::{Duration, UNIX_EPOCH};

    fn infos(keys: &[&str]) -> Vec<ObjectInfo> {
        keys.iter()
            .enumerate()
            .map(|(i, k)| {
                ObjectInfo::new(
                    Location::remote("b", *k),
                    UNIX_EPOCH + Duration::from_secs(i as u64),
                )
            })
            .collect()
    }

    fn run(prefix: &str, entries: Vec<ObjectInfo>) -> Vec<ObjectInfo> {
        collapse(
            &Location::remote("b", prefix),
            entries.into_iter().map(Ok::<_, Infallible>),
        )
        .map(|r| r.unwrap())
        .collect()
    }

    fn summary(out: &[ObjectInfo]) -> Vec<(String, bool)> {
        out.iter()
            .map(|i| (i.location.key().to_string(), i.is_prefix))
            .collect()
    }

    #[test]
    fn directory_and_leaf_at_root() {
        let out = run("", infos(&["a/b", "a/c", "d"]));
        assert_eq!(
            summary(&out),
            vec![("a/".to_string(), true), ("d".to_string(), false)]
        );
    }

    #[test]
    fn first_occurrence_is_representative() {
        let out = run("", infos(&["a/b", "a/c"]));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].created, UNIX_EPOCH);
    }

    #[test]
    fn nested_prefix_keeps_query_prefix() {
        let out = run("photos/", infos(&["photos/2023/a", "photos/2023/b", "photos/2024/c", "photos/x"]));
        assert_eq!(
            summary(&out),
            vec![
                ("photos/2023/".to_string(), true),
                ("photos/2024/".to_string(), true),
                ("photos/x".to_string(), false),
            ]
        );
    }

    #[test]
    fn partial_component_prefix() {
        let out = run("ph", infos(&["photos/a", "photos/b", "phone"]));
        assert_eq!(
            summary(&out),
            vec![("photos/".to_string(), true), ("phone".to_string(), false)]
        );
    }

    #[test]
    fn leaf_between_siblings_does_not_reset_group() {
        let out = run("", infos(&["a/x", "a/y"]));
        assert_eq!(out.len(), 1);
        let out = run("", infos(&["a/x", "a0", "a/y"]));
        assert_eq!(summary(&out).len(), 2);
    }

    #[test]
    fn unsorted_input_produces_duplicates() {
        let out = run("", infos(&["a/x", "b/y", "a/z"]));
        assert_eq!(
            summary(&out),
            vec![
                ("a/".to_string(), true),
                ("b/".to_string(), true),
                ("a/".to_string(), true),
            ]
        );
    }

    #[test]
    fn errors_pass_through() {
        let entries: Vec<Result<ObjectInfo, &str>> = vec![
            Ok(infos(&["a/b"]).remove(0)),
            Err("boom"),
            Ok(infos(&["a/c"]).remove(0)),
        ];
        let out: Vec<_> = collapse(&Location::remote("b", ""), entries).collect();
        assert_eq!(out.len(), 2);
        assert!(out[0].as_ref().unwrap().is_prefix);
        assert_eq!(out[1], Err("boom"));
    }

    #[test]
    fn collapsing_is_idempotent() {
        let once = run("", infos(&["a/b/c", "a/d", "e", "f/g"]));
        let twice = run("", once.clone());
        assert_eq!(once, twice);
    }

    proptest! {
        #[test]
        fn collapse_is_idempotent_for_sorted_input(
            keys in proptest::collection::btree_set("[ab]{1,2}(/[ab]{1,2}){0,2}", 0..24),
            prefix in "(a/)?",
        ) {
            let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
            let entries: Vec<ObjectInfo> = infos(&keys)
                .into_iter()
                .filter(|i| i.location.key().starts_with(prefix.as_str()))
                .collect();
            let once = run(&prefix, entries);
            let twice = run(&prefix, once.clone());
            prop_assert_eq!(&once, &twice);

            let mut names: Vec<&str> = once.iter().map(|i| i.location.key()).collect();
            let before = names.len();
            names.dedup();
            prop_assert_eq!(before, names.len());
        }
    }
}
