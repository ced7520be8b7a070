use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Segment part and index combined.
///
/// Encodes into a single `u64` with the part in the high 32 bits, so the
/// part orders before the index within it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentPosition {
    pub part: u32,
    pub index: u32,
}

impl SegmentPosition {
    pub const fn new(part: u32, index: u32) -> Self {
        Self { part, index }
    }

    /// Decode a position stored as `part << 32 | index`.
    pub const fn from_encoded(v: u64) -> Self {
        Self {
            part: (v >> 32) as u32,
            index: v as u32,
        }
    }

    /// Encode into a `u64` suitable for storing in a database column.
    pub const fn encode(&self) -> u64 {
        ((self.part as u64) << 32) | self.index as u64
    }

    /// Returns whether `self` sorts before `other`.
    pub fn less(&self, other: &Self) -> bool {
        self.encode() < other.encode()
    }
}

impl Ord for SegmentPosition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.encode().cmp(&other.encode())
    }
}

impl PartialOrd for SegmentPosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SegmentPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.part, self.index)
    }
}

impl From<u64> for SegmentPosition {
    fn from(v: u64) -> Self {
        Self::from_encoded(v)
    }
}

impl From<SegmentPosition> for u64 {
    fn from(pos: SegmentPosition) -> Self {
        pos.encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn encoding_layout() {
        assert_eq!(SegmentPosition::new(0, 0).encode(), 0);
        assert_eq!(SegmentPosition::new(0, 7).encode(), 7);
        assert_eq!(SegmentPosition::new(1, 0).encode(), 1 << 32);
        assert_eq!(SegmentPosition::new(u32::MAX, u32::MAX).encode(), u64::MAX);
    }

    #[test]
    fn part_dominates_index() {
        let a = SegmentPosition::new(0, 5);
        let b = SegmentPosition::new(0, 6);
        let c = SegmentPosition::new(1, 0);
        assert!(a.encode() < b.encode() && b.encode() < c.encode());
        assert!(a.less(&b));
        assert!(b.less(&c));
        assert!(!c.less(&a));
        assert!(SegmentPosition::new(0, u32::MAX) < SegmentPosition::new(1, 0));
    }

    #[test]
    fn sort_merges_parts() {
        let mut positions = vec![
            SegmentPosition::new(2, 0),
            SegmentPosition::new(0, 1),
            SegmentPosition::new(1, 3),
            SegmentPosition::new(0, 0),
        ];
        positions.sort();
        assert_eq!(
            positions,
            vec![
                SegmentPosition::new(0, 0),
                SegmentPosition::new(0, 1),
                SegmentPosition::new(1, 3),
                SegmentPosition::new(2, 0),
            ]
        );
    }

    proptest! {
        #[test]
        fn from_encoded_inverts_encode(part in any::<u32>(), index in any::<u32>()) {
            let pos = SegmentPosition::new(part, index);
            prop_assert_eq!(SegmentPosition::from_encoded(pos.encode()), pos);
        }

        #[test]
        fn ordering_matches_encoding(a in any::<u64>(), b in any::<u64>()) {
            let (pa, pb) = (SegmentPosition::from_encoded(a), SegmentPosition::from_encoded(b));
            prop_assert_eq!(pa.cmp(&pb), a.cmp(&b));
        }
    }
}
