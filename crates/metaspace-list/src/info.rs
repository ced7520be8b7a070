use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use metaspace_types::ObjectStatus;

use crate::location::Location;

/// One entry of a listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectInfo {
    pub location: Location,
    /// Creation time. Pending uploads report their creation sequence number
    /// as seconds since the epoch.
    pub created: SystemTime,
    /// Synthetic "folder" entry standing in for every key under it.
    pub is_prefix: bool,
    pub status: ObjectStatus,
}

impl ObjectInfo {
    /// A committed, non-prefix entry.
    pub fn new(location: Location, created: SystemTime) -> Self {
        Self {
            location,
            created,
            is_prefix: false,
            status: ObjectStatus::Committed,
        }
    }

    /// A pending-upload entry.
    pub fn pending(location: Location, created: SystemTime) -> Self {
        Self {
            status: ObjectStatus::Pending,
            ..Self::new(location, created)
        }
    }
}

/// Returns `true` if `infos` is ordered by location, the precondition for
/// collapsing.
pub fn is_sorted_by_location(infos: &[ObjectInfo]) -> bool {
    infos.windows(2).all(|w| w[0].location <= w[1].location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::UNIX_EPOCH;

    #[test]
    fn constructors_set_status() {
        let loc = Location::remote("b", "k");
        assert_eq!(ObjectInfo::new(loc.clone(), UNIX_EPOCH).status, ObjectStatus::Committed);
        let pending = ObjectInfo::pending(loc, UNIX_EPOCH);
        assert_eq!(pending.status, ObjectStatus::Pending);
        assert!(!pending.is_prefix);
    }

    #[test]
    fn serde_roundtrip() {
        let created = UNIX_EPOCH + std::time::Duration::from_secs(42);
        let mut prefix = ObjectInfo::new(Location::remote("photos", "2024/"), created);
        prefix.is_prefix = true;
        let infos = vec![
            prefix,
            ObjectInfo::pending(Location::remote("photos", "2024/a.jpg"), created),
            ObjectInfo::new(Location::local("/tmp/a.jpg"), UNIX_EPOCH),
        ];
        let json = serde_json::to_string(&infos).unwrap();
        let parsed: Vec<ObjectInfo> = serde_json::from_str(&json).unwrap();
        assert_eq!(infos, parsed);
    }

    #[test]
    fn sortedness_check() {
        let a = ObjectInfo::new(Location::remote("b", "a"), UNIX_EPOCH);
        let b = ObjectInfo::new(Location::remote("b", "b"), UNIX_EPOCH);
        assert!(is_sorted_by_location(&[]));
        assert!(is_sorted_by_location(&[a.clone(), a.clone(), b.clone()]));
        assert!(!is_sorted_by_location(&[b, a]));
    }
}
