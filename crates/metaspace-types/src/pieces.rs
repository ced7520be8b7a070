//! Erasure-coded piece assignments.

use serde::{Deserialize, Serialize};

use crate::ids::NodeId;

/// One erasure-coded piece of a segment and the node that stores it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub number: u16,
    pub storage_node: NodeId,
}

impl Piece {
    pub fn new(number: u16, storage_node: NodeId) -> Self {
        Self {
            number,
            storage_node,
        }
    }
}

/// The pieces of a segment.
///
/// Assignments arrive from placement and repair in arbitrary order, so
/// equality ignores order: both sides are sorted by piece number before
/// comparing.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Pieces(pub Vec<Piece>);

impl Pieces {
    pub fn new(pieces: Vec<Piece>) -> Self {
        Self(pieces)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Piece> {
        self.0.iter()
    }

    /// Order-insensitive comparison. Neither side is modified.
    pub fn equal(&self, other: &Pieces) -> bool {
        if self.0.len() != other.0.len() {
            return false;
        }

        let mut first = self.0.clone();
        let mut second = other.0.clone();
        first.sort_by_key(|p| p.number);
        second.sort_by_key(|p| p.number);

        first
            .iter()
            .zip(&second)
            .all(|(a, b)| a.number == b.number && a.storage_node == b.storage_node)
    }
}

impl PartialEq for Pieces {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl From<Vec<Piece>> for Pieces {
    fn from(pieces: Vec<Piece>) -> Self {
        Self(pieces)
    }
}

impl FromIterator<Piece> for Pieces {
    fn from_iter<T: IntoIterator<Item = Piece>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
