//! Boundary identifiers for 2D mesh edges.
//!
//! Each boundary edge carries a numeric identifier. Which identifiers carry
//! a prescribed-displacement (Dirichlet) condition is configuration, held in
//! a [`BoundaryIdSet`].

use std::collections::BTreeSet;
use std::fmt;

/// Identifier attached to a boundary edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoundaryId(pub u32);

impl BoundaryId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BoundaryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{}", self.0)
    }
}

impl From<u32> for BoundaryId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A set of boundary identifiers with fast membership queries.
///
/// # Example
///
/// ```
/// use fsi_rs::mesh::{BoundaryId, BoundaryIdSet};
///
/// let dirichlet: BoundaryIdSet = [0, 2].into_iter().collect();
/// assert!(dirichlet.contains(BoundaryId(2)));
/// assert!(!dirichlet.contains(BoundaryId(1)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoundaryIdSet(BTreeSet<BoundaryId>);

impl BoundaryIdSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an identifier. Returns `false` if it was already present.
    pub fn insert(&mut self, id: impl Into<BoundaryId>) -> bool {
        self.0.insert(id.into())
    }

    #[inline]
    pub fn contains(&self, id: BoundaryId) -> bool {
        self.0.contains(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Identifiers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = BoundaryId> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<BoundaryId> for BoundaryIdSet {
    fn from_iter<I: IntoIterator<Item = BoundaryId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromIterator<u32> for BoundaryIdSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().map(BoundaryId).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_id_equality() {
        assert_eq!(BoundaryId(1), BoundaryId::new(1));
        assert_ne!(BoundaryId(1), BoundaryId(2));
        assert_eq!(BoundaryId::default(), BoundaryId(0));
        assert_eq!(format!("{}", BoundaryId(3)), "B3");
    }

    #[test]
    fn test_set_membership() {
        let mut set = BoundaryIdSet::new();
        assert!(set.is_empty());
        assert!(set.insert(2u32));
        assert!(!set.insert(BoundaryId(2)));
        set.insert(0u32);

        assert_eq!(set.len(), 2);
        assert!(set.contains(BoundaryId(0)));
        assert!(set.contains(BoundaryId(2)));
        assert!(!set.contains(BoundaryId(1)));

        let ids: Vec<_> = set.iter().collect();
        assert_eq!(ids, vec![BoundaryId(0), BoundaryId(2)]);
    }

    #[test]
    fn test_collect() {
        let set: BoundaryIdSet = [BoundaryId(5), BoundaryId(5), BoundaryId(1)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }
}
