//! Cell and vertex index newtypes.
//!
//! Keeping cells and vertices in distinct types stops a vertex number from
//! being used to look up a cell property.

use std::fmt;

macro_rules! define_index {
    (
        $(#[$meta:meta])*
        $name:ident, $display_prefix:literal
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name(usize);

        impl $name {
            pub const ZERO: Self = Self(0);

            #[inline]
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            #[inline]
            pub const fn get(self) -> usize {
                self.0
            }

            #[inline]
            pub const fn as_usize(self) -> usize {
                self.0
            }

            /// All indices in `[0, n)`, in increasing order.
            pub fn iter(n: usize) -> impl Iterator<Item = Self> + ExactSizeIterator {
                (0..n).map(Self::new)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl From<$name> for usize {
            #[inline]
            fn from(idx: $name) -> usize {
                idx.0
            }
        }

        impl<T> std::ops::Index<$name> for [T] {
            type Output = T;

            #[inline]
            fn index(&self, idx: $name) -> &T {
                &self[idx.0]
            }
        }

        impl<T> std::ops::IndexMut<$name> for [T] {
            #[inline]
            fn index_mut(&mut self, idx: $name) -> &mut T {
                &mut self[idx.0]
            }
        }

        impl<T> std::ops::Index<$name> for Vec<T> {
            type Output = T;

            #[inline]
            fn index(&self, idx: $name) -> &T {
                &self[idx.0]
            }
        }

        impl<T> std::ops::IndexMut<$name> for Vec<T> {
            #[inline]
            fn index_mut(&mut self, idx: $name) -> &mut T {
                &mut self[idx.0]
            }
        }
    };
}

define_index!(
    /// Active cell of a mesh.
    ///
    /// Per-cell coupling data (indicator, viscosity) is keyed by this index,
    /// and every cell loop of the coupling layer visits cells in increasing
    /// index order.
    ///
    /// # Example
    ///
    /// ```
    /// use fsi_rs::types::ElementIndex;
    ///
    /// let cells: Vec<_> = ElementIndex::iter(3).collect();
    /// assert_eq!(cells, [ElementIndex::new(0), ElementIndex::new(1), ElementIndex::new(2)]);
    /// assert_eq!(cells[2].to_string(), "E2");
    /// ```
    ElementIndex,
    "E"
);

define_index!(
    /// Mesh vertex, also the node of a Q1 field.
    VertexIndex,
    "V"
);
