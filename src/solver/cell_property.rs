//! Per-cell material and indicator data of the fluid solver.

use crate::types::ElementIndex;

/// Fluid cell classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Indicator {
    /// Ordinary fluid cell.
    #[default]
    Fluid = 0,
    /// Cell fully covered by the solid ("artificial fluid").
    Artificial = 1,
}

impl Indicator {
    /// Numeric tag, 0 for fluid and 1 for covered cells.
    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn is_artificial(self) -> bool {
        self == Indicator::Artificial
    }
}

impl From<bool> for Indicator {
    /// `true` means covered.
    fn from(covered: bool) -> Self {
        if covered {
            Indicator::Artificial
        } else {
            Indicator::Fluid
        }
    }
}

/// Data attached to one fluid cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellProperty {
    pub indicator: Indicator,
    /// Dynamic viscosity
    pub viscosity: f64,
}

/// Per-cell property records addressed by [`ElementIndex`].
///
/// The store must be rebuilt whenever the mesh is refined; indicators start
/// out as [`Indicator::Fluid`].
#[derive(Clone, Debug, Default)]
pub struct CellPropertyStore {
    properties: Vec<CellProperty>,
}

impl CellPropertyStore {
    /// One record per cell, all with the given viscosity.
    pub fn new(n_cells: usize, viscosity: f64) -> Self {
        Self {
            properties: vec![
                CellProperty {
                    indicator: Indicator::Fluid,
                    viscosity,
                };
                n_cells
            ],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    #[inline]
    pub fn get(&self, cell: ElementIndex) -> &CellProperty {
        &self.properties[cell]
    }

    #[inline]
    pub fn get_mut(&mut self, cell: ElementIndex) -> &mut CellProperty {
        &mut self.properties[cell]
    }

    #[inline]
    pub fn indicator(&self, cell: ElementIndex) -> Indicator {
        self.properties[cell].indicator
    }

    #[inline]
    pub fn set_indicator(&mut self, cell: ElementIndex, indicator: Indicator) {
        self.properties[cell].indicator = indicator;
    }

    /// Number of cells currently marked [`Indicator::Artificial`].
    pub fn n_artificial(&self) -> usize {
        self.properties
            .iter()
            .filter(|p| p.indicator.is_artificial())
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementIndex, &CellProperty)> {
        self.properties
            .iter()
            .enumerate()
            .map(|(k, p)| (ElementIndex::new(k), p))
    }
}
