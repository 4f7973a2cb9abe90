//! Run parameters of a coupled simulation.

use crate::coupling::OutsidePointPolicy;
use crate::error::{FsiError, Result};
use crate::mesh::{BoundaryId, BoundaryIdSet};

/// Parameters consumed by the coupling loop.
///
/// # Example
///
/// ```
/// use fsi_rs::simulation::FsiParameters;
///
/// let params = FsiParameters::default()
///     .with_end_time(0.1)
///     .with_time_step(0.05)
///     .with_viscosity(1e-3)
///     .with_solid_dirichlet_bc(0);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FsiParameters {
    /// Simulation end time.
    pub end_time: f64,
    /// Fixed time step shared by both solvers.
    pub time_step: f64,
    /// Simulation time between outputs.
    pub output_interval: f64,
    /// Simulation time between refinement checks.
    pub refinement_interval: f64,
    /// Number of global refinements of the fluid mesh before the first step.
    pub global_refinement: usize,
    /// Fluid dynamic viscosity used for the solid traction.
    pub viscosity: f64,
    /// Solid boundary identifiers carrying a prescribed displacement. Handed
    /// to the solid before setup; these faces receive no traction.
    pub solid_dirichlet_bcs: BoundaryIdSet,
    /// Handling of transfer points outside the queried mesh.
    pub outside_point_policy: OutsidePointPolicy,
}

impl Default for FsiParameters {
    fn default() -> Self {
        Self {
            end_time: 1.0,
            time_step: 0.01,
            output_interval: 0.1,
            refinement_interval: 1.0,
            global_refinement: 0,
            viscosity: 1e-3,
            solid_dirichlet_bcs: BoundaryIdSet::new(),
            outside_point_policy: OutsidePointPolicy::default(),
        }
    }
}

impl FsiParameters {
    pub fn with_end_time(mut self, end_time: f64) -> Self {
        self.end_time = end_time;
        self
    }

    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_output_interval(mut self, interval: f64) -> Self {
        self.output_interval = interval;
        self
    }

    pub fn with_refinement_interval(mut self, interval: f64) -> Self {
        self.refinement_interval = interval;
        self
    }

    pub fn with_global_refinement(mut self, times: usize) -> Self {
        self.global_refinement = times;
        self
    }

    pub fn with_viscosity(mut self, viscosity: f64) -> Self {
        self.viscosity = viscosity;
        self
    }

    /// Add a solid boundary identifier with a prescribed displacement.
    pub fn with_solid_dirichlet_bc(mut self, id: impl Into<BoundaryId>) -> Self {
        self.solid_dirichlet_bcs.insert(id);
        self
    }

    pub fn with_outside_point_policy(mut self, policy: OutsidePointPolicy) -> Self {
        self.outside_point_policy = policy;
        self
    }

    /// Check that all values are usable.
    pub fn validate(&self) -> Result<()> {
        if !self.end_time.is_finite() || self.end_time < 0.0 {
            return Err(FsiError::invalid_parameter(
                "end_time",
                format!("must be finite and non-negative, got {}", self.end_time),
            ));
        }
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(FsiError::invalid_parameter(
                "time_step",
                format!("must be finite and positive, got {}", self.time_step),
            ));
        }
        for (name, interval) in [
            ("output_interval", self.output_interval),
            ("refinement_interval", self.refinement_interval),
        ] {
            if !interval.is_finite() || interval <= 0.0 {
                return Err(FsiError::invalid_parameter(
                    name,
                    format!("must be finite and positive, got {}", interval),
                ));
            }
        }
        if !self.viscosity.is_finite() || self.viscosity < 0.0 {
            return Err(FsiError::invalid_parameter(
                "viscosity",
                format!("must be finite and non-negative, got {}", self.viscosity),
            ));
        }
        Ok(())
    }
}
