//! Partitioned fluid-structure coupling loop.

use std::fmt;
use std::time::Instant;

use crate::coupling::{find_fluid_fsi, find_solid_bc, update_indicator};
use crate::error::{FsiError, Result};
use crate::solver::{FluidSolver, SolidSolver};
use crate::time::SimulationTime;

use super::config::FsiParameters;

// =============================================================================
// Coupling State
// =============================================================================

/// Lifecycle of a coupled run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CouplingState {
    /// Constructed; meshes not yet refined, systems not yet initialized.
    NotStarted,
    /// Initialized and advancing in time.
    Stepping,
    /// End time reached.
    Done,
}

impl CouplingState {
    pub fn name(self) -> &'static str {
        match self {
            CouplingState::NotStarted => "NotStarted",
            CouplingState::Stepping => "Stepping",
            CouplingState::Done => "Done",
        }
    }
}

impl fmt::Display for CouplingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Reports
// =============================================================================

/// Summary of one completed coupling step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    /// Step number, starting at 1.
    pub step: u64,
    /// Simulation time after the step.
    pub time: f64,
    /// Fluid cells covered by the solid.
    pub covered_cells: usize,
    /// Interface force samples handed to the fluid.
    pub interface_samples: usize,
    /// Traction samples handed to the solid.
    pub traction_samples: usize,
    /// The step completes an output interval.
    pub output_due: bool,
    /// The step completes a refinement interval.
    pub refine_due: bool,
}

/// Result of a completed run.
#[derive(Clone, Debug)]
pub struct SimulationSummary {
    /// Total number of coupling steps.
    pub n_steps: u64,
    /// Final simulation time reached.
    pub final_time: f64,
    /// Total wall-clock time in seconds.
    pub wall_time: f64,
}

// =============================================================================
// Simulation Runner
// =============================================================================

/// Drives a fluid and a solid solver through synchronized time steps.
///
/// Each step runs, strictly in this order:
/// 1. fluid traction on the solid boundary, handed to the solid
/// 2. one solid step
/// 3. indicator update against the new solid configuration
/// 4. interface force on covered cells, handed to the fluid
/// 5. one fluid step
/// 6. time advance
///
/// There is no sub-iteration between fluid and solid within a step, and
/// nothing computed in one step is reused in the next. Any collaborator
/// error aborts the run.
///
/// # Example
///
/// ```
/// use fsi_rs::mesh::Mesh2D;
/// use fsi_rs::simulation::{FsiParameters, FsiSimulation};
/// use fsi_rs::solver::{PrescribedFluid, PrescribedSolid};
/// use fsi_rs::types::Point2;
///
/// let fluid = PrescribedFluid::new(Mesh2D::uniform_rectangle(0.0, 1.0, 0.0, 1.0, 4, 4), 1e-3);
/// let solid = PrescribedSolid::new(Mesh2D::disk(Point2::new(0.5, 0.5), 0.2, 2));
/// let params = FsiParameters::default().with_end_time(0.1).with_time_step(0.05);
///
/// let mut sim = FsiSimulation::new(fluid, solid, params).unwrap();
/// let summary = sim.run().unwrap();
/// assert_eq!(summary.n_steps, 2);
/// ```
pub struct FsiSimulation<F, S>
where
    F: FluidSolver,
    S: SolidSolver,
{
    fluid: F,
    solid: S,
    parameters: FsiParameters,
    time: SimulationTime,
    state: CouplingState,
}

impl<F, S> FsiSimulation<F, S>
where
    F: FluidSolver,
    S: SolidSolver,
{
    /// Create a run from two solvers and validated parameters.
    pub fn new(fluid: F, solid: S, parameters: FsiParameters) -> Result<Self> {
        parameters.validate()?;

        log::info!(
            "Number of active {} cells: {}",
            fluid.name(),
            fluid.mesh().n_active_cells()
        );
        log::info!(
            "Number of active {} cells: {}",
            solid.name(),
            solid.mesh().n_active_cells()
        );

        let time = SimulationTime::new(
            parameters.end_time,
            parameters.time_step,
            parameters.output_interval,
            parameters.refinement_interval,
        );

        Ok(Self {
            fluid,
            solid,
            parameters,
            time,
            state: CouplingState::NotStarted,
        })
    }

    pub fn fluid(&self) -> &F {
        &self.fluid
    }

    pub fn solid(&self) -> &S {
        &self.solid
    }

    pub fn time(&self) -> &SimulationTime {
        &self.time
    }

    pub fn state(&self) -> CouplingState {
        self.state
    }

    pub fn parameters(&self) -> &FsiParameters {
        &self.parameters
    }

    /// Give back the two solvers.
    pub fn into_parts(self) -> (F, S) {
        (self.fluid, self.solid)
    }

    /// Run from the start to the end time.
    pub fn run(&mut self) -> Result<SimulationSummary> {
        self.run_with_callback(|_| {})
    }

    /// Run from the start to the end time, calling `callback` after every
    /// step.
    ///
    /// Fails with [`FsiError::InvalidState`] unless the run has not been
    /// started yet.
    pub fn run_with_callback<C>(&mut self, mut callback: C) -> Result<SimulationSummary>
    where
        C: FnMut(&StepReport),
    {
        if self.state != CouplingState::NotStarted {
            return Err(FsiError::InvalidState {
                expected: CouplingState::NotStarted.name(),
                actual: self.state.name(),
            });
        }

        let start_wall = Instant::now();
        self.initialize()?;

        log::info!(
            "Starting FSI run: end time {:.4}, time step {:.3e}",
            self.time.end(),
            self.time.delta_t()
        );

        let mut first_step = true;
        while !self.time.is_finished() {
            let report = self.step(first_step)?;
            first_step = false;
            callback(&report);
        }

        self.state = CouplingState::Done;
        let wall_time = start_wall.elapsed().as_secs_f64();

        log::info!(
            "FSI run complete: {} steps, t = {:.6}, wall time {:.2}s",
            self.time.timestep(),
            self.time.current(),
            wall_time
        );

        Ok(SimulationSummary {
            n_steps: self.time.timestep(),
            final_time: self.time.current(),
            wall_time,
        })
    }

    /// Refine the fluid mesh and initialize both systems.
    fn initialize(&mut self) -> Result<()> {
        if self.parameters.global_refinement > 0 {
            self.fluid.refine_global(self.parameters.global_refinement);
            log::info!(
                "Refined {} mesh {} times: {} active cells",
                self.fluid.name(),
                self.parameters.global_refinement,
                self.fluid.mesh().n_active_cells()
            );
        }

        self.fluid.setup()?;
        self.solid.set_dirichlet_boundaries(&self.parameters.solid_dirichlet_bcs);
        self.solid.setup()?;
        self.state = CouplingState::Stepping;
        Ok(())
    }

    /// One coupling step.
    fn step(&mut self, first_step: bool) -> Result<StepReport> {
        let policy = self.parameters.outside_point_policy;

        log::trace!("Step {}: fluid traction", self.time.timestep() + 1);
        let traction = find_solid_bc(
            &self.fluid,
            &self.solid,
            self.parameters.viscosity,
            &self.parameters.solid_dirichlet_bcs,
            policy,
        )?;
        let traction_samples = traction.len();
        self.solid.set_fluid_traction(traction)?;

        log::trace!("Step {}: {} step", self.time.timestep() + 1, self.solid.name());
        self.solid.run_one_step(first_step)?;

        let covered_cells = update_indicator(&mut self.fluid, &mut self.solid)?;

        log::trace!("Step {}: interface force", self.time.timestep() + 1);
        let force = find_fluid_fsi(&self.fluid, &self.solid, self.time.delta_t(), policy)?;
        let interface_samples = force.len();
        self.fluid.set_interface_force(force)?;

        log::trace!("Step {}: {} step", self.time.timestep() + 1, self.fluid.name());
        self.fluid.run_one_step(first_step)?;

        self.time.increment();

        let report = StepReport {
            step: self.time.timestep(),
            time: self.time.current(),
            covered_cells,
            interface_samples,
            traction_samples,
            output_due: self.time.time_to_output(),
            refine_due: self.time.time_to_refine(),
        };

        log::debug!(
            "Step {}: t = {:.6}, {} covered cells, {} force samples, {} traction samples",
            report.step,
            report.time,
            report.covered_cells,
            report.interface_samples,
            report.traction_samples
        );
        if report.output_due {
            log::info!("Output due at step {} ({})", report.step, self.time);
        }

        Ok(report)
    }
}
