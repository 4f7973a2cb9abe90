//! Integration tests for the coupling loop.
//!
//! These tests verify:
//! - Stage order within a step (traction, solid, indicator, force, fluid, time)
//! - Number of steps for a given end time and time step
//! - The first-step flag
//! - Abort on collaborator failure with the solid mesh left in reference state

use std::cell::RefCell;
use std::rc::Rc;

use fsi_rs::{
    BoundaryIdSet, CellPropertyStore, CouplingState, FluidSolution, FluidSolver, FsiError, FsiParameters,
    FsiSimulation, InterfaceForceSample, Mesh2D, NodalVectorField, Point2, PrescribedFluid,
    PrescribedSolid, QuadratureRule1D, QuadratureRule2D, Result, SolidSolver, StressField,
    TractionSample, Vector2,
};

type EventLog = Rc<RefCell<Vec<&'static str>>>;

/// Fluid that records every coupling call before delegating.
struct RecordingFluid {
    inner: PrescribedFluid,
    log: EventLog,
}

impl FluidSolver for RecordingFluid {
    fn mesh(&self) -> &Mesh2D {
        self.inner.mesh()
    }

    fn refine_global(&mut self, times: usize) {
        self.log.borrow_mut().push("refine");
        self.inner.refine_global(times);
    }

    fn setup(&mut self) -> Result<()> {
        self.log.borrow_mut().push("fluid setup");
        self.inner.setup()
    }

    fn volume_quadrature(&self) -> &QuadratureRule2D {
        self.inner.volume_quadrature()
    }

    fn cell_properties(&self) -> &CellPropertyStore {
        self.inner.cell_properties()
    }

    fn cell_properties_mut(&mut self) -> &mut CellPropertyStore {
        self.log.borrow_mut().push("indicator");
        self.inner.cell_properties_mut()
    }

    fn present_solution(&self) -> &FluidSolution {
        self.inner.present_solution()
    }

    fn solution_increment(&self) -> &FluidSolution {
        self.inner.solution_increment()
    }

    fn set_interface_force(&mut self, force: InterfaceForceSample) -> Result<()> {
        self.log.borrow_mut().push("force");
        self.inner.set_interface_force(force)
    }

    fn run_one_step(&mut self, first_step: bool) -> Result<()> {
        self.log.borrow_mut().push("fluid");
        self.inner.run_one_step(first_step)
    }
}

/// Solid that records every coupling call and optionally fails at a step.
struct RecordingSolid {
    inner: PrescribedSolid,
    log: EventLog,
    fail_at_step: Option<usize>,
}

impl SolidSolver for RecordingSolid {
    fn mesh(&self) -> &Mesh2D {
        self.inner.mesh()
    }

    fn mesh_mut(&mut self) -> &mut Mesh2D {
        self.inner.mesh_mut()
    }

    fn set_dirichlet_boundaries(&mut self, ids: &BoundaryIdSet) {
        self.inner.set_dirichlet_boundaries(ids);
    }

    fn setup(&mut self) -> Result<()> {
        self.log.borrow_mut().push("solid setup");
        self.inner.setup()
    }

    fn face_quadrature(&self) -> &QuadratureRule1D {
        self.inner.face_quadrature()
    }

    fn current_displacement(&self) -> &NodalVectorField {
        self.inner.current_displacement()
    }

    fn current_acceleration(&self) -> &NodalVectorField {
        self.inner.current_acceleration()
    }

    fn stress(&self) -> &StressField {
        self.inner.stress()
    }

    fn set_fluid_traction(&mut self, traction: TractionSample) -> Result<()> {
        self.log.borrow_mut().push("traction");
        self.inner.set_fluid_traction(traction)
    }

    fn run_one_step(&mut self, first_step: bool) -> Result<()> {
        self.log.borrow_mut().push("solid");
        if self.fail_at_step == Some(self.inner.steps_taken() + 1) {
            return Err(FsiError::solver_failure("solid", "diverged"));
        }
        self.inner.run_one_step(first_step)
    }
}

fn recording_pair(fail_at_step: Option<usize>) -> (RecordingFluid, RecordingSolid, EventLog) {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let fluid = RecordingFluid {
        inner: PrescribedFluid::new(Mesh2D::uniform_rectangle(0.0, 1.0, 0.0, 1.0, 4, 4), 1e-3)
            .with_pressure(|p| 1.0 - p.y),
        log: log.clone(),
    };
    let solid = RecordingSolid {
        inner: PrescribedSolid::new(Mesh2D::disk(Point2::new(0.5, 0.5), 0.3, 4))
            .with_displacement(|p| Vector2::new(0.05 * (p.y - 0.5), 0.0)),
        log: log.clone(),
        fail_at_step,
    };
    (fluid, solid, log)
}

#[test]
fn test_scenario_two_steps_in_order() {
    let (fluid, solid, log) = recording_pair(None);
    let params = FsiParameters::default()
        .with_end_time(0.10)
        .with_time_step(0.05)
        .with_global_refinement(1);

    let mut sim = FsiSimulation::new(fluid, solid, params).unwrap();
    let callback_log = log.clone();
    let summary = sim
        .run_with_callback(|_| callback_log.borrow_mut().push("advance"))
        .unwrap();

    assert_eq!(summary.n_steps, 2);
    assert_eq!(sim.state(), CouplingState::Done);

    let step = ["traction", "solid", "indicator", "force", "fluid", "advance"];
    let mut expected = vec!["refine", "fluid setup", "solid setup"];
    expected.extend(step);
    expected.extend(step);
    assert_eq!(*log.borrow(), expected);

    let (fluid, solid) = sim.into_parts();
    assert_eq!(fluid.inner.step_flags(), &[true, false]);
    assert_eq!(solid.inner.step_flags(), &[true, false]);
}

#[test]
fn test_step_count_is_ceiling_of_end_over_step() {
    for (end_time, time_step, expected) in [
        (0.1, 0.05, 2),
        (1.0, 0.1, 10),
        (1.0, 0.3, 4),
        (0.25, 0.1, 3),
        (0.3, 0.1, 3),
        (0.0, 0.1, 0),
    ] {
        let fluid = PrescribedFluid::new(Mesh2D::uniform_rectangle(0.0, 1.0, 0.0, 1.0, 2, 2), 1e-3);
        let solid = PrescribedSolid::new(Mesh2D::disk(Point2::new(0.5, 0.5), 0.25, 2));
        let params = FsiParameters::default()
            .with_end_time(end_time)
            .with_time_step(time_step);

        let mut sim = FsiSimulation::new(fluid, solid, params).unwrap();
        let summary = sim.run().unwrap();

        assert_eq!(summary.n_steps, expected, "end {} step {}", end_time, time_step);
        assert_eq!(sim.fluid().steps_taken(), expected as usize);
        assert_eq!(sim.solid().steps_taken(), expected as usize);
        assert!(summary.final_time >= end_time - 1e-12);
    }
}

#[test]
fn test_solver_failure_aborts_run() {
    let (fluid, solid, log) = recording_pair(Some(2));
    let reference = solid.inner.mesh().vertices.clone();
    let params = FsiParameters::default().with_end_time(1.0).with_time_step(0.1);

    let mut sim = FsiSimulation::new(fluid, solid, params).unwrap();
    let err = sim.run().unwrap_err();
    assert!(matches!(err, FsiError::SolverFailure { solver: "solid", .. }));

    // Second step stops right after the solid call
    let events = log.borrow();
    assert_eq!(events.last(), Some(&"solid"));
    assert_eq!(events.iter().filter(|e| **e == "fluid").count(), 1);

    assert_eq!(sim.state(), CouplingState::Stepping);
    assert_eq!(sim.solid().inner.mesh().vertices, reference);
}

#[test]
fn test_coupling_data_sizes_match_collaborators() {
    let fluid = PrescribedFluid::new(Mesh2D::uniform_rectangle(0.0, 2.0, 0.0, 1.0, 8, 4), 1e-3);
    let solid_mesh = Mesh2D::uniform_rectangle_colorized(0.5, 1.0, 0.0, 0.4, 2, 4);
    let params = FsiParameters::default()
        .with_end_time(0.05)
        .with_time_step(0.01)
        .with_solid_dirichlet_bc(2);
    // Dirichlet ids come from the run parameters only
    let solid = PrescribedSolid::new(solid_mesh);

    let mut sim = FsiSimulation::new(fluid, solid, params).unwrap();
    let mut reports = Vec::new();
    sim.run_with_callback(|r| reports.push(r.clone())).unwrap();

    assert_eq!(reports.len(), 5);
    for report in &reports {
        // Left, right and top faces remain after dropping the bottom, 2 points each
        assert_eq!(report.traction_samples, 20);
        assert_eq!(report.interface_samples, report.covered_cells * 4);
    }

    let (fluid, solid) = sim.into_parts();
    assert_eq!(fluid.last_interface_force().unwrap().len(), reports[4].interface_samples);
    assert_eq!(solid.last_traction().unwrap().len(), 20);
}
