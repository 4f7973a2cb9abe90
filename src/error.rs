//! Error types for FSI coupling operations.

use thiserror::Error;

use crate::types::ElementIndex;

/// Errors that can occur while coupling the fluid and solid solvers.
///
/// All physics failures originate in the collaborating solvers; the
/// coupling layer only reports them. A returned error aborts the run.
#[derive(Error, Debug)]
pub enum FsiError {
    /// A configuration value failed validation.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The Jacobian of a cell mapping is not positive at an evaluation point.
    #[error("Degenerate cell {cell}: Jacobian determinant {det:.3e}")]
    DegenerateCell { cell: ElementIndex, det: f64 },

    /// A point-value query found no cell containing the point.
    #[error("Point ({x:.6}, {y:.6}) lies outside the {mesh} mesh")]
    PointOutsideMesh { mesh: &'static str, x: f64, y: f64 },

    /// A collaborator received a coupling sequence of the wrong length.
    #[error("{what}: expected {expected} samples, got {actual}")]
    SampleCountMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Forward/backward mesh displacement applied out of order.
    #[error("Mesh transform misuse: {0}")]
    TransformState(&'static str),

    /// The coupling loop was driven from the wrong state.
    #[error("Invalid coupling state: expected {expected}, found {actual}")]
    InvalidState {
        expected: &'static str,
        actual: &'static str,
    },

    /// A collaborating solver failed. Fatal for the run.
    #[error("{solver} solver failed: {message}")]
    SolverFailure {
        solver: &'static str,
        message: String,
    },
}

impl FsiError {
    /// Create an invalid parameter error.
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Create a solver failure error.
    pub fn solver_failure(solver: &'static str, message: impl Into<String>) -> Self {
        Self::SolverFailure {
            solver,
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FsiError>;
