//! Handling of query points that no cell contains.

use crate::error::{FsiError, Result};
use crate::types::Point2;

/// What a cross-mesh transfer does when a point value is requested at a
/// point outside the queried mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutsidePointPolicy {
    /// Abort with [`FsiError::PointOutsideMesh`].
    #[default]
    Error,
    /// Use zero for the missing value and log a warning.
    Zero,
}

impl OutsidePointPolicy {
    /// Turn an optional point value into a value according to the policy.
    pub fn resolve<T: Default>(self, value: Option<T>, mesh: &'static str, p: Point2) -> Result<T> {
        match (value, self) {
            (Some(value), _) => Ok(value),
            (None, OutsidePointPolicy::Error) => Err(FsiError::PointOutsideMesh {
                mesh,
                x: p.x,
                y: p.y,
            }),
            (None, OutsidePointPolicy::Zero) => {
                log::warn!("Point {} lies outside the {} mesh, using zero", p, mesh);
                Ok(T::default())
            }
        }
    }
}
