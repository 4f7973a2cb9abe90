//! Global simulation clock shared by the fluid and solid solvers.

use std::fmt;

/// Tolerance absorbing floating-point drift in the end-time test.
pub const TIME_EPSILON: f64 = 1e-12;

/// Fixed-step simulation clock.
///
/// Advanced only by the coupling loop. The run is finished once
/// `end - current <= TIME_EPSILON`, so accumulating `n` steps of `dt` stops
/// after exactly `ceil(end / dt)` steps for any end time.
///
/// # Example
///
/// ```
/// use fsi_rs::time::SimulationTime;
///
/// let mut time = SimulationTime::new(0.1, 0.05, 0.05, 1.0);
/// let mut steps = 0;
/// while !time.is_finished() {
///     time.increment();
///     steps += 1;
/// }
/// assert_eq!(steps, 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationTime {
    current: f64,
    end: f64,
    delta_t: f64,
    timestep: u64,
    output_interval: f64,
    refinement_interval: f64,
}

impl SimulationTime {
    /// Clock starting at time zero.
    pub fn new(end: f64, delta_t: f64, output_interval: f64, refinement_interval: f64) -> Self {
        Self {
            current: 0.0,
            end,
            delta_t,
            timestep: 0,
            output_interval,
            refinement_interval,
        }
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    #[inline]
    pub fn end(&self) -> f64 {
        self.end
    }

    #[inline]
    pub fn delta_t(&self) -> f64 {
        self.delta_t
    }

    /// Number of completed steps.
    #[inline]
    pub fn timestep(&self) -> u64 {
        self.timestep
    }

    /// Advance by one step. The last step may overshoot `end`.
    pub fn increment(&mut self) {
        self.current += self.delta_t;
        self.timestep += 1;
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.end - self.current <= TIME_EPSILON
    }

    /// True on every step that completes an output interval.
    pub fn time_to_output(&self) -> bool {
        self.completes_interval(self.output_interval)
    }

    /// True on every step that completes a refinement interval.
    pub fn time_to_refine(&self) -> bool {
        self.completes_interval(self.refinement_interval)
    }

    fn completes_interval(&self, interval: f64) -> bool {
        let delta = ((interval / self.delta_t).floor() as u64).max(1);
        self.timestep >= delta && self.timestep % delta == 0
    }
}

impl fmt::Display for SimulationTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t = {:.6} / {:.6} (step {}, dt = {:.3e})",
            self.current, self.end, self.timestep, self.delta_t
        )
    }
}
