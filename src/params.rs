#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The parameters of a simulation, fixed for the duration of a run.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationParams {
    /// The maximum acceleration of any vehicle, in m/s<sup>2</sup>.
    pub max_acceleration: f64,
    /// The maximum deceleration of any vehicle, a negative number in m/s<sup>2</sup>.
    pub max_deceleration: f64,
    /// The maximum velocity of any vehicle, in m/s.
    pub max_velocity: f64,
    /// The maximum amount by which a vehicle may travel faster
    /// than the vehicle directly ahead of it, in m/s.
    pub max_closing_speed: f64,
    /// The length of the circular track, in m.
    pub track_length: f64,
    /// The simulation time step, in s.
    pub time_step: f64,
}

impl SimulationParams {
    /// Checks that the parameters describe a runnable simulation.
    pub(crate) fn validate(&self) {
        assert!(self.max_acceleration > 0.0, "Invalid maximum acceleration");
        assert!(self.max_deceleration < 0.0, "Invalid maximum deceleration");
        assert!(self.max_velocity > 0.0, "Invalid maximum velocity");
        assert!(self.max_closing_speed >= 0.0, "Invalid maximum closing speed");
        assert!(self.track_length > 0.0, "Invalid track length");
        assert!(self.time_step > 0.0, "Invalid time step");
    }
}
