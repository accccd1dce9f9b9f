use self::acceleration::AccelerationModel;
use self::dynamics::calc_ring_coords;
use crate::math::{Point2d, Vector2d};
use crate::util::Interval;
use crate::{SimulationParams, VehicleId};

mod acceleration;
mod dynamics;

/// A simulated vehicle.
#[derive(Clone, Debug)]
pub struct Vehicle {
    /// The vehicle's ID
    pub(crate) id: VehicleId,
    /// The acceleration model
    model: AccelerationModel,
    /// The longitudinal position along the track, in m.
    pos: f64,
    /// The velocity in m/s.
    vel: f64,
    /// The commanded acceleration in m/s<sup>2</sup>,
    /// applied on the next integration step.
    acc: f64,
    /// The number of laps the vehicle has completed.
    laps: usize,
    /// The world space coordinates of the centre of the vehicle.
    world_pos: Point2d,
    /// A world space unit vector tangent to the vehicle's heading.
    world_dir: Vector2d,
}

/// The attributes of a simulated vehicle.
#[derive(Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleAttributes {
    /// The initial longitudinal position along the track, in m.
    pub position: f64,
    /// The initial velocity in m/s.
    pub velocity: f64,
    /// The initial acceleration in m/s<sup>2</sup>.
    pub acceleration: f64,
    /// The gap to the vehicle ahead at which the vehicle
    /// neither accelerates nor brakes, in m.
    pub follow_distance: f64,
}

impl Vehicle {
    /// Creates a new vehicle.
    ///
    /// # Panics
    /// Panics if the follow distance does not lie strictly between 2 m and 30 m,
    /// or if the initial velocity is negative or exceeds the maximum velocity.
    pub(crate) fn new(id: VehicleId, attributes: &VehicleAttributes, params: &SimulationParams) -> Self {
        assert!(
            Interval::new(0.0, params.max_velocity).contains(attributes.velocity),
            "Invalid initial velocity"
        );
        let (world_pos, world_dir) = calc_ring_coords(attributes.position, params.track_length);
        Self {
            id,
            model: AccelerationModel::new(&acceleration::ModelParams {
                follow_distance: attributes.follow_distance,
                max_acceleration: params.max_acceleration,
                max_deceleration: params.max_deceleration,
            }),
            pos: attributes.position,
            vel: attributes.velocity,
            acc: attributes.acceleration,
            laps: 0,
            world_pos,
            world_dir,
        }
    }

    /// Gets the vehicle's ID.
    pub fn id(&self) -> VehicleId {
        self.id
    }

    /// The longitudinal position of the vehicle along the track, in m.
    pub fn pos(&self) -> f64 {
        self.pos
    }

    /// The vehicle's velocity in m/s.
    pub fn vel(&self) -> f64 {
        self.vel
    }

    /// The vehicle's commanded acceleration in m/s<sup>2</sup>.
    pub fn acc(&self) -> f64 {
        self.acc
    }

    /// The gap at which the vehicle neither accelerates nor brakes, in m.
    pub fn follow_distance(&self) -> f64 {
        self.model.follow_distance()
    }

    /// The number of laps the vehicle has completed.
    pub fn laps(&self) -> usize {
        self.laps
    }

    /// The coordinates in world space of the centre of the vehicle.
    pub fn position(&self) -> Point2d {
        self.world_pos
    }

    /// A unit vector in world space aligned with the vehicle's heading.
    pub fn direction(&self) -> Vector2d {
        self.world_dir
    }

    /// Integrates the vehicle's position over the time step.
    pub(crate) fn integrate_position(&mut self, dt: f64) {
        self.pos += self.vel * dt;
    }

    /// Integrates the vehicle's velocity over the time step and clamps it,
    /// first to the velocity bounds, then against the leader's velocity so
    /// the vehicle never closes on it faster than the permitted margin.
    pub(crate) fn integrate_velocity(&mut self, dt: f64, lead_vel: f64, params: &SimulationParams) {
        let vel = f64::max(self.vel + dt * self.acc, 0.0);
        let vel = f64::min(vel, params.max_velocity);
        let vel = f64::min(vel, lead_vel + params.max_closing_speed);
        self.vel = vel;
    }

    /// Recomputes the commanded acceleration from the gap to the vehicle ahead.
    /// The result takes effect on the next integration step.
    pub(crate) fn follow_vehicle(&mut self, gap: f64) {
        self.acc = self.model.gap_acceleration(gap);
    }

    /// Relocates the vehicle to the start of the track after it has
    /// travelled past the end, completing a lap.
    pub(crate) fn wrap(&mut self, track_length: f64) {
        self.pos -= track_length;
        self.laps += 1;
    }

    /// Updates the vehicle's world coordinates.
    pub(crate) fn update_coords(&mut self, track_length: f64) {
        let (world_pos, world_dir) = calc_ring_coords(self.pos, track_length);
        self.world_pos = world_pos;
        self.world_dir = world_dir;
    }
}
