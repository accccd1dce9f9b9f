use crate::vehicle::{Vehicle, VehicleAttributes};
use crate::{SimulationParams, VehicleId, VehicleSet};
use itertools::Itertools;
use rand_distr::Distribution;
use smallvec::SmallVec;

/// A traffic simulation on a closed circular road.
pub struct Simulation {
    /// The parameters of the simulation.
    params: SimulationParams,
    /// The vehicles being simulated.
    vehicles: VehicleSet,
    /// Vehicle IDs in ring order. The vehicle at index `i` follows the one
    /// at index `i - 1`, and the vehicle at index 0 paces the ring.
    ring: Vec<VehicleId>,
    /// The accumulated simulation time in s.
    time: f64,
    /// The current frame of simulation.
    frame: usize,
}

impl Simulation {
    /// Creates a new simulation with no vehicles.
    ///
    /// # Panics
    /// Panics if any of the parameters is out of range,
    /// such as a non-positive time step or track length.
    pub fn new(params: SimulationParams) -> Self {
        params.validate();
        Self {
            params,
            vehicles: VehicleSet::default(),
            ring: vec![],
            time: 0.0,
            frame: 0,
        }
    }

    /// Adds a vehicle to the back of the ring.
    ///
    /// Vehicles must be added in ring order: the first vehicle added becomes
    /// the pacer, and each subsequent vehicle follows the previous one, so
    /// positions should decrease with insertion order modulo the track length.
    ///
    /// # Panics
    /// Panics if the vehicle's follow distance or initial velocity is
    /// out of range. [Read more](Vehicle::new)
    pub fn add_vehicle(&mut self, attributes: &VehicleAttributes) -> VehicleId {
        let vehicle_id = self
            .vehicles
            .insert_with_key(|id| Vehicle::new(id, attributes, &self.params));
        self.ring.push(vehicle_id);
        vehicle_id
    }

    /// Spawns `count` vehicles spaced roughly one follow distance apart with
    /// a small random spacing jitter, with velocities sampled from a normal
    /// distribution with the given mean and standard deviation.
    ///
    /// The vehicles occupy the first `count * follow_distance` metres or so
    /// of the track, which should not exceed the track length.
    pub fn spawn_vehicles(
        &mut self,
        count: usize,
        mean_velocity: f64,
        stddev: f64,
        follow_distance: f64,
    ) {
        let mut rand = rand::thread_rng();
        let vel_distr =
            rand_distr::Normal::new(mean_velocity, stddev).expect("Invalid standard deviation");
        let gap_distr = rand_distr::Normal::new(follow_distance, 0.01 * follow_distance)
            .expect("Invalid standard deviation");

        // Accumulated gaps keep the positions strictly decreasing with
        // insertion order, as the ring requires.
        let mut position = 0.0;
        let attrs: Vec<VehicleAttributes> = (0..count)
            .map(|_| {
                let gap = gap_distr
                    .sample(&mut rand)
                    .clamp(0.9 * follow_distance, 1.1 * follow_distance);
                position += gap;
                VehicleAttributes {
                    position,
                    velocity: vel_distr
                        .sample(&mut rand)
                        .clamp(0.0, self.params.max_velocity),
                    acceleration: 0.0,
                    follow_distance,
                }
            })
            .collect();
        for attributes in attrs.iter().rev() {
            self.add_vehicle(attributes);
        }
    }

    /// Advances the simulation by one time step.
    ///
    /// A ring with fewer than two vehicles has no follower, so no
    /// acceleration is ever recomputed and each vehicle simply circulates
    /// at its initial velocity.
    pub fn step(&mut self) {
        let dt = self.params.time_step;
        self.integrate_positions(dt);
        self.integrate_velocities(dt);
        self.apply_accelerations();
        self.wrap_completed_laps();
        self.update_vehicle_coords();
        self.time += dt;
        self.frame += 1;
    }

    /// Repeatedly steps the simulation until the simulated time
    /// reaches `duration` seconds.
    pub fn run(&mut self, duration: f64) {
        while self.time < duration {
            self.step();
        }
    }

    /// Repeatedly steps the simulation until the simulated time reaches
    /// `duration` seconds, invoking `observer` after each step.
    pub fn run_with(&mut self, duration: f64, mut observer: impl FnMut(&Simulation)) {
        while self.time < duration {
            self.step();
            observer(self);
        }
    }

    /// Gets the accumulated simulation time in s.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Gets the current simulation frame index.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Gets the parameters of the simulation.
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Gets the number of vehicles on the ring.
    pub fn num_vehicles(&self) -> usize {
        self.ring.len()
    }

    /// Returns an iterator over the vehicles in ring order, pacer first.
    ///
    /// The order in which a given vehicle appears is not stable across steps
    /// that trigger a wraparound; use [VehicleId]s to track identity.
    pub fn iter_vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.ring.iter().map(move |id| &self.vehicles[*id])
    }

    /// Gets the vehicle IDs in ring order, pacer first.
    pub fn ring(&self) -> &[VehicleId] {
        &self.ring
    }

    /// Gets a reference to the vehicle with the given ID.
    pub fn get_vehicle(&self, vehicle_id: VehicleId) -> &Vehicle {
        &self.vehicles[vehicle_id]
    }

    /// Gets a reference to the vehicle currently pacing the ring.
    pub fn pacer(&self) -> Option<&Vehicle> {
        self.ring.first().map(|id| &self.vehicles[*id])
    }

    /// Integrates the positions of all vehicles, pacer included.
    fn integrate_positions(&mut self, dt: f64) {
        for (_, vehicle) in &mut self.vehicles {
            vehicle.integrate_position(dt);
        }
    }

    /// Integrates and clamps the velocities of all vehicles except the pacer,
    /// which travels at its own unmodified velocity.
    ///
    /// Followers are processed front to back, so the closing speed of each
    /// vehicle is limited against the velocity its leader holds at the end
    /// of this phase.
    fn integrate_velocities(&mut self, dt: f64) {
        for (lead, follow) in self.ring.iter().copied().tuple_windows() {
            let lead_vel = self.vehicles[lead].vel();
            self.vehicles[follow].integrate_velocity(dt, lead_vel, &self.params);
        }
    }

    /// Recomputes the commanded acceleration of every follower from its gap
    /// to the vehicle ahead. The new accelerations take effect on the next step.
    fn apply_accelerations(&mut self) {
        for (lead, follow) in self.ring.iter().copied().tuple_windows() {
            let gap = self.vehicles[lead].pos() - self.vehicles[follow].pos();
            self.vehicles[follow].follow_vehicle(gap);
        }
    }

    /// Finds vehicles that have travelled past the end of the track, wraps
    /// their positions and promotes each to the front of the ring as the new
    /// pacer.
    ///
    /// Vehicles are collected in ring order and promoted one at a time, so
    /// when several vehicles wrap in the same step the one scanned last ends
    /// up pacing the ring.
    fn wrap_completed_laps(&mut self) {
        let track_length = self.params.track_length;
        let wrapped: SmallVec<[VehicleId; 4]> = self
            .ring
            .iter()
            .copied()
            .filter(|id| self.vehicles[*id].pos() > track_length)
            .collect();
        for id in wrapped {
            self.vehicles[id].wrap(track_length);
            log::debug!(
                "vehicle {:?} completed lap {} at t = {:.1} s",
                id,
                self.vehicles[id].laps(),
                self.time
            );
            if let Some(idx) = self.ring.iter().position(|v| *v == id) {
                self.ring.remove(idx);
                self.ring.insert(0, id);
            }
        }
    }

    /// Updates the world coordinates of all the vehicles.
    fn update_vehicle_coords(&mut self) {
        for (_, vehicle) in &mut self.vehicles {
            vehicle.update_coords(self.params.track_length);
        }
    }
}
