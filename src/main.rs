use std::time::Instant;

use traffic_ring::{Simulation, SimulationParams};

fn main() {
    let mut sim = Simulation::new(SimulationParams {
        max_acceleration: 5.0,
        max_deceleration: -8.0,
        max_velocity: 120.0 / 3.6,
        max_closing_speed: 5.0,
        track_length: 200.0,
        time_step: 0.1,
    });
    sim.spawn_vehicles(18, 20.5, 0.5, 10.0);

    println!("Simulating...");
    let start = Instant::now();
    sim.run_with(1000.0, |sim| {
        if sim.frame() % 500 == 0 {
            let mean_vel =
                sim.iter_vehicles().map(|v| v.vel()).sum::<f64>() / sim.num_vehicles() as f64;
            let laps = sim.iter_vehicles().map(|v| v.laps()).sum::<usize>();
            println!(
                "t = {:6.1} s, mean velocity = {:5.2} m/s, laps completed = {}",
                sim.time(),
                mean_vel,
                laps
            );
        }
    });
    let frame = start.elapsed() / sim.frame() as u32;
    println!("Simulated {} frames ({:?} per frame)", sim.frame(), frame);
}
