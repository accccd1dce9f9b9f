use crate::util::Interval;

/// The gap below which a vehicle brakes as hard as it can, in m.
const MIN_GAP: f64 = 2.0; // m

/// The gap at which a vehicle reaches its maximum acceleration, in m.
const FREE_GAP: f64 = 30.0; // m

/// The acceleration model of a vehicle.
#[derive(Clone, Debug)]
pub struct AccelerationModel {
    follow_dist: f64,
    max_acc: f64,
    max_dec: f64,
}

/// The parameters of the acceleration model.
pub struct ModelParams {
    /// The gap to the vehicle ahead at which the commanded acceleration is zero, in m.
    pub follow_distance: f64,
    /// The vehicle's maximum acceleration in m/s<sup>2</sup>.
    pub max_acceleration: f64,
    /// The vehicle's maximum deceleration, a negative number in m/s<sup>2</sup>.
    pub max_deceleration: f64,
}

impl AccelerationModel {
    /// Creates a new acceleration model.
    ///
    /// # Panics
    /// Panics unless the follow distance lies strictly between 2 m and 30 m,
    /// as both ramps of the model degenerate at those gaps.
    pub fn new(params: &ModelParams) -> Self {
        assert!(
            params.follow_distance > MIN_GAP && params.follow_distance < FREE_GAP,
            "Invalid follow distance"
        );
        AccelerationModel {
            follow_dist: params.follow_distance,
            max_acc: params.max_acceleration,
            max_dec: params.max_deceleration,
        }
    }

    /// The gap to the vehicle ahead at which the commanded acceleration is zero, in m.
    pub fn follow_distance(&self) -> f64 {
        self.follow_dist
    }

    /// Computes the commanded acceleration for a vehicle whose gap to the
    /// vehicle ahead is `gap`. Only the magnitude of the separation matters,
    /// so the sign of `gap` is discarded.
    ///
    /// Below 2 m the model commands maximum deceleration regardless of the
    /// follow distance. The deceleration ramps linearly to zero at the follow
    /// distance, and the acceleration ramps linearly from zero up to the
    /// maximum at a gap of 30 m, beyond which it stays capped.
    pub fn gap_acceleration(&self, gap: f64) -> f64 {
        let gap = gap.abs();
        if gap < MIN_GAP {
            self.max_dec
        } else if gap < self.follow_dist {
            let t = Interval::new(MIN_GAP, self.follow_dist).inv_lerp(gap);
            Interval::new(self.max_dec, 0.0).lerp(t)
        } else if gap > self.follow_dist {
            let t = Interval::new(self.follow_dist, FREE_GAP).inv_lerp(gap);
            f64::min(t * self.max_acc, self.max_acc)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn model(follow_distance: f64) -> AccelerationModel {
        AccelerationModel::new(&ModelParams {
            follow_distance,
            max_acceleration: 5.0,
            max_deceleration: -8.0,
        })
    }

    #[test]
    fn zero_at_follow_distance() {
        let acc = model(10.0);
        assert_eq!(acc.gap_acceleration(10.0), 0.0);
        assert_approx_eq!(acc.gap_acceleration(10.0 - 1e-9), 0.0, 1e-6);
        assert_approx_eq!(acc.gap_acceleration(10.0 + 1e-9), 0.0, 1e-6);
    }

    #[test]
    fn continuous_at_min_gap() {
        let acc = model(10.0);
        assert_eq!(acc.gap_acceleration(1.9), -8.0);
        assert_approx_eq!(acc.gap_acceleration(2.0), -8.0);
        assert_approx_eq!(acc.gap_acceleration(2.0 + 1e-9), -8.0, 1e-6);
    }

    #[test]
    fn braking_ramp_is_linear() {
        let acc = model(10.0);
        // Half way between 2 m and 10 m.
        assert_approx_eq!(acc.gap_acceleration(6.0), -4.0);
        assert_approx_eq!(acc.gap_acceleration(4.0), -6.0);
    }

    #[test]
    fn acceleration_ramp_is_linear_and_capped() {
        let acc = model(10.0);
        // Half way between 10 m and 30 m.
        assert_approx_eq!(acc.gap_acceleration(20.0), 2.5);
        assert_approx_eq!(acc.gap_acceleration(30.0), 5.0);
        for gap in [31.0, 50.0, 1000.0] {
            assert_eq!(acc.gap_acceleration(gap), 5.0);
        }
    }

    #[test]
    fn sign_of_gap_is_discarded() {
        let acc = model(10.0);
        assert_eq!(acc.gap_acceleration(-20.0), acc.gap_acceleration(20.0));
        assert_eq!(acc.gap_acceleration(-1.0), -8.0);
    }

    #[test]
    #[should_panic(expected = "Invalid follow distance")]
    fn rejects_follow_distance_at_min_gap() {
        model(2.0);
    }

    #[test]
    #[should_panic(expected = "Invalid follow distance")]
    fn rejects_follow_distance_at_free_gap() {
        model(30.0);
    }
}
