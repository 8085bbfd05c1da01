use crate::core::constants::CURVE_PARAMETER;

/// Motion of one pan axis: an optional constant-velocity phase followed by a quadratic decay
/// that comes to rest at `start_position + decay_offset`.
///
/// During the linear phase the axis moves at `decay_offset / decay_distance` px/ms, i.e. one
/// pixel per millisecond in the direction of the offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisState {
    pub start_position: f64,
    pub decay_offset: f64,
    pub decay_distance: f64,
    pub start_time: f64,
    pub decay_start_time: f64,
    pub decay_duration: f64,
}

impl AxisState {
    pub fn new(
        start_position: f64,
        decay_offset: f64,
        decay_distance: f64,
        start_time: f64,
        decay_start_time: f64,
        decay_duration: f64,
    ) -> Self {
        Self {
            start_position,
            decay_offset,
            decay_distance,
            start_time,
            decay_start_time,
            decay_duration,
        }
    }

    /// Single-axis motion by `decay_offset`, decaying after `linear_duration` ms.
    pub fn single(start_position: f64, decay_offset: f64, linear_duration: f64, now: f64) -> Self {
        let decay_distance = decay_offset.abs();
        let decay_duration = (decay_distance / CURVE_PARAMETER).sqrt();
        Self::new(
            start_position,
            decay_offset,
            decay_distance,
            now,
            now + linear_duration.max(0.0),
            decay_duration,
        )
    }

    /// Cuts the linear phase short. Has no effect once decaying.
    pub fn transition_to_decay(&mut self, time: f64) {
        if time < self.decay_start_time {
            self.decay_start_time = time;
        }
    }

    /// Keeps a linear phase running until `until`.
    pub fn extend_linear_phase(&mut self, until: f64) {
        self.decay_start_time = until;
    }

    pub fn is_linear(&self, time: f64) -> bool {
        time < self.decay_start_time
    }

    pub fn is_ended(&self, time: f64) -> bool {
        time >= self.decay_start_time + self.decay_duration
    }

    fn direction(&self) -> f64 {
        if self.decay_distance > 0.0 {
            self.decay_offset / self.decay_distance
        } else {
            0.0
        }
    }

    pub fn position(&self, time: f64) -> f64 {
        let (linear_time, decay_elapsed) = if time > self.decay_start_time {
            (
                self.decay_start_time - self.start_time,
                time - self.decay_start_time,
            )
        } else {
            (time - self.start_time, 0.0)
        };
        let decay_remaining_time = (self.decay_duration - decay_elapsed).max(0.0);
        let direction = self.direction();
        self.start_position + direction * linear_time + self.decay_offset
            - direction * CURVE_PARAMETER * decay_remaining_time.powi(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_step_starts_in_place_and_rests_at_offset() {
        let axis = AxisState::single(100.0, 64.0, 0.0, 0.0);
        assert!((axis.position(0.0) - 100.0).abs() < EPS);
        let end = axis.decay_start_time + axis.decay_duration;
        assert!((axis.position(end) - 164.0).abs() < EPS);
        assert!((axis.position(end + 500.0) - 164.0).abs() < EPS);
        assert!(axis.is_ended(end));
        assert!(!axis.is_ended(end - 1.0));
    }

    #[test]
    fn test_decay_is_monotonic() {
        let axis = AxisState::single(0.0, -200.0, 0.0, 0.0);
        let mut previous = axis.position(0.0);
        let mut t = 0.0;
        while !axis.is_ended(t) {
            t += 7.0;
            let p = axis.position(t);
            assert!(p <= previous + EPS);
            previous = p;
        }
        assert!((previous + 200.0).abs() < EPS);
    }

    #[test]
    fn test_linear_phase_moves_one_pixel_per_ms() {
        let axis = AxisState::single(0.0, 64.0, 1000.0, 0.0);
        assert!(axis.is_linear(500.0));
        assert!((axis.position(500.0) - 500.0).abs() < EPS);
        // hand-off into the decay curve is continuous
        assert!((axis.position(1000.0) - 1000.0).abs() < EPS);
        assert!(axis.position(1001.0) > 1000.0);
    }

    #[test]
    fn test_transition_to_decay_never_extends() {
        let mut axis = AxisState::single(0.0, 64.0, 1000.0, 0.0);
        axis.transition_to_decay(300.0);
        assert_eq!(axis.decay_start_time, 300.0);
        axis.transition_to_decay(600.0);
        assert_eq!(axis.decay_start_time, 300.0);
        assert!(!axis.is_linear(300.0));
    }

    #[test]
    fn test_zero_offset_does_not_produce_nan() {
        let axis = AxisState::single(42.0, 0.0, 0.0, 5.0);
        assert_eq!(axis.position(5.0), 42.0);
        assert!(axis.is_ended(5.0));
    }
}
