use crate::car::Turn;
use crate::math::{heading_to, normalize_angle, whole_degrees, Point2d};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The gains of the steering controller.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControllerParams {
    /// Proportional gain, per degree of heading error.
    pub kp: f64,
    /// Derivative gain, per degree of change in heading error between ticks.
    pub kd: f64,
    /// The largest turning impulse the controller will request.
    pub max_control: f64,
    /// Heading errors within this many degrees are not corrected.
    pub dead_zone: f64,
}

impl Default for ControllerParams {
    fn default() -> Self {
        Self {
            kp: 0.01,
            kd: 0.01,
            max_control: 1.0,
            dead_zone: 3.0,
        }
    }
}

/// The outcome of one tick of the steering controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Steering {
    /// The heading error in degrees, in (-180, 180].
    pub diff: f64,
    /// The intensity of the turning force.
    pub impulse: f64,
    /// The direction to turn in, or `None` inside the dead zone.
    pub turn: Option<Turn>,
}

/// Computes the steering needed to head from `location` towards `target`.
///
/// # Parameters
/// * `params` - The controller gains
/// * `last_diff` - The heading error of the previous tick, in degrees
/// * `location` - The location of the car
/// * `angle` - The heading of the car in degrees
/// * `target` - The location being steered towards
pub fn steer(
    params: &ControllerParams,
    last_diff: f64,
    location: Point2d,
    angle: f64,
    target: Point2d,
) -> Steering {
    let desired = heading_to(location, target);
    let current = whole_degrees(angle);
    let diff = normalize_angle(desired - current);

    let control = diff * params.kp + (diff - last_diff) * params.kd;
    let impulse = f64::min(control.abs(), params.max_control);

    let turn = if diff < -params.dead_zone {
        Some(Turn::Right)
    } else if diff > params.dead_zone {
        Some(Turn::Left)
    } else {
        None
    };

    Steering {
        diff,
        impulse,
        turn,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn origin() -> Point2d {
        Point2d::new(0.0, 0.0)
    }

    #[test]
    fn quarter_turn_saturates() {
        let s = steer(&Default::default(), 0.0, origin(), 0.0, Point2d::new(0.0, 10.0));
        assert_approx_eq!(s.diff, 90.0);
        assert_eq!(s.impulse, 1.0);
        assert_eq!(s.turn, Some(Turn::Left));
    }

    #[test]
    fn turns_the_short_way_across_zero() {
        // Heading 350, target at 10 degrees.
        let target = Point2d::new(10f64.to_radians().cos(), 10f64.to_radians().sin());
        let s = steer(&Default::default(), 20.0, origin(), 350.0, target);
        assert_approx_eq!(s.diff, 20.0);
        assert_approx_eq!(s.impulse, 0.2);
        assert_eq!(s.turn, Some(Turn::Left));
    }

    #[test]
    fn negative_error_turns_right() {
        let s = steer(&Default::default(), -45.0, origin(), 45.0, Point2d::new(1.0, 0.0));
        assert_approx_eq!(s.diff, -45.0);
        assert_approx_eq!(s.impulse, 0.45);
        assert_eq!(s.turn, Some(Turn::Right));
    }

    #[test]
    fn heading_is_truncated() {
        // 30.9 degrees is treated as 30, leaving a one degree error.
        let target = Point2d::new(31f64.to_radians().cos(), 31f64.to_radians().sin());
        let s = steer(&Default::default(), 0.0, origin(), 30.9, target);
        assert_approx_eq!(s.diff, 1.0);
    }

    #[test]
    fn dead_zone() {
        for error in [-2.9f64, -2.5, 0.0, 1.0, 2.9] {
            let target = Point2d::new(error.to_radians().cos(), error.to_radians().sin());
            let s = steer(&Default::default(), error, origin(), 0.0, target);
            assert_eq!(s.turn, None, "error {}", error);
        }
        let target = Point2d::new(3.5f64.to_radians().cos(), 3.5f64.to_radians().sin());
        let s = steer(&Default::default(), 0.0, origin(), 0.0, target);
        assert_eq!(s.turn, Some(Turn::Left));
    }

    #[test]
    fn dead_zone_edges_are_inclusive() {
        let target = Point2d::new(0.0, 10.0);
        let s = steer(&Default::default(), 0.0, origin(), 87.0, target);
        assert_eq!(s.diff, 3.0);
        assert_eq!(s.turn, None);
        let s = steer(&Default::default(), 0.0, origin(), 93.0, target);
        assert_eq!(s.diff, -3.0);
        assert_eq!(s.turn, None);
        let s = steer(&Default::default(), 0.0, origin(), 86.0, target);
        assert_eq!(s.turn, Some(Turn::Left));
        let s = steer(&Default::default(), 0.0, origin(), 94.0, target);
        assert_eq!(s.turn, Some(Turn::Right));
    }

    #[test]
    fn derivative_term() {
        let target = Point2d::new(0.0, 10.0);
        // Error steady at 10 degrees: only the proportional term.
        let s = steer(&Default::default(), 10.0, origin(), 80.0, target);
        assert_approx_eq!(s.impulse, 0.1);
        // A shrinking error lowers the control, flipping its sign once the
        // change outweighs the error itself.
        let s = steer(&Default::default(), 30.0, origin(), 80.0, target);
        assert_approx_eq!(s.impulse, 0.1);
        let s = steer(&Default::default(), 50.0, origin(), 80.0, target);
        assert_approx_eq!(s.impulse, 0.3);
    }

    #[test]
    fn custom_ceiling() {
        let params = ControllerParams {
            max_control: 0.5,
            ..Default::default()
        };
        let s = steer(&params, 0.0, origin(), 0.0, Point2d::new(0.0, 10.0));
        assert_eq!(s.impulse, 0.5);
    }
}
