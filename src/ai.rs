use self::speed::{speed_command, SpeedCommand};
use self::steering::steer;
pub use self::speed::SpeedThresholds;
pub use self::steering::ControllerParams;
use crate::car::{Turn, VehicleControl};
use crate::debug::debug_line;
use crate::{TrackId, TrackSet};
use log::{debug, trace, warn};
use thiserror::Error;

mod speed;
mod steering;

/// An error in the configuration of an [AiController].
#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("{field} must be a non-negative number (got {value})")]
    Invalid { field: &'static str, value: f64 },
    #[error("max_control must be positive (got {0})")]
    NonPositiveCeiling(f64),
    #[error("braking starts at {second} km/h two tiles before a corner but at {first} km/h one tile before")]
    BrakeOrder { first: f64, second: f64 },
}

/// Drives a computer controlled car around the route of a track.
///
/// Each tick the controller steers towards the car's current target node
/// and picks a throttle command from the tile under the car.
#[derive(Clone, Debug)]
pub struct AiController {
    /// The track being raced on. Not owned.
    track: Option<TrackId>,
    /// The heading error of the previous tick, in degrees.
    last_diff: f64,
    params: ControllerParams,
    thresholds: SpeedThresholds,
}

impl Default for AiController {
    fn default() -> Self {
        Self::new()
    }
}

impl AiController {
    /// Creates a controller with the default gains and speed thresholds.
    pub fn new() -> Self {
        Self {
            track: None,
            last_diff: 0.0,
            params: Default::default(),
            thresholds: Default::default(),
        }
    }

    /// Creates a controller with custom gains and speed thresholds.
    pub fn with_params(
        params: ControllerParams,
        thresholds: SpeedThresholds,
    ) -> Result<Self, ParamsError> {
        validate(&params, &thresholds)?;
        Ok(Self {
            params,
            thresholds,
            ..Self::new()
        })
    }

    /// Attaches the controller to a track.
    pub fn set_track(&mut self, track: TrackId) {
        debug!("AI controller attached to track {:?}", track);
        self.track = Some(track);
    }

    /// Detaches the controller from its track. Updates do nothing until a track is set.
    pub fn clear_track(&mut self) {
        self.track = None;
    }

    /// The track the controller is attached to.
    pub fn track(&self) -> Option<TrackId> {
        self.track
    }

    /// The heading error of the previous tick, in degrees.
    pub fn last_diff(&self) -> f64 {
        self.last_diff
    }

    pub fn params(&self) -> &ControllerParams {
        &self.params
    }

    pub fn thresholds(&self) -> &SpeedThresholds {
        &self.thresholds
    }

    /// Updates the controls of `car` for one tick.
    ///
    /// Nothing happens if the controller has no track, the track no longer exists,
    /// its route is empty, the car is not on a tile or its heading is not finite.
    /// Returns `true` iff the controls were updated.
    ///
    /// # Parameters
    /// * `car` - The car being driven
    /// * `tracks` - The tracks in the session
    /// * `race_completed` - Whether the car has finished the race
    pub fn update<V: VehicleControl + ?Sized>(
        &mut self,
        car: &mut V,
        tracks: &TrackSet,
        race_completed: bool,
    ) -> bool {
        let Some(track_id) = self.track else {
            trace!("AI controller has no track");
            return false;
        };
        let Some(track) = tracks.get(track_id) else {
            warn!("AI controller refers to missing track {:?}", track_id);
            return false;
        };
        let Some(node) = track.route().get(car.current_target_node_index()) else {
            debug!("track {:?} has an empty route", track_id);
            return false;
        };
        let location = car.location();
        let Some(tile) = track.tile_at(location.x, location.y) else {
            debug!("no tile at ({}, {})", location.x, location.y);
            return false;
        };
        let angle = car.angle();
        if !angle.is_finite() {
            debug!("car heading {} is not a number of degrees", angle);
            return false;
        }

        let steering = steer(&self.params, self.last_diff, location, angle, node.location());
        if steering.diff.is_nan() {
            debug!("heading error is undefined at ({}, {})", location.x, location.y);
            return false;
        }
        let speed = car.speed_kmh();
        let command = speed_command(&self.thresholds, tile, speed, race_completed);

        car.clear_statuses();
        car.set_turning_impulse(steering.impulse);
        match steering.turn {
            Some(Turn::Left) => car.turn_left(),
            Some(Turn::Right) => car.turn_right(),
            None => {}
        }
        match command {
            SpeedCommand::Brake => car.brake(),
            SpeedCommand::Accelerate => car.accelerate(),
            SpeedCommand::Coast => {}
        }
        self.last_diff = steering.diff;

        debug_line("ai target", location, node.location());
        trace!(
            "node {} diff {:.1} impulse {:.2} turn {:?} at {:.0} km/h -> {:?}",
            node.index(),
            steering.diff,
            steering.impulse,
            steering.turn,
            speed,
            command
        );
        true
    }
}

/// Checks that the gains and thresholds describe a usable controller.
fn validate(params: &ControllerParams, thresholds: &SpeedThresholds) -> Result<(), ParamsError> {
    let fields = [
        ("kp", params.kp),
        ("kd", params.kd),
        ("dead_zone", params.dead_zone),
        ("second_before_corner", thresholds.second_before_corner),
        ("first_before_corner", thresholds.first_before_corner),
        ("corner_90", thresholds.corner_90),
        ("corner_45", thresholds.corner_45),
        ("min_speed", thresholds.min_speed),
    ];
    for (field, value) in fields {
        if !(value.is_finite() && value >= 0.0) {
            return Err(ParamsError::Invalid { field, value });
        }
    }
    if !(params.max_control > 0.0) {
        return Err(ParamsError::NonPositiveCeiling(params.max_control));
    }
    if thresholds.first_before_corner > thresholds.second_before_corner {
        return Err(ParamsError::BrakeOrder {
            first: thresholds.first_before_corner,
            second: thresholds.second_before_corner,
        });
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::car::{Car, CarAttributes, ControlState};
    use crate::math::Point2d;
    use crate::route::Route;
    use crate::track::{ComputerHint, Tile, TileMap, TileType, Track, TrackData};
    use crate::CarId;
    use assert_approx_eq::assert_approx_eq;
    use slotmap::{Key, SlotMap};

    /// A 4x4 track of 64 unit tiles with a hinted corner at (1, 0).
    fn tracks(route: Route) -> (TrackSet, TrackId) {
        let map = TileMap::from_fn(4, 4, |col, row| match (col, row) {
            (1, 0) => Tile::new(col, row)
                .with_type(TileType::Corner90)
                .with_hint(ComputerHint::FirstBeforeCorner),
            _ => Tile::new(col, row).with_type(TileType::Straight),
        });
        let mut tracks = SlotMap::with_key();
        let id = tracks.insert(Track::with_tile_size(
            TrackData {
                name: "test".into(),
                map,
                route,
            },
            64,
            64,
        ));
        (tracks, id)
    }

    fn car(x: f64, y: f64, angle: f64) -> Car {
        Car::new(
            CarId::null(),
            &CarAttributes {
                location: Point2d::new(x, y),
                angle,
            },
        )
    }

    fn south_route() -> Route {
        Route::from_locations([Point2d::new(10.0, 20.0)])
    }

    #[test]
    fn no_track_is_a_no_op() {
        let (tracks, _) = tracks(south_route());
        let mut ai = AiController::new();
        let mut car = car(10.0, 10.0, 0.0);
        car.accelerate();
        let before = *car.controls();
        assert!(!ai.update(&mut car, &tracks, false));
        assert_eq!(*car.controls(), before);
    }

    #[test]
    fn stale_track_is_a_no_op() {
        let (mut tracks, id) = tracks(south_route());
        tracks.remove(id);
        let mut ai = AiController::new();
        ai.set_track(id);
        let mut car = car(10.0, 10.0, 0.0);
        assert!(!ai.update(&mut car, &tracks, false));
        assert_eq!(*car.controls(), ControlState::default());
    }

    #[test]
    fn empty_route_is_a_no_op() {
        let (tracks, id) = tracks(Route::new());
        let mut ai = AiController::new();
        ai.set_track(id);
        let mut car = car(10.0, 10.0, 0.0);
        assert!(!ai.update(&mut car, &tracks, false));
        assert_eq!(ai.last_diff(), 0.0);
    }

    #[test]
    fn off_map_is_a_no_op() {
        let (tracks, id) = tracks(south_route());
        let mut ai = AiController::new();
        ai.set_track(id);
        let mut car = car(-5.0, 10.0, 0.0);
        car.brake();
        assert!(!ai.update(&mut car, &tracks, false));
        assert!(car.controls().braking);
    }

    #[test]
    fn unknown_heading_is_a_no_op() {
        let (tracks, id) = tracks(south_route());
        let mut ai = AiController::new();
        ai.set_track(id);
        for angle in [f64::NAN, f64::INFINITY] {
            let mut car = car(10.0, 10.0, angle);
            car.brake();
            assert!(!ai.update(&mut car, &tracks, false));
            assert!(car.controls().braking);
            assert_eq!(car.controls().turn, None);
            assert_eq!(ai.last_diff(), 0.0);
        }
    }

    #[test]
    fn steers_and_accelerates() {
        let (tracks, id) = tracks(south_route());
        let mut ai = AiController::new();
        ai.set_track(id);
        let mut car = car(10.0, 10.0, 0.0);
        assert!(ai.update(&mut car, &tracks, false));

        let controls = car.controls();
        assert_eq!(controls.turning_impulse, 1.0);
        assert_eq!(controls.turn, Some(Turn::Left));
        assert!(controls.accelerating);
        assert!(!controls.braking);
        assert_approx_eq!(ai.last_diff(), 90.0);
    }

    #[test]
    fn identical_inputs_give_identical_controls() {
        let (tracks, id) = tracks(south_route());
        let mut ai = AiController::new();
        ai.set_track(id);
        let mut car = car(10.0, 10.0, 0.0);
        ai.update(&mut car, &tracks, false);
        let first = *car.controls();
        for _ in 0..10 {
            ai.update(&mut car, &tracks, false);
            assert_eq!(car.controls().turn, first.turn);
            assert_eq!(car.controls().accelerating, first.accelerating);
            assert_approx_eq!(car.controls().turning_impulse, 0.9);
        }
    }

    #[test]
    fn statuses_cleared_each_tick() {
        let (tracks, id) = tracks(Route::from_locations([Point2d::new(200.0, 10.0)]));
        let mut ai = AiController::new();
        ai.set_track(id);
        let mut car = car(10.0, 10.0, 0.0);
        car.turn_right();
        assert!(ai.update(&mut car, &tracks, false));
        assert_eq!(car.controls().turn, None);
    }

    #[test]
    fn brakes_on_hinted_corner() {
        let (tracks, id) = tracks(south_route());
        let mut ai = AiController::new();
        ai.set_track(id);
        let mut car = car(100.0, 10.0, 0.0);
        car.set_speed_kmh(80.0);
        ai.update(&mut car, &tracks, false);
        assert!(car.controls().braking);
        assert!(!car.controls().accelerating);

        car.set_speed_kmh(20.0);
        ai.update(&mut car, &tracks, false);
        assert!(car.controls().accelerating);
        assert!(!car.controls().braking);
    }

    #[test]
    fn coasts_once_finished() {
        let (tracks, id) = tracks(south_route());
        let mut ai = AiController::new();
        ai.set_track(id);
        let mut car = car(10.0, 10.0, 0.0);
        car.set_speed_kmh(120.0);
        ai.update(&mut car, &tracks, true);
        assert!(!car.controls().accelerating);
        assert!(!car.controls().braking);
        assert_eq!(car.controls().turn, Some(Turn::Left));
    }

    #[test]
    fn rejects_bad_params() {
        let params = ControllerParams {
            kp: -1.0,
            ..Default::default()
        };
        assert_eq!(
            AiController::with_params(params, Default::default()).unwrap_err(),
            ParamsError::Invalid {
                field: "kp",
                value: -1.0
            }
        );

        let params = ControllerParams {
            max_control: 0.0,
            ..Default::default()
        };
        assert_eq!(
            AiController::with_params(params, Default::default()).unwrap_err(),
            ParamsError::NonPositiveCeiling(0.0)
        );

        let thresholds = SpeedThresholds {
            first_before_corner: 120.0,
            ..Default::default()
        };
        assert!(matches!(
            AiController::with_params(Default::default(), thresholds),
            Err(ParamsError::BrakeOrder { .. })
        ));
    }

    #[test]
    fn custom_thresholds() {
        let thresholds = SpeedThresholds {
            first_before_corner: 90.0,
            ..Default::default()
        };
        let (tracks, id) = tracks(south_route());
        let mut ai = AiController::with_params(Default::default(), thresholds).unwrap();
        ai.set_track(id);
        let mut car = car(100.0, 10.0, 0.0);
        car.set_speed_kmh(80.0);
        ai.update(&mut car, &tracks, false);
        assert!(!car.controls().braking);
        // Still coasting through the 90 degree corner
        assert!(!car.controls().accelerating);
    }
}
