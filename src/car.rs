use crate::math::Point2d;
use crate::CarId;

/// A turn direction requested from a vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Turn {
    Left,
    Right,
}

/// Read access to a vehicle's physical state and write access to its controls.
///
/// Implemented by [Car], and by any vehicle type owned by the embedding game.
pub trait VehicleControl {
    /// The world space location of the vehicle.
    fn location(&self) -> Point2d;

    /// The heading of the vehicle in degrees.
    fn angle(&self) -> f64;

    /// The speed of the vehicle in km/h.
    fn speed_kmh(&self) -> f64;

    /// The index of the route node the vehicle is heading for.
    fn current_target_node_index(&self) -> usize;

    /// Sets the intensity of the turning force, in [0, 1].
    fn set_turning_impulse(&mut self, impulse: f64);

    fn turn_left(&mut self);

    fn turn_right(&mut self);

    fn accelerate(&mut self);

    fn brake(&mut self);

    /// Clears the per-tick turn, accelerate and brake statuses.
    fn clear_statuses(&mut self);
}

/// The control inputs of a vehicle for the current tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlState {
    /// The intensity of the turning force.
    pub turning_impulse: f64,
    /// The requested turn direction, if any.
    pub turn: Option<Turn>,
    pub accelerating: bool,
    pub braking: bool,
}

/// The initial state of a car.
#[derive(Clone, Copy, Debug)]
pub struct CarAttributes {
    /// The starting location in world coordinates.
    pub location: Point2d,
    /// The starting heading in degrees.
    pub angle: f64,
}

/// A car whose state is written by an external physics step.
#[derive(Clone, Debug)]
pub struct Car {
    id: CarId,
    location: Point2d,
    angle: f64,
    /// The speed in km/h.
    speed: f64,
    target_node: usize,
    controls: ControlState,
}

impl Car {
    /// Creates a new car.
    pub(crate) fn new(id: CarId, attributes: &CarAttributes) -> Self {
        Self {
            id,
            location: attributes.location,
            angle: attributes.angle,
            speed: 0.0,
            target_node: 0,
            controls: Default::default(),
        }
    }

    /// Gets the car's ID.
    pub fn id(&self) -> CarId {
        self.id
    }

    /// The control inputs requested for the current tick.
    pub fn controls(&self) -> &ControlState {
        &self.controls
    }

    /// Sets the world space location.
    pub fn set_location(&mut self, location: Point2d) {
        self.location = location;
    }

    /// Sets the heading in degrees.
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
    }

    /// Sets the speed in km/h.
    pub fn set_speed_kmh(&mut self, speed: f64) {
        self.speed = speed;
    }

    /// Sets the index of the route node the car is heading for.
    pub fn set_target_node_index(&mut self, index: usize) {
        self.target_node = index;
    }
}

impl VehicleControl for Car {
    fn location(&self) -> Point2d {
        self.location
    }

    fn angle(&self) -> f64 {
        self.angle
    }

    fn speed_kmh(&self) -> f64 {
        self.speed
    }

    fn current_target_node_index(&self) -> usize {
        self.target_node
    }

    fn set_turning_impulse(&mut self, impulse: f64) {
        self.controls.turning_impulse = impulse;
    }

    fn turn_left(&mut self) {
        self.controls.turn = Some(Turn::Left);
    }

    fn turn_right(&mut self) {
        self.controls.turn = Some(Turn::Right);
    }

    fn accelerate(&mut self) {
        self.controls.accelerating = true;
        self.controls.braking = false;
    }

    fn brake(&mut self) {
        self.controls.braking = true;
        self.controls.accelerating = false;
    }

    fn clear_statuses(&mut self) {
        self.controls.turn = None;
        self.controls.accelerating = false;
        self.controls.braking = false;
    }
}
