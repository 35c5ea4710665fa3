use crate::ai::AiController;
use crate::car::{Car, CarAttributes};
#[cfg(feature = "debug")]
use crate::debug::take_debug_frame;
use crate::track::{Track, TrackData};
use crate::{CarId, CarSet, TrackId, TrackSet};
use log::{debug, info};
use slotmap::SecondaryMap;

/// A race session: the tracks, the cars, and the computer drivers of those cars.
///
/// The session owns everything. Controllers only refer to their track by ID,
/// and get the tracks and their car passed in on each step.
#[derive(Default)]
pub struct Session {
    /// The loaded tracks.
    tracks: TrackSet,
    /// The cars taking part.
    cars: CarSet,
    /// The computer drivers, keyed by the car they drive.
    controllers: SecondaryMap<CarId, AiController>,
    /// The track currently raced on.
    active_track: Option<TrackId>,
    /// The current frame of simulation.
    frame: usize,
    /// Debugging information from the previously simulated frame.
    #[cfg(feature = "debug")]
    debug: serde_json::Value,
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a track to the session.
    pub fn add_track(&mut self, data: TrackData) -> TrackId {
        self.insert_track(Track::new(data))
    }

    /// Adds an already laid out track to the session.
    pub fn insert_track(&mut self, track: Track) -> TrackId {
        let id = self.tracks.insert(track);
        debug!("added track {:?} ({})", id, self.tracks[id].data().name);
        id
    }

    /// Removes a track. Controllers still attached to it do nothing until given another.
    pub fn remove_track(&mut self, id: TrackId) -> Option<Track> {
        if self.active_track == Some(id) {
            self.active_track = None;
        }
        self.tracks.remove(id)
    }

    /// Makes the given track the one being raced on, and attaches every controller to it.
    pub fn set_track(&mut self, id: TrackId) {
        info!("racing on track {:?}", id);
        self.active_track = Some(id);
        if let Some(track) = self.tracks.get_mut(id) {
            track.reset();
        }
        for (_, controller) in &mut self.controllers {
            controller.set_track(id);
        }
    }

    /// The track currently raced on.
    pub fn active_track(&self) -> Option<TrackId> {
        self.active_track
    }

    /// Adds a car driven by a human player.
    pub fn add_car(&mut self, attributes: &CarAttributes) -> CarId {
        self.cars.insert_with_key(|id| Car::new(id, attributes))
    }

    /// Adds a car driven by a computer player.
    pub fn add_ai_car(&mut self, attributes: &CarAttributes) -> CarId {
        self.add_ai_car_with(attributes, AiController::new())
    }

    /// Adds a car driven by the given controller, attaching it to the active track.
    pub fn add_ai_car_with(&mut self, attributes: &CarAttributes, mut controller: AiController) -> CarId {
        let id = self.add_car(attributes);
        if let Some(track) = self.active_track {
            controller.set_track(track);
        }
        self.controllers.insert(id, controller);
        id
    }

    /// Removes a car and its controller from the session.
    pub fn remove_car(&mut self, id: CarId) -> Option<Car> {
        self.controllers.remove(id);
        self.cars.remove(id)
    }

    /// Runs every computer driver for one tick.
    ///
    /// Moving the cars is left to the physics step, which runs between calls.
    pub fn step(&mut self, race_completed: bool) {
        for (car_id, controller) in &mut self.controllers {
            if let Some(car) = self.cars.get_mut(car_id) {
                controller.update(car, &self.tracks, race_completed);
            }
        }
        self.frame += 1;

        #[cfg(feature = "debug")]
        {
            self.debug = take_debug_frame();
        }
    }

    /// Gets the current simulation frame index.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Gets a reference to the track with the given ID.
    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.tracks.get(id)
    }

    /// Gets a mutable reference to the track with the given ID, e.g. to advance its intro zoom.
    pub fn track_mut(&mut self, id: TrackId) -> Option<&mut Track> {
        self.tracks.get_mut(id)
    }

    /// Gets a reference to the car with the given ID.
    pub fn car(&self, id: CarId) -> &Car {
        &self.cars[id]
    }

    /// Gets a mutable reference to the car with the given ID, for the physics step to write its state.
    pub fn car_mut(&mut self, id: CarId) -> &mut Car {
        &mut self.cars[id]
    }

    /// Returns an iterator over all the cars in the session.
    pub fn iter_cars(&self) -> impl Iterator<Item = &Car> {
        self.cars.values()
    }

    /// Gets the controller driving the given car, if it is computer driven.
    pub fn controller(&self, id: CarId) -> Option<&AiController> {
        self.controllers.get(id)
    }

    /// Gets the debugging information for the previously simulated frame as JSON array.
    #[cfg(feature = "debug")]
    pub fn debug(&mut self) -> serde_json::Value {
        self.debug.clone()
    }
}
