use crate::track::{ComputerHint, Tile, TileType};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Speeds in km/h at which computer drivers start to slow down.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpeedThresholds {
    /// Brake above this speed two tiles before a corner.
    pub second_before_corner: f64,
    /// Brake above this speed on the tile before a corner.
    pub first_before_corner: f64,
    /// Release the throttle above this speed in a 90 degree corner.
    pub corner_90: f64,
    /// Release the throttle above this speed in a 45 degree corner.
    pub corner_45: f64,
    /// Always accelerate below this speed.
    pub min_speed: f64,
}

impl Default for SpeedThresholds {
    fn default() -> Self {
        Self {
            second_before_corner: 100.0,
            first_before_corner: 50.0,
            corner_90: 30.0,
            corner_45: 60.0,
            min_speed: 25.0,
        }
    }
}

/// The throttle decision for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeedCommand {
    Accelerate,
    Brake,
    /// Neither accelerate nor brake.
    Coast,
}

/// Decides whether to accelerate, brake or coast on the given tile.
pub fn speed_command(
    thresholds: &SpeedThresholds,
    tile: &Tile,
    speed: f64,
    race_completed: bool,
) -> SpeedCommand {
    let mut accelerate = true;
    let mut brake = false;

    if race_completed {
        accelerate = false;
    } else {
        let hint = tile.computer_hint();
        let tile_type = tile.tile_type();

        if hint == ComputerHint::SecondBeforeCorner && speed > thresholds.second_before_corner {
            brake = true;
        }
        if hint == ComputerHint::FirstBeforeCorner && speed > thresholds.first_before_corner {
            brake = true;
        }
        if tile_type == TileType::Corner90 && speed > thresholds.corner_90 {
            accelerate = false;
        }
        if tile_type.is_corner_45() && speed > thresholds.corner_45 {
            accelerate = false;
        }

        // Never stall in a corner
        if speed < thresholds.min_speed {
            accelerate = true;
            brake = false;
        }
    }

    match (brake, accelerate) {
        (true, _) => SpeedCommand::Brake,
        (false, true) => SpeedCommand::Accelerate,
        (false, false) => SpeedCommand::Coast,
    }
}
