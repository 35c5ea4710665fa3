pub use ai::{AiController, ControllerParams, ParamsError, SpeedThresholds};
pub use car::{Car, CarAttributes, ControlState, Turn, VehicleControl};
pub use cgmath;
pub use minimap::{MiniMap, MiniMapTile};
pub use route::{Route, TargetNode};
pub use session::Session;
use slotmap::{new_key_type, SlotMap};
pub use slotmap::{Key, KeyData};
pub use track::{
    ComputerHint, MapError, Rect, SurfaceId, Tile, TileMap, TileType, Track, TrackData,
    VisibleRange, TILE_H, TILE_W,
};
pub use util::Interval;

mod ai;
mod car;
mod debug;
pub mod math;
mod minimap;
mod route;
mod session;
mod track;
mod util;

new_key_type! {
    /// Unique ID of a [Track].
    pub struct TrackId;
    /// Unique ID of a [Car].
    pub struct CarId;
}

/// The tracks of a session, as passed to [AiController::update].
pub type TrackSet = SlotMap<TrackId, Track>;
type CarSet = SlotMap<CarId, Car>;
