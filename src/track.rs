pub use self::map::{MapError, TileMap};
pub use self::tile::{ComputerHint, SurfaceId, Tile, TileType, TILE_H, TILE_W};
use crate::math::Point2d;
use crate::route::Route;
use crate::util::Interval;
use itertools::iproduct;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod map;
mod tile;

/// The amount the intro zoom grows by on each update.
const SCALE_STEP: f64 = 0.05;

/// The render scale once the intro zoom has finished.
/// Slightly above one to hide seams between tiles.
const SCALE_SETTLED: f64 = 1.001;

/// The static contents of a track.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackData {
    /// The name of the track.
    pub name: String,
    /// The tile grid.
    pub map: TileMap,
    /// The route followed by computer drivers.
    pub route: Route,
}

/// An axis-aligned rectangle in world coordinates, e.g. the camera window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: Interval<f64>,
    pub y: Interval<f64>,
}

impl Rect {
    /// Creates a rectangle from two opposite corners.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x: Interval::spanning(x1, x2),
            y: Interval::spanning(y1, y2),
        }
    }

    /// Creates a rectangle with the given centre and half extents.
    pub fn from_centre(centre: Point2d, half_w: f64, half_h: f64) -> Self {
        Self::new(
            centre.x - half_w,
            centre.y - half_h,
            centre.x + half_w,
            centre.y + half_h,
        )
    }
}

/// An inclusive range of tile indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleRange {
    /// The visible columns.
    pub cols: Interval<usize>,
    /// The visible rows.
    pub rows: Interval<usize>,
}

impl VisibleRange {
    /// Iterates over the `(col, row)` indices in the range, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> {
        iproduct!(self.rows.iter(), self.cols.iter()).map(|(row, col)| (col, row))
    }

    /// The number of tiles in the range.
    pub fn len(&self) -> usize {
        self.cols.count() * self.rows.count()
    }

    /// Whether the range holds no tiles.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A track laid out in world space.
#[derive(Clone, Debug)]
pub struct Track {
    data: TrackData,
    /// The size of a single tile in world units.
    tile_w: u32,
    tile_h: u32,
    /// The size of the whole track in world units.
    width: u64,
    height: u64,
    /// The render scale of the intro zoom.
    scale: f64,
}

impl Track {
    /// Creates a track made of standard sized tiles.
    pub fn new(data: TrackData) -> Self {
        Self::with_tile_size(data, TILE_W, TILE_H)
    }

    /// Creates a track whose tiles are `tile_w` by `tile_h` world units.
    pub fn with_tile_size(data: TrackData, tile_w: u32, tile_h: u32) -> Self {
        let width = data.map.cols() as u64 * tile_w as u64;
        let height = data.map.rows() as u64 * tile_h as u64;
        Self {
            data,
            tile_w,
            tile_h,
            width,
            height,
            scale: 0.0,
        }
    }

    /// The static contents of the track.
    pub fn data(&self) -> &TrackData {
        &self.data
    }

    /// The route followed by computer drivers.
    pub fn route(&self) -> &Route {
        &self.data.route
    }

    /// The width of the track in world units.
    pub fn width(&self) -> u64 {
        self.width
    }

    /// The height of the track in world units.
    pub fn height(&self) -> u64 {
        self.height
    }

    /// Gets the tile that contains the world coordinates `(x, y)`.
    ///
    /// Coordinates past the far edges resolve to the last column or row.
    /// Returns `None` for negative coordinates or an empty map.
    pub fn tile_at(&self, x: f64, y: f64) -> Option<&Tile> {
        let map = &self.data.map;
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let i = usize::min(scaled_index(x, map.cols(), self.width)?, map.cols() - 1);
        let j = usize::min(scaled_index(y, map.rows(), self.height)?, map.rows() - 1);
        map.get(i, j)
    }

    /// Computes which tiles overlap the given rectangle.
    ///
    /// A low bound that falls past the end of the map restarts from index zero,
    /// while a high bound past the end is clamped to the last index. A rectangle
    /// lying wholly beyond the map therefore yields the full range.
    pub fn visible_range(&self, rect: &Rect) -> Option<VisibleRange> {
        let map = &self.data.map;
        if self.width == 0 || self.height == 0 {
            return None;
        }
        Some(VisibleRange {
            cols: visible_interval(rect.x, map.cols(), self.width),
            rows: visible_interval(rect.y, map.rows(), self.height),
        })
    }

    /// Gets the tiles overlapping the given rectangle along with
    /// the world space coordinates of their centres, row by row.
    pub fn visible_tiles<'a>(&'a self, rect: &Rect) -> impl Iterator<Item = (Point2d, &'a Tile)> + 'a {
        self.visible_range(rect)
            .into_iter()
            .flat_map(|range| range.iter())
            .filter_map(move |(i, j)| {
                let tile = self.data.map.get(i, j)?;
                Some((self.tile_centre(i, j), tile))
            })
    }

    /// The world space coordinates of the centre of the tile at `(col, row)`.
    pub fn tile_centre(&self, col: usize, row: usize) -> Point2d {
        let w = self.tile_w as f64;
        let h = self.tile_h as f64;
        Point2d::new(col as f64 * w + 0.5 * w, row as f64 * h + 0.5 * h)
    }

    /// The current render scale of the intro zoom.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Advances the intro zoom by one frame.
    /// Returns `true` while the zoom is still in progress.
    pub fn update(&mut self) -> bool {
        if self.scale < 1.0 {
            self.scale += SCALE_STEP;
            true
        } else {
            self.scale = SCALE_SETTLED;
            false
        }
    }

    /// Restarts the intro zoom.
    pub fn reset(&mut self) {
        self.scale = 0.0;
    }
}

/// Scales a world coordinate to a tile index, or `None` if it is negative or not a number.
fn scaled_index(coord: f64, count: usize, extent: u64) -> Option<usize> {
    if !(coord >= 0.0) {
        return None;
    }
    Some((coord * count as f64 / extent as f64).floor() as usize)
}

fn visible_interval(span: Interval<f64>, count: usize, extent: u64) -> Interval<usize> {
    let low = scaled_index(span.min, count, extent)
        .filter(|i| *i < count)
        .unwrap_or(0);
    let high = scaled_index(span.max, count, extent)
        .filter(|i| *i < count)
        .unwrap_or(count - 1);
    Interval::new(low, high)
}
