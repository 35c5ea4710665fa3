use crate::math::Point2d;
use crate::track::{SurfaceId, TileMap};
use std::collections::BTreeMap;

/// A single tile instance drawn on the minimap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MiniMapTile {
    /// The centre of the tile in screen coordinates.
    pub pos: Point2d,
    /// The rotation of the tile in degrees.
    pub rotation: u16,
}

/// A scaled down overview of a tile map, grouped by surface so
/// each surface only has to be bound once when drawing.
#[derive(Clone, Debug, Default)]
pub struct MiniMap {
    /// The side length of a (square) minimap tile.
    tile_size: f64,
    batches: BTreeMap<SurfaceId, Vec<MiniMapTile>>,
}

impl MiniMap {
    /// Lays out a minimap of `map` centred on `(x, y)` that fits in a `size` square.
    pub fn new(map: &TileMap, x: f64, y: f64, size: u32) -> Self {
        let mut minimap = Self::default();
        minimap.initialize(map, x, y, size);
        minimap
    }

    /// Rebuilds the layout, e.g. after the map has been replaced.
    pub fn initialize(&mut self, map: &TileMap, x: f64, y: f64, size: u32) {
        self.batches.clear();
        self.tile_size = 0.0;
        let (cols, rows) = (map.cols(), map.rows());
        if map.is_empty() || cols == 0 || rows == 0 {
            return;
        }

        // Whole units per tile, square
        let tile = usize::min(size as usize / cols, size as usize / rows);
        self.tile_size = tile as f64;

        // Offsets are in whole units, as the sprites are placed on pixels
        let mut init_x = x - (cols * tile / 2) as f64;
        if cols % 2 == 0 {
            init_x += (tile / 4) as f64;
        }
        let init_y = y - (rows * tile / 2) as f64;
        let half = (tile / 2) as f64;

        for t in map.iter() {
            if let Some(surface) = t.surface() {
                let pos = Point2d::new(
                    init_x + (t.col() * tile) as f64 + half,
                    init_y + (t.row() * tile) as f64 + half,
                );
                self.batches.entry(surface).or_default().push(MiniMapTile {
                    pos,
                    rotation: t.rotation(),
                });
            }
        }
    }

    /// The side length of a minimap tile.
    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    /// Iterates over the tile instances grouped by surface.
    pub fn batches(&self) -> impl Iterator<Item = (SurfaceId, &[MiniMapTile])> {
        self.batches.iter().map(|(id, tiles)| (*id, tiles.as_slice()))
    }

    /// The total number of tile instances.
    pub fn len(&self) -> usize {
        self.batches.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}
