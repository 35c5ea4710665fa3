use super::tile::Tile;
use itertools::iproduct;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A fixed size grid of tiles, stored row by row.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTileMap"))]
pub struct TileMap {
    cols: usize,
    rows: usize,
    tiles: Vec<Tile>,
}

/// An error raised while building a [TileMap].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("a {cols}x{rows} map needs {expected} tiles (got {actual})")]
    TileCountMismatch {
        cols: usize,
        rows: usize,
        expected: usize,
        actual: usize,
    },
    #[error("a {cols}x{rows} map has too many cells")]
    TooLarge { cols: usize, rows: usize },
}

/// The serialized form of a [TileMap], checked before use.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawTileMap {
    cols: usize,
    rows: usize,
    tiles: Vec<Tile>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTileMap> for TileMap {
    type Error = MapError;

    fn try_from(raw: RawTileMap) -> Result<Self, MapError> {
        Self::from_tiles(raw.cols, raw.rows, raw.tiles)
    }
}

impl TileMap {
    /// Creates a map of clear tiles.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self::from_fn(cols, rows, Tile::new)
    }

    /// Creates a map by calling `f(col, row)` for every cell.
    ///
    /// The grid coordinates of the returned tiles are overwritten with
    /// the cell they are placed in.
    pub fn from_fn(cols: usize, rows: usize, mut f: impl FnMut(usize, usize) -> Tile) -> Self {
        let tiles = iproduct!(0..rows, 0..cols)
            .map(|(row, col)| {
                let mut tile = f(col, row);
                tile.place(col, row);
                tile
            })
            .collect();
        Self { cols, rows, tiles }
    }

    /// Creates a map from tiles given in row-major order.
    ///
    /// The grid coordinates of the tiles are overwritten with the cell they land in.
    pub fn from_tiles(cols: usize, rows: usize, tiles: Vec<Tile>) -> Result<Self, MapError> {
        let expected = cols
            .checked_mul(rows)
            .ok_or(MapError::TooLarge { cols, rows })?;
        if tiles.len() != expected {
            return Err(MapError::TileCountMismatch {
                cols,
                rows,
                expected,
                actual: tiles.len(),
            });
        }
        let mut tiles = tiles.into_iter();
        Ok(Self::from_fn(cols, rows, |_, _| {
            tiles.next().unwrap_or_default()
        }))
    }

    /// The number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Whether the map has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Gets the tile at the given column and row.
    pub fn get(&self, col: usize, row: usize) -> Option<&Tile> {
        if col < self.cols && row < self.rows {
            self.tiles.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Iterates over the tiles row by row.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }
}
