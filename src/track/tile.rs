#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The width of a tile in world units.
pub const TILE_W: u32 = 256;

/// The height of a tile in world units.
pub const TILE_H: u32 = 256;

/// The kind of track piece a tile holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TileType {
    #[default]
    Clear,
    Straight,
    Straight45Male,
    Straight45Female,
    Corner90,
    Corner45Left,
    Corner45Right,
    Finish,
    Grass,
    Sand,
    Bridge,
    Lake,
}

impl TileType {
    /// Whether the tile is one of the two 45 degree corner pieces.
    pub fn is_corner_45(self) -> bool {
        matches!(self, TileType::Corner45Left | TileType::Corner45Right)
    }

    /// Whether the tile is any kind of corner piece.
    pub fn is_corner(self) -> bool {
        self == TileType::Corner90 || self.is_corner_45()
    }
}

/// A hint for computer drivers about upcoming track geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ComputerHint {
    #[default]
    None,
    /// The tile right before a corner.
    FirstBeforeCorner,
    /// The tile two tiles before a corner.
    SecondBeforeCorner,
}

/// An opaque handle to a surface owned by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurfaceId(pub u32);

/// A single cell of the track grid.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tile {
    /// The column of the tile in the map.
    col: usize,
    /// The row of the tile in the map.
    row: usize,
    /// The kind of track piece.
    tile_type: TileType,
    /// The hint for computer drivers.
    hint: ComputerHint,
    /// The rotation of the piece in degrees, in [0, 360).
    rotation: u16,
    /// The surface used to render the tile, if any.
    surface: Option<SurfaceId>,
}

impl Tile {
    /// Creates a clear tile at the given grid coordinates.
    pub fn new(col: usize, row: usize) -> Self {
        Self {
            col,
            row,
            ..Default::default()
        }
    }

    /// Sets the kind of track piece.
    pub fn with_type(mut self, tile_type: TileType) -> Self {
        self.tile_type = tile_type;
        self
    }

    /// Sets the computer hint.
    pub fn with_hint(mut self, hint: ComputerHint) -> Self {
        self.hint = hint;
        self
    }

    /// Sets the rotation in degrees. Any angle is accepted and wrapped into [0, 360).
    pub fn with_rotation(mut self, degrees: i32) -> Self {
        self.rotation = degrees.rem_euclid(360) as u16;
        self
    }

    /// Sets the surface used to render the tile.
    pub fn with_surface(mut self, surface: SurfaceId) -> Self {
        self.surface = Some(surface);
        self
    }

    pub(crate) fn place(&mut self, col: usize, row: usize) {
        self.col = col;
        self.row = row;
    }

    /// The column of the tile in the map.
    pub fn col(&self) -> usize {
        self.col
    }

    /// The row of the tile in the map.
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn tile_type(&self) -> TileType {
        self.tile_type
    }

    pub fn computer_hint(&self) -> ComputerHint {
        self.hint
    }

    /// The rotation of the piece in degrees.
    pub fn rotation(&self) -> u16 {
        self.rotation
    }

    pub fn surface(&self) -> Option<SurfaceId> {
        self.surface
    }
}
