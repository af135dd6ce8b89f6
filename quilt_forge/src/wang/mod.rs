//! Wang tile construction on top of corner-coded quilts, plus the stochastic
//! tiling layer consuming the tile set.

use crate::patch::CornerCode;
use crate::plane::RGBPlane;
use crate::quilt::{Quilt, QuiltError};

pub mod map;
pub mod tile;

pub use map::{TileMap, TileMapError};
pub use tile::{side_codes_from_name, Side, WangTile};

/// The eight corner arrangements quilted into the standard Wang tile set,
/// each listed as `[top-left, top-right, bottom-left, bottom-right]`.
///
/// The set covers every (west, north) code combination twice, so a greedy
/// edge-matched tiling always finds a fitting tile.
pub const TILE_ARRANGEMENTS: [[CornerCode; 4]; 8] = [
    [
        CornerCode::Red,
        CornerCode::Yellow,
        CornerCode::Blue,
        CornerCode::Green,
    ],
    [
        CornerCode::Green,
        CornerCode::Blue,
        CornerCode::Blue,
        CornerCode::Green,
    ],
    [
        CornerCode::Red,
        CornerCode::Yellow,
        CornerCode::Yellow,
        CornerCode::Red,
    ],
    [
        CornerCode::Green,
        CornerCode::Blue,
        CornerCode::Yellow,
        CornerCode::Red,
    ],
    [
        CornerCode::Red,
        CornerCode::Blue,
        CornerCode::Yellow,
        CornerCode::Green,
    ],
    [
        CornerCode::Green,
        CornerCode::Yellow,
        CornerCode::Yellow,
        CornerCode::Green,
    ],
    [
        CornerCode::Red,
        CornerCode::Blue,
        CornerCode::Blue,
        CornerCode::Red,
    ],
    [
        CornerCode::Green,
        CornerCode::Yellow,
        CornerCode::Blue,
        CornerCode::Red,
    ],
];

/// Quilts the eight standard arrangements out of a corner-coded exemplar and
/// cuts a Wang tile from each.
///
/// The exemplar is a square image whose quadrants carry the codes red,
/// yellow, blue and green in row-major order. Tiles come back in arrangement
/// order.
pub fn build_tile_set(source: &RGBPlane) -> Result<Vec<WangTile>, QuiltError> {
    let mut tiles = Vec::with_capacity(TILE_ARRANGEMENTS.len());

    for arrangement in TILE_ARRANGEMENTS {
        let mut quilt = Quilt::new_coded(source, arrangement)?;
        quilt.stitch()?;
        tiles.push(WangTile::from_quilt(&quilt)?);
    }

    Ok(tiles)
}
