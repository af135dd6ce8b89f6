//! Stochastic tiling of the plane with an edge-matched Wang tile set.

use std::error::Error;
use std::fmt::Display;

use grid::Grid;
use rand::Rng;

use crate::plane::{PlaneError, RGBPlane};

use super::tile::{Side, WangTile};

/// A grid of tiles drawn from a shared Wang tile set under edge-code
/// constraints.
///
/// Cells hold indices into the tile set. Placement is greedy and row-major:
/// each cell keeps drawing uniformly until the drawn tile's west code matches
/// the east code of its left neighbor and its north code matches the south
/// code of the tile above.
pub struct TileMap {
    tile_set: Vec<WangTile>,
    width: u32,
    height: u32,
    cells: Grid<Option<usize>>,
}

impl TileMap {
    /// Draws per cell before giving up on the tile set.
    pub const MAX_DRAWS: u32 = 1000;

    /// Creates an empty map of `width x height` tiles over the given set.
    ///
    /// Fails on an empty tile set, or when the set mixes tile image sizes.
    pub fn new(tile_set: Vec<WangTile>, width: u32, height: u32) -> Result<Self, TileMapError> {
        let Some(first) = tile_set.first() else {
            return Err(TileMapError::new_empty_set());
        };

        let expected = first.dimension();
        for tile in &tile_set {
            if tile.dimension() != expected {
                return Err(TileMapError::new_mismatched(expected, tile.dimension()));
            }
        }

        Ok(Self {
            tile_set,
            width,
            height,
            cells: Grid::new(height as usize, width as usize),
        })
    }

    /// Fills the map row-major with randomly drawn, edge-compatible tiles.
    pub fn generate<R: Rng>(&mut self, rng: &mut R) -> Result<(), TileMapError> {
        for row in 0..self.height {
            for column in 0..self.width {
                let mut draws = 0;
                let placed = loop {
                    let candidate = rng.gen_range(0..self.tile_set.len());
                    if self.fits(candidate, row, column) {
                        break candidate;
                    }

                    draws += 1;
                    if draws >= Self::MAX_DRAWS {
                        return Err(TileMapError::new_no_fit(column, row));
                    }
                };

                *self
                    .cells
                    .get_mut(row, column)
                    .expect("cell within map bounds") = Some(placed);
            }
        }

        Ok(())
    }

    /// The tile placed at a cell, if any.
    pub fn tile_at(&self, row: u32, column: u32) -> Option<&WangTile> {
        self.cells
            .get(row, column)
            .and_then(|cell| cell.map(|index| &self.tile_set[index]))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width of the rendered map in pixels.
    pub fn pixel_width(&self) -> u32 {
        self.width * self.tile_dimension()
    }

    /// Height of the rendered map in pixels.
    pub fn pixel_height(&self) -> u32 {
        self.height * self.tile_dimension()
    }

    /// Renders the placed tiles into one continuous pixel plane.
    pub fn to_plane(&self) -> Result<RGBPlane, PlaneError> {
        let dimension = self.tile_dimension();
        let mut plane = RGBPlane::new(self.pixel_width(), self.pixel_height());

        for row in 0..self.height {
            for column in 0..self.width {
                let tile = self
                    .tile_at(row, column)
                    .expect("tile placed before rendering");

                for y in 0..dimension {
                    for x in 0..dimension {
                        let pixel = tile.image().get(x, y, false)?;
                        plane.set(column * dimension + x, row * dimension + y, pixel, false)?;
                    }
                }
            }
        }

        Ok(plane)
    }

    fn tile_dimension(&self) -> u32 {
        self.tile_set[0].dimension()
    }

    fn fits(&self, candidate: usize, row: u32, column: u32) -> bool {
        let tile = &self.tile_set[candidate];

        if column > 0 {
            let left = self
                .tile_at(row, column - 1)
                .expect("left neighbor placed in row-major order");
            if !tile.has_code_at(left.code_at(Side::East), Side::West) {
                return false;
            }
        }

        if row > 0 {
            let above = self
                .tile_at(row - 1, column)
                .expect("above neighbor placed in row-major order");
            if !tile.has_code_at(above.code_at(Side::South), Side::North) {
                return false;
            }
        }

        true
    }
}

impl Display for TileMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.height {
            for column in 0..self.width {
                if column > 0 {
                    write!(f, " ")?;
                }
                match self.tile_at(row, column) {
                    Some(tile) => write!(f, "{tile}")?,
                    None => write!(f, "....")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Error raised while building or generating a [`TileMap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMapError {
    kind: TileMapErrorKind,
}

impl TileMapError {
    pub(crate) fn new_empty_set() -> Self {
        Self {
            kind: TileMapErrorKind::EmptyTileSet,
        }
    }

    pub(crate) fn new_mismatched(expected: u32, actual: u32) -> Self {
        Self {
            kind: TileMapErrorKind::MismatchedTiles { expected, actual },
        }
    }

    pub(crate) fn new_no_fit(x: u32, y: u32) -> Self {
        Self {
            kind: TileMapErrorKind::NoFit { x, y },
        }
    }
}

impl Display for TileMapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TileMapErrorKind::EmptyTileSet => {
                write!(f, "tile map needs a non-empty tile set")
            }
            TileMapErrorKind::MismatchedTiles { expected, actual } => {
                write!(
                    f,
                    "tile image size: {actual} differs from the set's size: {expected}"
                )
            }
            TileMapErrorKind::NoFit { x, y } => {
                write!(
                    f,
                    "no edge-compatible tile found for cell (x: {x}, y: {y})"
                )
            }
        }
    }
}

impl Error for TileMapError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TileMapErrorKind {
    EmptyTileSet,
    MismatchedTiles { expected: u32, actual: u32 },
    NoFit { x: u32, y: u32 },
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    use crate::patch::CornerCode::{Blue, Green, Red, Yellow};
    use crate::plane::RGBPlane;
    use crate::wang::tile::{Side, WangTile};

    use super::TileMap;

    /// Edge codes of the standard eight-tile set, `[N, E, S, W]` each.
    fn eight_tile_set() -> Vec<WangTile> {
        [
            [Red, Yellow, Green, Blue],
            [Green, Blue, Green, Blue],
            [Red, Yellow, Red, Yellow],
            [Green, Blue, Red, Yellow],
            [Red, Blue, Green, Yellow],
            [Green, Yellow, Green, Yellow],
            [Red, Blue, Red, Blue],
            [Green, Yellow, Red, Blue],
        ]
        .into_iter()
        .enumerate()
        .map(|(index, codes)| {
            let mut image = RGBPlane::new(2, 2);
            image.set(0, 0, [index as u8 * 30, 0, 0], false).unwrap();
            WangTile::new(image, codes)
        })
        .collect()
    }

    #[test]
    fn empty_tile_set_is_rejected() {
        assert!(TileMap::new(Vec::new(), 3, 3).is_err());
    }

    #[test]
    fn mixed_tile_sizes_are_rejected() {
        let mut tiles = eight_tile_set();
        tiles.push(WangTile::new(
            RGBPlane::new(3, 3),
            [Red, Yellow, Green, Blue],
        ));

        assert!(TileMap::new(tiles, 3, 3).is_err());
    }

    #[test]
    fn generated_neighbors_are_edge_compatible() {
        let mut map = TileMap::new(eight_tile_set(), 6, 6).unwrap();
        let mut rng = ChaChaRng::seed_from_u64(13);

        map.generate(&mut rng).unwrap();

        for row in 0..6 {
            for column in 0..6 {
                let tile = map.tile_at(row, column).unwrap();
                if column > 0 {
                    let left = map.tile_at(row, column - 1).unwrap();
                    assert_eq!(left.code_at(Side::East), tile.code_at(Side::West));
                }
                if row > 0 {
                    let above = map.tile_at(row - 1, column).unwrap();
                    assert_eq!(above.code_at(Side::South), tile.code_at(Side::North));
                }
            }
        }
    }

    #[test]
    fn incompatible_set_runs_out_of_draws() {
        // A single tile whose east and west codes differ can never sit next
        // to itself.
        let tile = WangTile::new(RGBPlane::new(2, 2), [Red, Yellow, Red, Blue]);
        let mut map = TileMap::new(vec![tile], 2, 1).unwrap();
        let mut rng = ChaChaRng::seed_from_u64(0);

        assert!(map.generate(&mut rng).is_err());
    }

    #[test]
    fn rendered_map_has_tile_grid_dimensions() {
        let mut map = TileMap::new(eight_tile_set(), 4, 3).unwrap();
        let mut rng = ChaChaRng::seed_from_u64(21);

        map.generate(&mut rng).unwrap();
        let plane = map.to_plane().unwrap();

        assert_eq!(8, plane.width());
        assert_eq!(6, plane.height());
        assert_eq!(8, map.pixel_width());
        assert_eq!(6, map.pixel_height());
    }

    #[test]
    fn display_lists_codes_per_cell() {
        let mut map = TileMap::new(eight_tile_set(), 2, 2).unwrap();
        let mut rng = ChaChaRng::seed_from_u64(2);
        map.generate(&mut rng).unwrap();

        let printed = map.to_string();
        let lines: Vec<&str> = printed.lines().collect();

        assert_eq!(2, lines.len());
        for line in lines {
            assert_eq!(9, line.len());
        }
    }
}
