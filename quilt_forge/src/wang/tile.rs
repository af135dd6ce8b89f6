use std::fmt::Display;

use crate::patch::CornerCode;
use crate::plane::RGBPlane;
use crate::quilt::{Quilt, QuiltError};

/// Offset trimmed off the diamond on each side, in pixels, on top of the
/// quarter-dimension crop origin. Tuned against the rotation resampling so the
/// cropped tile edges land inside seamless texture.
const CROP_MARGIN: u32 = 6;

/// Edge of a [`WangTile`], clockwise from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    North,
    East,
    South,
    West,
}

impl Side {
    /// All sides in the storage order of tile edge codes.
    pub const ALL: &'static [Side; 4] = &[Side::North, Side::East, Side::South, Side::West];

    fn index(self) -> usize {
        match self {
            Side::North => 0,
            Side::East => 1,
            Side::South => 2,
            Side::West => 3,
        }
    }
}

/// A square Wang tile: a texture image plus the four edge color codes that
/// decide which tiles may abut it.
#[derive(Debug, Clone)]
pub struct WangTile {
    image: RGBPlane,
    codes: [CornerCode; 4],
}

impl WangTile {
    /// Creates a tile from an already-cropped image and its edge codes in
    /// `[north, east, south, west]` order.
    pub fn new(image: RGBPlane, codes: [CornerCode; 4]) -> Self {
        Self { image, codes }
    }

    /// Cuts a Wang tile out of a stitched corner-coded 2x2 quilt.
    ///
    /// The quilt output is rotated by -45 degrees and the central diamond is
    /// cropped out of it: a square of side `D/2 - 12` at offset `D/4 + 6`,
    /// where `D` is the quilt dimension. The edge codes are the corner codes
    /// of the source arrangement read clockwise from the top-left quadrant,
    /// which the rotation turns into the north edge.
    pub fn from_quilt(quilt: &Quilt) -> Result<WangTile, QuiltError> {
        if quilt.patches_per_side() != 2 {
            return Err(QuiltError::new_uncoded());
        }

        let corner = |row, column| {
            quilt
                .placed(row, column)
                .and_then(|patch| patch.code())
                .ok_or_else(QuiltError::new_uncoded)
        };
        let codes = [
            corner(0, 0)?,
            corner(0, 1)?,
            corner(1, 1)?,
            corner(1, 0)?,
        ];

        let dimension = quilt.dimension();
        if dimension / 2 <= 2 * CROP_MARGIN {
            return Err(QuiltError::new_tile_too_small(dimension));
        }

        let side = dimension / 2 - 2 * CROP_MARGIN;
        let offset = dimension / 4 + CROP_MARGIN;

        let rotated = quilt.output().rotate_45();
        let image = rotated.copy_region(offset, offset, offset + side - 1, offset + side - 1, false)?;

        Ok(Self::new(image, codes))
    }

    /// The edge code on the given side.
    pub fn code_at(&self, side: Side) -> CornerCode {
        self.codes[side.index()]
    }

    /// Whether the given side carries the given code. The workhorse check of
    /// the tiling loop.
    pub fn has_code_at(&self, code: CornerCode, side: Side) -> bool {
        self.code_at(side) == code
    }

    pub fn image(&self) -> &RGBPlane {
        &self.image
    }

    /// Side length of the tile image in pixels.
    pub fn dimension(&self) -> u32 {
        self.image.width()
    }
}

#[cfg(feature = "vis")]
impl WangTile {
    /// Loads a previously rendered tile image, recovering its edge codes
    /// from the `_nesw` suffix of the file name.
    ///
    /// The inverse of saving a tile under a [`Display`]-labeled name; a
    /// tiling run can pick up the tile set a synthesis run left on disk.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<WangTile, crate::vis::VisError> {
        let path = path.as_ref();

        let codes = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(side_codes_from_name)
            .ok_or_else(|| crate::vis::VisError::new_side_codes(path.to_path_buf()))?;
        let image = crate::vis::load_plane(path)?;

        Ok(WangTile::new(image, codes))
    }
}

impl Display for WangTile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for side in Side::ALL {
            write!(f, "{}", self.code_at(*side).as_char())?;
        }
        Ok(())
    }
}

/// Extracts edge codes out of a tile file name carrying them as a suffix,
/// e.g. `tile3_rygb.png` or `grass_gbgb`.
///
/// The four letters after the last underscore of the file stem are read as
/// the `[north, east, south, west]` codes; the inverse of how the tile
/// [`Display`] impl labels saved tiles.
pub fn side_codes_from_name(file_name: &str) -> Option<[CornerCode; 4]> {
    let stem = file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(file_name);
    let (_, letters) = stem.rsplit_once('_')?;

    if letters.chars().count() != 4 {
        return None;
    }

    let mut codes = [CornerCode::Red; 4];
    for (slot, letter) in letters.chars().enumerate() {
        codes[slot] = CornerCode::from_char(letter)?;
    }

    Some(codes)
}
