//! Grid-of-patches orchestration: candidate extraction, placement and
//! seam-aware compositing.

use grid::Grid;
use rand::Rng;

use crate::patch::{CornerCode, Patch};
use crate::plane::{PlaneError, RGBPlane};

pub mod error;
mod select;

pub use error::QuiltError;
pub use select::PatchSelector;

/// Quadrant corner codes of a corner-coded exemplar, in row-major order.
const QUADRANT_CODES: [CornerCode; 4] = [
    CornerCode::Red,
    CornerCode::Yellow,
    CornerCode::Blue,
    CornerCode::Green,
];

/// A synthesized texture quilted together out of overlapping exemplar
/// patches.
///
/// The quilt borrows the exemplar for its whole lifetime, owns the candidate
/// patch set extracted from it, the grid of placed patches and the output
/// plane. Construction validates the size arithmetic, [`generate`](Quilt::generate)
/// fills the grid, [`stitch`](Quilt::stitch) carves seams and composites the
/// final image.
pub struct Quilt<'a> {
    source: &'a RGBPlane,
    dimension: u32,
    patches_per_side: u32,
    patch_size: u32,
    patch_set: Vec<Patch>,
    patches: Grid<Option<Patch>>,
    selector: PatchSelector,
    output: RGBPlane,
}

impl<'a> Quilt<'a> {
    /// Ratio between patch side and the width of the overlap strip shared by
    /// adjacent patches.
    pub const OVERLAP_DIVISOR: u32 = 6;

    /// Multiplicative tolerance around the best overlap error; any candidate
    /// scoring within it may be placed.
    pub const BEST_FIT_MARGIN: f64 = 1.1;

    /// Creates a quilt of `patches_per_side x patches_per_side` patches of
    /// side `patch_size`, sampling candidates from `source`.
    ///
    /// # Arguments
    /// - `source` - the exemplar image to sample patches from.
    /// - `patches_per_side` - number of patches along each side of the square
    ///   quilt.
    /// - `patch_size` - side length of the sampled patches. Larger patches
    ///   keep more of the exemplar's structure but repeat more visibly; too
    ///   small a patch loses key detail.
    ///
    /// Fails if `patch_size` is not a positive multiple of
    /// [`OVERLAP_DIVISOR`](Quilt::OVERLAP_DIVISOR), if the source is not
    /// tileable by `patch_size`, or if `patches_per_side` is zero.
    pub fn new(
        source: &'a RGBPlane,
        patches_per_side: u32,
        patch_size: u32,
    ) -> Result<Self, QuiltError> {
        if patches_per_side == 0 {
            return Err(QuiltError::new_no_patches());
        }
        if patch_size == 0 || patch_size % Self::OVERLAP_DIVISOR != 0 {
            return Err(QuiltError::new_patch_size(patch_size));
        }
        if source.width() % patch_size != 0 || source.height() % patch_size != 0 {
            return Err(QuiltError::new_source_size(
                source.width(),
                source.height(),
                patch_size,
            ));
        }

        let overlap = patch_size / Self::OVERLAP_DIVISOR;
        let dimension = patches_per_side * patch_size - (patches_per_side - 1) * overlap;
        let patch_set = Self::extract_patches(source, patch_size)?;

        Ok(Self {
            source,
            dimension,
            patches_per_side,
            patch_size,
            patch_set,
            patches: Grid::new(patches_per_side as usize, patches_per_side as usize),
            selector: PatchSelector::default(),
            output: RGBPlane::new(dimension, dimension),
        })
    }

    /// Creates a 2x2 quilt out of a corner-coded exemplar, placing its four
    /// quadrant patches according to `arrangement`.
    ///
    /// The exemplar must be square; its quadrants carry the fixed codes
    /// red, yellow, blue, green in row-major order. `arrangement` lists the
    /// codes to place as `[top-left, top-right, bottom-left, bottom-right]`.
    /// Each placed patch is scored against its actual neighbors so that
    /// [`stitch`](Quilt::stitch) can carve meaningful seams right away;
    /// no [`generate`](Quilt::generate) run is needed.
    pub fn new_coded(
        source: &'a RGBPlane,
        arrangement: [CornerCode; 4],
    ) -> Result<Self, QuiltError> {
        if source.width() != source.height() || source.width() % 2 != 0 {
            return Err(QuiltError::new_source_size(
                source.width(),
                source.height(),
                source.width() / 2,
            ));
        }

        let mut quilt = Self::new(source, 2, source.width() / 2)?;

        for (patch, code) in quilt.patch_set.iter_mut().zip(QUADRANT_CODES) {
            patch.set_code(code);
        }

        for (slot, code) in arrangement.into_iter().enumerate() {
            let row = (slot / 2) as u32;
            let column = (slot % 2) as u32;

            let mut patch = quilt
                .patch_set
                .iter()
                .find(|candidate| candidate.code() == Some(code))
                .expect("every corner code has a quadrant patch")
                .clone();

            {
                let left = quilt.neighbor(row, column, 0, 1);
                let above = quilt.neighbor(row, column, 1, 0);
                patch.compute_overlap_error(left, above)?;
            }

            *quilt
                .patches
                .get_mut(row, column)
                .expect("grid cell within bounds") = Some(patch);
        }

        Ok(quilt)
    }

    /// Populates the patch grid in row-major order, selecting each patch
    /// against its already-placed left and above neighbors.
    ///
    /// Passing an identically seeded rng reproduces the exact same grid.
    pub fn generate<R: Rng>(&mut self, rng: &mut R) -> Result<(), QuiltError> {
        for row in 0..self.patches_per_side {
            for column in 0..self.patches_per_side {
                let patch = {
                    let left = self.neighbor(row, column, 0, 1);
                    let above = self.neighbor(row, column, 1, 0);
                    self.selector.select(&self.patch_set, left, above, rng)?
                };

                *self
                    .patches
                    .get_mut(row, column)
                    .expect("grid cell within bounds") = Some(patch);
            }
        }

        Ok(())
    }

    /// Carves the seam of every placed patch, resolves contested overlap
    /// pixels and composites the masked pixels into the output plane.
    ///
    /// Adjacent patches shift by `patch_size - overlap`, so their strips
    /// overlap by exactly the overlap width. A patch's cut only settles which
    /// strip cells the patch itself claims; the facing body cells of the
    /// earlier neighbor remain claimed by it, so both sides of a strip can
    /// claim the same output pixel. Every contested pixel goes to the patch
    /// placed last, and the masks are trimmed to that resolution before
    /// compositing: the trimmed masks partition the output, and every output
    /// pixel is written exactly once.
    pub fn stitch(&mut self) -> Result<&RGBPlane, QuiltError> {
        let overlap = self.patch_size / Self::OVERLAP_DIVISOR;
        let shift = self.patch_size - overlap;

        for row in 0..self.patches_per_side {
            for column in 0..self.patches_per_side {
                self.patches
                    .get_mut(row, column)
                    .expect("grid cell within bounds")
                    .as_mut()
                    .expect("patch placed before stitching")
                    .carve_seam(column > 0, row > 0)?;
            }
        }

        // Later patches win every contested output pixel.
        let mut owners: Grid<Option<(u32, u32)>> =
            Grid::new(self.dimension as usize, self.dimension as usize);

        for row in 0..self.patches_per_side {
            for column in 0..self.patches_per_side {
                let patch = self
                    .placed(row, column)
                    .expect("patch placed before stitching");

                for y in 0..self.patch_size {
                    for x in 0..self.patch_size {
                        if patch.mask().get(x, y)? == 1 {
                            *owners
                                .get_mut(row * shift + y, column * shift + x)
                                .expect("patch cell within the output") = Some((row, column));
                        }
                    }
                }
            }
        }

        let mut output = RGBPlane::new(self.dimension, self.dimension);

        for row in 0..self.patches_per_side {
            for column in 0..self.patches_per_side {
                let patch = self
                    .patches
                    .get_mut(row, column)
                    .expect("grid cell within bounds")
                    .as_mut()
                    .expect("patch placed before stitching");

                for y in 0..self.patch_size {
                    for x in 0..self.patch_size {
                        if patch.mask().get(x, y)? == 0 {
                            continue;
                        }

                        let owner = owners
                            .get(row * shift + y, column * shift + x)
                            .expect("patch cell within the output");
                        if *owner != Some((row, column)) {
                            patch.mask_mut().set(x, y, 0)?;
                            continue;
                        }

                        let pixel = patch.pixel(x, y)?;
                        output.set(column * shift + x, row * shift + y, pixel, false)?;
                    }
                }
            }
        }

        self.output = output;
        Ok(&self.output)
    }

    /// The composited output plane; meaningful after
    /// [`stitch`](Quilt::stitch) ran.
    pub fn output(&self) -> &RGBPlane {
        &self.output
    }

    /// Side length of the output plane in pixels.
    pub fn dimension(&self) -> u32 {
        self.dimension
    }

    pub fn patch_size(&self) -> u32 {
        self.patch_size
    }

    pub fn patches_per_side(&self) -> u32 {
        self.patches_per_side
    }

    /// The exemplar this quilt samples from.
    pub fn source(&self) -> &RGBPlane {
        self.source
    }

    /// The candidate patch set extracted from the exemplar.
    pub fn patch_set(&self) -> &[Patch] {
        &self.patch_set
    }

    /// The patch placed at a grid cell, if any.
    pub fn placed(&self, row: u32, column: u32) -> Option<&Patch> {
        self.patches.get(row, column).and_then(|cell| cell.as_ref())
    }

    /// Splits the source into its non-overlapping grid of candidate patches.
    fn extract_patches(source: &RGBPlane, patch_size: u32) -> Result<Vec<Patch>, PlaneError> {
        let rows = source.height() / patch_size;
        let columns = source.width() / patch_size;
        let mut patch_set = Vec::with_capacity(rows as usize * columns as usize);

        for row in 0..rows {
            let row_lower = row * patch_size;
            for column in 0..columns {
                let column_lower = column * patch_size;
                let region = source.copy_region(
                    column_lower,
                    row_lower,
                    column_lower + patch_size - 1,
                    row_lower + patch_size - 1,
                    false,
                )?;
                patch_set.push(Patch::new(region, patch_size, None));
            }
        }

        Ok(patch_set)
    }

    fn neighbor(&self, row: u32, column: u32, d_row: u32, d_column: u32) -> Option<&Patch> {
        if row < d_row || column < d_column {
            return None;
        }
        self.patches
            .get(row - d_row, column - d_column)
            .and_then(|cell| cell.as_ref())
    }
}
