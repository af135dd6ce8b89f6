//! Square exemplar patches and their seam-carving state.

use crate::plane::{IntPlane, PlaneError, RGBPlane};
use crate::quilt::Quilt;
use crate::util::l2_norm_diff;

mod seam;

/// Corner color code carried by patches taking part in Wang tile
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CornerCode {
    Red,
    Green,
    Blue,
    Yellow,
}

impl CornerCode {
    /// Single-letter form used when printing tile maps.
    pub fn as_char(&self) -> char {
        match self {
            CornerCode::Red => 'r',
            CornerCode::Green => 'g',
            CornerCode::Blue => 'b',
            CornerCode::Yellow => 'y',
        }
    }

    /// Parses a code back from its single-letter form.
    pub fn from_char(letter: char) -> Option<CornerCode> {
        match letter {
            'r' => Some(CornerCode::Red),
            'g' => Some(CornerCode::Green),
            'b' => Some(CornerCode::Blue),
            'y' => Some(CornerCode::Yellow),
            _ => None,
        }
    }
}

/// A square sub-image of the exemplar together with the scoring and carving
/// state of one placement attempt.
///
/// A patch owns three planes of identical dimensions: its pixels, the
/// per-pixel overlap error surface (valid after
/// [`compute_overlap_error`](Patch::compute_overlap_error) ran against
/// specific neighbors) and the binary seam mask (valid after
/// [`compute_seam_mask`](Patch::compute_seam_mask)). Cloning deep-copies all
/// three, so every placement attempt scores independent state.
///
/// A patch never knows its grid position; neighbors are supplied per
/// operation.
#[derive(Debug, Clone)]
pub struct Patch {
    pixels: RGBPlane,
    size: u32,
    error: IntPlane,
    mask: IntPlane,
    total_error: i32,
    code: Option<CornerCode>,
}

impl Patch {
    /// Creates a patch over the given `size x size` pixel plane.
    pub fn new(pixels: RGBPlane, size: u32, code: Option<CornerCode>) -> Self {
        Self {
            pixels,
            size,
            error: IntPlane::new(size, size),
            mask: IntPlane::new(size, size),
            total_error: 0,
            code,
        }
    }

    /// Side length of the patch.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn code(&self) -> Option<CornerCode> {
        self.code
    }

    pub(crate) fn set_code(&mut self, code: CornerCode) {
        self.code = Some(code);
    }

    /// Gets the `[r, g, b]` values of the patch pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Result<[u8; 3], PlaneError> {
        self.pixels.get(x, y, false)
    }

    pub fn pixels(&self) -> &RGBPlane {
        &self.pixels
    }

    /// The per-pixel overlap error surface of the last scoring run.
    pub fn error_plane(&self) -> &IntPlane {
        &self.error
    }

    /// The binary seam mask of the last carving run; 1 marks pixels that
    /// contribute to the output.
    pub fn mask(&self) -> &IntPlane {
        &self.mask
    }

    pub(crate) fn mask_mut(&mut self) -> &mut IntPlane {
        &mut self.mask
    }

    /// Summed overlap error of the last scoring run.
    pub fn total_error(&self) -> i32 {
        self.total_error
    }

    /// Scores this patch against the given neighbors, rewriting the error
    /// surface and returning the summed error over the overlap strips.
    ///
    /// Every pixel of the top overlap strip is compared against the bottom
    /// strip of `top`, every pixel of the left strip against the right strip
    /// of `left`. The shared corner of the two strips is scored by the top
    /// arm. Previous scoring state is cleared first, so repeated calls with
    /// the same neighbors yield identical results.
    pub fn compute_overlap_error(
        &mut self,
        left: Option<&Patch>,
        top: Option<&Patch>,
    ) -> Result<i32, PlaneError> {
        let overlap = self.size / Quilt::OVERLAP_DIVISOR;

        self.error.fill(0);
        self.total_error = 0;

        for i in 0..self.size {
            for j in 0..self.size {
                if i < overlap {
                    if let Some(top) = top {
                        let error = l2_norm_diff(
                            self.pixel(j, i)?,
                            top.pixel(j, self.size - overlap + i)?,
                        );
                        self.error.set(j, i, error)?;
                        self.total_error += error;
                        continue;
                    }
                }
                if j < overlap {
                    if let Some(left) = left {
                        let error = l2_norm_diff(
                            self.pixel(j, i)?,
                            left.pixel(self.size - overlap + j, i)?,
                        );
                        self.error.set(j, i, error)?;
                        self.total_error += error;
                    }
                }
            }
        }

        Ok(self.total_error)
    }

    /// Carves the seam mask for this patch from its current error surface.
    ///
    /// Only the presence of each neighbor matters here; the boundary itself
    /// runs over the error surface written by the preceding
    /// [`compute_overlap_error`](Patch::compute_overlap_error) call. After
    /// this call the mask holds exactly 0 or 1 in every cell.
    pub fn compute_seam_mask(
        &mut self,
        left: Option<&Patch>,
        top: Option<&Patch>,
    ) -> Result<(), PlaneError> {
        self.carve_seam(left.is_some(), top.is_some())
    }

    pub(crate) fn carve_seam(&mut self, has_left: bool, has_top: bool) -> Result<(), PlaneError> {
        let overlap = self.size / Quilt::OVERLAP_DIVISOR;

        seam::carve_mask(
            &mut self.mask,
            &self.error,
            self.size,
            overlap,
            has_left,
            has_top,
        )
    }
}
