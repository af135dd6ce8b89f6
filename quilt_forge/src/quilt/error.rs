use std::error::Error;
use std::fmt::Display;

use crate::plane::PlaneError;

/// Error raised while constructing or running a [`Quilt`](crate::quilt::Quilt).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuiltError {
    kind: QuiltErrorKind,
}

impl QuiltError {
    pub(crate) fn new_patch_size(patch_size: u32) -> Self {
        Self {
            kind: QuiltErrorKind::PatchSizeIndivisible { patch_size },
        }
    }

    pub(crate) fn new_source_size(width: u32, height: u32, patch_size: u32) -> Self {
        Self {
            kind: QuiltErrorKind::SourceIndivisible {
                width,
                height,
                patch_size,
            },
        }
    }

    pub(crate) fn new_no_patches() -> Self {
        Self {
            kind: QuiltErrorKind::NoPatches,
        }
    }

    pub(crate) fn new_uncoded() -> Self {
        Self {
            kind: QuiltErrorKind::UncodedQuilt,
        }
    }

    pub(crate) fn new_tile_too_small(dimension: u32) -> Self {
        Self {
            kind: QuiltErrorKind::TileTooSmall { dimension },
        }
    }
}

impl Display for QuiltError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            QuiltErrorKind::PatchSizeIndivisible { patch_size } => {
                write!(
                    f,
                    "patch size: {patch_size} must be a positive multiple of the overlap divisor"
                )
            }
            QuiltErrorKind::SourceIndivisible {
                width,
                height,
                patch_size,
            } => {
                write!(f, "source image size (width: {width}, height: {height}) is not tileable by patch size: {patch_size}")
            }
            QuiltErrorKind::NoPatches => {
                write!(f, "quilt needs at least one patch per side")
            }
            QuiltErrorKind::UncodedQuilt => {
                write!(
                    f,
                    "Wang tile construction needs a 2x2 quilt of corner-coded patches"
                )
            }
            QuiltErrorKind::TileTooSmall { dimension } => {
                write!(
                    f,
                    "quilt dimension: {dimension} is too small to crop a Wang tile from"
                )
            }
            QuiltErrorKind::Plane(error) => {
                write!(f, "plane access failed while quilting: {error}")
            }
        }
    }
}

impl Error for QuiltError {}

impl From<PlaneError> for QuiltError {
    fn from(error: PlaneError) -> Self {
        Self {
            kind: QuiltErrorKind::Plane(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum QuiltErrorKind {
    PatchSizeIndivisible {
        patch_size: u32,
    },
    SourceIndivisible {
        width: u32,
        height: u32,
        patch_size: u32,
    },
    NoPatches,
    UncodedQuilt,
    TileTooSmall {
        dimension: u32,
    },
    Plane(PlaneError),
}
