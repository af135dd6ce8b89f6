use std::error::Error;
use std::fmt::Display;
use std::path::PathBuf;

/// Error raised while moving planes in and out of image files.
#[derive(Debug)]
pub struct VisError {
    kind: VisErrorKind,
}

impl VisError {
    pub(crate) fn new_load(path: PathBuf, source: image::ImageError) -> Self {
        Self {
            kind: VisErrorKind::Load { path, source },
        }
    }

    pub(crate) fn new_save(path: PathBuf, source: image::ImageError) -> Self {
        Self {
            kind: VisErrorKind::Save { path, source },
        }
    }

    pub(crate) fn new_side_codes(path: PathBuf) -> Self {
        Self {
            kind: VisErrorKind::SideCodes { path },
        }
    }
}

impl Display for VisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            VisErrorKind::Load { path, source } => {
                write!(f, "cannot load image: {path:?}: {source}")
            }
            VisErrorKind::Save { path, source } => {
                write!(f, "cannot save image: {path:?}: {source}")
            }
            VisErrorKind::SideCodes { path } => {
                write!(
                    f,
                    "file name: {path:?} does not carry a four-letter edge code suffix"
                )
            }
        }
    }
}

impl Error for VisError {}

#[derive(Debug)]
enum VisErrorKind {
    Load {
        path: PathBuf,
        source: image::ImageError,
    },
    Save {
        path: PathBuf,
        source: image::ImageError,
    },
    SideCodes {
        path: PathBuf,
    },
}
