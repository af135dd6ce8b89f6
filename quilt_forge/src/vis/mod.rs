//! Moving planes in and out of image files and [`image`] crate buffers.
//!
//! The codecs of the [`image`] crate take care of the on-disk duties of the
//! bitmap formats (row order, channel order, padding, headers); a loaded
//! [`RGBPlane`] always addresses rows top-down with interleaved RGB channels.

use std::path::Path;

use image::RgbImage;

use crate::plane::RGBPlane;

pub mod error;

pub use error::VisError;

/// Copies an [`RgbImage`] buffer into an owned plane.
pub fn plane_from_image(image: &RgbImage) -> RGBPlane {
    RGBPlane::from_raw(image.width(), image.height(), image.as_raw().clone())
        .expect("image buffer length matches its dimensions")
}

/// Copies a plane into an [`RgbImage`] buffer.
pub fn image_from_plane(plane: &RGBPlane) -> RgbImage {
    RgbImage::from_raw(plane.width(), plane.height(), plane.raw_data().to_vec())
        .expect("plane buffer length matches its dimensions")
}

/// Loads any image the [`image`] crate can decode into a plane.
pub fn load_plane(path: impl AsRef<Path>) -> Result<RGBPlane, VisError> {
    let path = path.as_ref();
    let image = image::open(path)
        .map_err(|source| VisError::new_load(path.to_path_buf(), source))?
        .into_rgb8();

    Ok(plane_from_image(&image))
}

/// Saves a plane to the image format implied by the path extension.
pub fn save_plane(plane: &RGBPlane, path: impl AsRef<Path>) -> Result<(), VisError> {
    let path = path.as_ref();

    image_from_plane(plane)
        .save(path)
        .map_err(|source| VisError::new_save(path.to_path_buf(), source))
}
