use super::error::PlaneError;

/// Empirically tuned additive correction aligning the inverse rotation of
/// [`RGBPlane::rotate_45`] to the integer pixel grid. The diamond crop made by
/// the Wang tile driver depends on this exact resampling geometry.
const ROTATE_CORRECTION: f64 = 0.858;

/// Owned 2D plane of 24-bit RGB pixels.
///
/// Pixels are stored in one contiguous row-major byte buffer with channels
/// interleaved as `R, G, B`. The plane owns its storage exclusively; cloning
/// deep-copies the buffer.
///
/// Accessors take a `flip` flag reinterpreting the row index as
/// `height - 1 - y`, accommodating callers that address rows in the bottom-up
/// bitmap file convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RGBPlane {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RGBPlane {
    /// Creates a zero-initialized plane of given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 3],
        }
    }

    /// Creates a plane taking ownership of an existing interleaved RGB buffer.
    ///
    /// Fails if the buffer length does not equal `3 * width * height`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PlaneError> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(PlaneError::new_buffer(expected, data.len()));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Gets the `[r, g, b]` values of the pixel at `(x, y)`.
    pub fn get(&self, x: u32, y: u32, flip: bool) -> Result<[u8; 3], PlaneError> {
        let start = self.index_of(x, y, flip)?;

        Ok([self.data[start], self.data[start + 1], self.data[start + 2]])
    }

    /// Sets the pixel at `(x, y)` to the provided `[r, g, b]` values.
    pub fn set(&mut self, x: u32, y: u32, rgb: [u8; 3], flip: bool) -> Result<(), PlaneError> {
        let start = self.index_of(x, y, flip)?;

        self.data[start] = rgb[0];
        self.data[start + 1] = rgb[1];
        self.data[start + 2] = rgb[2];

        Ok(())
    }

    /// Copies the rectangular region between the two inclusive corners into a
    /// new plane of size `(x2 - x1 + 1) x (y2 - y1 + 1)`.
    ///
    /// The `flip` flag is applied on both the read and the write side, so a
    /// region taken out of a bottom-up plane stays addressable the same way.
    pub fn copy_region(
        &self,
        x1: u32,
        y1: u32,
        x2: u32,
        y2: u32,
        flip: bool,
    ) -> Result<RGBPlane, PlaneError> {
        let mut region = RGBPlane::new(x2 - x1 + 1, y2 - y1 + 1);

        for (i, y) in (y1..=y2).zip(0..) {
            for (j, x) in (x1..=x2).zip(0..) {
                let pixel = self.get(j, i, flip)?;
                region.set(x, y, pixel, flip)?;
            }
        }

        Ok(region)
    }

    /// Swaps the red and blue channel of every pixel in place.
    ///
    /// Bitmap files store pixels as `B, G, R`; loaders swap them to `R, G, B`
    /// on the way in and must swap back on the way out.
    pub fn swap_r_b(&mut self) {
        for pixel in self.data.chunks_exact_mut(3) {
            pixel.swap(0, 2);
        }
    }

    /// Rotates the plane by -45 degrees about its center into a new plane
    /// sized to the rotated bounding box.
    ///
    /// Output pixels are resolved through the inverse rotation with
    /// nearest-neighbor sampling; pixels whose source falls outside the input
    /// stay black. Rows are addressed bottom-up on both sides, matching the
    /// bitmap convention the Wang tile pipeline works in.
    pub fn rotate_45(&self) -> RGBPlane {
        let angle = (-45f64).to_radians();
        let (sine, cosine) = angle.sin_cos();

        let mid_x = f64::from(self.width) / 2.0;
        let mid_y = f64::from(self.height) / 2.0;

        // x' = x cos - y sin
        let corners_x = [
            -mid_x * cosine - mid_y * sine,
            mid_x * cosine - mid_y * sine,
            -mid_x * cosine + mid_y * sine,
            mid_x * cosine + mid_y * sine,
        ];
        // y' = x sin + y cos
        let corners_y = [
            -mid_x * sine + mid_y * cosine,
            mid_x * sine + mid_y * cosine,
            -mid_x * sine - mid_y * cosine,
            mid_x * sine - mid_y * cosine,
        ];

        let span = |values: [f64; 4]| {
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            (max.abs() + min.abs()).ceil() as u32
        };

        let out_width = span(corners_x);
        let out_height = span(corners_y);

        let mut rotated = RGBPlane::new(out_width, out_height);

        for x in 0..out_width {
            for y in 0..out_height {
                let src_x = cosine * (f64::from(x) - mid_x) - sine * (f64::from(y) - mid_y)
                    + (mid_x / 2.0) * ROTATE_CORRECTION;
                let src_y = sine * (f64::from(x) - mid_x) + cosine * (f64::from(y) - mid_y) + mid_y;

                if src_x >= 0.0
                    && src_x < f64::from(self.width)
                    && src_y >= 0.0
                    && src_y < f64::from(self.height)
                {
                    let pixel = self
                        .get(src_x as u32, src_y as u32, true)
                        .expect("rotation source within bounds");
                    rotated
                        .set(x, y, pixel, true)
                        .expect("rotation target within bounds");
                }
            }
        }

        rotated
    }

    /// Exposes the raw interleaved byte buffer.
    pub fn raw_data(&self) -> &[u8] {
        &self.data
    }

    /// Gets the raw byte at a storage index.
    pub fn value_at(&self, index: usize) -> Result<u8, PlaneError> {
        if index >= self.data.len() {
            return Err(PlaneError::new_raw(index, self.data.len()));
        }
        Ok(self.data[index])
    }

    fn index_of(&self, x: u32, y: u32, flip: bool) -> Result<usize, PlaneError> {
        if x >= self.width || y >= self.height {
            return Err(PlaneError::new_oob(x, y, self.width, self.height));
        }

        let y = if flip { self.height - 1 - y } else { y };

        Ok((y as usize * self.width as usize + x as usize) * 3)
    }
}

#[cfg(test)]
mod test {
    use super::RGBPlane;

    #[test]
    fn set_then_get_roundtrips() {
        let mut plane = RGBPlane::new(4, 3);

        plane.set(2, 1, [10, 20, 30], false).unwrap();

        assert_eq!([10, 20, 30], plane.get(2, 1, false).unwrap());
    }

    #[test]
    fn flipped_rows_mirror_vertically() {
        let mut plane = RGBPlane::new(2, 4);

        plane.set(0, 0, [255, 0, 0], false).unwrap();

        assert_eq!([255, 0, 0], plane.get(0, 3, true).unwrap());
        assert_eq!([0, 0, 0], plane.get(0, 0, true).unwrap());
    }

    #[test]
    fn out_of_bounds_access_fails() {
        let mut plane = RGBPlane::new(2, 2);

        assert!(plane.get(2, 0, false).is_err());
        assert!(plane.get(0, 2, true).is_err());
        assert!(plane.set(5, 5, [1, 1, 1], false).is_err());
    }

    #[test]
    fn swapping_channels_twice_restores_plane() {
        let mut plane = RGBPlane::new(3, 2);
        for y in 0..2 {
            for x in 0..3 {
                plane
                    .set(x, y, [x as u8, y as u8, (x + y) as u8], false)
                    .unwrap();
            }
        }
        let original = plane.clone();

        plane.swap_r_b();
        assert_ne!(original, plane);

        plane.swap_r_b();
        assert_eq!(original, plane);
    }

    #[test]
    fn full_region_copy_is_identical() {
        let mut plane = RGBPlane::new(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                plane
                    .set(x, y, [(x * 10) as u8, (y * 10) as u8, 7], false)
                    .unwrap();
            }
        }

        let copied = plane.copy_region(0, 0, 2, 2, false).unwrap();

        assert_eq!(plane, copied);
    }

    #[test]
    fn subregion_copy_has_expected_content() {
        let mut plane = RGBPlane::new(4, 4);
        plane.set(2, 1, [9, 8, 7], false).unwrap();

        let region = plane.copy_region(1, 1, 3, 2, false).unwrap();

        assert_eq!(3, region.width());
        assert_eq!(2, region.height());
        assert_eq!([9, 8, 7], region.get(1, 0, false).unwrap());
    }

    #[test]
    fn raw_buffer_matches_dimensions() {
        let plane = RGBPlane::new(5, 2);

        assert_eq!(30, plane.raw_data().len());
        assert!(plane.value_at(29).is_ok());
        assert!(plane.value_at(30).is_err());
    }

    #[test]
    fn from_raw_checks_buffer_length() {
        assert!(RGBPlane::from_raw(2, 2, vec![0; 12]).is_ok());
        assert!(RGBPlane::from_raw(2, 2, vec![0; 11]).is_err());
    }

    #[test]
    fn rotation_grows_to_bounding_box() {
        let plane = RGBPlane::new(44, 44);

        let rotated = plane.rotate_45();

        // 44 * sqrt(2) = 62.2..., ceiled per axis.
        assert_eq!(63, rotated.width());
        assert_eq!(63, rotated.height());
    }

    #[test]
    fn rotation_carries_source_pixels_into_center() {
        let mut plane = RGBPlane::new(24, 24);
        for y in 0..24 {
            for x in 0..24 {
                plane.set(x, y, [200, 100, 50], false).unwrap();
            }
        }

        let rotated = plane.rotate_45();
        let center = rotated
            .get(rotated.width() / 2, rotated.height() / 2, false)
            .unwrap();

        assert_eq!([200, 100, 50], center);
    }
}
