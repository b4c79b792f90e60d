//! Image slot loading.
//!
//! Images are decoded, rotated according to their EXIF orientation and
//! converted to RGB. Samples are stored as `f32` in `[0, 1]`, channel-first
//! (`[3, height, width]`).

use image::{DynamicImage, ImageDecoder, ImageReader, ImageResult, RgbImage};
use std::path::Path;

/// Number of color channels of every tensor.
pub const CHANNELS: usize = 3;

/// A channel-first RGB image with normalized samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl ImageTensor {
    /// A `width` x `height` image filled with one color.
    pub fn filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        let plane = width as usize * height as usize;
        let mut data = Vec::with_capacity(CHANNELS * plane);
        for channel in color {
            data.extend(std::iter::repeat(f32::from(channel) / 255.0).take(plane));
        }
        Self { width, height, data }
    }

    /// The square placeholder substituted for missing or unreadable images.
    pub fn placeholder(size: u32, color: [u8; 3]) -> Self {
        Self::filled(size, size, color)
    }

    pub fn from_rgb(image: &RgbImage) -> Self {
        let (width, height) = image.dimensions();
        let plane = width as usize * height as usize;
        let mut data = vec![0.0f32; CHANNELS * plane];

        for (i, pixel) in image.pixels().enumerate() {
            for (c, &sample) in pixel.0.iter().enumerate() {
                data[c * plane + i] = f32::from(sample) / 255.0;
            }
        }

        Self { width, height, data }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `[channels, height, width]`
    pub fn shape(&self) -> [usize; 3] {
        [CHANNELS, self.height as usize, self.width as usize]
    }

    /// Flat samples, one full plane per channel.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Sample at channel `c`, row `y`, column `x`.
    pub fn get(&self, c: usize, y: u32, x: u32) -> Option<f32> {
        if c >= CHANNELS || y >= self.height || x >= self.width {
            return None;
        }
        let plane = self.width as usize * self.height as usize;
        self.data
            .get(c * plane + y as usize * self.width as usize + x as usize)
            .copied()
    }
}

/// Decode an image file, honouring its EXIF orientation.
pub fn load_image(path: &Path) -> ImageResult<ImageTensor> {
    let mut decoder = ImageReader::open(path)?.with_guessed_format()?.into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut image = DynamicImage::from_decoder(decoder)?;
    image.apply_orientation(orientation);

    Ok(ImageTensor::from_rgb(&image.to_rgb8()))
}
