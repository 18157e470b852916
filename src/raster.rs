use crate::point::Point2D;
use bitvec::prelude::{bitvec, BitVec};
use std::io::Write;

const DOT_RADIUS: isize = 1;
const GUTTER: usize = 4;

/// One bit per pixel, set where a point was plotted.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: BitVec,
}

impl Raster {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: bitvec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_set(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.pixels[y * self.width + x]
    }

    pub fn count_set(&self) -> usize {
        self.pixels.count_ones()
    }

    /// Map `bounds` onto the raster (y up) and stamp a small dot per point.
    pub fn plot(&mut self, points: &[Point2D], bounds: (Point2D, Point2D)) {
        let (min, max) = bounds;
        let span_x = max.x - min.x;
        let span_y = max.y - min.y;
        if self.width == 0 || self.height == 0 || span_x <= 0.0 || span_y <= 0.0 {
            return;
        }

        let last_x = (self.width - 1) as f64;
        let last_y = (self.height - 1) as f64;

        for p in points {
            let px = ((p.x - min.x) / span_x * last_x).round() as isize;
            let py = ((max.y - p.y) / span_y * last_y).round() as isize;
            self.stamp(px, py);
        }
    }

    fn stamp(&mut self, cx: isize, cy: isize) {
        for y in cy - DOT_RADIUS..=cy + DOT_RADIUS {
            for x in cx - DOT_RADIUS..=cx + DOT_RADIUS {
                if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
                    let index = y as usize * self.width + x as usize;
                    self.pixels.set(index, true);
                }
            }
        }
    }

    /// `self` on the left, `other` on the right, separated by a blank gutter.
    pub fn beside(&self, other: &Raster) -> Raster {
        let height = self.height.max(other.height);
        let mut joined = Raster::new(self.width + GUTTER + other.width, height);
        let offset = self.width + GUTTER;

        for y in 0..height {
            for x in 0..self.width {
                if self.is_set(x, y) {
                    joined.pixels.set(y * joined.width + x, true);
                }
            }
            for x in 0..other.width {
                if other.is_set(x, y) {
                    joined.pixels.set(y * joined.width + offset + x, true);
                }
            }
        }

        joined
    }

    /// Grayscale PNG, black dots on white.
    pub fn write_png<W: Write>(&self, writer: W) -> Result<(), png::EncodingError> {
        let mut encoder = png::Encoder::new(writer, self.width as u32, self.height as u32);

        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);

        let mut png_writer = encoder.write_header()?;

        let image: Vec<u8> = self
            .pixels
            .iter()
            .map(|bit| if *bit { 0 } else { 255 })
            .collect();

        png_writer.write_image_data(&image)?;
        png_writer.finish()
    }
}
