use image::{Rgb, RgbImage};
use itertools::iproduct;
use lazy_static::lazy_static;
use rand::prelude::*;

const SAMPLE_SIZES: [(u32, u32); 3] = [(32, 32), (64, 48), (21, 35)];

lazy_static! {
    /// Named synthetic images covering flat, edge, textured and noisy content
    pub static ref SAMPLE_IMAGES: Vec<(String, RgbImage)> = {
        let mut v = vec![];
        for (width, height) in SAMPLE_SIZES {
            v.push((
                format!("uniform_{width}x{height}"),
                RgbImage::from_pixel(width, height, Rgb([200, 120, 40])),
            ));
            v.push((format!("edge_{width}x{height}"), vertical_edge(width, height)));
            v.push((format!("ramp_{width}x{height}"), diagonal_ramp(width, height)));
            v.push((
                format!("checkerboard_{width}x{height}"),
                checkerboard(width, height, 4),
            ));
            v.push((format!("disk_{width}x{height}"), disk(width, height)));
            v.push((format!("noise_{width}x{height}"), noise(width, height, 0)));
        }
        v
    };
}

pub fn iter_sample_images() -> impl Iterator<Item = (&'static str, &'static RgbImage)> {
    SAMPLE_IMAGES
        .iter()
        .map(|(name, image)| (name.as_str(), image))
}

/// Black left half, white right half
pub fn vertical_edge(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        }
    })
}

/// Intensity growing along the main diagonal, tinted differently per component
pub fn diagonal_ramp(width: u32, height: u32) -> RgbImage {
    let scale = 255.0 / (width + height).saturating_sub(2).max(1) as f32;
    RgbImage::from_fn(width, height, |x, y| {
        let v = ((x + y) as f32 * scale) as u8;
        Rgb([v, v / 2, 255 - v])
    })
}

/// Black and white squares of `cell` pixels
pub fn checkerboard(width: u32, height: u32, cell: u32) -> RgbImage {
    let mut image = RgbImage::new(width, height);
    for (x, y) in iproduct!(0..width, 0..height) {
        if (x / cell + y / cell) % 2 == 0 {
            image.put_pixel(x, y, Rgb([255, 255, 255]));
        }
    }
    image
}

/// Red disk centered on a blue background
pub fn disk(width: u32, height: u32) -> RgbImage {
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    let radius = cx.min(cy) * 0.6;
    RgbImage::from_fn(width, height, |x, y| {
        let (dx, dy) = (x as f32 + 0.5 - cx, y as f32 + 0.5 - cy);
        if dx.hypot(dy) < radius {
            Rgb([230, 20, 20])
        } else {
            Rgb([20, 20, 180])
        }
    })
}

/// Uniform random pixels, reproducible for the same `seed`
pub fn noise(width: u32, height: u32, seed: u64) -> RgbImage {
    let mut rng = StdRng::seed_from_u64(seed);
    RgbImage::from_fn(width, height, |_, _| Rgb(rng.random()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_names_are_unique() {
        let mut names: Vec<_> = iter_sample_images().map(|(name, _)| name).collect();
        let n = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), n);
    }

    #[test]
    fn noise_is_reproducible() {
        assert_eq!(noise(8, 8, 42), noise(8, 8, 42));
        assert_ne!(noise(8, 8, 42), noise(8, 8, 43));
    }
}
