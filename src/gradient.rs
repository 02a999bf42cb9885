use ndarray::{Array2, ArrayView2, Axis, Zip};

/// Unnormalized 3-tap Sobel kernels: derivative and the orthogonal smoothing
const SOBEL_DERIV: [f32; 3] = [-1.0, 0.0, 1.0];
const SOBEL_SMOOTH: [f32; 3] = [1.0, 2.0, 1.0];

/// First-order derivatives of a plane and their per-pixel Euclidean norm
#[derive(Clone, Debug)]
pub struct Gradient {
    /// Derivative along columns, positive when intensity grows to the right
    pub dx: Array2<f32>,
    /// Derivative along rows, positive when intensity grows downward
    pub dy: Array2<f32>,
    pub magnitude: Array2<f32>,
}

impl Gradient {
    pub fn new(plane: ArrayView2<f32>) -> Self {
        let (dx, dy) = sobel_xy(plane);
        let magnitude = Zip::from(&dx)
            .and(&dy)
            .map_collect(|&dx, &dy| f32::hypot(dx, dy));
        Self { dx, dy, magnitude }
    }
}

/// Mirror an out-of-range index without repeating the edge sample: `-1 -> 1`, `n -> n - 2`
///
/// Only handles one sample of overshoot, which is all a 3-tap kernel needs.
#[inline]
fn reflect_101(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let n = n as isize;
    if i < 0 {
        (-i) as usize
    } else if i >= n {
        (2 * n - 2 - i) as usize
    } else {
        i as usize
    }
}

fn correlate_3tap(src: ArrayView2<f32>, kernel: &[f32; 3], axis: Axis) -> Array2<f32> {
    let (rows, cols) = src.dim();
    Array2::from_shape_fn((rows, cols), |(row, col)| {
        kernel
            .iter()
            .enumerate()
            .map(|(k, &weight)| {
                let offset = k as isize - 1;
                let idx = if axis == Axis(0) {
                    (reflect_101(row as isize + offset, rows), col)
                } else {
                    (row, reflect_101(col as isize + offset, cols))
                };
                src[idx] * weight
            })
            .sum()
    })
}

/// Horizontal Sobel derivative with reflect-101 borders
pub fn sobel_x(src: ArrayView2<f32>) -> Array2<f32> {
    let smoothed = correlate_3tap(src, &SOBEL_SMOOTH, Axis(0));
    correlate_3tap(smoothed.view(), &SOBEL_DERIV, Axis(1))
}

/// Vertical Sobel derivative with reflect-101 borders
pub fn sobel_y(src: ArrayView2<f32>) -> Array2<f32> {
    let smoothed = correlate_3tap(src, &SOBEL_SMOOTH, Axis(1));
    correlate_3tap(smoothed.view(), &SOBEL_DERIV, Axis(0))
}

pub fn sobel_xy(src: ArrayView2<f32>) -> (Array2<f32>, Array2<f32>) {
    (sobel_x(src), sobel_y(src))
}

/// Unsigned orientation bucket of a gradient vector
///
/// The angle `atan2(dy, dx)` is folded into `[0, 180)` degrees and split into
/// `n_bins` equal sectors. Rounding can put the folded angle exactly on 180, such
/// gradients go to the last bucket.
///
/// ### Example
/// ```
/// use acf_feature::orientation_bin;
///
/// assert_eq!(orientation_bin(1.0, 0.0, 6), 0);
/// assert_eq!(orientation_bin(0.0, 1.0, 6), 3);
/// assert_eq!(orientation_bin(-1.0, 0.0, 6), 5);
/// ```
#[inline]
pub fn orientation_bin(dx: f32, dy: f32, n_bins: usize) -> usize {
    let mut angle = f32::atan2(dy, dx).to_degrees();
    if angle < 0.0 {
        angle += 180.0;
    }
    let bin = (angle / (180.0 / n_bins as f32)) as usize;
    usize::min(bin, n_bins - 1)
}
