use crate::error::PoolingError;
use crate::types::PooledChannel;

use conv::{ConvUtil, RoundToZero};
use ndarray::{Array2, ArrayView2, ArrayViewMut2};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a block of floating-point channel values becomes an integer
///
/// Both modes truncate toward zero, they differ only in where the truncation happens.
/// [Truncation::Element] casts every pixel to an integer before summation, which
/// reproduces the pooled values of classic ACF detectors bit for bit. Use it when
/// the features feed a classifier trained on such values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Truncation {
    /// Sum the block in `f32`, then truncate the sum: a constant block of `v` gives `trunc(16 v)`
    #[default]
    Sum,
    /// Truncate every value, then sum the integers: a constant block of `v` gives `16 trunc(v)`
    Element,
}

impl Truncation {
    fn block_value(self, block: ArrayView2<f32>) -> Option<i32> {
        match self {
            Self::Sum => {
                let sum: f32 = block.iter().sum();
                sum.approx_as_by::<i32, RoundToZero>().ok()
            }
            Self::Element => block.iter().try_fold(0i32, |acc, &x| {
                acc.checked_add(x.approx_as_by::<i32, RoundToZero>().ok()?)
            }),
        }
    }
}

/// Sum non-overlapping `block_size`x`block_size` blocks of a channel
///
/// Output has shape `(rows / block_size, cols / block_size)`, trailing rows and
/// columns that do not fill a whole block are ignored.
///
/// Zero `block_size` is [PoolingError::ZeroBlockSize].
///
/// ### Example
/// ```
/// use acf_feature::{Truncation, pool_channel};
/// use ndarray::Array2;
///
/// let channel = Array2::from_elem((8, 9), 0.5_f32);
/// let pooled = pool_channel(channel.view(), 4, Truncation::Sum).unwrap();
/// assert_eq!(pooled, Array2::from_elem((2, 2), 8));
/// ```
pub fn pool_channel(
    channel: ArrayView2<f32>,
    block_size: usize,
    truncation: Truncation,
) -> Result<PooledChannel, PoolingError> {
    if block_size == 0 {
        return Err(PoolingError::ZeroBlockSize);
    }
    let (rows, cols) = channel.dim();
    let mut pooled = Array2::zeros((rows / block_size, cols / block_size));
    pool_channel_into(channel, pooled.view_mut(), block_size, truncation)?;
    Ok(pooled)
}

/// Version of [pool_channel] writing into a preallocated plane
pub fn pool_channel_into(
    channel: ArrayView2<f32>,
    mut pooled: ArrayViewMut2<i32>,
    block_size: usize,
    truncation: Truncation,
) -> Result<(), PoolingError> {
    if block_size == 0 {
        return Err(PoolingError::ZeroBlockSize);
    }
    let (rows, cols) = channel.dim();
    let expected = (rows / block_size, cols / block_size);
    if pooled.dim() != expected {
        return Err(PoolingError::OutputShapeMismatch {
            expected,
            actual: pooled.dim(),
        });
    }
    for (((row, col), cell), block) in pooled
        .indexed_iter_mut()
        .zip(channel.exact_chunks((block_size, block_size)))
    {
        *cell = truncation
            .block_value(block)
            .ok_or(PoolingError::NotRepresentable { row, col })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::Array;
    use rand::prelude::*;

    #[test]
    fn constant_channel() {
        for &v in &[0.0_f32, 0.25, 1.0, 3.5, 255.0, -2.0] {
            let channel = Array2::from_elem((16, 16), v);
            let pooled = pool_channel(channel.view(), 4, Truncation::Sum).unwrap();
            assert_eq!(pooled.dim(), (4, 4));
            let desired = (16.0 * v).trunc() as i32;
            assert!(pooled.iter().all(|&x| x == desired), "v = {v}: {pooled:?}");
        }
    }

    #[test]
    fn sum_and_element_truncation_differ() {
        let channel = Array2::from_elem((4, 4), 0.75_f32);
        assert_eq!(
            pool_channel(channel.view(), 4, Truncation::Sum).unwrap()[(0, 0)],
            12
        );
        assert_eq!(
            pool_channel(channel.view(), 4, Truncation::Element).unwrap()[(0, 0)],
            0
        );

        let channel = Array2::from_elem((4, 4), -1.5_f32);
        assert_eq!(
            pool_channel(channel.view(), 4, Truncation::Sum).unwrap()[(0, 0)],
            -24
        );
        assert_eq!(
            pool_channel(channel.view(), 4, Truncation::Element).unwrap()[(0, 0)],
            -16
        );
    }

    #[test]
    fn blocks_are_row_major() {
        // value = row * 100 + col, so every block sum is distinct
        let channel = Array::from_shape_fn((8, 12), |(r, c)| (r * 100 + c) as f32);
        let pooled = pool_channel(channel.view(), 4, Truncation::Sum).unwrap();
        assert_eq!(pooled.dim(), (2, 3));
        for ((row, col), &value) in pooled.indexed_iter() {
            let desired: f32 = channel
                .slice(ndarray::s![row * 4..row * 4 + 4, col * 4..col * 4 + 4])
                .sum();
            assert_eq!(value, desired as i32);
        }
    }

    #[test]
    fn partial_blocks_are_dropped() {
        let channel = Array2::from_elem((7, 10), 1.0_f32);
        let pooled = pool_channel(channel.view(), 4, Truncation::Sum).unwrap();
        assert_eq!(pooled, Array2::from_elem((1, 2), 16));

        let tiny = Array2::from_elem((3, 3), 1.0_f32);
        let pooled = pool_channel(tiny.view(), 4, Truncation::Sum).unwrap();
        assert_eq!(pooled.dim(), (0, 0));
    }

    #[test]
    fn nan_is_reported() {
        let mut channel = Array2::from_elem((8, 8), 1.0_f32);
        channel[(5, 6)] = f32::NAN;
        for truncation in [Truncation::Sum, Truncation::Element] {
            assert_eq!(
                pool_channel(channel.view(), 4, truncation),
                Err(PoolingError::NotRepresentable { row: 1, col: 1 })
            );
        }
    }

    #[test]
    fn overflow_is_reported() {
        let channel = Array2::from_elem((4, 4), 1e9_f32);
        for truncation in [Truncation::Sum, Truncation::Element] {
            assert_eq!(
                pool_channel(channel.view(), 4, truncation),
                Err(PoolingError::NotRepresentable { row: 0, col: 0 })
            );
        }
    }

    #[test]
    fn element_matches_per_pixel_cast() {
        let mut rng = StdRng::seed_from_u64(0);
        let channel = Array::from_shape_simple_fn((12, 8), || rng.random_range(-3.0_f32..3.0));
        let pooled = pool_channel(channel.view(), 4, Truncation::Element).unwrap();
        for ((row, col), &value) in pooled.indexed_iter() {
            let desired: i32 = channel
                .slice(ndarray::s![row * 4..row * 4 + 4, col * 4..col * 4 + 4])
                .iter()
                .map(|&x| x as i32)
                .sum();
            assert_eq!(value, desired);
        }
    }

    #[test]
    fn zero_block_size() {
        let channel = Array2::from_elem((8, 8), 1.0_f32);
        assert_eq!(
            pool_channel(channel.view(), 0, Truncation::Sum),
            Err(PoolingError::ZeroBlockSize)
        );
        let mut out = Array2::zeros((2, 2));
        assert_eq!(
            pool_channel_into(channel.view(), out.view_mut(), 0, Truncation::Element),
            Err(PoolingError::ZeroBlockSize)
        );
    }

    #[test]
    fn wrong_output_shape() {
        let channel = Array2::from_elem((8, 8), 1.0_f32);
        let mut out = Array2::zeros((3, 2));
        assert_eq!(
            pool_channel_into(channel.view(), out.view_mut(), 4, Truncation::Sum),
            Err(PoolingError::OutputShapeMismatch {
                expected: (2, 2),
                actual: (3, 2),
            })
        );
    }
}
