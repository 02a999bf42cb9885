use ndarray::{Array2, Array3};

/// Single scalar plane of an image, indexed as `(row, col)`
pub type Channel = Array2<f32>;

/// Block-pooled integer plane, indexed as `(row, col)` in grid units
pub type PooledChannel = Array2<i32>;

/// Stack of pooled planes, indexed as `(channel, row, col)`
pub(crate) type PooledStack = Array3<i32>;
