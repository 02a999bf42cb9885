use crate::catalog::{FeatureCatalog, FeatureDef};
use crate::error::EvaluatorError;
use crate::params::{AcfParams, GridSize};
use crate::pooling::pool_channel_into;
use crate::types::{Channel, PooledStack};

use macro_const::macro_const;
use ndarray::{Array3, Axis};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Offset of the evaluation window inside a larger image, in pixels
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct WindowPosition {
    pub x: usize,
    pub y: usize,
}

impl WindowPosition {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

macro_const! {
    const DOC: &str = r"
Evaluator of pooled channel features

The evaluator is created once for a [FeatureCatalog] and is then repeatedly bound
to channel stacks with [FeatureEvaluator::set_channels]. Binding pools every
channel over non-overlapping blocks,
$$
P_c(y, x) = \left\lfloor \sum_{i, j < b} C_c(b y + i, b x + j) \right\rfloor,
$$
where $b$ is the block size and the truncation follows [crate::Truncation].
Feature $(x, y, c)$ then evaluates to $P_c(y, x)$, so evaluating the whole catalog
costs one lookup per feature.

A binding replaces the previous one entirely, a failed binding leaves the
evaluator unbound. The stack passed to [FeatureEvaluator::set_channels] is not
retained.

The window position set with [FeatureEvaluator::set_position] is recorded for
the caller's bookkeeping only, it is not added to feature coordinates: bind a
stack already cropped to the window.
";
}

#[doc = DOC!()]
///
/// ### Example
/// ```
/// use acf_feature::*;
/// use ndarray::Array2;
///
/// let catalog = generate_features(WindowSize::new(8, 8), 3).unwrap();
/// let mut evaluator = FeatureEvaluator::new(catalog).unwrap();
/// let channels: Vec<_> = (0..10).map(|c| Array2::from_elem((8, 8), c as f32)).collect();
/// evaluator.set_channels(&channels).unwrap();
/// assert_eq!(evaluator.evaluate_all().unwrap(), vec![0, 16, 32]);
/// ```
#[derive(Clone, Debug)]
pub struct FeatureEvaluator {
    catalog: FeatureCatalog,
    params: AcfParams,
    pooled: Option<PooledStack>,
    position: WindowPosition,
}

impl FeatureEvaluator {
    /// Evaluator with default [AcfParams]
    pub fn new(catalog: FeatureCatalog) -> Result<Self, EvaluatorError> {
        Self::with_params(catalog, AcfParams::default())
    }

    pub fn with_params(
        catalog: FeatureCatalog,
        params: AcfParams,
    ) -> Result<Self, EvaluatorError> {
        if catalog.is_empty() {
            return Err(EvaluatorError::EmptyCatalog);
        }
        Ok(Self {
            catalog,
            params,
            pooled: None,
            position: WindowPosition::default(),
        })
    }

    /// Pool and bind exactly `params.n_channels()` channels of equal shape
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip_all, fields(n_channels = channels.as_ref().len()))
    )]
    pub fn set_channels<S>(&mut self, channels: S) -> Result<(), EvaluatorError>
    where
        S: AsRef<[Channel]>,
    {
        let channels = channels.as_ref();
        let previous = self.pooled.take();
        if channels.len() != self.params.n_channels() {
            return Err(EvaluatorError::WrongChannelCount {
                actual: channels.len(),
                expected: self.params.n_channels(),
            });
        }
        let expected = channels[0].dim();
        if let Some((index, channel)) = channels
            .iter()
            .enumerate()
            .find(|(_, channel)| channel.dim() != expected)
        {
            return Err(EvaluatorError::ChannelShapeMismatch {
                index,
                expected,
                actual: channel.dim(),
            });
        }

        let block = self.params.block_size();
        let shape = (channels.len(), expected.0 / block, expected.1 / block);
        // reuse the previous buffer when the shape allows
        let mut pooled = match previous {
            Some(buffer) if buffer.dim() == shape => buffer,
            _ => Array3::zeros(shape),
        };
        self.pool_all(channels, &mut pooled)?;
        self.pooled = Some(pooled);
        Ok(())
    }

    #[cfg(not(feature = "rayon"))]
    fn pool_all(
        &self,
        channels: &[Channel],
        pooled: &mut PooledStack,
    ) -> Result<(), EvaluatorError> {
        let (block, truncation) = (self.params.block_size(), self.params.truncation());
        pooled
            .outer_iter_mut()
            .zip(channels)
            .enumerate()
            .try_for_each(|(index, (dst, src))| {
                pool_channel_into(src.view(), dst, block, truncation).map_err(|error| {
                    EvaluatorError::Pooling {
                        channel: index,
                        error,
                    }
                })
            })
    }

    #[cfg(feature = "rayon")]
    fn pool_all(
        &self,
        channels: &[Channel],
        pooled: &mut PooledStack,
    ) -> Result<(), EvaluatorError> {
        let (block, truncation) = (self.params.block_size(), self.params.truncation());
        pooled
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .zip(channels.par_iter())
            .enumerate()
            .try_for_each(|(index, (dst, src))| {
                pool_channel_into(src.view(), dst, block, truncation).map_err(|error| {
                    EvaluatorError::Pooling {
                        channel: index,
                        error,
                    }
                })
            })
    }

    /// Record the window offset, feature lookups do not use it
    pub fn set_position(&mut self, position: WindowPosition) {
        self.position = position;
    }

    #[inline]
    pub fn position(&self) -> WindowPosition {
        self.position
    }

    #[inline]
    pub fn catalog(&self) -> &FeatureCatalog {
        &self.catalog
    }

    #[inline]
    pub fn params(&self) -> &AcfParams {
        &self.params
    }

    /// Catalog size, the length of [FeatureEvaluator::evaluate_all] output
    #[inline]
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    /// Always false, an evaluator cannot be created with an empty catalog
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    #[inline]
    pub fn is_bound(&self) -> bool {
        self.pooled.is_some()
    }

    /// Pooled grid of the bound channels
    pub fn grid_size(&self) -> Option<GridSize> {
        self.pooled.as_ref().map(|pooled| GridSize {
            cols: pooled.len_of(Axis(2)),
            rows: pooled.len_of(Axis(1)),
        })
    }

    fn lookup(pooled: &PooledStack, feature: &FeatureDef) -> Result<i32, EvaluatorError> {
        pooled
            .get((feature.channel, feature.y, feature.x))
            .copied()
            .ok_or_else(|| {
                let (channels, rows, cols) = pooled.dim();
                EvaluatorError::OutOfGrid {
                    x: feature.x,
                    y: feature.y,
                    channel: feature.channel,
                    cols,
                    rows,
                    channels,
                }
            })
    }

    /// Value of the catalog feature at `index`
    pub fn evaluate(&self, index: usize) -> Result<i32, EvaluatorError> {
        let pooled = self.pooled.as_ref().ok_or(EvaluatorError::UnboundChannels)?;
        let feature =
            self.catalog
                .get(index)
                .ok_or(EvaluatorError::FeatureIndexOutOfRange {
                    index,
                    size: self.catalog.len(),
                })?;
        Self::lookup(pooled, feature)
    }

    /// Values of all catalog features in catalog order
    pub fn evaluate_all(&self) -> Result<Vec<i32>, EvaluatorError> {
        let mut values = Vec::with_capacity(self.len());
        self.evaluate_all_into(&mut values)?;
        Ok(values)
    }

    /// Version of [FeatureEvaluator::evaluate_all] reusing the output buffer
    ///
    /// `values` is cleared first, on error its content is unspecified.
    pub fn evaluate_all_into(&self, values: &mut Vec<i32>) -> Result<(), EvaluatorError> {
        let pooled = self.pooled.as_ref().ok_or(EvaluatorError::UnboundChannels)?;
        values.clear();
        values.reserve(self.len());
        for feature in &self.catalog {
            values.push(Self::lookup(pooled, feature)?);
        }
        Ok(())
    }

    pub const fn doc() -> &'static str {
        DOC
    }
}
