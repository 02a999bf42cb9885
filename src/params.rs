use crate::error::ParamsError;
use crate::pooling::Truncation;

use macro_const::macro_const;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Side of the square pooling block in pixels, also the unit of feature grid coordinates
pub const BLOCK_SIZE: usize = 4;

/// Nominal number of channels a feature catalog is enumerated over
pub const DEFAULT_N_CHANNELS: usize = 10;

macro_const! {
    const DOC: &str = r"
Parameters shared by feature catalog generation and feature evaluation

Pooled channels are computed over non-overlapping square blocks of
$\mathrm{block\_size}$ pixels, and feature coordinates are expressed in the
same block units. A window of $W \times H$ pixels therefore gives a grid of
$\lfloor W / \mathrm{block\_size} \rfloor \times \lfloor H / \mathrm{block\_size} \rfloor$
cells, each crossed with $\mathrm{n\_channels}$ channel indices.

Both [crate::generate_features_with] and [crate::FeatureEvaluator::with_params]
take the same parameters, so the catalog and the evaluator cannot disagree on
the block size or on the channel count.

- Default block size: **4**
- Default channel count: **10**
- Default truncation: [Truncation::Sum]
";
}

#[doc = DOC!()]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "AcfParamsParameters", try_from = "AcfParamsParameters")]
pub struct AcfParams {
    block_size: usize,
    n_channels: usize,
    truncation: Truncation,
}

impl AcfParams {
    pub fn new(block_size: usize, n_channels: usize) -> Result<Self, ParamsError> {
        if block_size == 0 {
            return Err(ParamsError::ZeroBlockSize);
        }
        if n_channels == 0 {
            return Err(ParamsError::ZeroChannels);
        }
        Ok(Self {
            block_size,
            n_channels,
            truncation: Truncation::default(),
        })
    }

    pub fn with_truncation(mut self, truncation: Truncation) -> Self {
        self.truncation = truncation;
        self
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    #[inline]
    pub fn n_channels(&self) -> usize {
        self.n_channels
    }

    #[inline]
    pub fn truncation(&self) -> Truncation {
        self.truncation
    }

    /// Pooled grid of a window, partial trailing blocks are dropped
    pub fn grid_size(&self, window: WindowSize) -> GridSize {
        GridSize {
            cols: window.width / self.block_size,
            rows: window.height / self.block_size,
        }
    }

    /// Number of distinct feature definitions a window admits
    pub fn max_features(&self, window: WindowSize) -> usize {
        self.grid_size(window).cells() * self.n_channels
    }

    pub const fn doc() -> &'static str {
        DOC
    }
}

impl Default for AcfParams {
    fn default() -> Self {
        Self {
            block_size: BLOCK_SIZE,
            n_channels: DEFAULT_N_CHANNELS,
            truncation: Truncation::default(),
        }
    }
}

/// Size of a detection window in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct WindowSize {
    pub width: usize,
    pub height: usize,
}

impl WindowSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

/// Size of a pooled grid in blocks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct GridSize {
    pub cols: usize,
    pub rows: usize,
}

impl GridSize {
    #[inline]
    pub fn cells(&self) -> usize {
        self.cols * self.rows
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.cols && y < self.rows
    }
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(rename = "AcfParams")]
struct AcfParamsParameters {
    block_size: usize,
    n_channels: usize,
    #[serde(default)]
    truncation: Truncation,
}

impl From<AcfParams> for AcfParamsParameters {
    fn from(p: AcfParams) -> Self {
        Self {
            block_size: p.block_size,
            n_channels: p.n_channels,
            truncation: p.truncation,
        }
    }
}

impl TryFrom<AcfParamsParameters> for AcfParams {
    type Error = ParamsError;

    fn try_from(p: AcfParamsParameters) -> Result<Self, Self::Error> {
        Ok(Self::new(p.block_size, p.n_channels)?.with_truncation(p.truncation))
    }
}

impl JsonSchema for AcfParams {
    json_schema!(AcfParamsParameters, false);
}
