#![doc = include_str!("../README.md")]


#[macro_use]
mod macros;

mod catalog;
pub use catalog::{FeatureCatalog, FeatureDef, generate_features, generate_features_with};

mod channel_evaluator;
pub use channel_evaluator::{ChannelEvaluator, ChannelInfo, ChannelInfoTrait};

mod channel;
pub use channel::ChannelKind;

pub mod channels;
pub use channels::*;

mod computer;
pub use computer::{ChannelComputer, compute_channels};

mod data;
pub use data::{COLOR_COMPONENTS, ChannelStack, ColorImage};

mod error;
pub use error::{CatalogError, ChannelError, EvaluatorError, ParamsError, PoolingError};

mod feature_evaluator;
pub use feature_evaluator::{FeatureEvaluator, WindowPosition};

mod gradient;
pub use gradient::{Gradient, orientation_bin, sobel_x, sobel_xy, sobel_y};

mod params;
pub use params::{AcfParams, BLOCK_SIZE, DEFAULT_N_CHANNELS, GridSize, WindowSize};

mod pooling;
pub use pooling::{Truncation, pool_channel, pool_channel_into};

mod types;
pub use types::{Channel, PooledChannel};

pub use image;
pub use ndarray;
