/// Error returned from [crate::AcfParams] constructors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParamsError {
    #[error("block size must be positive")]
    ZeroBlockSize,

    #[error("channel count must be positive")]
    ZeroChannels,
}

/// Error returned from channel computation and [crate::ChannelStack] construction
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChannelError {
    #[error("image is empty ({width}x{height})")]
    EmptyImage { width: usize, height: usize },

    #[error("image has {actual} components per pixel, {expected} expected")]
    UnexpectedComponentCount { actual: usize, expected: usize },

    #[error("image buffer has {actual} bytes, {expected} expected for its dimensions")]
    BufferSizeMismatch { actual: usize, expected: usize },

    #[error("channel stack is empty")]
    EmptyStack,

    #[error(
        "channel {index} has shape {actual:?}, all channels of a stack must have shape {expected:?}"
    )]
    ShapeMismatch {
        index: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("channel stack has {channels} channels but {names} names")]
    NamesCountMismatch { channels: usize, names: usize },

    #[error("gradient histogram requires at least one bin")]
    ZeroBins,
}

/// Error returned from [crate::generate_features]
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("requested feature count must be positive")]
    ZeroCount,

    #[error("window {width}x{height} is smaller than a single {block_size}x{block_size} block")]
    WindowTooSmall {
        width: usize,
        height: usize,
        block_size: usize,
    },
}

/// Error returned from [crate::pool_channel]
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PoolingError {
    #[error("block size must be positive")]
    ZeroBlockSize,

    #[error("block ({row}, {col}) sum is not representable as i32")]
    NotRepresentable { row: usize, col: usize },

    #[error("pooled output has shape {actual:?}, {expected:?} expected")]
    OutputShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
}

/// Error returned from [crate::FeatureEvaluator]
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EvaluatorError {
    #[error("feature catalog is empty")]
    EmptyCatalog,

    #[error("{actual} channels are given, exactly {expected} are required")]
    WrongChannelCount { actual: usize, expected: usize },

    #[error("channel {index} has shape {actual:?}, {expected:?} expected")]
    ChannelShapeMismatch {
        index: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("channels are not bound, call set_channels() first")]
    UnboundChannels,

    #[error("feature index {index} is out of range for catalog of size {size}")]
    FeatureIndexOutOfRange { index: usize, size: usize },

    #[error(
        "feature ({x}, {y}, {channel}) is outside of the pooled grid {cols}x{rows} with {channels} channels"
    )]
    OutOfGrid {
        x: usize,
        y: usize,
        channel: usize,
        cols: usize,
        rows: usize,
        channels: usize,
    },

    #[error("channel {channel} cannot be pooled: {error}")]
    Pooling { channel: usize, error: PoolingError },
}
