pub use crate::data::ColorImage;
pub use crate::error::ChannelError;
pub use crate::types::Channel;

use enum_dispatch::enum_dispatch;
pub use lazy_static::lazy_static;
pub use macro_const::macro_const;
pub use schemars::JsonSchema;
pub use serde::{Deserialize, Serialize};
pub use std::fmt::Debug;

/// Static description of the planes a channel kind emits
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChannelInfo {
    pub size: usize,
    pub names: Vec<String>,
    pub descriptions: Vec<String>,
}

#[enum_dispatch]
pub trait ChannelInfoTrait {
    /// Get channel evaluator info
    fn get_info(&self) -> &ChannelInfo;

    /// Number of channels the evaluator emits
    fn size_hint(&self) -> usize {
        self.get_info().size
    }

    /// Channel names, one per emitted plane
    fn get_names(&self) -> Vec<&str> {
        self.get_info().names.iter().map(String::as_str).collect()
    }

    /// Channel descriptions, one per emitted plane
    fn get_descriptions(&self) -> Vec<&str> {
        self.get_info()
            .descriptions
            .iter()
            .map(String::as_str)
            .collect()
    }
}

/// The trait each channel kind should implement
#[enum_dispatch]
pub trait ChannelEvaluator: ChannelInfoTrait + Clone + Debug + Serialize {
    /// Vector of [ChannelEvaluator::size_hint] planes, each shaped as the image
    fn eval(&self, image: &mut ColorImage) -> Result<Vec<Channel>, ChannelError>;
}
