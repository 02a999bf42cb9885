use crate::channel_evaluator::*;
use crate::channels::*;

use enum_dispatch::enum_dispatch;

/// All channel kinds are available as variants of this enum
///
/// Consider to import [crate::ChannelEvaluator] as well
#[enum_dispatch(ChannelEvaluator, ChannelInfoTrait)]
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ChannelKind {
    Chroma,
    GradientHistogram,
    GradientMagnitude,
    Grayscale,
}
