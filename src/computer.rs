use crate::channel::ChannelKind;
use crate::channel_evaluator::*;
use crate::channels::{Chroma, GradientHistogram, GradientMagnitude, Grayscale};
use crate::data::ChannelStack;

use image::RgbImage;
use itertools::Itertools;
#[cfg(feature = "tracing")]
use tracing::instrument;

macro_const! {
    const DOC: &str = r"
Decomposition of a color image into an ordered stack of scalar channels

Channels of every kind are emitted in the order the kinds are given, each kind
contributing [ChannelInfoTrait::size_hint] planes. The default computer emits
eight channels:

| index | channel                         |
|-------|---------------------------------|
| 0     | luminance                       |
| 1     | gradient magnitude              |
| 2..8  | six oriented gradient bins      |

[ChannelComputer::acf] appends the two chroma planes, giving the ten channels
expected by [crate::FeatureEvaluator] with default [crate::AcfParams].
";
}

#[doc = DOC!()]
///
/// ### Example
/// ```
/// use acf_feature::*;
/// use image::{Rgb, RgbImage};
///
/// let image = RgbImage::from_pixel(16, 16, Rgb([255, 255, 255]));
/// let stack = ChannelComputer::default().compute(&image).unwrap();
/// assert_eq!(stack.len(), 8);
/// assert_eq!(ChannelComputer::acf().compute(&image).unwrap().len(), 10);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(
    into = "ChannelComputerParameters",
    from = "ChannelComputerParameters"
)]
pub struct ChannelComputer {
    kinds: Vec<ChannelKind>,
    info: Box<ChannelInfo>,
}

impl ChannelComputer {
    pub fn new(kinds: Vec<ChannelKind>) -> Self {
        let info = ChannelInfo {
            size: kinds.iter().map(|k| k.size_hint()).sum(),
            names: kinds
                .iter()
                .flat_map(|k| k.get_names())
                .map(str::to_owned)
                .collect(),
            descriptions: kinds
                .iter()
                .flat_map(|k| k.get_descriptions())
                .map(str::to_owned)
                .collect(),
        };
        Self {
            kinds,
            info: info.into(),
        }
    }

    /// Ten-channel layout: the default channels followed by chroma
    pub fn acf() -> Self {
        let mut computer = Self::default();
        computer.add_kind(Chroma::new().into());
        computer
    }

    pub fn add_kind(&mut self, kind: ChannelKind) -> &mut Self {
        self.info.size += kind.size_hint();
        self.info
            .names
            .extend(kind.get_names().into_iter().map(str::to_owned));
        self.info
            .descriptions
            .extend(kind.get_descriptions().into_iter().map(str::to_owned));
        self.kinds.push(kind);
        self
    }

    pub fn kinds(&self) -> &[ChannelKind] {
        &self.kinds
    }

    /// Compute channels of an 8-bit RGB image
    pub fn compute(&self, image: &RgbImage) -> Result<ChannelStack, ChannelError> {
        let mut color = ColorImage::from_rgb8(image)?;
        self.compute_color(&mut color)
    }

    /// Compute channels of an already normalized image, reusing its cached planes
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip_all, fields(rows = image.rows(), cols = image.cols(), channels = self.size_hint()))
    )]
    pub fn compute_color(&self, image: &mut ColorImage) -> Result<ChannelStack, ChannelError> {
        let channels: Vec<_> = self
            .kinds
            .iter()
            .map(|kind| kind.eval(image))
            .flatten_ok()
            .try_collect()?;
        ChannelStack::with_names(channels, self.info.names.clone())
    }

    pub const fn doc() -> &'static str {
        DOC
    }
}

impl Default for ChannelComputer {
    fn default() -> Self {
        Self::new(vec![
            Grayscale::new().into(),
            GradientMagnitude::new().into(),
            GradientHistogram::default().into(),
        ])
    }
}

impl ChannelInfoTrait for ChannelComputer {
    fn get_info(&self) -> &ChannelInfo {
        &self.info
    }
}

/// Compute the default eight channels of an image: luminance, gradient magnitude
/// and six oriented gradient bins
pub fn compute_channels(image: &RgbImage) -> Result<ChannelStack, ChannelError> {
    ChannelComputer::default().compute(image)
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(rename = "ChannelComputer")]
struct ChannelComputerParameters {
    kinds: Vec<ChannelKind>,
}

impl From<ChannelComputer> for ChannelComputerParameters {
    fn from(f: ChannelComputer) -> Self {
        Self { kinds: f.kinds }
    }
}

impl From<ChannelComputerParameters> for ChannelComputer {
    fn from(p: ChannelComputerParameters) -> Self {
        Self::new(p.kinds)
    }
}

impl JsonSchema for ChannelComputer {
    json_schema!(ChannelComputerParameters, true);
}
