use crate::error::ChannelError;
use crate::gradient::Gradient;
use crate::types::Channel;

use image::{DynamicImage, RgbImage};
use ndarray::{Array3, ArrayView2, Axis, Zip};

/// Number of color components every input pixel must have
pub const COLOR_COMPONENTS: usize = 3;

/// ITU-R BT.601 luma weights for R, G and B
const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// RGB raster normalized to `[0, 1]`, the input of every channel kind
///
/// Derived planes shared by several channel kinds (grayscale and gradients) are
/// computed on first request and cached, so a [crate::ChannelComputer] does the
/// Sobel pass once per image regardless of how many gradient channels it emits.
#[derive(Clone, Debug)]
pub struct ColorImage {
    rgb: Array3<f32>,
    gray: Option<Channel>,
    gradient: Option<Gradient>,
}

macro_rules! color_image_getter {
    ($attr: ident, $getter: ident, $ty: ty, $func: expr_2021) => {
        pub fn $getter(&mut self) -> &$ty {
            if self.$attr.is_none() {
                self.$attr = Some($func(self));
            }
            self.$attr.as_ref().unwrap()
        }
    };
}

impl ColorImage {
    /// Image from interleaved 8-bit samples in row-major order
    pub fn from_interleaved(
        width: usize,
        height: usize,
        components: usize,
        data: &[u8],
    ) -> Result<Self, ChannelError> {
        if width == 0 || height == 0 {
            return Err(ChannelError::EmptyImage { width, height });
        }
        if components != COLOR_COMPONENTS {
            return Err(ChannelError::UnexpectedComponentCount {
                actual: components,
                expected: COLOR_COMPONENTS,
            });
        }
        let expected = width * height * components;
        if data.len() != expected {
            return Err(ChannelError::BufferSizeMismatch {
                actual: data.len(),
                expected,
            });
        }
        let rgb = Array3::from_shape_fn((height, width, components), |(row, col, c)| {
            f32::from(data[(row * width + col) * components + c]) / 255.0
        });
        Ok(Self::from_normalized(rgb))
    }

    pub fn from_rgb8(image: &RgbImage) -> Result<Self, ChannelError> {
        Self::from_interleaved(
            image.width() as usize,
            image.height() as usize,
            COLOR_COMPONENTS,
            image.as_raw(),
        )
    }

    fn from_normalized(rgb: Array3<f32>) -> Self {
        Self {
            rgb,
            gray: None,
            gradient: None,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rgb.len_of(Axis(0))
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.rgb.len_of(Axis(1))
    }

    /// Normalized plane of a single color component, 0 is red
    pub fn component(&self, index: usize) -> ArrayView2<'_, f32> {
        self.rgb.index_axis(Axis(2), index)
    }

    color_image_getter!(gray, get_gray, Channel, |img: &mut ColorImage| {
        let mut gray = Channel::zeros((img.rows(), img.cols()));
        for (c, &weight) in LUMA_WEIGHTS.iter().enumerate() {
            Zip::from(&mut gray)
                .and(img.component(c))
                .for_each(|g, &x| *g += weight * x);
        }
        gray
    });

    color_image_getter!(gradient, get_gradient, Gradient, |img: &mut ColorImage| {
        Gradient::new(img.get_gray().view())
    });
}

impl TryFrom<&RgbImage> for ColorImage {
    type Error = ChannelError;

    fn try_from(image: &RgbImage) -> Result<Self, Self::Error> {
        Self::from_rgb8(image)
    }
}

impl TryFrom<&DynamicImage> for ColorImage {
    type Error = ChannelError;

    /// Accepts 8-bit RGB images only, other layouts must be converted by the caller
    fn try_from(image: &DynamicImage) -> Result<Self, Self::Error> {
        match image {
            DynamicImage::ImageRgb8(rgb) => Self::from_rgb8(rgb),
            other => Err(ChannelError::UnexpectedComponentCount {
                actual: other.color().channel_count().into(),
                expected: COLOR_COMPONENTS,
            }),
        }
    }
}
