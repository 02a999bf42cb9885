use crate::channel_evaluator::*;

use ndarray::Zip;

/// Offset keeping chroma of 8-bit normalized colors inside `[0, 1]`
const CHROMA_OFFSET: f32 = 0.5;
const CR_SCALE: f32 = 0.713;
const CB_SCALE: f32 = 0.564;

macro_const! {
    const DOC: &str = r"
Red-difference and blue-difference chroma

$$
C_r = 0.713\,(R - Y) + 0.5,\quad C_b = 0.564\,(B - Y) + 0.5,
$$
where $Y$ is the [crate::Grayscale] luminance. Together with the luminance the
two planes carry the full color of the image. They occupy the two channel
slots that follow the gradient histogram in the default ten-channel layout.

- Depends on: **color**, **luminance**
- Number of channels: **2**
";
}

#[doc = DOC!()]
#[derive(Clone, Default, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct Chroma {}

lazy_info!(
    CHROMA_INFO,
    Chroma,
    size: 2,
    names: ["chroma_cr", "chroma_cb"],
    descriptions: [
        "red-difference chroma shifted to [0, 1]",
        "blue-difference chroma shifted to [0, 1]",
    ],
);

impl Chroma {
    pub fn new() -> Self {
        Self {}
    }

    pub const fn doc() -> &'static str {
        DOC
    }
}

impl ChannelEvaluator for Chroma {
    fn eval(&self, image: &mut ColorImage) -> Result<Vec<Channel>, ChannelError> {
        let luma = image.get_gray().clone();
        let difference = |component: usize, scale: f32| {
            Zip::from(&luma)
                .and(image.component(component))
                .map_collect(|&y, &x| scale * (x - y) + CHROMA_OFFSET)
        };
        Ok(vec![difference(0, CR_SCALE), difference(2, CB_SCALE)])
    }
}
