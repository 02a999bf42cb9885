use crate::channel_evaluator::*;

macro_const! {
    const DOC: &str = r"
Gradient magnitude of the luminance

$$
|\nabla Y| = \sqrt{(\partial_x Y)^2 + (\partial_y Y)^2},
$$
where the derivatives are unnormalized 3x3 Sobel responses with reflect-101 borders.

- Depends on: **luminance**
- Number of channels: **1**
";
}

#[doc = DOC!()]
#[derive(Clone, Default, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct GradientMagnitude {}

lazy_info!(
    GRADIENT_MAGNITUDE_INFO,
    GradientMagnitude,
    size: 1,
    names: ["gradient_magnitude"],
    descriptions: ["Euclidean norm of the Sobel gradient of the luminance"],
);

impl GradientMagnitude {
    pub fn new() -> Self {
        Self {}
    }

    pub const fn doc() -> &'static str {
        DOC
    }
}

impl ChannelEvaluator for GradientMagnitude {
    fn eval(&self, image: &mut ColorImage) -> Result<Vec<Channel>, ChannelError> {
        Ok(vec![image.get_gradient().magnitude.clone()])
    }
}
