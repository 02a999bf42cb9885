use crate::channel_evaluator::*;

macro_const! {
    const DOC: &str = r"
Luminance of the image

$$
Y = 0.299\,R + 0.587\,G + 0.114\,B,
$$
where $R$, $G$ and $B$ are color components normalized to $[0, 1]$.

- Depends on: **color**
- Number of channels: **1**
";
}

#[doc = DOC!()]
#[derive(Clone, Default, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct Grayscale {}

lazy_info!(
    GRAYSCALE_INFO,
    Grayscale,
    size: 1,
    names: ["grayscale"],
    descriptions: ["luminance of the image normalized to [0, 1]"],
);

impl Grayscale {
    pub fn new() -> Self {
        Self {}
    }

    pub const fn doc() -> &'static str {
        DOC
    }
}

impl ChannelEvaluator for Grayscale {
    fn eval(&self, image: &mut ColorImage) -> Result<Vec<Channel>, ChannelError> {
        Ok(vec![image.get_gray().clone()])
    }
}
