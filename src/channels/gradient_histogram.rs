use crate::channel_evaluator::*;
use crate::gradient::orientation_bin;

use ndarray::Zip;

macro_const! {
    const DOC: &str = r"
Histogram of oriented gradients with one-hot pixel votes

Gradient orientation $\theta = \mathrm{atan2}(\partial_y Y, \partial_x Y)$ is folded
into $[0^\circ, 180^\circ)$ and split into $n$ equal sectors. Channel $j$ holds the
gradient magnitude $|\nabla Y|$ of the pixels whose orientation falls into sector
$j$, and zero elsewhere:
$$
H_j = |\nabla Y| \cdot I_{\lfloor \theta n / 180^\circ \rfloor = j}.
$$
Orientations that round to exactly $180^\circ$ vote for the last sector.

- Depends on: **luminance**
- Number of channels: $n$, **6** by default
";
}

#[doc = DOC!()]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(
    into = "GradientHistogramParameters",
    try_from = "GradientHistogramParameters"
)]
pub struct GradientHistogram {
    n_bins: usize,
    info: Box<ChannelInfo>,
}

impl GradientHistogram {
    pub fn new(n_bins: usize) -> Result<Self, ChannelError> {
        if n_bins == 0 {
            return Err(ChannelError::ZeroBins);
        }
        Ok(Self::with_bins(n_bins))
    }

    /// `n_bins` must be positive
    fn with_bins(n_bins: usize) -> Self {
        let width = 180.0 / n_bins as f64;
        let info = ChannelInfo {
            size: n_bins,
            names: (0..n_bins)
                .map(|j| format!("gradient_histogram_{n_bins}_bin{j}"))
                .collect(),
            descriptions: (0..n_bins)
                .map(|j| {
                    format!(
                        "gradient magnitude of pixels oriented in [{:.1}, {:.1}) degrees",
                        j as f64 * width,
                        (j + 1) as f64 * width
                    )
                })
                .collect(),
        };
        Self {
            n_bins,
            info: info.into(),
        }
    }

    #[inline]
    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    #[inline]
    pub fn default_n_bins() -> usize {
        6
    }

    pub const fn doc() -> &'static str {
        DOC
    }
}

impl Default for GradientHistogram {
    fn default() -> Self {
        Self::with_bins(Self::default_n_bins())
    }
}

impl ChannelInfoTrait for GradientHistogram {
    fn get_info(&self) -> &ChannelInfo {
        &self.info
    }
}

impl ChannelEvaluator for GradientHistogram {
    fn eval(&self, image: &mut ColorImage) -> Result<Vec<Channel>, ChannelError> {
        let gradient = image.get_gradient();
        let mut histogram = vec![Channel::zeros(gradient.magnitude.dim()); self.n_bins];
        Zip::indexed(&gradient.dx)
            .and(&gradient.dy)
            .and(&gradient.magnitude)
            .for_each(|idx, &dx, &dy, &magnitude| {
                histogram[orientation_bin(dx, dy, self.n_bins)][idx] = magnitude;
            });
        Ok(histogram)
    }
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(rename = "GradientHistogram")]
struct GradientHistogramParameters {
    n_bins: usize,
}

impl From<GradientHistogram> for GradientHistogramParameters {
    fn from(f: GradientHistogram) -> Self {
        Self { n_bins: f.n_bins }
    }
}

impl TryFrom<GradientHistogramParameters> for GradientHistogram {
    type Error = ChannelError;

    fn try_from(p: GradientHistogramParameters) -> Result<Self, Self::Error> {
        Self::new(p.n_bins)
    }
}

impl JsonSchema for GradientHistogram {
    json_schema!(GradientHistogramParameters, false);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    use approx::assert_abs_diff_eq;
    use serde_test::{Token, assert_tokens};

    channel_info_test!(gradient_histogram_info, GradientHistogram::default());
    channel_info_test!(gradient_histogram_one_bin_info, GradientHistogram::new(1).unwrap());

    #[test]
    fn default_is_six_bins() {
        let hist = GradientHistogram::default();
        assert_eq!(hist, GradientHistogram::new(6).unwrap());
        assert_eq!(hist.size_hint(), 6);
        assert_eq!(hist.get_names()[5], "gradient_histogram_6_bin5");
        assert_eq!(
            hist.get_descriptions()[1],
            "gradient magnitude of pixels oriented in [30.0, 60.0) degrees"
        );
    }

    #[test]
    fn zero_bins() {
        assert_eq!(GradientHistogram::new(0), Err(ChannelError::ZeroBins));
    }

    #[test]
    fn flat_image_gives_zero_channels() {
        let mut image = uniform_image(16, 16, [255, 255, 255]);
        let channels = GradientHistogram::default().eval(&mut image).unwrap();
        assert_eq!(channels.len(), 6);
        for channel in channels {
            assert_eq!(channel.dim(), (16, 16));
            assert!(channel.iter().all(|&x| x == 0.0));
        }
    }

    #[test]
    fn one_hot_votes() {
        let mut image = step_image(8, 8, 4);
        let magnitude = image.get_gradient().magnitude.clone();
        let channels = GradientHistogram::default().eval(&mut image).unwrap();
        for (idx, &m) in magnitude.indexed_iter() {
            let nonzero = channels.iter().filter(|c| c[idx] != 0.0).count();
            assert!(nonzero <= 1);
            let total: f32 = channels.iter().map(|c| c[idx]).sum();
            assert_abs_diff_eq!(total, m);
        }
    }

    #[test]
    fn vertical_edge_votes_for_horizontal_orientation() {
        // gradient points along +x, orientation 0 degrees
        let mut image = step_image(8, 8, 4);
        let channels = GradientHistogram::default().eval(&mut image).unwrap();
        assert!(channels[0][(3, 3)] > 3.9);
        assert!(channels[1..].iter().all(|c| c[(3, 3)] == 0.0));
    }

    #[test]
    fn falling_edge_votes_for_last_bin() {
        // white to black along +x: atan2(0, negative) is exactly 180 degrees
        let mut image = edge_image(8, 8, 4, 255, 0);
        let channels = GradientHistogram::default().eval(&mut image).unwrap();
        assert!(channels[5][(3, 3)] > 3.9);
        assert!(channels[..5].iter().all(|c| c[(3, 3)] == 0.0));
    }

    #[test]
    fn serialization() {
        let hist = GradientHistogram::new(9).unwrap();
        assert_tokens(
            &hist,
            &[
                Token::Struct {
                    len: 1,
                    name: "GradientHistogram",
                },
                Token::Str("n_bins"),
                Token::U64(9),
                Token::StructEnd,
            ],
        );
    }
}
