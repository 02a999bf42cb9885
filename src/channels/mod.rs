//! Channel kinds a [crate::ChannelComputer] can be assembled from

mod chroma;
pub use chroma::Chroma;

mod gradient_histogram;
pub use gradient_histogram::GradientHistogram;

mod gradient_magnitude;
pub use gradient_magnitude::GradientMagnitude;

mod grayscale;
pub use grayscale::Grayscale;
