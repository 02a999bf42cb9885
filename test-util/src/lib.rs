pub use samples::{
    SAMPLE_IMAGES, checkerboard, diagonal_ramp, disk, iter_sample_images, noise, vertical_edge,
};

mod samples;
