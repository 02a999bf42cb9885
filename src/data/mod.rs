mod channel_stack;
pub use channel_stack::ChannelStack;

mod color_image;
pub use color_image::{COLOR_COMPONENTS, ColorImage};
