//! Text-output extractors for the external probing tools.

mod dimensions;
mod duration;

pub use dimensions::{image_dimensions, parse_dimensions, video_dimensions};
pub use duration::{media_duration, parse_duration};
