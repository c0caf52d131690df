pub mod codec;
pub mod normalize;

pub use codec::{ImageCodec, JpegCodec, DEFAULT_JPEG_QUALITY};
pub use normalize::{normalize, NormalizedImage, MAX_EDGE_PX};
