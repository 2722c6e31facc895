pub mod codec;
pub mod f32;
pub mod traits;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::{GrayImageU8, RgbImageU8, RGB_CHANNELS};
