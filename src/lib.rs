//! Pencil-sketch rendering for raster images.
//!
//! The core is [`sketch::sketch`], a pure, deterministic pipeline that maps a
//! color raster to a grayscale line-art approximation (luma → invert →
//! Gaussian blur → invert → scaled divide). Around it sit thin collaborators:
//! a codec layer ([`image::codec`]), artifact persistence ([`storage`]), and
//! a single-route HTTP boundary ([`server`]).

// Public modules (stable-ish surface)
pub mod config;
pub mod error;
pub mod image;
pub mod server;
pub mod sketch;
pub mod storage;

// --- High-level re-exports -------------------------------------------------

pub use crate::config::ServiceConfig;
pub use crate::error::{SketchError, SketchResult, TransformError};
pub use crate::sketch::SketchParams;
pub use crate::storage::ArtifactStore;

/// Small prelude for quick experiments.
///
/// ```no_run
/// use pencil_sketch::prelude::*;
///
/// # fn main() -> Result<(), TransformError> {
/// let (w, h) = (64usize, 48usize);
/// let rgb = vec![128u8; w * h * 3];
/// let img = RgbImageU8::from_raw(w, h, rgb)?;
///
/// let out = sketch(&img, &SketchParams::default())?;
/// println!("{}x{} sketch", out.w, out.h);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::error::TransformError;
    pub use crate::image::{GrayImageU8, ImageView, RgbImageU8};
    pub use crate::sketch::{sketch, SketchParams};
}
