//! Classical illuminant estimators
//!
//! Six deterministic estimators, each encoding a different assumption about
//! scene reflectance. All take a validated [`ImageView`](crate::constancy::image::ImageView)
//! and return a raw [`Illuminant`](crate::constancy::vector::Illuminant); the
//! caller normalizes before comparing.

mod channels;
mod edge_based;
mod gray_world;
mod max_rgb;
mod method;
mod robust_awb;
mod shades_of_gray;
pub mod types;
mod white_patch;

pub use edge_based::edge_based;
pub use gray_world::gray_world;
pub use max_rgb::max_rgb;
pub use method::{ClassicalMethod, ClassicalSuiteConfig};
pub use robust_awb::{robust_awb, robust_awb_with_trace, RobustAwbTrace};
pub use shades_of_gray::shades_of_gray;
pub use types::{
    EdgeBasedParams, GradientOrder, GrayWorldParams, RobustAwbParams, ShadesOfGrayParams,
    WhitePatchParams,
};
pub use white_patch::white_patch;
