//! Precomputed field generation for the Cumulus cloud renderer.
//!
//! Produces the 2D weather map and the tiled-atlas volume noise fields
//! consumed by the raymarch pass, and provides the 3D-in-2D atlas sampler
//! that emulates trilinear volume filtering with 2D fetches.

pub mod sampler;
pub mod volume;
pub mod weather;

pub use sampler::{fetch_slice, sample_volume};
pub use volume::generate_volume_noise;
pub use weather::generate_weather_map;
