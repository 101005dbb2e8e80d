//! Procedural noise kernels for the Cumulus cloud renderer.
//!
//! Two families: multi-octave fractal noise (normalized to [0, 1]) and
//! cellular noise (nearest-feature-point distance in [0, 1]). All kernels
//! are pure functions of coordinate and frequency with fixed internal
//! seeds, so field regeneration is reproducible.

mod fbm;
mod worley;

pub use fbm::{fbm_2d, fbm_3d};
pub use worley::{worley_2d, worley_3d};
