//! Per-pixel raymarch integrator for the Cumulus cloud renderer.
//!
//! Transforms view rays into the cloud box's local frame, intersects the
//! box with a slab test, steps a fixed number of samples through it and
//! integrates the multi-factor cloud density into transmittance/opacity.

mod integrator;
mod ray;

pub use integrator::{coverage_mask, MarchResult, Raymarcher, MARCH_STEPS};
pub use ray::LocalRay;
