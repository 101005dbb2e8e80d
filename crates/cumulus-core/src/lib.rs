//! Core types and structures for the Cumulus cloud renderer:
//! configuration, field storage, math helpers and the data-parallel
//! texel dispatch shared by the generation and raymarch passes.

pub mod bounds;
pub mod camera;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod field;
pub mod math;
pub mod transform;

pub use bounds::Aabb;
pub use camera::Camera;
pub use config::{AtlasTiles, CloudConfig, NoiseFrequencies, ShapeBase};
pub use error::{CloudError, ConfigError, Result};
pub use field::Field2d;
pub use transform::Transform;
