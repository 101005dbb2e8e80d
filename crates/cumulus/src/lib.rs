//! Cumulus - a procedural volumetric cloud layer renderer.
//!
//! The cloud layer is reconstructed from precomputed noise fields: a 2D
//! weather map controlling per-column coverage, plus shape and detail
//! volume noise stored as tiled 2D atlases. Every frame, each output
//! pixel marches a view ray through the cloud bounding box and integrates
//! the density field into transmittance/opacity.
//!
//! [`CloudRenderer`] ties the pieces together: it validates the
//! configuration, owns the cached fields, regenerates them when their
//! inputs change and renders frames into a CPU pixel buffer.

pub use cumulus_core as core;
pub use cumulus_fields as fields;
pub use cumulus_march as march;
pub use cumulus_noise as noise;

mod renderer;

pub use renderer::CloudRenderer;

pub mod prelude {
    pub use crate::core::{
        AtlasTiles, Camera, CloudConfig, CloudError, Field2d, NoiseFrequencies, ShapeBase,
        Transform,
    };
    pub use crate::march::{MarchResult, Raymarcher};
    pub use crate::CloudRenderer;
    pub use glam;
}

pub use cumulus_core::{
    AtlasTiles, Camera, CloudConfig, CloudError, ConfigError, Field2d, NoiseFrequencies, Result,
    ShapeBase, Transform,
};
