use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("field generation failed: {0}")]
    Generation(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("box extents must be positive and finite, got ({0}, {1}, {2})")]
    BoxExtents(f32, f32, f32),

    #[error("atlas tile grid must be non-empty, got {cols}x{rows}")]
    AtlasTiles { cols: u32, rows: u32 },

    #[error("{name} tile resolution must be non-zero")]
    TileResolution { name: &'static str },

    #[error("weather map resolution must be non-zero")]
    WeatherResolution,

    #[error("{name} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        min: f32,
        max: f32,
        value: f32,
    },

    #[error("{name} must be a finite non-negative value, got {value}")]
    InvalidScalar { name: &'static str, value: f32 },
}

pub type Result<T> = std::result::Result<T, CloudError>;
