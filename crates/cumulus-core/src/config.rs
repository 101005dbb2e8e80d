use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tile grid of the 3D-in-2D volume atlas. Each depth slice of the logical
/// volume occupies exactly one tile, so the slice count is `cols * rows`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasTiles {
    pub cols: u32,
    pub rows: u32,
}

impl AtlasTiles {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    pub fn total_slices(&self) -> u32 {
        self.cols * self.rows
    }

    /// Maps a linear slice index to its (column, row) tile position.
    pub fn slice_tile(&self, slice: u32) -> (u32, u32) {
        (slice % self.cols, slice / self.cols)
    }
}

/// Source of the base-shape channel (R) of the volume noise.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ShapeBase {
    /// Single fractal term (legacy generator).
    Fbm { freq: f32 },
    /// Fractal and cellular terms blended by `perlin_ratio` (weight of the
    /// fractal term).
    PerlinWorley {
        perlin_freq: f32,
        worley_freq: f32,
        perlin_ratio: f32,
    },
}

/// Frequencies of one volume noise field: the base-shape channel plus three
/// cellular detail channels (G/B/A).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseFrequencies {
    pub base: ShapeBase,
    pub freq2: f32,
    pub freq3: f32,
    pub freq4: f32,
}

impl Default for NoiseFrequencies {
    fn default() -> Self {
        Self {
            base: ShapeBase::PerlinWorley {
                perlin_freq: 4.0,
                worley_freq: 4.0,
                perlin_ratio: 0.5,
            },
            freq2: 8.0,
            freq3: 16.0,
            freq4: 40.0,
        }
    }
}

/// Immutable-per-frame parameter set for the cloud layer.
///
/// `coverage`, `density` and `alpha_erosion` only affect the per-sample
/// density function and can change every frame; the frequency sets, atlas
/// tiling and resolutions feed the precomputed fields and require
/// regeneration when changed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CloudConfig {
    /// Cloud presence probability, in [0, 1].
    pub coverage: f32,
    /// Global opacity multiplier, non-negative.
    pub density: f32,
    /// Edge erosion strength near cloud boundaries, in [0, 1].
    pub alpha_erosion: f32,
    /// World-space dimensions of the cloud bounding box.
    pub box_extents: Vec3,
    pub atlas_tiles: AtlasTiles,
    /// Per-tile edge length of the high-resolution volume field.
    pub tile_resolution_high: u32,
    /// Per-tile edge length of the low-resolution volume field.
    pub tile_resolution_low: u32,
    pub weather_resolution: u32,
    /// Frequencies of the high-resolution (shape) field.
    pub shape_frequencies: NoiseFrequencies,
    /// Frequencies of the low-resolution (detail) field.
    pub detail_frequencies: NoiseFrequencies,
    /// Subtracts 1 from the detail composite before the base-shape remap,
    /// keeping the erosion denominator well away from zero. Both variants
    /// exist in the wild; the raw composite tends to erode the cloud to
    /// nothing with unit-range noise kernels.
    pub detail_composite_offset: bool,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            coverage: 0.7,
            density: 1.0,
            alpha_erosion: 0.3,
            box_extents: Vec3::new(1000.0, 600.0, 1000.0),
            atlas_tiles: AtlasTiles::new(16, 16),
            tile_resolution_high: 64,
            tile_resolution_low: 32,
            weather_resolution: 512,
            shape_frequencies: NoiseFrequencies::default(),
            detail_frequencies: NoiseFrequencies::default(),
            detail_composite_offset: true,
        }
    }
}

impl CloudConfig {
    /// Rejects parameter sets that would corrupt atlas indexing or produce
    /// silently wrong images. Nothing is clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let e = self.box_extents;
        if !(e.x > 0.0 && e.y > 0.0 && e.z > 0.0) || !e.is_finite() {
            return Err(ConfigError::BoxExtents(e.x, e.y, e.z));
        }
        let tiles = self.atlas_tiles;
        if tiles.cols == 0 || tiles.rows == 0 {
            return Err(ConfigError::AtlasTiles {
                cols: tiles.cols,
                rows: tiles.rows,
            });
        }
        if self.tile_resolution_high == 0 {
            return Err(ConfigError::TileResolution { name: "high" });
        }
        if self.tile_resolution_low == 0 {
            return Err(ConfigError::TileResolution { name: "low" });
        }
        if self.weather_resolution == 0 {
            return Err(ConfigError::WeatherResolution);
        }
        check_unit("coverage", self.coverage)?;
        check_unit("alpha_erosion", self.alpha_erosion)?;
        check_scalar("density", self.density)?;
        check_frequencies(&self.shape_frequencies)?;
        check_frequencies(&self.detail_frequencies)?;
        Ok(())
    }

    /// True when `other` differs in any parameter that feeds the volume
    /// noise fields.
    pub fn volume_inputs_differ(&self, other: &CloudConfig) -> bool {
        self.shape_frequencies != other.shape_frequencies
            || self.detail_frequencies != other.detail_frequencies
            || self.atlas_tiles != other.atlas_tiles
            || self.tile_resolution_high != other.tile_resolution_high
            || self.tile_resolution_low != other.tile_resolution_low
    }

    /// True when `other` differs in any parameter that feeds the weather map.
    pub fn weather_inputs_differ(&self, other: &CloudConfig) -> bool {
        self.weather_resolution != other.weather_resolution
    }
}

fn check_unit(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::OutOfRange {
            name,
            min: 0.0,
            max: 1.0,
            value,
        });
    }
    Ok(())
}

fn check_scalar(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidScalar { name, value });
    }
    Ok(())
}

fn check_frequencies(f: &NoiseFrequencies) -> Result<(), ConfigError> {
    match f.base {
        ShapeBase::Fbm { freq } => check_scalar("base frequency", freq)?,
        ShapeBase::PerlinWorley {
            perlin_freq,
            worley_freq,
            perlin_ratio,
        } => {
            check_scalar("base perlin frequency", perlin_freq)?;
            check_scalar("base worley frequency", worley_freq)?;
            check_unit("perlin_ratio", perlin_ratio)?;
        }
    }
    check_scalar("freq2", f.freq2)?;
    check_scalar("freq3", f.freq3)?;
    check_scalar("freq4", f.freq4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(CloudConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_box_extent() {
        let mut config = CloudConfig::default();
        config.box_extents.y = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BoxExtents(..))
        ));
    }

    #[test]
    fn rejects_empty_tile_grid() {
        let mut config = CloudConfig::default();
        config.atlas_tiles.cols = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::AtlasTiles { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_coverage() {
        let mut config = CloudConfig::default();
        config.coverage = 1.5;
        assert!(config.validate().is_err());

        config.coverage = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_negative_frequency() {
        let mut config = CloudConfig::default();
        config.shape_frequencies.freq3 = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn slice_tile_round_trips_every_slice() {
        let tiles = AtlasTiles::new(16, 16);
        for slice in 0..tiles.total_slices() {
            let (col, row) = tiles.slice_tile(slice);
            assert!(col < tiles.cols && row < tiles.rows);
            assert_eq!(row * tiles.cols + col, slice);
        }
    }

    #[test]
    fn slice_tile_round_trips_non_square_grid() {
        let tiles = AtlasTiles::new(8, 4);
        for slice in 0..tiles.total_slices() {
            let (col, row) = tiles.slice_tile(slice);
            assert_eq!(row * tiles.cols + col, slice);
        }
    }

    #[test]
    fn change_detection_tracks_field_inputs() {
        let a = CloudConfig::default();
        let mut b = a;
        b.coverage = 0.2;
        assert!(!a.volume_inputs_differ(&b));
        assert!(!a.weather_inputs_differ(&b));

        b.detail_frequencies.freq2 = 12.0;
        assert!(a.volume_inputs_differ(&b));

        let mut c = a;
        c.weather_resolution = 256;
        assert!(a.weather_inputs_differ(&c));
    }
}
