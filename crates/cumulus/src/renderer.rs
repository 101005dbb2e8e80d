use std::sync::Arc;

use glam::Vec4;

use cumulus_core::dispatch::par_texel_map;
use cumulus_core::{Camera, CloudConfig, Field2d, Result, Transform};
use cumulus_fields::{generate_volume_noise, generate_weather_map};
use cumulus_march::Raymarcher;

/// Owns the cloud parameter set and the precomputed fields, and renders
/// frames from them.
///
/// Fields live behind `Arc` and are replaced wholesale, never mutated:
/// a regeneration builds the complete new field first and swaps it in,
/// so concurrent readers of a previous frame keep a consistent snapshot
/// and a failed update leaves every previous field in effect.
pub struct CloudRenderer {
    config: CloudConfig,
    box_transform: Transform,
    weather: Arc<Field2d>,
    volume_high: Arc<Field2d>,
    volume_low: Arc<Field2d>,
}

impl CloudRenderer {
    pub fn new(config: CloudConfig) -> Result<Self> {
        config.validate()?;
        log::info!(
            "building cloud fields: weather {res}x{res}, atlas {cols}x{rows} tiles",
            res = config.weather_resolution,
            cols = config.atlas_tiles.cols,
            rows = config.atlas_tiles.rows,
        );
        let weather = Arc::new(generate_weather_map(config.weather_resolution));
        let volume_high = Arc::new(generate_volume_noise(
            config.tile_resolution_high,
            config.atlas_tiles,
            &config.shape_frequencies,
        ));
        let volume_low = Arc::new(generate_volume_noise(
            config.tile_resolution_low,
            config.atlas_tiles,
            &config.detail_frequencies,
        ));
        Ok(Self {
            config,
            box_transform: Transform::default(),
            weather,
            volume_high,
            volume_low,
        })
    }

    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    pub fn box_transform(&self) -> Transform {
        self.box_transform
    }

    /// Places the cloud box in the world.
    pub fn set_box_transform(&mut self, transform: Transform) {
        self.box_transform = transform;
    }

    pub fn weather_map(&self) -> &Field2d {
        &self.weather
    }

    pub fn volume_high(&self) -> &Field2d {
        &self.volume_high
    }

    pub fn volume_low(&self) -> &Field2d {
        &self.volume_low
    }

    /// Applies a new parameter set, regenerating exactly the fields whose
    /// inputs changed. Per-frame scalars (coverage, density, erosion, box
    /// extents) take effect without regeneration. On a validation error
    /// nothing is replaced.
    pub fn update_parameters(&mut self, config: CloudConfig) -> Result<()> {
        config.validate()?;
        if self.config.weather_inputs_differ(&config) {
            self.weather = Arc::new(generate_weather_map(config.weather_resolution));
        }
        if self.config.volume_inputs_differ(&config) {
            let high = generate_volume_noise(
                config.tile_resolution_high,
                config.atlas_tiles,
                &config.shape_frequencies,
            );
            let low = generate_volume_noise(
                config.tile_resolution_low,
                config.atlas_tiles,
                &config.detail_frequencies,
            );
            self.volume_high = Arc::new(high);
            self.volume_low = Arc::new(low);
        }
        self.config = config;
        Ok(())
    }

    /// Renders one frame: every pixel marches its own view ray, in
    /// parallel. The result holds straight (un-premultiplied) color in
    /// RGB and cloud opacity in A.
    pub fn render(&self, camera: &Camera, width: u32, height: u32) -> Field2d {
        let marcher = Raymarcher::new(
            &self.config,
            &self.weather,
            &self.volume_high,
            &self.volume_low,
            &self.box_transform,
        );
        par_texel_map(width, height, |x, y| {
            let dir = camera.ray_through_pixel(x, y, width, height);
            let result = marcher.march(camera.position, dir);
            Vec4::new(result.color.x, result.color.y, result.color.z, result.opacity)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cumulus_core::{AtlasTiles, ConfigError};

    fn small_config() -> CloudConfig {
        CloudConfig {
            atlas_tiles: AtlasTiles::new(4, 4),
            tile_resolution_high: 8,
            tile_resolution_low: 4,
            weather_resolution: 32,
            ..CloudConfig::default()
        }
    }

    #[test]
    fn construction_rejects_invalid_config() {
        let mut config = small_config();
        config.atlas_tiles.rows = 0;
        assert!(CloudRenderer::new(config).is_err());
    }

    #[test]
    fn per_frame_scalars_do_not_regenerate_fields() {
        let mut renderer = CloudRenderer::new(small_config()).unwrap();
        let weather_before = renderer.weather_map().clone();
        let high_before = renderer.volume_high().clone();

        let mut config = small_config();
        config.coverage = 0.2;
        config.density = 2.0;
        renderer.update_parameters(config).unwrap();

        assert_eq!(renderer.weather_map(), &weather_before);
        assert_eq!(renderer.volume_high(), &high_before);
        assert_eq!(renderer.config().coverage, 0.2);
    }

    #[test]
    fn frequency_change_regenerates_volume_fields_only() {
        let mut renderer = CloudRenderer::new(small_config()).unwrap();
        let weather_before = renderer.weather_map().clone();
        let high_before = renderer.volume_high().clone();

        let mut config = small_config();
        config.shape_frequencies.freq2 = 12.0;
        config.detail_frequencies.freq3 = 24.0;
        renderer.update_parameters(config).unwrap();

        assert_eq!(renderer.weather_map(), &weather_before);
        assert_ne!(renderer.volume_high(), &high_before);
    }

    #[test]
    fn failed_update_keeps_previous_state() {
        let mut renderer = CloudRenderer::new(small_config()).unwrap();
        let high_before = renderer.volume_high().clone();
        let coverage_before = renderer.config().coverage;

        let mut bad = small_config();
        bad.shape_frequencies.freq2 = f32::NAN;
        bad.coverage = 0.1;
        let err = renderer.update_parameters(bad).unwrap_err();
        assert!(matches!(
            err,
            cumulus_core::CloudError::Config(ConfigError::InvalidScalar { .. })
        ));

        assert_eq!(renderer.volume_high(), &high_before);
        assert_eq!(renderer.config().coverage, coverage_before);
    }

    #[test]
    fn render_produces_requested_dimensions() {
        let renderer = CloudRenderer::new(small_config()).unwrap();
        let mut camera = Camera::default();
        camera.position = glam::Vec3::new(0.0, 0.0, 2000.0);
        camera.look_at(glam::Vec3::ZERO, glam::Vec3::Y);

        let frame = renderer.render(&camera, 16, 8);
        assert_eq!(frame.width(), 16);
        assert_eq!(frame.height(), 8);
        for texel in frame.texels() {
            assert!((0.0..=1.0).contains(&texel[3]));
        }
    }
}
