//! End-to-end scenario: a camera outside the cloud box looking straight at
//! its center along -Z, with fully generated weather and volume fields.

use glam::Vec3;

use cumulus::march::Raymarcher;
use cumulus::{AtlasTiles, Camera, CloudConfig, CloudRenderer, Transform};

fn scenario_config() -> CloudConfig {
    // Default parameter set at reduced field resolutions to keep the test
    // quick; the box and the density model are untouched.
    CloudConfig {
        box_extents: Vec3::new(1000.0, 600.0, 1000.0),
        atlas_tiles: AtlasTiles::new(8, 8),
        tile_resolution_high: 16,
        tile_resolution_low: 8,
        weather_resolution: 128,
        ..CloudConfig::default()
    }
}

fn march_center_ray(renderer: &CloudRenderer) -> f32 {
    let marcher = Raymarcher::new(
        renderer.config(),
        renderer.weather_map(),
        renderer.volume_high(),
        renderer.volume_low(),
        &Transform::default(),
    );
    marcher
        .march(Vec3::new(0.0, 0.0, 2000.0), Vec3::NEG_Z)
        .opacity
}

#[test]
fn high_coverage_silhouette_is_nearly_opaque() {
    let mut config = scenario_config();
    config.coverage = 0.99;
    config.density = 0.9;
    let renderer = CloudRenderer::new(config).unwrap();

    let opacity = march_center_ray(&renderer);
    assert!(opacity > 0.95, "opacity was {opacity}");
    assert!(opacity <= 1.0);
}

#[test]
fn zero_coverage_makes_the_cloud_vanish() {
    let mut config = scenario_config();
    config.coverage = 0.0;
    let renderer = CloudRenderer::new(config).unwrap();

    assert_eq!(march_center_ray(&renderer), 0.0);
}

#[test]
fn zero_density_is_transparent_regardless_of_noise() {
    let mut config = scenario_config();
    config.coverage = 0.99;
    config.density = 0.0;
    let renderer = CloudRenderer::new(config).unwrap();

    assert_eq!(march_center_ray(&renderer), 0.0);
}

#[test]
fn identical_configs_produce_identical_fields() {
    let a = CloudRenderer::new(scenario_config()).unwrap();
    let b = CloudRenderer::new(scenario_config()).unwrap();

    assert_eq!(a.weather_map(), b.weather_map());
    assert_eq!(a.volume_high(), b.volume_high());
    assert_eq!(a.volume_low(), b.volume_low());
}

#[test]
fn rendered_frame_shows_the_cloud_against_empty_sky() {
    let mut config = scenario_config();
    config.coverage = 0.99;
    config.density = 0.9;
    let renderer = CloudRenderer::new(config).unwrap();

    let mut camera = Camera::default();
    camera.set_aspect_ratio(1.0);
    camera.position = Vec3::new(0.0, 0.0, 2000.0);
    camera.look_at(Vec3::ZERO, Vec3::Y);

    let frame = renderer.render(&camera, 33, 33);

    // Center pixel looks straight into the box; corners look past it.
    let center = frame.texel(16, 16);
    let corner = frame.texel(0, 0);
    assert!(center[3] > 0.9, "center opacity was {}", center[3]);
    assert_eq!(corner[3], 0.0);
}
