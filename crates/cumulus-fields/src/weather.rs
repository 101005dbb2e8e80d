use glam::{Vec2, Vec4};

use cumulus_core::dispatch::par_texel_map;
use cumulus_core::Field2d;
use cumulus_noise::worley_2d;

/// Generates the 2D weather field controlling the cloud layer per ground
/// column. Channel layout:
/// R = low-frequency coverage, G = high-frequency coverage,
/// B = maximum cloud height, A = density scale.
pub fn generate_weather_map(resolution: u32) -> Field2d {
    log::debug!("generating {resolution}x{resolution} weather map");
    par_texel_map(resolution, resolution, |x, y| {
        let uv = Vec2::new(x as f32, y as f32) / resolution as f32;
        let coverage_low = 1.0 - worley_2d(uv, 3.0);
        let coverage_high = 1.0 - worley_2d(uv, 6.0);
        Vec4::new(coverage_low, coverage_high, 1.0, 1.0)
    })
}
