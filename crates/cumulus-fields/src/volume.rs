use glam::{Vec3, Vec4};

use cumulus_core::dispatch::par_texel_map;
use cumulus_core::math::mix;
use cumulus_core::{AtlasTiles, Field2d, NoiseFrequencies, ShapeBase};
use cumulus_noise::{fbm_3d, worley_3d};

/// Generates one volume noise field as a tiled 2D atlas.
///
/// The logical domain is the unit cube sampled at `tiles.total_slices()`
/// depth slices; slice `s` lives in tile (s % cols, s / cols) and the 3D
/// coordinate of an atlas texel is (local_u, local_v, s / slices).
///
/// Channel layout: R = base shape (fractal, or a fractal/cellular blend),
/// G/B/A = cellular detail at `freq2`/`freq3`/`freq4`.
pub fn generate_volume_noise(
    tile_resolution: u32,
    tiles: AtlasTiles,
    frequencies: &NoiseFrequencies,
) -> Field2d {
    let width = tiles.cols * tile_resolution;
    let height = tiles.rows * tile_resolution;
    let slices = tiles.total_slices();
    log::debug!(
        "generating {width}x{height} volume atlas ({}x{} tiles of {tile_resolution}px, {slices} slices)",
        tiles.cols,
        tiles.rows,
    );
    let frequencies = *frequencies;
    par_texel_map(width, height, move |px, py| {
        let tile_col = px / tile_resolution;
        let tile_row = py / tile_resolution;
        let slice = tile_row * tiles.cols + tile_col;

        let local_u = (px % tile_resolution) as f32 / tile_resolution as f32;
        let local_v = (py % tile_resolution) as f32 / tile_resolution as f32;
        let p = Vec3::new(local_u, local_v, slice as f32 / slices as f32);

        let base = match frequencies.base {
            ShapeBase::Fbm { freq } => fbm_3d(p, freq),
            ShapeBase::PerlinWorley {
                perlin_freq,
                worley_freq,
                perlin_ratio,
            } => mix(
                worley_3d(p, worley_freq),
                fbm_3d(p, perlin_freq),
                perlin_ratio,
            ),
        };

        Vec4::new(
            base,
            worley_3d(p, frequencies.freq2),
            worley_3d(p, frequencies.freq3),
            worley_3d(p, frequencies.freq4),
        )
    })
}
