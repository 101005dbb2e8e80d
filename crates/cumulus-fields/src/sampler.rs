use glam::{Vec2, Vec3, Vec4};

use cumulus_core::{AtlasTiles, Field2d};

/// Trilinearly filtered fetch from a volume stored as a tiled 2D atlas.
///
/// Emulates a 3D texture unit with only 2D resources: the two slices
/// nearest to `uvw.z` are fetched bilinearly from their tiles and blended
/// linearly by the fractional depth. `uvw` is expected in [0,1]^3; the x/y
/// components ride on the field's clamp-to-edge addressing and the depth
/// axis clamps to the first/last slice.
pub fn sample_volume(field: &Field2d, tiles: AtlasTiles, uvw: Vec3) -> Vec4 {
    let slices = tiles.total_slices();
    let depth = uvw.z * slices as f32;
    let slice0 = clamp_slice(depth.floor(), slices);
    let slice1 = (slice0 + 1).min(slices - 1);
    let frac = depth - depth.floor();

    let s0 = fetch_slice(field, tiles, slice0, uvw);
    let s1 = fetch_slice(field, tiles, slice1, uvw);
    s0 + (s1 - s0) * frac
}

/// Bilinear fetch of one depth slice at the in-slice coordinate `uvw.xy`.
pub fn fetch_slice(field: &Field2d, tiles: AtlasTiles, slice: u32, uvw: Vec3) -> Vec4 {
    let uv = atlas_uv(tiles, slice, Vec2::new(uvw.x, uvw.y));
    field.sample_bilinear(uv.x, uv.y)
}

/// Offsets an in-tile uv into the sub-rectangle of `slice`'s atlas tile.
fn atlas_uv(tiles: AtlasTiles, slice: u32, uv: Vec2) -> Vec2 {
    let (col, row) = tiles.slice_tile(slice);
    Vec2::new(
        (col as f32 + uv.x) / tiles.cols as f32,
        (row as f32 + uv.y) / tiles.rows as f32,
    )
}

fn clamp_slice(v: f32, slices: u32) -> u32 {
    (v.max(0.0) as u32).min(slices - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2x2 tiles of 4px: four slices, each filled with its own index.
    fn slice_indexed_atlas() -> (Field2d, AtlasTiles) {
        let tiles = AtlasTiles::new(2, 2);
        let res = 4u32;
        let mut field = Field2d::new(tiles.cols * res, tiles.rows * res);
        for slice in 0..tiles.total_slices() {
            let (col, row) = tiles.slice_tile(slice);
            for y in 0..res {
                for x in 0..res {
                    field.set_texel(
                        col * res + x,
                        row * res + y,
                        Vec4::splat(slice as f32),
                    );
                }
            }
        }
        (field, tiles)
    }

    #[test]
    fn exact_slice_boundaries_fetch_single_slices() {
        let (field, tiles) = slice_indexed_atlas();
        let slices = tiles.total_slices();
        for k in 0..slices {
            let uvw = Vec3::new(0.5, 0.5, k as f32 / slices as f32);
            let sampled = sample_volume(&field, tiles, uvw);
            let raw = fetch_slice(&field, tiles, k, uvw);
            assert_eq!(sampled, raw);
            assert_eq!(sampled.x, k as f32);
        }
    }

    #[test]
    fn midpoints_blend_adjacent_slices() {
        let (field, tiles) = slice_indexed_atlas();
        let slices = tiles.total_slices() as f32;
        let uvw = Vec3::new(0.5, 0.5, 1.5 / slices);
        let sampled = sample_volume(&field, tiles, uvw);
        assert!((sampled.x - 1.5).abs() < 1e-6);
    }

    #[test]
    fn depth_clamps_to_last_slice() {
        let (field, tiles) = slice_indexed_atlas();
        let last = (tiles.total_slices() - 1) as f32;
        let sampled = sample_volume(&field, tiles, Vec3::new(0.5, 0.5, 1.0));
        assert_eq!(sampled.x, last);
    }

    #[test]
    fn xy_offsets_stay_inside_the_tile() {
        let (field, tiles) = slice_indexed_atlas();
        let slices = tiles.total_slices();
        // Sweep the in-tile uv; every sample must keep the slice's value,
        // i.e. never bleed into a neighboring tile.
        for k in 0..slices {
            for i in 1..8 {
                for j in 1..8 {
                    let uvw = Vec3::new(
                        i as f32 / 8.0,
                        j as f32 / 8.0,
                        k as f32 / slices as f32,
                    );
                    let sampled = sample_volume(&field, tiles, uvw);
                    assert_eq!(sampled.x, k as f32, "slice {k}, uv ({i}, {j})/8");
                }
            }
        }
    }
}
