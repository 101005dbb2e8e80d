use glam::{Vec2, Vec3};

// One jittered feature point per lattice cell; the hash is the only source
// of randomness, so equal inputs always produce equal fields.
#[inline(always)]
fn hash(x: i32, y: i32, z: i32, salt: i32) -> f32 {
    let n = x
        .wrapping_mul(374761393)
        .wrapping_add(y.wrapping_mul(668265263))
        .wrapping_add(z.wrapping_mul(1274126177))
        .wrapping_add(salt.wrapping_mul(971226241));
    let n = (n ^ (n >> 13)).wrapping_mul(1911520717);
    let n = n ^ (n >> 16);
    (n as u32) as f32 / u32::MAX as f32
}

fn feature_point_2d(cell: Vec2) -> Vec2 {
    let (x, y) = (cell.x as i32, cell.y as i32);
    Vec2::new(hash(x, y, 0, 1), hash(x, y, 0, 2))
}

fn feature_point_3d(cell: Vec3) -> Vec3 {
    let (x, y, z) = (cell.x as i32, cell.y as i32, cell.z as i32);
    Vec3::new(hash(x, y, z, 1), hash(x, y, z, 2), hash(x, y, z, 3))
}

/// Cellular noise over a 2D coordinate: distance to the nearest jittered
/// grid point, clamped to [0, 1]. Zero on a feature point.
pub fn worley_2d(p: Vec2, frequency: f32) -> f32 {
    let q = p * frequency;
    let base = q.floor();
    let mut min_dist_sq = f32::MAX;
    for dy in -1..=1 {
        for dx in -1..=1 {
            let cell = base + Vec2::new(dx as f32, dy as f32);
            let feature = cell + feature_point_2d(cell);
            min_dist_sq = min_dist_sq.min(q.distance_squared(feature));
        }
    }
    min_dist_sq.sqrt().min(1.0)
}

/// Cellular noise over a 3D coordinate: distance to the nearest jittered
/// grid point, clamped to [0, 1]. Zero on a feature point.
pub fn worley_3d(p: Vec3, frequency: f32) -> f32 {
    let q = p * frequency;
    let base = q.floor();
    let mut min_dist_sq = f32::MAX;
    for dz in -1..=1 {
        for dy in -1..=1 {
            for dx in -1..=1 {
                let cell = base + Vec3::new(dx as f32, dy as f32, dz as f32);
                let feature = cell + feature_point_3d(cell);
                min_dist_sq = min_dist_sq.min(q.distance_squared(feature));
            }
        }
    }
    min_dist_sq.sqrt().min(1.0)
}
