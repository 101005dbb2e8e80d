use glam::{Mat4, Vec3};

use cumulus_core::math::{mix, remap, saturate};
use cumulus_core::{Aabb, CloudConfig, Field2d, Transform};
use cumulus_fields::sample_volume;

use crate::ray::LocalRay;

/// Fixed sample count per ray.
pub const MARCH_STEPS: u32 = 64;

/// Result of marching one view ray through the cloud box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarchResult {
    pub color: Vec3,
    pub opacity: f32,
}

impl MarchResult {
    pub const TRANSPARENT: Self = Self {
        color: Vec3::ZERO,
        opacity: 0.0,
    };
}

/// Combined coverage mask from the two weather coverage channels:
/// `max(low, saturate((coverage - 0.5) * high * 2))`. Non-decreasing in
/// `coverage` for any fixed weather sample.
pub fn coverage_mask(coverage: f32, coverage_low: f32, coverage_high: f32) -> f32 {
    coverage_low.max(saturate((coverage - 0.5) * coverage_high * 2.0))
}

/// Per-frame raymarch state: the parameter set, the cached fields and the
/// box placement. Holds no mutable state; `march` is a pure per-pixel
/// function, safe to call from any number of threads.
pub struct Raymarcher<'a> {
    config: &'a CloudConfig,
    weather: &'a Field2d,
    volume_high: &'a Field2d,
    volume_low: &'a Field2d,
    bounds: Aabb,
    inverse_world: Mat4,
}

impl<'a> Raymarcher<'a> {
    pub fn new(
        config: &'a CloudConfig,
        weather: &'a Field2d,
        volume_high: &'a Field2d,
        volume_low: &'a Field2d,
        box_transform: &Transform,
    ) -> Self {
        Self {
            config,
            weather,
            volume_high,
            volume_low,
            bounds: Aabb::from_extents(config.box_extents),
            inverse_world: box_transform.inverse_matrix(),
        }
    }

    /// Marches one world-space view ray through the cloud box and
    /// integrates density into an opacity via the extinction law
    /// `1 - exp(-total)`. Rays that miss the box are fully transparent.
    pub fn march(&self, origin_world: Vec3, dir_world: Vec3) -> MarchResult {
        let ray = LocalRay::from_world(origin_world, dir_world, &self.inverse_world);
        let Some((dst_to_box, dst_inside)) = ray.intersect_box(&self.bounds) else {
            return MarchResult::TRANSPARENT;
        };

        let step_size = dst_inside / MARCH_STEPS as f32;
        let mut total_density = 0.0;
        for i in 0..MARCH_STEPS {
            let p = ray.origin + ray.dir * (dst_to_box + i as f32 * step_size);
            total_density += self.sample_density(p);
        }

        let transmittance = (-total_density).exp();
        MarchResult {
            color: Vec3::ONE,
            opacity: 1.0 - transmittance,
        }
    }

    /// Density at one box-local position: weather-map coverage, the two
    /// height-shaping curves, the shape/detail volume noise and the
    /// erosion terms, multiplied out per the cloud density model.
    pub fn sample_density(&self, p: Vec3) -> f32 {
        let config = self.config;
        let uvw = self.bounds.normalized_position(p);

        let weather = self.weather.sample_bilinear(uvw.x, uvw.z);
        let (wc0, wc1, wh, wd) = (weather.x, weather.y, weather.z, weather.w);
        let wmc = coverage_mask(config.coverage, wc0, wc1);

        let ph = uvw.y;

        // Shape-altering height curve: fade in just above the floor, fade
        // out toward the weather-map ceiling.
        let sa = saturate(remap(ph, 0.0, 0.07, 0.0, 1.0))
            * saturate(remap(ph, wh * 0.2, wh, 1.0, 0.0));

        // Density-altering height curve.
        let da = config.density
            * ph
            * saturate(remap(ph, 0.0, 0.15, 0.0, 1.0))
            * saturate(remap(ph, 0.9, 1.0, 1.0, 0.0))
            * wd
            * 2.0;

        let shape = sample_volume(self.volume_high, config.atlas_tiles, uvw);
        let mut detail_composite = shape.y * 0.625 + shape.z * 0.25 + shape.w * 0.125;
        if config.detail_composite_offset {
            detail_composite -= 1.0;
        }
        let shape_sample = remap(shape.x, detail_composite, 1.0, 0.0, 1.0);

        let low = sample_volume(self.volume_low, config.atlas_tiles, uvw);
        let low_fbm = low.y * 0.625 + low.z * 0.25 + low.w * 0.125;
        let erosion_mod = 0.35
            * (-config.coverage * 0.75).exp()
            * mix(low_fbm, 1.0 - low_fbm, saturate(ph * 5.0));

        let erosion_exp = saturate(remap(
            ph,
            0.65,
            0.95,
            1.0,
            1.0 - config.alpha_erosion * config.coverage,
        ));
        let shape_avail = sa.powf(erosion_exp);

        let noise_density = saturate(remap(
            shape_sample * shape_avail,
            1.0 - config.coverage * wmc,
            1.0,
            0.0,
            1.0,
        ));

        let density_avail = da
            * mix(
                1.0,
                saturate(remap(ph.sqrt(), 0.4, 0.95, 1.0, 0.2)),
                config.alpha_erosion,
            );

        saturate(remap(noise_density, erosion_mod, 1.0, 0.0, 1.0)) * density_avail
    }
}
