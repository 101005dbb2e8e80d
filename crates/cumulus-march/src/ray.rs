use glam::{Mat4, Vec3};

use cumulus_core::Aabb;

/// View ray expressed in the cloud box's local frame.
#[derive(Clone, Copy, Debug)]
pub struct LocalRay {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl LocalRay {
    /// Transforms a world-space ray into the box frame. The direction is
    /// transformed with w = 0 (translation ignored) and renormalized.
    pub fn from_world(origin: Vec3, dir: Vec3, inverse_world: &Mat4) -> Self {
        Self {
            origin: inverse_world.transform_point3(origin),
            dir: inverse_world.transform_vector3(dir).normalize(),
        }
    }

    /// Slab intersection against `bounds`. Returns the distance to the box
    /// entry (zero when the origin is inside) and the distance traveled
    /// inside, or `None` on a miss.
    ///
    /// Axis-aligned directions produce componentwise infinities in the
    /// reciprocal; they resolve through f32 min/max without branching.
    /// The inside distance is capped at 9999 to keep near-parallel rays
    /// from blowing up the step size.
    pub fn intersect_box(&self, bounds: &Aabb) -> Option<(f32, f32)> {
        let inv_dir = self.dir.recip();
        let t0 = (bounds.min - self.origin) * inv_dir;
        let t1 = (bounds.max - self.origin) * inv_dir;
        let tmin = t0.min(t1);
        let tmax = t0.max(t1);

        let dst_a = tmin.x.max(tmin.y).max(tmin.z);
        let dst_b = tmax.x.min(tmax.y).min(tmax.z);
        if dst_a >= dst_b {
            return None;
        }

        let dst_to_box = dst_a.max(0.0);
        let dst_inside = (dst_b - dst_to_box).clamp(0.0, 9999.0);
        Some((dst_to_box, dst_inside))
    }
}
