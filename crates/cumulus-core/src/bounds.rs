use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box of the given full dimensions centered on the origin.
    pub fn from_extents(extents: Vec3) -> Self {
        let half = extents * 0.5;
        Self {
            min: -half,
            max: half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extents(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Position of `point` normalized to [0,1]^3 within the box.
    pub fn normalized_position(&self, point: Vec3) -> Vec3 {
        (point - self.min) / (self.max - self.min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_extents_is_origin_centered() {
        let aabb = Aabb::from_extents(Vec3::new(1000.0, 600.0, 1000.0));
        assert_eq!(aabb.min, Vec3::new(-500.0, -300.0, -500.0));
        assert_eq!(aabb.max, Vec3::new(500.0, 300.0, 500.0));
        assert_eq!(aabb.center(), Vec3::ZERO);
    }

    #[test]
    fn normalized_position_spans_unit_cube() {
        let aabb = Aabb::from_extents(Vec3::new(2.0, 4.0, 8.0));
        assert_eq!(aabb.normalized_position(aabb.min), Vec3::ZERO);
        assert_eq!(aabb.normalized_position(aabb.max), Vec3::ONE);
        assert_eq!(aabb.normalized_position(Vec3::ZERO), Vec3::splat(0.5));
    }
}
