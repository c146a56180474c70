use glam::Vec3;

#[derive(Copy, Clone, Debug)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Outward normal of the face closest to `point`. Meaningful for points
    /// on or near the box surface, e.g. ray hit points.
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        let to_min = (point - self.min).abs();
        let to_max = (self.max - point).abs();

        let mut best = to_min.x;
        let mut normal = Vec3::NEG_X;
        if to_max.x < best {
            best = to_max.x;
            normal = Vec3::X;
        }
        if to_min.y < best {
            best = to_min.y;
            normal = Vec3::NEG_Y;
        }
        if to_max.y < best {
            best = to_max.y;
            normal = Vec3::Y;
        }
        if to_min.z < best {
            best = to_min.z;
            normal = Vec3::NEG_Z;
        }
        if to_max.z < best {
            normal = Vec3::Z;
        }
        normal
    }
}
