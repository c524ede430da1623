use crate::{Interval, Ray, Vec3};

/// Axis-aligned bounding box used to reject rays before per-triangle tests.
///
/// Defined by three intervals, one per axis. Boxes built through
/// [`Aabb::from_points`] are padded so flat geometry (a single triangle, a
/// quad in a plane) still has a nonzero slab on every axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create an AABB from two opposite corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let mut aabb = Self {
            x: Interval::new(a.x.min(b.x), a.x.max(b.x)),
            y: Interval::new(a.y.min(b.y), a.y.max(b.y)),
            z: Interval::new(a.z.min(b.z), a.z.max(b.z)),
        };
        aabb.pad_to_minimums();
        aabb
    }

    /// Bound an entire point set. Returns [`Aabb::EMPTY`] for an empty slice.
    pub fn from_point_set(points: &[Vec3]) -> Self {
        if points.is_empty() {
            return Self::EMPTY;
        }

        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for point in points {
            min = min.min(*point);
            max = max.max(*point);
        }

        Self::from_points(min, max)
    }

    /// Smallest box containing both operands.
    pub fn surrounding(a: &Aabb, b: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&a.x, &b.x),
            y: Interval::surrounding(&a.y, &b.y),
            z: Interval::surrounding(&a.z, &b.z),
        }
    }

    /// The two extreme corners, (min, max).
    pub fn corners(&self) -> (Vec3, Vec3) {
        (
            Vec3::new(self.x.min, self.y.min, self.z.min),
            Vec3::new(self.x.max, self.y.max, self.z.max),
        )
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Vec3 {
        Vec3::new(
            (self.x.min + self.x.max) * 0.5,
            (self.y.min + self.y.max) * 0.5,
            (self.z.min + self.z.max) * 0.5,
        )
    }

    /// Translate (move) the AABB by an offset vector.
    pub fn translate(&self, offset: Vec3) -> Aabb {
        Aabb {
            x: self.x.shift(offset.x),
            y: self.y.shift(offset.y),
            z: self.z.shift(offset.z),
        }
    }

    /// Slab test: does the ray cross this box inside its valid interval?
    ///
    /// Clips the ray's `[t_min, t_max]` interval against the min/max slabs of
    /// each axis in turn. An empty clipped interval means a miss; clipping
    /// against `t_min` also rejects boxes entirely behind the ray origin.
    pub fn hit(&self, ray: &Ray) -> bool {
        let mut clip = Interval::new(ray.t_min, ray.t_max);

        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let inv_dir = 1.0 / ray.direction[axis];

            let mut t0 = (slab.min - ray.origin[axis]) * inv_dir;
            let mut t1 = (slab.max - ray.origin[axis]) * inv_dir;
            if inv_dir < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            clip.min = t0.max(clip.min);
            clip.max = t1.min(clip.max);
            if clip.max <= clip.min {
                return false;
            }
        }

        true
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, axis: usize) -> Interval {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Pad zero-width slabs so the hit test never degenerates.
    fn pad_to_minimums(&mut self) {
        let delta = 0.0001;
        if self.x.size() < delta {
            self.x = self.x.expand(delta);
        }
        if self.y.size() < delta {
            self.y = self.y.expand(delta);
        }
        if self.z.size() < delta {
            self.z = self.z.expand(delta);
        }
    }

    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };
}
