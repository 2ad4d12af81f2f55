use crate::{Interval, Ray};
use glam::DVec3;

/// Axis-aligned bounding box for spatial acceleration structures (BVH).
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D
/// volume. Zero-thickness boxes are legal input; every constructor pads
/// degenerate axes so the slab test never collapses for flat geometry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create an AABB from two corner points.
    pub fn from_points(a: DVec3, b: DVec3) -> Self {
        let x = Interval::new(a.x.min(b.x), a.x.max(b.x));
        let y = Interval::new(a.y.min(b.y), a.y.max(b.y));
        let z = Interval::new(a.z.min(b.z), a.z.max(b.z));

        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Minimum corner of the box.
    pub fn minimum(&self) -> DVec3 {
        DVec3::new(self.x.min, self.y.min, self.z.min)
    }

    /// Maximum corner of the box.
    pub fn maximum(&self) -> DVec3 {
        DVec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// Test if a ray intersects this AABB within the given interval.
    ///
    /// Slab method: per axis, the entry/exit parameters are computed with
    /// the reciprocal of the direction component. A zero component yields
    /// IEEE infinities, which the swap-on-negative rule still handles.
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> bool {
        let ray_orig = r.origin();
        let ray_dir = r.direction();

        for axis in 0..3 {
            let interval = self.axis_interval(axis);
            let adinv = 1.0 / ray_dir[axis];

            let mut t0 = (interval.min - ray_orig[axis]) * adinv;
            let mut t1 = (interval.max - ray_orig[axis]) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max <= ray_t.min {
                return false;
            }
        }

        true
    }

    /// Pad intervals to avoid zero-width AABBs (degenerate cases).
    fn pad_to_minimums(&mut self) {
        let delta = 1e-4;
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

    /// Translate (move) the AABB by an offset vector.
    pub fn translate(&self, offset: DVec3) -> Aabb {
        Aabb {
            x: self.x.add_scalar(offset.x),
            y: self.y.add_scalar(offset.y),
            z: self.z.add_scalar(offset.z),
        }
    }

    /// Returns the index (0=X, 1=Y, 2=Z) of the axis with the longest
    /// extent. Ties resolve in declaration order x, y, z.
    pub fn longest_axis(&self) -> usize {
        let x_size = self.x.size();
        let y_size = self.y.size();
        let z_size = self.z.size();

        if x_size >= y_size && x_size >= z_size {
            0
        } else if y_size >= z_size {
            1
        } else {
            2
        }
    }

    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };
}
