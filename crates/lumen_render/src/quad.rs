//! Planar quadrilaterals and the axis-aligned box built from six of them.

use crate::sampling::gen_f64;
use crate::{HitRecord, Hittable, HittableList, Material};
use lumen_math::{Aabb, DVec3, Interval, Point3, Ray};
use rand::RngCore;
use std::sync::Arc;

const EPSILON: f64 = 1e-8;

/// A parallelogram defined by a corner point and two edge vectors.
pub struct Quad {
    q: Point3,
    u: DVec3,
    v: DVec3,
    normal: DVec3,
    d: f64,
    area: f64,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Quad {
    pub fn new(q: Point3, u: DVec3, v: DVec3, material: Arc<dyn Material>) -> Self {
        let n = u.cross(v);
        let normal = n.normalize();
        let d = normal.dot(q);
        let area = n.length();

        // Box over the four corners; Aabb pads flat axes itself
        let bbox = Aabb::surrounding(
            &Aabb::from_points(q, q + u + v),
            &Aabb::from_points(q + u, q + v),
        );

        Self {
            q,
            u,
            v,
            normal,
            d,
            area,
            material,
            bbox,
        }
    }

    /// Unnormalized planar coordinates lie within the parallelogram.
    fn is_inside(&self, alpha: f64, beta: f64) -> bool {
        alpha >= 0.0
            && beta >= 0.0
            && alpha <= self.u.length_squared()
            && beta <= self.v.length_squared()
    }

    /// Plane intersection shared by `hit` and `pdf_value`.
    fn plane_hit(&self, origin: Point3, direction: DVec3, t_min: f64, t_max: f64) -> Option<f64> {
        let denominator = self.normal.dot(direction);
        if denominator.abs() < EPSILON {
            // Near-parallel ray: a miss, not an error
            return None;
        }

        let t = (self.d - self.normal.dot(origin)) / denominator;
        if t < t_min || t > t_max {
            return None;
        }

        let intersection = origin + t * direction;
        let planar = intersection - self.q;
        let alpha = planar.dot(self.u);
        let beta = planar.dot(self.v);

        if !self.is_inside(alpha, beta) {
            return None;
        }

        Some(t)
    }
}

impl Hittable for Quad {
    fn hit(&self, ray: &Ray, ray_t: Interval, _rng: &mut dyn RngCore) -> Option<HitRecord> {
        let t = self.plane_hit(ray.origin(), ray.direction(), ray_t.min, ray_t.max)?;

        let p = ray.at(t);
        let planar = p - self.q;
        let mut rec = HitRecord {
            p,
            normal: self.normal,
            t,
            u: planar.dot(self.u) / self.u.length_squared(),
            v: planar.dot(self.v) / self.v.length_squared(),
            front_face: true,
            material: self.material.clone(),
        };
        rec.set_face_normal(ray, self.normal);
        Some(rec)
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Option<Aabb> {
        Some(self.bbox)
    }

    fn pdf_value(&self, origin: Point3, direction: DVec3) -> f64 {
        let t = match self.plane_hit(origin, direction, 0.001, f64::INFINITY) {
            Some(t) => t,
            None => return 0.0,
        };

        let distance_squared = t * t * direction.length_squared();
        let cosine = direction.dot(self.normal).abs() / direction.length();

        distance_squared / (cosine * self.area)
    }

    fn random(&self, origin: Point3, rng: &mut dyn RngCore) -> DVec3 {
        let point = self.q + gen_f64(rng) * self.u + gen_f64(rng) * self.v;
        point - origin
    }
}

/// An axis-aligned rectangular prism assembled from six quads.
pub struct Cuboid {
    min: Point3,
    max: Point3,
    sides: HittableList,
}

impl Cuboid {
    pub fn new(min: Point3, max: Point3, material: Arc<dyn Material>) -> Self {
        let dx = DVec3::new(max.x - min.x, 0.0, 0.0);
        let dy = DVec3::new(0.0, max.y - min.y, 0.0);
        let dz = DVec3::new(0.0, 0.0, max.z - min.z);

        let mut sides = HittableList::new();
        sides.add(Arc::new(Quad::new(
            DVec3::new(min.x, min.y, max.z),
            dx,
            dy,
            material.clone(),
        ))); // front
        sides.add(Arc::new(Quad::new(min, dy, dx, material.clone()))); // back
        sides.add(Arc::new(Quad::new(
            DVec3::new(min.x, max.y, min.z),
            dz,
            dx,
            material.clone(),
        ))); // top
        sides.add(Arc::new(Quad::new(min, dz, dy, material.clone()))); // left
        sides.add(Arc::new(Quad::new(
            DVec3::new(max.x, min.y, min.z),
            dy,
            dz,
            material.clone(),
        ))); // right
        sides.add(Arc::new(Quad::new(min, dx, dz, material))); // bottom

        Self { min, max, sides }
    }
}

impl Hittable for Cuboid {
    fn hit(&self, ray: &Ray, ray_t: Interval, rng: &mut dyn RngCore) -> Option<HitRecord> {
        self.sides.hit(ray, ray_t, rng)
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Option<Aabb> {
        Some(Aabb::from_points(self.min, self.max))
    }
}
