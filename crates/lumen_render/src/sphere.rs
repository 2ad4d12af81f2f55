//! Sphere primitives: fixed and keyframe-animated.

use crate::sampling::random_to_sphere;
use crate::{HitRecord, Hittable, Material};
use lumen_math::{Aabb, DVec3, Interval, Onb, Point3, Ray};
use rand::RngCore;
use std::f64::consts::PI;
use std::sync::Arc;

/// A sphere at a fixed center.
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Arc<dyn Material>,
}

impl Sphere {
    pub fn new(center: Point3, radius: f64, material: Arc<dyn Material>) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    /// UV coordinates for a point on the unit sphere, from the spherical
    /// coordinates of the outward normal.
    fn sphere_uv(p: DVec3) -> (f64, f64) {
        // theta: angle down from +Y, phi: angle around Y from -X
        let theta = (-p.y).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        (phi / (2.0 * PI), theta / PI)
    }

    /// Quadratic root test shared by the fixed and moving variants.
    fn hit_at_center(
        ray: &Ray,
        ray_t: Interval,
        center: Point3,
        radius: f64,
        material: &Arc<dyn Material>,
    ) -> Option<HitRecord> {
        let oc = ray.origin() - center;
        let a = ray.direction().length_squared();
        let half_b = oc.dot(ray.direction());
        let c = oc.length_squared() - radius * radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();

        // Nearest root in range, else the far one
        let mut root = (-half_b - sqrt_d) / a;
        if !ray_t.contains(root) {
            root = (-half_b + sqrt_d) / a;
            if !ray_t.contains(root) {
                return None;
            }
        }

        let p = ray.at(root);
        let outward_normal = (p - center) / radius;
        let (u, v) = Self::sphere_uv(outward_normal);

        let mut rec = HitRecord {
            p,
            normal: outward_normal,
            t: root,
            u,
            v,
            front_face: true,
            material: material.clone(),
        };
        rec.set_face_normal(ray, outward_normal);
        Some(rec)
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval, _rng: &mut dyn RngCore) -> Option<HitRecord> {
        Self::hit_at_center(ray, ray_t, self.center, self.radius, &self.material)
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Option<Aabb> {
        let radius_vec = DVec3::splat(self.radius);
        Some(Aabb::from_points(
            self.center - radius_vec,
            self.center + radius_vec,
        ))
    }

    fn pdf_value(&self, origin: Point3, direction: DVec3) -> f64 {
        let to_center = self.center - origin;
        let distance_squared = to_center.length_squared();
        if distance_squared <= self.radius * self.radius {
            // Origin inside the sphere: no solid-angle cone
            return 0.0;
        }

        // The query direction must actually strike the sphere
        let a = direction.length_squared();
        let half_b = direction.dot(to_center);
        let c = distance_squared - self.radius * self.radius;
        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return 0.0;
        }
        let sqrt_d = discriminant.sqrt();
        let mut root = (half_b - sqrt_d) / a;
        if root <= 0.001 {
            root = (half_b + sqrt_d) / a;
            if root <= 0.001 {
                return 0.0;
            }
        }

        let cos_theta_max = (1.0 - self.radius * self.radius / distance_squared).sqrt();
        let solid_angle = 2.0 * PI * (1.0 - cos_theta_max);
        1.0 / solid_angle
    }

    fn random(&self, origin: Point3, rng: &mut dyn RngCore) -> DVec3 {
        let direction = self.center - origin;
        let uvw = Onb::from_w(direction);
        uvw.local(random_to_sphere(self.radius, direction.length_squared(), rng))
    }
}

/// A sphere whose center moves linearly between two keyframes.
pub struct MovingSphere {
    center_start: Point3,
    center_end: Point3,
    time_start: f64,
    time_end: f64,
    radius: f64,
    material: Arc<dyn Material>,
}

impl MovingSphere {
    pub fn new(
        center_start: Point3,
        center_end: Point3,
        time_start: f64,
        time_end: f64,
        radius: f64,
        material: Arc<dyn Material>,
    ) -> Self {
        Self {
            center_start,
            center_end,
            time_start,
            time_end,
            radius,
            material,
        }
    }

    /// Center at a given time; a zero keyframe span collapses to the start.
    fn center(&self, time: f64) -> Point3 {
        let time_span = self.time_end - self.time_start;
        if time_span == 0.0 {
            return self.center_start;
        }

        let time_ratio = (time - self.time_start) / time_span;
        self.center_start + time_ratio * (self.center_end - self.center_start)
    }
}

impl Hittable for MovingSphere {
    fn hit(&self, ray: &Ray, ray_t: Interval, _rng: &mut dyn RngCore) -> Option<HitRecord> {
        Sphere::hit_at_center(
            ray,
            ray_t,
            self.center(ray.time()),
            self.radius,
            &self.material,
        )
    }

    fn bounding_box(&self, time0: f64, time1: f64) -> Option<Aabb> {
        let radius_vec = DVec3::splat(self.radius);
        let box0 = Aabb::from_points(
            self.center(time0) - radius_vec,
            self.center(time0) + radius_vec,
        );
        let box1 = Aabb::from_points(
            self.center(time1) - radius_vec,
            self.center(time1) + radius_vec,
        );
        Some(Aabb::surrounding(&box0, &box1))
    }
}
