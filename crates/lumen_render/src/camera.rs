//! Thin-lens camera with a shutter interval for motion blur.

use crate::sampling::{gen_range, random_in_unit_disk};
use lumen_math::{DVec3, Point3, Ray};
use rand::RngCore;

/// Generates primary rays through a viewport. Defocus blur comes from
/// jittering the ray origin over a lens disk; motion blur from stamping
/// each ray with a time drawn from the shutter interval.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: DVec3,
    vertical: DVec3,
    u: DVec3,
    v: DVec3,
    lens_radius: f64,
    time0: f64,
    time1: f64,
}

/// All the knobs needed to place a camera. Kept separate from `Camera`
/// so scene builders can describe a view without deriving the basis.
#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    pub lookfrom: Point3,
    pub lookat: Point3,
    pub vup: DVec3,
    pub vfov_degrees: f64,
    pub aspect_ratio: f64,
    pub aperture: f64,
    pub focus_distance: f64,
    pub time0: f64,
    pub time1: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            lookfrom: Point3::ZERO,
            lookat: Point3::new(0.0, 0.0, -1.0),
            vup: DVec3::Y,
            vfov_degrees: 40.0,
            aspect_ratio: 1.0,
            aperture: 0.0,
            focus_distance: 1.0,
            time0: 0.0,
            time1: 0.0,
        }
    }
}

impl Camera {
    pub fn new(config: &CameraConfig) -> Self {
        let theta = config.vfov_degrees.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = config.aspect_ratio * viewport_height;

        // Right-handed basis looking down -w
        let w = (config.lookfrom - config.lookat).normalize();
        let u = config.vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = config.lookfrom;
        let horizontal = config.focus_distance * viewport_width * u;
        let vertical = config.focus_distance * viewport_height * v;
        let lower_left_corner =
            origin - horizontal / 2.0 - vertical / 2.0 - config.focus_distance * w;

        Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            lens_radius: config.aperture / 2.0,
            time0: config.time0,
            time1: config.time1,
        }
    }

    /// Ray through viewport coordinates (s, t) in [0, 1]^2, with the
    /// origin jittered over the lens and a time drawn from the shutter.
    pub fn get_ray(&self, s: f64, t: f64, rng: &mut dyn RngCore) -> Ray {
        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical
                - self.origin
                - offset,
            gen_range(rng, self.time0, self.time1),
        )
    }
}
