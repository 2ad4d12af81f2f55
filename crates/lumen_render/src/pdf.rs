//! Probability density functions over directions.
//!
//! Each PDF exposes a density evaluator and a sampler for the same
//! distribution; the integrator divides by the density of whichever PDF
//! produced a direction, so the two must agree.

use crate::sampling::{gen_f64, random_cosine_direction, random_to_sphere, random_unit_vector};
use crate::Hittable;
use lumen_math::{DVec3, Onb, Point3};
use rand::RngCore;
use std::f64::consts::PI;

/// A sampleable probability density over directions.
pub trait Pdf: Send + Sync {
    /// Density at the given direction. Non-negative.
    fn value(&self, direction: DVec3) -> f64;

    /// Draw a direction from the distribution.
    fn generate(&self, rng: &mut dyn RngCore) -> DVec3;
}

/// Cosine-weighted hemisphere around a surface normal.
pub struct CosinePdf {
    uvw: Onb,
}

impl CosinePdf {
    pub fn new(w: DVec3) -> Self {
        Self { uvw: Onb::from_w(w) }
    }
}

impl Pdf for CosinePdf {
    fn value(&self, direction: DVec3) -> f64 {
        let cosine = direction.normalize().dot(self.uvw.w());
        if cosine > 0.0 {
            cosine / PI
        } else {
            0.0
        }
    }

    fn generate(&self, rng: &mut dyn RngCore) -> DVec3 {
        self.uvw.local(random_cosine_direction(rng))
    }
}

/// Solid angle subtended by a sphere, viewed from an external origin.
pub struct SpherePdf {
    origin: Point3,
    center: Point3,
    radius: f64,
}

impl SpherePdf {
    pub fn new(origin: Point3, center: Point3, radius: f64) -> Self {
        Self {
            origin,
            center,
            radius,
        }
    }
}

impl Pdf for SpherePdf {
    fn value(&self, _direction: DVec3) -> f64 {
        let to_center = self.center - self.origin;
        let distance_squared = to_center.length_squared();
        let cos_theta_max = (1.0 - self.radius * self.radius / distance_squared).sqrt();
        let solid_angle = 2.0 * PI * (1.0 - cos_theta_max);
        1.0 / solid_angle
    }

    fn generate(&self, rng: &mut dyn RngCore) -> DVec3 {
        let direction = self.center - self.origin;
        let uvw = Onb::from_w(direction);
        uvw.local(random_to_sphere(self.radius, direction.length_squared(), rng))
    }
}

/// Uniform density over the full sphere of directions.
pub struct UniformSpherePdf;

impl Pdf for UniformSpherePdf {
    fn value(&self, _direction: DVec3) -> f64 {
        1.0 / (4.0 * PI)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> DVec3 {
        random_unit_vector(rng)
    }
}

/// Delegates sampling to an object acting as a light source.
///
/// Borrows the object: these wrappers live for one bounce, so tying them
/// to the scene borrow avoids refcount churn in the hot loop.
pub struct HittablePdf<'a> {
    hittable: &'a dyn Hittable,
    origin: Point3,
}

impl<'a> HittablePdf<'a> {
    pub fn new(hittable: &'a dyn Hittable, origin: Point3) -> Self {
        Self { hittable, origin }
    }
}

impl Pdf for HittablePdf<'_> {
    fn value(&self, direction: DVec3) -> f64 {
        self.hittable.pdf_value(self.origin, direction)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> DVec3 {
        self.hittable.random(self.origin, rng)
    }
}

/// Fixed 50/50 blend of two PDFs, for both density and sampling.
///
/// The blend weight stays at one half regardless of light count or
/// material roughness; test fixtures depend on this exact ratio.
pub struct MixturePdf<'a> {
    p0: &'a dyn Pdf,
    p1: &'a dyn Pdf,
}

impl<'a> MixturePdf<'a> {
    pub fn new(p0: &'a dyn Pdf, p1: &'a dyn Pdf) -> Self {
        Self { p0, p1 }
    }
}

impl Pdf for MixturePdf<'_> {
    fn value(&self, direction: DVec3) -> f64 {
        0.5 * self.p0.value(direction) + 0.5 * self.p1.value(direction)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> DVec3 {
        if gen_f64(rng) < 0.5 {
            self.p0.generate(rng)
        } else {
            self.p1.generate(rng)
        }
    }
}
