//! Material trait for surface scattering.

use crate::sampling::{gen_f64, random_in_unit_sphere};
use crate::texture::{SolidColor, Texture};
use crate::{CosinePdf, HitRecord, Pdf, UniformSpherePdf};
use lumen_math::{Color, DVec3, Point3, Ray};
use rand::RngCore;
use std::f64::consts::PI;
use std::sync::Arc;

/// Outcome of a scatter decision.
///
/// Specular events carry a concrete continuation ray and are evaluated
/// exactly; diffuse events carry a PDF describing the distribution of
/// plausible outgoing directions.
pub enum ScatterRecord {
    Specular { ray: Ray, attenuation: Color },
    Diffuse { attenuation: Color, pdf: Arc<dyn Pdf> },
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray, or return `None` if it is absorbed.
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterRecord>;

    /// Density this material itself assigns to a given outgoing ray.
    ///
    /// Used to weight directions that were importance-sampled from a
    /// different distribution, e.g. a light PDF.
    fn scattering_pdf(&self, _ray_in: &Ray, _rec: &HitRecord, _scattered: &Ray) -> f64 {
        0.0
    }

    /// Emitted radiance. Most materials return black.
    fn emitted(&self, _u: f64, _v: f64, _p: Point3) -> Color {
        Color::ZERO
    }
}

/// Lambertian (diffuse) material.
pub struct Lambertian {
    albedo: Arc<dyn Texture>,
}

impl Lambertian {
    /// Create a Lambertian material with a flat albedo color.
    pub fn new(albedo: Color) -> Self {
        Self {
            albedo: Arc::new(SolidColor::new(albedo)),
        }
    }

    /// Create a Lambertian material driven by a texture.
    pub fn from_texture(texture: Arc<dyn Texture>) -> Self {
        Self { albedo: texture }
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        _ray_in: &Ray,
        rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterRecord> {
        Some(ScatterRecord::Diffuse {
            attenuation: self.albedo.value(rec.u, rec.v, rec.p),
            pdf: Arc::new(CosinePdf::new(rec.normal)),
        })
    }

    fn scattering_pdf(&self, _ray_in: &Ray, rec: &HitRecord, scattered: &Ray) -> f64 {
        let cosine = rec.normal.dot(scattered.direction().normalize());
        if cosine < 0.0 {
            0.0
        } else {
            cosine / PI
        }
    }
}

/// Metal (specular) material.
pub struct Metal {
    albedo: Color,
    fuzz: f64,
}

impl Metal {
    /// `fuzz`: roughness, 0.0 = perfect mirror, 1.0 = very rough.
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        Self {
            albedo,
            fuzz: fuzz.min(1.0),
        }
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterRecord> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let scattered_direction = reflected + self.fuzz * random_in_unit_sphere(rng);

        // Fuzz can push the reflection below the surface; absorb those
        if scattered_direction.dot(rec.normal) <= 0.0 {
            return None;
        }

        Some(ScatterRecord::Specular {
            ray: Ray::new(rec.p, scattered_direction, ray_in.time()),
            attenuation: self.albedo,
        })
    }
}

/// Dielectric (glass) material.
pub struct Dielectric {
    /// Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    refraction_index: f64,
}

impl Dielectric {
    pub fn new(refraction_index: f64) -> Self {
        Self { refraction_index }
    }

    /// Schlick's approximation for reflectance.
    fn reflectance(cosine: f64, ref_idx: f64) -> f64 {
        let r0 = ((1.0 - ref_idx) / (1.0 + ref_idx)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterRecord> {
        let refraction_ratio = if rec.front_face {
            1.0 / self.refraction_index
        } else {
            self.refraction_index
        };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Snell's law has no real solution: total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;
        let direction =
            if cannot_refract || Self::reflectance(cos_theta, refraction_ratio) > gen_f64(rng) {
                reflect(unit_direction, rec.normal)
            } else {
                refract(unit_direction, rec.normal, refraction_ratio)
            };

        Some(ScatterRecord::Specular {
            ray: Ray::new(rec.p, direction, ray_in.time()),
            attenuation: Color::ONE,
        })
    }
}

/// Diffuse light emitter. Absorbs every incoming ray.
pub struct DiffuseLight {
    emit: Color,
}

impl DiffuseLight {
    pub fn new(emit: Color) -> Self {
        Self { emit }
    }
}

impl Material for DiffuseLight {
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterRecord> {
        None
    }

    fn emitted(&self, _u: f64, _v: f64, _p: Point3) -> Color {
        self.emit
    }
}

/// Isotropic phase function for participating media.
pub struct Isotropic {
    albedo: Arc<dyn Texture>,
}

impl Isotropic {
    pub fn new(albedo: Color) -> Self {
        Self {
            albedo: Arc::new(SolidColor::new(albedo)),
        }
    }

    pub fn from_texture(texture: Arc<dyn Texture>) -> Self {
        Self { albedo: texture }
    }
}

impl Material for Isotropic {
    fn scatter(
        &self,
        _ray_in: &Ray,
        rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterRecord> {
        Some(ScatterRecord::Diffuse {
            attenuation: self.albedo.value(rec.u, rec.v, rec.p),
            pdf: Arc::new(UniformSpherePdf),
        })
    }

    fn scattering_pdf(&self, _ray_in: &Ray, _rec: &HitRecord, _scattered: &Ray) -> f64 {
        1.0 / (4.0 * PI)
    }
}

/// Reflect a vector about a normal.
#[inline]
pub(crate) fn reflect(v: DVec3, n: DVec3) -> DVec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a vector through a surface.
#[inline]
pub(crate) fn refract(uv: DVec3, n: DVec3, etai_over_etat: f64) -> DVec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
