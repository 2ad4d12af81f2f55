//! Random sampling helpers.
//!
//! Every function takes the generator as an explicit parameter; no global
//! or thread-local state. This keeps results reproducible under any
//! scheduling of pixel work.

use lumen_math::DVec3;
use rand::{Rng, RngCore};
use std::f64::consts::PI;

/// Uniform f64 in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen()
}

/// Uniform f64 in [min, max). A degenerate range yields min.
#[inline]
pub fn gen_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    if max <= min {
        min
    } else {
        rng.gen_range(min..max)
    }
}

/// Rejection-sample a point inside the unit sphere.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> DVec3 {
    loop {
        let candidate = DVec3::new(
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
        );
        if candidate.length_squared() < 1.0 {
            return candidate;
        }
    }
}

/// Uniform direction on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> DVec3 {
    random_in_unit_sphere(rng).normalize()
}

/// Rejection-sample a point inside the unit disk (z = 0).
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> DVec3 {
    loop {
        let p = DVec3::new(gen_range(rng, -1.0, 1.0), gen_range(rng, -1.0, 1.0), 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Cosine-weighted direction around +Z in the canonical frame.
pub fn random_cosine_direction(rng: &mut dyn RngCore) -> DVec3 {
    let r1 = gen_f64(rng);
    let r2 = gen_f64(rng);

    let phi = 2.0 * PI * r1;
    let sqrt_r2 = r2.sqrt();
    let x = phi.cos() * sqrt_r2;
    let y = phi.sin() * sqrt_r2;
    let z = (1.0 - r2).sqrt();

    DVec3::new(x, y, z)
}

/// Uniform direction within the cone subtended by a sphere of `radius` at
/// `distance_squared` from the cone apex, around +Z in the canonical frame.
pub fn random_to_sphere(radius: f64, distance_squared: f64, rng: &mut dyn RngCore) -> DVec3 {
    let r1 = gen_f64(rng);
    let r2 = gen_f64(rng);

    let cos_theta_max = (1.0 - radius * radius / distance_squared).sqrt();
    let z = 1.0 + r2 * (cos_theta_max - 1.0);

    let phi = 2.0 * PI * r1;
    let sin_theta = (1.0 - z * z).sqrt();
    let x = phi.cos() * sin_theta;
    let y = phi.sin() * sin_theta;

    DVec3::new(x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_in_unit_sphere_stays_inside() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            assert!(random_in_unit_sphere(&mut rng).length_squared() < 1.0);
        }
    }

    #[test]
    fn test_random_unit_vector_has_unit_length() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..1000 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_random_cosine_direction_points_up() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let v = random_cosine_direction(&mut rng);
            assert!(v.z >= 0.0);
            assert!((v.length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_random_to_sphere_within_cone() {
        let mut rng = StdRng::seed_from_u64(4);
        let radius: f64 = 1.0;
        let distance_squared = 4.0;
        let cos_theta_max = (1.0 - radius * radius / distance_squared).sqrt();

        for _ in 0..1000 {
            let v = random_to_sphere(radius, distance_squared, &mut rng);
            assert!(v.z >= cos_theta_max - 1e-12);
        }
    }

    #[test]
    fn test_gen_range_degenerate() {
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(gen_range(&mut rng, 2.0, 2.0), 2.0);
    }
}
