//! Textures: solid colors, the checker pattern, and Perlin noise.

use lumen_math::{Color, Point3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Trait for surface color lookups by UV coordinate and hit point.
pub trait Texture: Send + Sync {
    fn value(&self, u: f64, v: f64, p: Point3) -> Color;
}

/// A single flat color.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    color: Color,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f64, _v: f64, _p: Point3) -> Color {
        self.color
    }
}

/// Two-tone checker driven by the sign of a sine product in world space.
pub struct CheckerTexture {
    even: Box<dyn Texture>,
    odd: Box<dyn Texture>,
    scale: f64,
}

impl CheckerTexture {
    pub fn new(even: Color, odd: Color, scale: f64) -> Self {
        Self {
            even: Box::new(SolidColor::new(even)),
            odd: Box::new(SolidColor::new(odd)),
            scale,
        }
    }

    pub fn from_textures(even: Box<dyn Texture>, odd: Box<dyn Texture>, scale: f64) -> Self {
        Self { even, odd, scale }
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f64, v: f64, p: Point3) -> Color {
        let sines = (self.scale * p.x).sin() * (self.scale * p.y).sin() * (self.scale * p.z).sin();
        if sines < 0.0 {
            self.odd.value(u, v, p)
        } else {
            self.even.value(u, v, p)
        }
    }
}

const POINT_COUNT: usize = 256;

/// Gradient-noise generator with fixed-seed permutation tables, so noise is
/// identical across runs and threads.
pub struct Perlin {
    random_vectors: Vec<lumen_math::DVec3>,
    perm_x: Vec<usize>,
    perm_y: Vec<usize>,
    perm_z: Vec<usize>,
}

impl Perlin {
    pub fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(20240701);
        let random_vectors = (0..POINT_COUNT)
            .map(|_| {
                lumen_math::DVec3::new(
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-1.0..1.0),
                )
                .normalize()
            })
            .collect();

        Self {
            random_vectors,
            perm_x: Self::generate_permutation(20240701),
            perm_y: Self::generate_permutation(20240731),
            perm_z: Self::generate_permutation(20240801),
        }
    }

    fn generate_permutation(seed: u64) -> Vec<usize> {
        let mut perm: Vec<usize> = (0..POINT_COUNT).collect();

        // Fisher-Yates with a dedicated seeded generator per table
        let mut rng = StdRng::seed_from_u64(seed);
        for i in (1..POINT_COUNT).rev() {
            let target = rng.gen_range(0..=i);
            perm.swap(i, target);
        }
        perm
    }

    pub fn noise(&self, p: Point3) -> f64 {
        let u = p.x - p.x.floor();
        let v = p.y - p.y.floor();
        let w = p.z - p.z.floor();

        let i = p.x.floor() as i64;
        let j = p.y.floor() as i64;
        let k = p.z.floor() as i64;

        let mut c = [[[lumen_math::DVec3::ZERO; 2]; 2]; 2];
        for (di, plane) in c.iter_mut().enumerate() {
            for (dj, row) in plane.iter_mut().enumerate() {
                for (dk, cell) in row.iter_mut().enumerate() {
                    let index = self.perm_x[((i + di as i64) & 255) as usize]
                        ^ self.perm_y[((j + dj as i64) & 255) as usize]
                        ^ self.perm_z[((k + dk as i64) & 255) as usize];
                    *cell = self.random_vectors[index];
                }
            }
        }

        Self::perlin_interp(&c, u, v, w)
    }

    pub fn turbulence(&self, p: Point3, depth: u32) -> f64 {
        let mut accum = 0.0;
        let mut temp_p = p;
        let mut weight = 1.0;

        for _ in 0..depth {
            accum += weight * self.noise(temp_p);
            weight *= 0.5;
            temp_p *= 2.0;
        }

        accum.abs()
    }

    fn perlin_interp(c: &[[[lumen_math::DVec3; 2]; 2]; 2], u: f64, v: f64, w: f64) -> f64 {
        // Hermite smoothing of the lattice coordinates
        let uu = u * u * (3.0 - 2.0 * u);
        let vv = v * v * (3.0 - 2.0 * v);
        let ww = w * w * (3.0 - 2.0 * w);
        let mut accum = 0.0;

        for (i, plane) in c.iter().enumerate() {
            for (j, row) in plane.iter().enumerate() {
                for (k, cell) in row.iter().enumerate() {
                    let (fi, fj, fk) = (i as f64, j as f64, k as f64);
                    let weight_v = lumen_math::DVec3::new(u - fi, v - fj, w - fk);
                    let blend = (fi * uu + (1.0 - fi) * (1.0 - uu))
                        * (fj * vv + (1.0 - fj) * (1.0 - vv))
                        * (fk * ww + (1.0 - fk) * (1.0 - ww));
                    accum += blend * cell.dot(weight_v);
                }
            }
        }

        accum
    }
}

impl Default for Perlin {
    fn default() -> Self {
        Self::new()
    }
}

/// Marble-like texture built from Perlin turbulence.
pub struct NoiseTexture {
    perlin: Perlin,
    scale: f64,
}

impl NoiseTexture {
    pub fn new(scale: f64) -> Self {
        Self {
            perlin: Perlin::new(),
            scale,
        }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f64, _v: f64, p: Point3) -> Color {
        let noise_value = self.perlin.turbulence(self.scale * p, 7);
        let normalized = 0.5 * (1.0 + (self.scale * p.z + 10.0 * noise_value).sin());
        Color::ONE * normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::DVec3;

    #[test]
    fn test_solid_color_ignores_coordinates() {
        let texture = SolidColor::new(Color::new(0.2, 0.4, 0.6));
        assert_eq!(
            texture.value(0.0, 0.0, DVec3::ZERO),
            texture.value(0.9, 0.1, DVec3::new(5.0, -3.0, 2.0))
        );
    }

    #[test]
    fn test_checker_alternates() {
        let texture = CheckerTexture::new(Color::ONE, Color::ZERO, std::f64::consts::PI);
        let a = texture.value(0.0, 0.0, DVec3::new(0.5, 0.5, 0.5));
        let b = texture.value(0.0, 0.0, DVec3::new(1.5, 0.5, 0.5));
        assert_ne!(a, b);
    }

    #[test]
    fn test_perlin_is_deterministic() {
        let a = Perlin::new();
        let b = Perlin::new();
        let p = DVec3::new(1.3, 2.7, -0.4);
        assert_eq!(a.noise(p), b.noise(p));
        assert_eq!(a.turbulence(p, 7), b.turbulence(p, 7));
    }

    #[test]
    fn test_noise_texture_in_range() {
        let texture = NoiseTexture::new(4.0);
        for i in 0..50 {
            let p = DVec3::new(i as f64 * 0.37, i as f64 * 0.11, -(i as f64) * 0.23);
            let c = texture.value(0.0, 0.0, p);
            assert!(c.x >= 0.0 && c.x <= 1.0);
        }
    }
}
