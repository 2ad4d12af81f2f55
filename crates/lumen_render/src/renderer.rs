//! Parallel tile-free renderer: one deterministic generator per pixel.

use crate::integrator::ray_color;
use crate::sampling::gen_f64;
use crate::scenes::Scene;
use lumen_math::Color;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::time::Instant;

/// Image and sampling parameters, independent of scene content.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            samples_per_pixel: 100,
            max_depth: 50,
            seed: 0,
        }
    }
}

/// Averaged linear radiance per pixel, row-major with y = 0 at the top.
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Framebuffer {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Gamma-corrected 8-bit RGB, interleaved row-major.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for pixel in &self.pixels {
            bytes.push(quantize(pixel.x));
            bytes.push(quantize(pixel.y));
            bytes.push(quantize(pixel.z));
        }
        bytes
    }
}

/// Linear component to display byte: gamma 2 then an 8-bit quantize.
fn quantize(component: f64) -> u8 {
    let gamma_corrected = component.max(0.0).sqrt();
    (255.0 * gamma_corrected.clamp(0.0, 0.999)).round() as u8
}

/// Seed for the pixel at (x, y), derived from the run seed so that every
/// pixel gets an independent stream and reruns reproduce it exactly.
fn pixel_seed(base_seed: u64, x: u32, y: u32) -> u64 {
    let coords = ((x as u64) << 32) | y as u64;
    let mut z = base_seed ^ coords.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Render the scene. Rows are distributed over the thread pool; output is
/// identical regardless of thread count because each pixel owns its
/// generator.
pub fn render(scene: &Scene, config: &RenderConfig) -> Framebuffer {
    let start = Instant::now();
    info!(
        "rendering {}x{} at {} spp, depth {}",
        config.width, config.height, config.samples_per_pixel, config.max_depth
    );

    let width = config.width as usize;
    let mut pixels = vec![Color::ZERO; width * config.height as usize];

    pixels
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, row_pixels)| {
            let y = row as u32;
            for (column, pixel) in row_pixels.iter_mut().enumerate() {
                let x = column as u32;
                let mut rng = StdRng::seed_from_u64(pixel_seed(config.seed, x, y));

                let mut accumulated = Color::ZERO;
                for _ in 0..config.samples_per_pixel {
                    let (s, t) = sample_position(config, x, y, &mut rng);
                    let ray = scene.camera.get_ray(s, t, &mut rng);
                    accumulated += ray_color(
                        &ray,
                        scene.background,
                        scene.world.as_ref(),
                        &scene.lights,
                        config.max_depth,
                        &mut rng,
                    );
                }

                *pixel = accumulated / config.samples_per_pixel as f64;
            }
        });

    info!("render finished in {:.2?}", start.elapsed());

    Framebuffer {
        width: config.width,
        height: config.height,
        pixels,
    }
}

/// Jittered viewport coordinates for pixel (x, y). The viewport maps
/// pixel centers onto [0, 1] with t increasing upward; a one-pixel axis
/// pins the coordinate to the center.
fn sample_position(config: &RenderConfig, x: u32, y: u32, rng: &mut StdRng) -> (f64, f64) {
    let s = if config.width > 1 {
        (x as f64 + gen_f64(rng)) / (config.width - 1) as f64
    } else {
        0.5
    };
    let t = if config.height > 1 {
        ((config.height - 1 - y) as f64 + gen_f64(rng)) / (config.height - 1) as f64
    } else {
        0.5
    };
    (s, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_endpoints() {
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 255);
        // Values past white clamp instead of wrapping
        assert_eq!(quantize(25.0), 255);
        assert_eq!(quantize(-1.0), 0);
    }

    #[test]
    fn test_quantize_applies_gamma() {
        // Linear 0.25 encodes as sqrt(0.25) = 0.5
        assert_eq!(quantize(0.25), (255.0f64 * 0.5).round() as u8);
    }

    #[test]
    fn test_pixel_seeds_are_distinct() {
        let a = pixel_seed(7, 0, 0);
        let b = pixel_seed(7, 0, 1);
        let c = pixel_seed(7, 1, 0);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn test_pixel_seed_depends_on_base() {
        assert_ne!(pixel_seed(1, 5, 5), pixel_seed(2, 5, 5));
    }

    #[test]
    fn test_sample_position_degenerate_axes() {
        let config = RenderConfig {
            width: 1,
            height: 1,
            ..RenderConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(sample_position(&config, 0, 0, &mut rng), (0.5, 0.5));
    }

    #[test]
    fn test_sample_position_flips_vertically() {
        let config = RenderConfig {
            width: 3,
            height: 3,
            ..RenderConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(0);

        // Top image row samples the top of the viewport
        let (_, t_top) = sample_position(&config, 0, 0, &mut rng);
        let (_, t_bottom) = sample_position(&config, 0, 2, &mut rng);
        assert!((1.0..1.5).contains(&t_top));
        assert!((0.0..0.5).contains(&t_bottom));
    }
}
