//! Plain-text PPM (P3) output.

use crate::renderer::Framebuffer;
use std::io::{self, Write};

/// Write the framebuffer as a P3 image: ASCII header, then one
/// whitespace-separated RGB triple per pixel in row-major order.
pub fn write_ppm<W: Write>(writer: &mut W, framebuffer: &Framebuffer) -> io::Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", framebuffer.width(), framebuffer.height())?;
    writeln!(writer, "255")?;

    for rgb in framebuffer.to_rgb8().chunks_exact(3) {
        writeln!(writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::{self, SceneKind};
    use crate::renderer::{render, RenderConfig};

    fn tiny_render() -> Framebuffer {
        let scene = scenes::build(SceneKind::ThreeSpheres, 1.0).expect("scene builds");
        render(
            &scene,
            &RenderConfig {
                width: 2,
                height: 2,
                samples_per_pixel: 1,
                max_depth: 2,
                seed: 0,
            },
        )
    }

    #[test]
    fn test_ppm_header_and_pixel_count() {
        let framebuffer = tiny_render();
        let mut output = Vec::new();
        write_ppm(&mut output, &framebuffer).expect("write to memory");

        let text = String::from_utf8(output).expect("ascii output");
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("P3"));
        assert_eq!(lines.next(), Some("2 2"));
        assert_eq!(lines.next(), Some("255"));
        assert_eq!(lines.count(), 4);
    }

    #[test]
    fn test_ppm_values_in_range() {
        let framebuffer = tiny_render();
        let mut output = Vec::new();
        write_ppm(&mut output, &framebuffer).expect("write to memory");

        let text = String::from_utf8(output).expect("ascii output");
        for token in text.lines().skip(3).flat_map(str::split_whitespace) {
            let value: u32 = token.parse().expect("numeric sample");
            assert!(value <= 255);
        }
    }
}
