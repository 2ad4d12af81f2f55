use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use lumen_render::renderer::{render, RenderConfig};
use lumen_render::scenes::{self, SceneKind};
use lumen_render::write_ppm;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SceneArg {
    /// Cornell box filled with two smoke volumes
    CornellSmoke,
    /// Three spheres under a sky gradient
    ThreeSpheres,
}

impl From<SceneArg> for SceneKind {
    fn from(arg: SceneArg) -> Self {
        match arg {
            SceneArg::CornellSmoke => SceneKind::CornellSmoke,
            SceneArg::ThreeSpheres => SceneKind::ThreeSpheres,
        }
    }
}

/// CPU path tracer
#[derive(Debug, Parser)]
#[command(name = "lumen", version, about)]
struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Samples per pixel
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    spp: u32,

    /// Maximum path length
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(1..))]
    max_depth: u32,

    /// Seed for the per-pixel sample streams
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Scene to render
    #[arg(long, value_enum, default_value_t = SceneArg::CornellSmoke)]
    scene: SceneArg,

    /// Output path; "-" writes PPM to stdout, a .ppm suffix writes PPM,
    /// anything else goes through the image encoder
    #[arg(long, default_value = "-")]
    output: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let aspect_ratio = args.width as f64 / args.height as f64;
    let scene = scenes::build(args.scene.into(), aspect_ratio)?;

    let config = RenderConfig {
        width: args.width,
        height: args.height,
        samples_per_pixel: args.spp,
        max_depth: args.max_depth,
        seed: args.seed,
    };
    let framebuffer = render(&scene, &config);

    if args.output == "-" {
        let stdout = std::io::stdout();
        let mut writer = BufWriter::new(stdout.lock());
        write_ppm(&mut writer, &framebuffer)?;
        writer.flush()?;
    } else if Path::new(&args.output)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"))
    {
        let file = std::fs::File::create(&args.output)
            .with_context(|| format!("creating {}", args.output))?;
        let mut writer = BufWriter::new(file);
        write_ppm(&mut writer, &framebuffer)?;
        writer.flush()?;
        log::info!("wrote {}", args.output);
    } else {
        image::save_buffer(
            &args.output,
            &framebuffer.to_rgb8(),
            framebuffer.width(),
            framebuffer.height(),
            image::ColorType::Rgb8,
        )
        .with_context(|| format!("encoding {}", args.output))?;
        log::info!("wrote {}", args.output);
    }

    Ok(())
}
