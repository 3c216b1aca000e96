//! Command implementations

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use neural_field::animation::{run_frames, run_frames_with, AnimationLoop, FixedRateHost};
use neural_field::core::Viewport;
use neural_field::particles::{FieldConfig, ParticleField};
use neural_field::render::{DrawSurface, PixelSurface};

use crate::cli::FieldArgs;

/// Load the configuration and apply command-line overrides.
fn build_config(args: &FieldArgs) -> Result<FieldConfig> {
    let mut config = match &args.config {
        Some(path) => FieldConfig::from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => FieldConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(count) = args.particles {
        config.particle_count = count;
    }
    if let Some(search) = args.search {
        config.neighbor_search = search.into();
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// `out.png` + 12 -> `out-00012.png`
fn numbered_path(out: &Path, frame: u64) -> PathBuf {
    let stem = out
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    let ext = out
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_string());
    out.with_file_name(format!("{}-{:05}.{}", stem, frame, ext))
}

fn save(surface: &PixelSurface, path: &Path) -> Result<()> {
    surface
        .to_image()
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

pub fn render(
    args: &FieldArgs,
    frames: u64,
    out: &Path,
    every: Option<u64>,
    fps: f64,
    realtime: bool,
) -> Result<()> {
    let config = build_config(args)?;
    let host = FixedRateHost::new(Viewport::new(args.width, args.height))
        .with_frame_rate(fps)
        .with_realtime(realtime);
    let mut animation = AnimationLoop::mount(host, Some(PixelSurface::new(0, 0)), config);

    match every.filter(|n| *n > 0) {
        Some(every) => {
            run_frames_with(&mut animation, frames, |animation| {
                let frame = animation.frame_count();
                match animation.renderer() {
                    Some(renderer) if frame % every == 0 => {
                        save(renderer.surface(), &numbered_path(out, frame))
                    }
                    _ => Ok(()),
                }
            })?;
        }
        None => {
            run_frames(&mut animation, frames);
        }
    }

    let renderer = animation
        .renderer()
        .context("Animation stopped before the last frame")?;
    let size = renderer.surface().size();
    save(renderer.surface(), out)?;

    println!(
        "Rendered {} frames at {}x{} ({} particles) -> {}",
        animation.frame_count(),
        size.width,
        size.height,
        renderer.field().len(),
        out.display()
    );
    Ok(())
}

pub fn simulate(args: &FieldArgs, frames: u64) -> Result<()> {
    let config = build_config(args)?;
    let viewport = Viewport::new(args.width, args.height);
    let mut rng = config.make_rng();
    let mut field = ParticleField::new(&config, viewport, &mut rng);

    let mut min = usize::MAX;
    let mut max = 0;
    let mut total = 0u64;
    for _ in 0..frames {
        field.step();
        let links = field.update_links();
        min = min.min(links);
        max = max.max(links);
        total += links as u64;
    }

    if frames == 0 {
        min = 0;
    }
    let mean = if frames > 0 { total as f64 / frames as f64 } else { 0.0 };

    println!("Particles:  {}", field.len());
    println!("Surface:    {}x{}", viewport.width, viewport.height);
    println!("Search:     {:?}", field.neighbor_search());
    println!("Frames:     {}", frames);
    println!("Links/frame min {} / mean {:.1} / max {}", min, mean, max);
    Ok(())
}

pub fn print_default_config() -> Result<()> {
    println!("{}", FieldConfig::default().to_json_pretty()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_path() {
        assert_eq!(
            numbered_path(Path::new("out/field.png"), 12),
            PathBuf::from("out/field-00012.png")
        );
        assert_eq!(numbered_path(Path::new("field"), 3), PathBuf::from("field-00003.png"));
    }
}
