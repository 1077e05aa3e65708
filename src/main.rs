//! Command-line driver for the `vitrine` scroll-synchronized showcase director.

use std::path::Path;

use vitrine::options::Options;
use vitrine::showcase::Showcase;

/// Simulated frame rate for the scroll sweep.
const FRAME_DT: f32 = 1.0 / 60.0;
/// Frames for each sweep direction.
const SWEEP_FRAMES: u32 = 600;

fn run(model_path: &str, options_path: Option<&str>) -> Result<(), String> {
    let options = match options_path {
        Some(path) => Options::load(Path::new(path))
            .map_err(|e| format!("failed to load options: {e}"))?,
        None => Options::default(),
    };

    let mut last_decile = 0;
    let mut showcase =
        Showcase::load(Path::new(model_path), options, |fraction| {
            let decile = (fraction * 10.0) as u32;
            if decile > last_decile {
                last_decile = decile;
                log::info!("loading model: {}%", decile * 10);
            }
        })
        .map_err(|e| format!("{e}"))?;

    // Sweep the scroll position through the whole narrative and back,
    // logging the stage at each scene boundary.
    let max = showcase.max_scroll();
    for frame in 0..=SWEEP_FRAMES * 2 {
        let t = frame as f32 / SWEEP_FRAMES as f32;
        let scroll = if t <= 1.0 { t * max } else { (2.0 - t) * max };
        showcase.advance(scroll, FRAME_DT);

        if frame % (SWEEP_FRAMES / 10) == 0 {
            let snapshot = showcase.render();
            log::info!(
                "scroll {:>6.0}px  camera {:?}  captions [{}]",
                scroll,
                snapshot.camera.position,
                snapshot
                    .captions
                    .iter()
                    .map(|(name, _)| *name)
                    .collect::<Vec<_>>()
                    .join(", "),
            );
        }
    }

    log::info!(
        "sweep complete: {} scenes, {} particles, nav visible: {}",
        showcase.director().scenes().len(),
        showcase.render().particles.len(),
        showcase.nav_visible(),
    );
    Ok(())
}

fn main() {
    env_logger::init();

    let model_path = match std::env::args().nth(1) {
        Some(arg) => arg,
        None => {
            log::error!("Usage: vitrine <model.glb> [options.toml]");
            std::process::exit(1);
        }
    };
    let options_path = std::env::args().nth(2);

    if let Err(e) = run(&model_path, options_path.as_deref()) {
        log::error!("{e}");
        log::error!("Error loading experience");
        std::process::exit(1);
    }
}
