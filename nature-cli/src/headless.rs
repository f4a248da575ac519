//! Windowless runs: frames are driven by hand and drawn into a recorder.

use crate::demos::Demo;
use crate::settings::SceneArgs;
use nature_core::{ManualScheduler, Recorder};

pub fn run(demo: Demo, frames: usize, args: &SceneArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.resolve(demo)?;
    let mut scene = demo.builder(config).start(ManualScheduler::new())?;
    let mut surface = Recorder::new();

    println!(
        "{:>6} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "frame", "entities", "drawn", "spawned", "died", "culled"
    );
    for _ in 0..frames {
        let Some(report) = scene.frame(&mut surface)? else {
            break;
        };
        println!(
            "{:>6} {:>8} {:>8} {:>8} {:>8} {:>8}",
            report.age,
            report.population,
            surface.disc_count(),
            report.spawned,
            report.died,
            report.culled
        );
        surface.take();
    }

    scene.stop();
    Ok(())
}
