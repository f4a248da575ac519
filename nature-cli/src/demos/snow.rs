//! Flakes drifting down with a sine wobble. Leaving the scene wraps a flake
//! around instead of killing it.

use nature_core::{sin, EntityFactory, Listeners, Scene, SceneBuilder, SceneConfig, Vector};
use rand::Rng;
use std::cell::Cell;
use std::rc::Rc;

const INITIAL_FLAKES: usize = 200;
const WIND_STEP: f32 = 0.25;
const MAX_WIND: f32 = 2.0;

struct Flake {
    wobble: f32,
}

pub fn scene(config: SceneConfig) -> SceneBuilder {
    let wind = Rc::new(Cell::new(0.0f32));
    let flakes = flakes(Rc::clone(&wind));
    let seed = flakes.clone();

    Scene::builder(config)
        .on_init(move |scene| {
            let mut rng = rand::thread_rng();
            for _ in 0..INITIAL_FLAKES {
                let x = rng.gen_range(0.0..scene.width());
                let y = rng.gen_range(0.0..scene.height());
                scene.spawn(&seed, x, y);
            }
        })
        .on_frame(move |scene| {
            let x = rand::thread_rng().gen_range(0.0..scene.width());
            scene.spawn(&flakes, x, 0.0);
        })
        .listeners(Listeners::new().on("keydown", move |_, event| {
            let delta = match event.key.as_deref() {
                Some("ArrowLeft") => -WIND_STEP,
                Some("ArrowRight") => WIND_STEP,
                _ => return,
            };
            wind.set((wind.get() + delta).clamp(-MAX_WIND, MAX_WIND));
            log::info!("wind is now {:.2}", wind.get());
        }))
}

fn flakes(wind: Rc<Cell<f32>>) -> EntityFactory {
    EntityFactory::builder()
        .init(|flake, _| {
            let mut rng = rand::thread_rng();
            flake.radius = rng.gen_range(1.0..3.5);
            flake.speed = flake.radius / 2.0;
            flake.velocity = Vector::new(0.0, 1.0);
            flake.phase = rng.gen_range(180.0..230.0);
            flake.set_state(Flake {
                wobble: rng.gen_range(0.0..360.0),
            });
        })
        .step(move |flake, ctx| {
            let wobble = flake.state::<Flake>().map_or(0.0, |f| f.wobble);
            let angle = (ctx.age() % 360) as f32 * 2.0 + wobble;
            let drift = sin(angle) * 0.5 + wind.get();
            flake.position = flake.position.plus(Vector::new(drift * flake.speed, 0.0));
        })
        .out_of_bounds(|flake, ctx| {
            let (width, height) = (ctx.width(), ctx.height());
            if flake.position.y() > height {
                let x = rand::thread_rng().gen_range(0.0..width);
                flake.position = Vector::new(x, -flake.radius);
            } else if flake.position.x() > width {
                flake.position = flake.position.with_x(0.0);
            } else {
                flake.position = flake.position.with_x(width);
            }
        })
        .build()
}
