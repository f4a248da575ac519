//! Boids that steer toward the pointer while keeping apart from each other.

use nature_core::{cos, sin, EntityFactory, Hsl, Listeners, Scene, SceneBuilder, SceneConfig, Vector};
use rand::Rng;

const INITIAL_BOIDS: usize = 120;
const BURST: usize = 12;
const MAX_SPEED: f32 = 3.0;
const NEIGHBOUR_RADIUS: f32 = 24.0;

pub fn scene(config: SceneConfig) -> SceneBuilder {
    let boids = boids();
    let flock = boids.clone();

    Scene::builder(config)
        .on_init(move |scene| {
            let mut rng = rand::thread_rng();
            for _ in 0..INITIAL_BOIDS {
                let x = rng.gen_range(0.0..scene.width());
                let y = rng.gen_range(0.0..scene.height());
                scene.spawn(&boids, x, y);
            }
        })
        .listeners(
            Listeners::new()
                // registering is enough: the scene tracks the pointer
                .on_mouse(|_, _, _| {})
                .on_click(move |scene, x, y| {
                    for _ in 0..BURST {
                        scene.spawn(&flock, x, y);
                    }
                }),
        )
}

fn boids() -> EntityFactory {
    EntityFactory::builder()
        .init(|boid, _| {
            let mut rng = rand::thread_rng();
            let heading = rng.gen_range(0.0..360.0);
            boid.velocity = Vector::new(cos(heading), sin(heading)).times(2.0);
            boid.radius = 3.0;
            boid.phase = rng.gen_range(0.0..60.0);
            boid.mass = Some(1.0);
        })
        .step(|boid, ctx| {
            let mut separation = Vector::ZERO;
            let mut heading = Vector::ZERO;
            let mut neighbours = 0;
            for other in ctx.others() {
                let distance = boid.position.distance(other.position);
                if distance < NEIGHBOUR_RADIUS {
                    let away = boid.position.minus(other.position).normalize();
                    separation = separation.plus(away.times(1.0 - distance / NEIGHBOUR_RADIUS));
                    heading = heading.plus(other.velocity);
                    neighbours += 1;
                }
            }

            let seek = ctx
                .pointer()
                .map_or(Vector::ZERO, |p| p.minus(boid.position).normalize().times(0.05));
            boid.set_force("seek", seek);
            boid.set_force("separate", separation.times(0.15));
            if neighbours > 0 {
                let average = heading.times(1.0 / neighbours as f32);
                boid.set_force("align", average.minus(boid.velocity).times(0.02));
            } else {
                boid.remove_force("align");
            }

            if boid.velocity.length() > MAX_SPEED {
                boid.velocity = boid.velocity.normalize().times(MAX_SPEED);
            }
        })
        .out_of_bounds(|boid, ctx| {
            boid.position = Vector::new(
                boid.position.x().rem_euclid(ctx.width()),
                boid.position.y().rem_euclid(ctx.height()),
            );
        })
        .draw(|boid, scene, surface| {
            let color = boid.color(scene.age);
            surface.fill_disc(boid.position, boid.radius, color);
            let nose = boid
                .position
                .plus(boid.velocity.normalize().times(boid.radius * 1.5));
            surface.fill_disc(nose, boid.radius * 0.5, Hsl::new(color.hue, color.saturation, 0.9));
        })
        .build()
}
