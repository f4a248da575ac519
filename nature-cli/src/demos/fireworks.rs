//! Rockets that climb under gravity and burst into fading sparks.

use nature_core::{cos, sin, EntityFactory, Hsl, Listeners, Scene, SceneBuilder, SceneConfig, Vector};
use rand::Rng;

const GRAVITY: Vector = Vector::new(0.0, 0.12);
const SPARKS_PER_BURST: usize = 40;
const LAUNCH_CHANCE: f64 = 0.04;

/// Frames left before a rocket bursts
struct Fuse(u32);

pub fn scene(config: SceneConfig) -> SceneBuilder {
    let launch = rockets();
    let click = launch.clone();

    Scene::builder(config)
        .on_frame(move |scene| {
            let mut rng = rand::thread_rng();
            if rng.gen_bool(LAUNCH_CHANCE) {
                let x = rng.gen_range(scene.width() * 0.1..scene.width() * 0.9);
                scene.spawn(&launch, x, scene.height());
            }
        })
        .listeners(Listeners::new().on_click(move |scene, x, _| {
            scene.spawn(&click, x, scene.height());
        }))
}

fn rockets() -> EntityFactory {
    let sparks = sparks();

    EntityFactory::builder()
        .init(|rocket, scene| {
            let mut rng = rand::thread_rng();
            let climb = rng.gen_range(9.0..12.5) * scene.height / 600.0;
            rocket.velocity = Vector::new(rng.gen_range(-1.5..1.5), -climb);
            rocket.radius = 3.0;
            rocket.phase = rng.gen_range(0.0..360.0);
            rocket.mass = Some(1.0);
            rocket.set_force("gravity", GRAVITY);
            rocket.set_state(Fuse(rng.gen_range(45..75)));
        })
        .draw_setup(|rocket, scene, surface| {
            // trail left at the pre-step position
            let color = rocket.color(scene.age);
            surface.fill_disc(
                rocket.position,
                rocket.radius * 0.6,
                Hsl::new(color.hue, color.saturation, 0.4),
            );
        })
        .step(move |rocket, ctx| {
            let Some(fuse) = rocket.state_mut::<Fuse>() else {
                return;
            };
            fuse.0 = fuse.0.saturating_sub(1);
            if fuse.0 > 0 {
                return;
            }
            if rocket.die(ctx).is_none() {
                return;
            }
            for _ in 0..SPARKS_PER_BURST {
                let mut spark = sparks.create(ctx.info(), rocket.position.x(), rocket.position.y());
                spark.phase = rocket.phase;
                spark.velocity = spark.velocity.plus(rocket.velocity.times(0.3));
                ctx.spawn(spark);
            }
        })
        .build()
}

fn sparks() -> EntityFactory {
    EntityFactory::builder()
        .init(|spark, _| {
            let mut rng = rand::thread_rng();
            let angle = rng.gen_range(0.0..360.0);
            let power = rng.gen_range(0.5..4.0);
            spark.velocity = Vector::new(cos(angle), sin(angle)).times(power);
            spark.radius = rng.gen_range(1.5..3.0);
            spark.mass = Some(1.0);
            spark.set_force("gravity", GRAVITY.times(0.5));
        })
        .step(|spark, ctx| {
            spark.set_force("drag", spark.velocity.times(-0.03));
            spark.radius *= 0.965;
            if spark.radius < 0.3 {
                spark.die(ctx);
            }
        })
        .build()
}
