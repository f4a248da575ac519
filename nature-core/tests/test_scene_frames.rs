//! Tests for the scene frame loop: culling, spawning, ordering and shutdown

use nature_core::tests::test_helpers::{
    empty_scene, run_frames, start_scene, CountingScheduler,
};
use nature_core::{DrawCommand, Entity, EntityFactory, Recorder, Scene, SceneConfig, Vector};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_cull_discards_oldest_without_death() {
    let mut scene = start_scene(Scene::builder(
        SceneConfig::new(100.0, 100.0).with_entity_cap(5),
    ));
    let ids: Vec<_> = (0..8)
        .map(|i| scene.push(Entity::new(i as f32, 10.0)))
        .collect();

    let reports = run_frames(&mut scene, &mut Recorder::new(), 1);
    assert_eq!(reports[0].culled, 3);
    assert_eq!(reports[0].died, 0);
    assert_eq!(reports[0].stepped, 5);
    let remaining: Vec<_> = scene.entities().iter().map(Entity::id).collect();
    assert_eq!(remaining, ids[3..].to_vec());

    let reports = run_frames(&mut scene, &mut Recorder::new(), 1);
    assert_eq!(reports[0].culled, 0);
    assert_eq!(scene.len(), 5);
}

#[test]
fn test_zero_cap_empties_population() {
    let mut scene = start_scene(Scene::builder(
        SceneConfig::new(100.0, 100.0).with_entity_cap(0),
    ));
    scene.push(Entity::new(1.0, 1.0));
    let reports = run_frames(&mut scene, &mut Recorder::new(), 1);
    assert_eq!(reports[0].culled, 1);
    assert!(scene.is_empty());
}

#[test]
fn test_cap_can_change_at_runtime() {
    let mut scene = empty_scene(100.0, 100.0);
    for _ in 0..4 {
        scene.push(Entity::new(1.0, 1.0));
    }
    scene.set_entity_cap(Some(2));
    run_frames(&mut scene, &mut Recorder::new(), 1);
    assert_eq!(scene.len(), 2);
}

#[test]
fn test_frame_hook_spawns_are_stepped_same_frame() {
    let mut scene = start_scene(Scene::builder(SceneConfig::new(100.0, 100.0)).on_frame(
        |scene| {
            if scene.age() == 0 {
                let mut e = Entity::new(10.0, 10.0);
                e.velocity = Vector::new(1.0, 0.0);
                scene.push(e);
            }
        },
    ));

    let reports = run_frames(&mut scene, &mut Recorder::new(), 1);
    assert_eq!(reports[0].spawned, 1);
    assert_eq!(reports[0].stepped, 1);
    assert_eq!(scene.entities()[0].position, Vector::new(11.0, 10.0));
}

#[test]
fn test_entity_spawns_join_after_the_pass() {
    let child = EntityFactory::builder()
        .init(|e, _| e.velocity = Vector::new(0.0, 1.0))
        .build();
    let parent = EntityFactory::builder()
        .init(|e, _| e.set_state(false))
        .step(move |e, ctx| {
            if let Some(spawned) = e.state_mut::<bool>() {
                if !*spawned {
                    *spawned = true;
                    ctx.spawn_from(&child, 20.0, 20.0);
                }
            }
        })
        .build();
    let mut scene = empty_scene(100.0, 100.0);
    scene.spawn(&parent, 50.0, 50.0);

    let reports = run_frames(&mut scene, &mut Recorder::new(), 1);
    assert_eq!(reports[0].stepped, 1);
    assert_eq!(reports[0].spawned, 1);
    assert_eq!(scene.len(), 2);
    assert_eq!(scene.entities()[1].position, Vector::new(20.0, 20.0));

    run_frames(&mut scene, &mut Recorder::new(), 1);
    assert_eq!(scene.entities()[1].position, Vector::new(20.0, 21.0));
}

#[test]
fn test_self_removal_does_not_skip_neighbours() {
    // Every other entity dies on its first step; each survivor must still
    // be stepped exactly once.
    let factory = EntityFactory::builder()
        .init(|e, _| e.velocity = Vector::new(1.0, 0.0))
        .step(|e, ctx| {
            if e.state::<bool>() == Some(&true) {
                e.die(ctx);
            }
        })
        .build();
    let mut scene = empty_scene(100.0, 100.0);
    let mut survivors = Vec::new();
    for i in 0..6 {
        let id = scene.spawn(&factory, 10.0, 10.0 + i as f32);
        let doomed = i % 2 == 0;
        scene.entity_mut(id).unwrap().set_state(doomed);
        if !doomed {
            survivors.push(id);
        }
    }

    let reports = run_frames(&mut scene, &mut Recorder::new(), 1);
    assert_eq!(reports[0].stepped, 6);
    assert_eq!(reports[0].died, 3);
    let ids: Vec<_> = scene.entities().iter().map(Entity::id).collect();
    assert_eq!(ids, survivors);
    for e in scene.entities() {
        assert_eq!(e.position.x(), 11.0);
    }
}

#[test]
fn test_killed_later_neighbour_is_not_stepped() {
    let mut scene = empty_scene(100.0, 100.0);
    let victim_slot = Rc::new(RefCell::new(None));
    let target = Rc::clone(&victim_slot);
    let hunter = EntityFactory::builder()
        .step(move |_, ctx| {
            if let Some(id) = *target.borrow() {
                ctx.kill(id);
            }
        })
        .build();
    scene.spawn(&hunter, 50.0, 50.0);
    let victim = scene.push(Entity::new(10.0, 10.0));
    *victim_slot.borrow_mut() = Some(victim);

    let mut surface = Recorder::new();
    let reports = run_frames(&mut scene, &mut surface, 1);
    assert_eq!(reports[0].stepped, 1);
    assert_eq!(reports[0].died, 1);
    assert_eq!(surface.disc_count(), 1);
    assert_eq!(scene.len(), 1);
}

#[test]
fn test_ten_frame_spawn_scenario() {
    let config = SceneConfig::new(100.0, 50.0);
    let mut scene = start_scene(Scene::builder(config).on_frame(|scene| {
        let mut e = Entity::new(0.0, scene.height() / 2.0);
        e.velocity = Vector::new(2.0, 0.0);
        scene.push(e);
    }));

    run_frames(&mut scene, &mut Recorder::new(), 10);
    assert_eq!(scene.len(), 10);
    for (k, e) in scene.entities().iter().enumerate() {
        let expected = (10 - k) as f32 * 2.0;
        assert_eq!(
            e.position,
            Vector::new(expected, 25.0),
            "entity spawned at frame {}",
            k
        );
    }
}

#[test]
fn test_init_runs_before_first_frame() {
    let mut scene = start_scene(Scene::builder(SceneConfig::new(100.0, 100.0)).on_init(
        |scene| {
            assert_eq!(scene.age(), 0);
            assert!(scene.pointer().is_none());
            for _ in 0..3 {
                scene.push(Entity::new(1.0, 1.0));
            }
            scene.set_entity_cap(Some(2));
        },
    ));
    assert_eq!(scene.len(), 3);
    run_frames(&mut scene, &mut Recorder::new(), 1);
    assert_eq!(scene.len(), 2);
}

#[test]
fn test_age_and_scheduling() {
    let scheduler = CountingScheduler::new();
    let mut scene = Scene::builder(SceneConfig::new(10.0, 10.0))
        .start(scheduler.clone())
        .unwrap();
    assert_eq!(scheduler.requested(), 1);
    assert!(scene.pending_tick().is_some());

    let reports = run_frames(&mut scene, &mut Recorder::new(), 3);
    assert_eq!(scene.age(), 3);
    assert_eq!(scheduler.requested(), 4);
    let ages: Vec<_> = reports.iter().map(|r| r.age).collect();
    assert_eq!(ages, vec![0, 1, 2]);
}

#[test]
fn test_stop_cancels_tick_and_ignores_frames() {
    let scheduler = CountingScheduler::new();
    let mut scene = Scene::builder(SceneConfig::new(10.0, 10.0))
        .start(scheduler.clone())
        .unwrap();
    run_frames(&mut scene, &mut Recorder::new(), 1);

    assert!(scene.stop());
    assert_eq!(scheduler.cancelled(), 1);
    assert!(scene.pending_tick().is_none());
    assert!(!scene.stop());

    assert!(scene.frame(&mut Recorder::new()).unwrap().is_none());
    assert_eq!(scene.age(), 1);
    assert_eq!(scheduler.requested(), 2);
}

#[test]
fn test_frame_hook_can_stop_scene() {
    let scheduler = CountingScheduler::new();
    let mut scene = Scene::builder(SceneConfig::new(10.0, 10.0))
        .on_frame(|scene| {
            if scene.age() == 1 {
                scene.stop();
            }
        })
        .start(scheduler.clone())
        .unwrap();

    let reports = run_frames(&mut scene, &mut Recorder::new(), 5);
    assert_eq!(reports.len(), 2);
    assert_eq!(scene.age(), 2);
    assert_eq!(scheduler.requested(), 2);
    assert!(!scene.is_running());
}

#[test]
fn test_surface_cleared_before_step_pass() {
    let mut scene = empty_scene(100.0, 100.0);
    scene.push(Entity::new(1.0, 1.0));
    let mut surface = Recorder::new();
    run_frames(&mut scene, &mut surface, 1);
    assert_eq!(surface.commands()[0], DrawCommand::Clear);
    assert_eq!(surface.discs_since_clear(), 1);

    let mut config = SceneConfig::new(100.0, 100.0);
    config.clear_each_frame = false;
    let mut scene = start_scene(Scene::builder(config));
    scene.push(Entity::new(1.0, 1.0));
    let mut surface = Recorder::new();
    run_frames(&mut scene, &mut surface, 2);
    assert!(!surface.commands().contains(&DrawCommand::Clear));
    assert_eq!(surface.disc_count(), 2);
}

#[test]
fn test_invalid_config_is_rejected() {
    let result = Scene::builder(SceneConfig::new(-1.0, 10.0)).start(CountingScheduler::new());
    assert!(result.is_err());
}

#[test]
fn test_empty_scene_runs() {
    let mut scene = empty_scene(10.0, 10.0);
    let reports = run_frames(&mut scene, &mut Recorder::new(), 3);
    assert!(reports.iter().all(|r| r.population == 0 && r.stepped == 0));
}
