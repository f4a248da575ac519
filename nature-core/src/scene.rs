//! The scene: entity population, frame clock and the per-frame loop.

use crate::config::SceneConfig;
use crate::entity::{Entity, EntityId, Fate, StepContext};
use crate::error::Result;
use crate::factory::EntityFactory;
use crate::input::{InputEvent, Listeners, Viewport};
use crate::schedule::{FrameHandle, FrameScheduler};
use crate::surface::Surface;
use crate::vector::Vector;
use std::collections::VecDeque;
use std::fmt;

/// Read-only snapshot of scene-level state handed to entity behavior
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneInfo {
    pub width: f32,
    pub height: f32,
    pub age: u64,
    pub pointer: Option<Vector>,
}

/// Counts describing what one frame did
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Scene age the frame ran at
    pub age: u64,
    pub culled: usize,
    pub spawned: usize,
    pub stepped: usize,
    pub rendered: usize,
    pub escaped: usize,
    pub died: usize,
    /// Population once the frame finished
    pub population: usize,
}

pub type FrameFn = dyn FnMut(&mut Scene);
pub type SceneInitFn = dyn FnOnce(&mut Scene);

/// Owner of the entity population and the frame loop
pub struct Scene {
    config: SceneConfig,
    age: u64,
    entities: Vec<Entity>,
    pointer: Option<Vector>,
    viewport: Viewport,
    frame_hook: Option<Box<FrameFn>>,
    listeners: Listeners,
    input: VecDeque<InputEvent>,
    scheduler: Box<dyn FrameScheduler>,
    next_tick: Option<FrameHandle>,
    running: bool,
}

impl Scene {
    pub fn builder(config: SceneConfig) -> SceneBuilder {
        SceneBuilder::new(config)
    }

    pub fn width(&self) -> f32 {
        self.config.width
    }

    pub fn height(&self) -> f32 {
        self.config.height
    }

    /// Frames run so far
    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn entity_cap(&self) -> Option<usize> {
        self.config.entity_cap
    }

    pub fn set_entity_cap(&mut self, cap: Option<usize>) {
        self.config.entity_cap = cap;
    }

    /// Last known pointer position in surface coordinates
    pub fn pointer(&self) -> Option<Vector> {
        self.pointer
    }

    pub fn set_pointer(&mut self, pointer: Option<Vector>) {
        self.pointer = pointer;
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn info(&self) -> SceneInfo {
        SceneInfo {
            width: self.config.width,
            height: self.config.height,
            age: self.age,
            pointer: self.pointer,
        }
    }

    /// The population in step order (oldest first)
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    /// Append an entity to the population
    pub fn push(&mut self, entity: Entity) -> EntityId {
        let id = entity.id();
        self.entities.push(entity);
        id
    }

    /// Build an entity from `factory` at `(x, y)` and append it
    pub fn spawn(&mut self, factory: &EntityFactory, x: f32, y: f32) -> EntityId {
        let entity = factory.create(&self.info(), x, y);
        self.push(entity)
    }

    /// Remove an entity by identity. Removing an id twice removes nothing
    /// the second time.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id() == id)?;
        Some(self.entities.remove(index))
    }

    /// Queue raw input for the listeners; it is applied at the next frame
    pub fn dispatch(&mut self, event: InputEvent) {
        self.input.push_back(event);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The outstanding frame request, if any
    pub fn pending_tick(&self) -> Option<FrameHandle> {
        self.next_tick
    }

    /// Cancel the scheduled tick. Frames delivered afterwards are ignored.
    /// Returns `false` if the scene was already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        if let Some(handle) = self.next_tick.take() {
            self.scheduler.cancel_frame(handle);
        }
        log::info!("scene stopped at age {} with {} entities", self.age, self.len());
        true
    }

    /// Run one frame: apply queued input, cull, run the frame hook, step
    /// every entity, advance the clock and schedule the next tick.
    ///
    /// Returns `Ok(None)` when the scene has been stopped. A step that
    /// leaves an entity with non-finite state stops the scene and returns
    /// the error.
    pub fn frame(&mut self, surface: &mut dyn Surface) -> Result<Option<FrameReport>> {
        if !self.running {
            log::warn!("frame delivered to a stopped scene, ignoring");
            return Ok(None);
        }
        self.next_tick = None;

        let mut report = FrameReport {
            age: self.age,
            ..FrameReport::default()
        };

        self.apply_input();
        report.culled = self.cull();

        let before_hook = self.entities.len();
        if let Some(mut hook) = self.frame_hook.take() {
            hook(self);
            self.frame_hook = Some(hook);
        }
        report.spawned = self.entities.len().saturating_sub(before_hook);

        if self.config.clear_each_frame {
            surface.clear();
        }

        if let Err(e) = self.step_entities(surface, &mut report) {
            log::error!("frame {} failed: {}", self.age, e);
            self.stop();
            return Err(e);
        }

        self.age += 1;
        report.population = self.entities.len();
        log::debug!(
            "frame {}: {} entities ({} culled, {} spawned, {} died)",
            report.age,
            report.population,
            report.culled,
            report.spawned,
            report.died
        );

        // The frame hook or a listener may have stopped the scene.
        if self.running {
            self.next_tick = Some(self.scheduler.request_frame());
        }
        Ok(Some(report))
    }

    /// Discard the oldest entities beyond the cap. No death hook runs.
    fn cull(&mut self) -> usize {
        let Some(cap) = self.config.entity_cap else {
            return 0;
        };
        let excess = self.entities.len().saturating_sub(cap);
        self.entities.drain(..excess);
        excess
    }

    /// Step every entity present at the start of the pass. Deaths are
    /// marked during the pass and compacted afterwards, so self-removal
    /// never disturbs iteration.
    fn step_entities(&mut self, surface: &mut dyn Surface, report: &mut FrameReport) -> Result<()> {
        let info = self.info();
        let mut spawned = Vec::new();
        let mut deaths = 0;
        let mut outcome = Ok(());

        for index in 0..self.entities.len() {
            let (before, rest) = self.entities.split_at_mut(index);
            let Some((entity, after)) = rest.split_first_mut() else {
                break;
            };
            if !entity.is_alive() {
                continue;
            }
            let mut ctx = StepContext::new(
                &info,
                before,
                after,
                &mut spawned,
                &mut *surface,
                &mut deaths,
            );
            report.stepped += 1;
            match entity.step(&mut ctx) {
                Ok(Fate::Rendered) => report.rendered += 1,
                Ok(Fate::Escaped) => report.escaped += 1,
                Ok(Fate::Died) => {}
                Err(e) => {
                    outcome = Err(e);
                    break;
                }
            }
        }

        self.entities.retain(Entity::is_alive);
        report.died = deaths;
        report.spawned += spawned.len();
        self.entities
            .extend(spawned.into_iter().filter(Entity::is_alive));
        outcome
    }

    fn apply_input(&mut self) {
        if self.input.is_empty() {
            return;
        }
        let mut listeners = std::mem::take(&mut self.listeners);
        while let Some(event) = self.input.pop_front() {
            match event {
                InputEvent::PointerMove { page } => {
                    if let Some(handler) = listeners.mouse.as_mut() {
                        let local = self.viewport.to_local(page);
                        self.pointer = Some(local);
                        handler(self, local.x(), local.y());
                    }
                }
                InputEvent::Click { page } => {
                    if let Some(handler) = listeners.click.as_mut() {
                        let local = self.viewport.to_local(page);
                        handler(self, local.x(), local.y());
                    }
                }
                InputEvent::Native(event) => {
                    if let Some(handler) = listeners.native.get_mut(&event.name) {
                        handler(self, &event);
                    }
                }
            }
        }
        self.listeners = listeners;
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("config", &self.config)
            .field("age", &self.age)
            .field("entities", &self.entities.len())
            .field("pointer", &self.pointer)
            .field("listeners", &self.listeners)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

/// Collects the frame hook, init hook and listeners of a scene
pub struct SceneBuilder {
    config: SceneConfig,
    frame: Option<Box<FrameFn>>,
    init: Option<Box<SceneInitFn>>,
    listeners: Listeners,
    viewport: Viewport,
}

impl SceneBuilder {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            frame: None,
            init: None,
            listeners: Listeners::new(),
            viewport: Viewport::new(),
        }
    }

    /// Scene-level logic run every frame before entities are stepped
    pub fn on_frame(mut self, frame: impl FnMut(&mut Scene) + 'static) -> Self {
        self.frame = Some(Box::new(frame));
        self
    }

    /// Setup run once, synchronously, when the scene starts
    pub fn on_init(mut self, init: impl FnOnce(&mut Scene) + 'static) -> Self {
        self.init = Some(Box::new(init));
        self
    }

    pub fn listeners(mut self, listeners: Listeners) -> Self {
        self.listeners = listeners;
        self
    }

    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Validate the configuration, run the init hook, register listeners
    /// and request the first frame.
    pub fn start(self, scheduler: impl FrameScheduler + 'static) -> Result<Scene> {
        self.config.validate()?;

        let mut scene = Scene {
            config: self.config,
            age: 0,
            entities: Vec::new(),
            pointer: None,
            viewport: self.viewport,
            frame_hook: self.frame,
            listeners: Listeners::new(),
            input: VecDeque::new(),
            scheduler: Box::new(scheduler),
            next_tick: None,
            running: true,
        };

        if let Some(init) = self.init {
            init(&mut scene);
        }

        if self.listeners.has_mouse() {
            scene.pointer = Some(Vector::new(scene.width() / 2.0, scene.height() / 2.0));
        }
        scene.listeners = self.listeners;

        scene.next_tick = Some(scene.scheduler.request_frame());
        log::info!(
            "scene started: {}x{}, {} entities, cap {:?}",
            scene.width(),
            scene.height(),
            scene.len(),
            scene.entity_cap()
        );
        Ok(scene)
    }
}
