//! Simulated entities and the context they are stepped in.

use crate::color::Hsl;
use crate::error::{NatureError, Result};
use crate::factory::{Behavior, EntityFactory};
use crate::integrator;
use crate::scene::SceneInfo;
use crate::surface::Surface;
use crate::vector::Vector;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of an entity, unique for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    fn next() -> Self {
        Self(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a step resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    /// In bounds and drawn
    Rendered,
    /// Left the scene and was handled by the variant's out-of-bounds handler
    Escaped,
    /// Died, either explicitly or by leaving the scene
    Died,
}

/// A simulated point
pub struct Entity {
    id: EntityId,
    pub position: Vector,
    pub velocity: Vector,
    pub acceleration: Vector,
    /// Multiplier applied to velocity when integrating position
    pub speed: f32,
    pub radius: f32,
    /// Hue offset used when drawing
    pub phase: f32,
    pub mass: Option<f32>,
    /// Named force sources; when present, acceleration is recomputed
    /// from them every step
    pub forces: Option<BTreeMap<String, Vector>>,
    behavior: Rc<Behavior>,
    state: Option<Box<dyn Any>>,
    alive: bool,
}

impl Entity {
    /// A bare entity with no custom behavior
    pub fn new(x: f32, y: f32) -> Self {
        Self::with_behavior(Rc::new(Behavior::default()), Vector::new(x, y))
    }

    pub(crate) fn with_behavior(behavior: Rc<Behavior>, position: Vector) -> Self {
        Self {
            id: EntityId::next(),
            position,
            velocity: Vector::ZERO,
            acceleration: Vector::ZERO,
            speed: 1.0,
            radius: 2.0,
            phase: 0.0,
            mass: None,
            forces: None,
            behavior,
            state: None,
            alive: true,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub(crate) fn behavior(&self) -> &Rc<Behavior> {
        &self.behavior
    }

    /// Set (or replace) a named force, enabling force accumulation
    pub fn set_force(&mut self, name: impl Into<String>, force: Vector) {
        self.forces
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), force);
    }

    pub fn remove_force(&mut self, name: &str) -> Option<Vector> {
        self.forces.as_mut()?.remove(name)
    }

    pub fn force(&self, name: &str) -> Option<Vector> {
        self.forces.as_ref()?.get(name).copied()
    }

    /// Attach variant-specific state
    pub fn set_state<T: Any>(&mut self, state: T) {
        self.state = Some(Box::new(state));
    }

    pub fn state<T: Any>(&self) -> Option<&T> {
        self.state.as_ref()?.downcast_ref()
    }

    pub fn state_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.state.as_mut()?.downcast_mut()
    }

    /// The entity's current color
    pub fn color(&self, age: u64) -> Hsl {
        Hsl::for_entity(age, self.phase)
    }

    /// Whether `position` lies outside the scene plus a margin of twice the
    /// radius on the low edges
    pub fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        let margin = -self.radius * 2.0;
        let (x, y) = (self.position.x(), self.position.y());
        x < margin || x > width || y < margin || y > height
    }

    /// Remove this entity from the scene. Returns its id the first time and
    /// `None` once it is already dead.
    pub fn die(&mut self, ctx: &mut StepContext<'_>) -> Option<EntityId> {
        if !self.alive {
            return None;
        }
        self.alive = false;
        *ctx.deaths += 1;
        log::trace!("entity {} died at {}", self.id, self.position);
        Some(self.id)
    }

    /// Render with the variant's draw override, or as a filled disc
    pub fn draw(&self, scene: &SceneInfo, surface: &mut dyn Surface) {
        match &self.behavior.capabilities.draw {
            Some(draw) => draw(self, scene, surface),
            None => surface.fill_disc(self.position, self.radius, self.color(scene.age)),
        }
    }

    /// Advance one frame: integrate, run the variant's step behavior,
    /// then resolve bounds and render.
    pub fn step(&mut self, ctx: &mut StepContext<'_>) -> Result<Fate> {
        let behavior = Rc::clone(&self.behavior);
        let info = *ctx.info;

        if let Some(setup) = &behavior.capabilities.draw_setup {
            setup(self, &info, ctx.surface());
        }

        integrator::step(self);

        if let Some(step) = &behavior.step {
            step(self, ctx);
        }

        self.check_finite()?;

        if !self.alive {
            return Ok(Fate::Died);
        }

        if self.is_out_of_bounds(info.width, info.height) {
            match &behavior.capabilities.out_of_bounds {
                Some(handler) => {
                    handler(self, ctx);
                    if self.alive {
                        return Ok(Fate::Escaped);
                    }
                }
                None => {
                    self.die(ctx);
                }
            }
            return Ok(Fate::Died);
        }

        self.draw(&info, ctx.surface());
        Ok(Fate::Rendered)
    }

    fn check_finite(&self) -> Result<()> {
        for (field, value) in [
            ("acceleration", self.acceleration),
            ("velocity", self.velocity),
            ("position", self.position),
        ] {
            if !value.is_finite() {
                return Err(NatureError::InvalidEntityState {
                    id: self.id,
                    field,
                    x: value.x(),
                    y: value.y(),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("position", &self.position)
            .field("velocity", &self.velocity)
            .field("acceleration", &self.acceleration)
            .field("speed", &self.speed)
            .field("radius", &self.radius)
            .field("phase", &self.phase)
            .field("mass", &self.mass)
            .field("forces", &self.forces)
            .field("alive", &self.alive)
            .finish_non_exhaustive()
    }
}

/// What an entity can see and do while it is being stepped.
///
/// The stepping entity itself is not part of `others`.
pub struct StepContext<'a> {
    info: &'a SceneInfo,
    before: &'a mut [Entity],
    after: &'a mut [Entity],
    spawned: &'a mut Vec<Entity>,
    surface: &'a mut dyn Surface,
    deaths: &'a mut usize,
}

impl<'a> StepContext<'a> {
    pub(crate) fn new(
        info: &'a SceneInfo,
        before: &'a mut [Entity],
        after: &'a mut [Entity],
        spawned: &'a mut Vec<Entity>,
        surface: &'a mut dyn Surface,
        deaths: &'a mut usize,
    ) -> Self {
        Self {
            info,
            before,
            after,
            spawned,
            surface,
            deaths,
        }
    }

    pub fn info(&self) -> &SceneInfo {
        self.info
    }

    pub fn width(&self) -> f32 {
        self.info.width
    }

    pub fn height(&self) -> f32 {
        self.info.height
    }

    pub fn age(&self) -> u64 {
        self.info.age
    }

    pub fn pointer(&self) -> Option<Vector> {
        self.info.pointer
    }

    pub fn surface(&mut self) -> &mut dyn Surface {
        &mut *self.surface
    }

    /// Living entities other than the one being stepped, in population order
    pub fn others(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.before
            .iter()
            .chain(self.after.iter())
            .filter(|e| e.alive)
    }

    pub fn others_mut(&mut self) -> impl Iterator<Item = &mut Entity> + '_ {
        self.before
            .iter_mut()
            .chain(self.after.iter_mut())
            .filter(|e| e.alive)
    }

    /// Queue an entity; it joins the population after this step pass and is
    /// first stepped next frame.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        self.spawned.push(entity);
        id
    }

    /// Build an entity from `factory` at `(x, y)` and queue it
    pub fn spawn_from(&mut self, factory: &EntityFactory, x: f32, y: f32) -> EntityId {
        let entity = factory.create(self.info, x, y);
        self.spawn(entity)
    }

    /// Kill another entity by identity. Returns `None` if no living entity
    /// has that id.
    pub fn kill(&mut self, id: EntityId) -> Option<EntityId> {
        let deaths = &mut *self.deaths;
        let target = self
            .before
            .iter_mut()
            .chain(self.after.iter_mut())
            .chain(self.spawned.iter_mut())
            .find(|e| e.id == id && e.alive)?;
        target.alive = false;
        *deaths += 1;
        log::trace!("entity {} killed", id);
        Some(id)
    }
}
