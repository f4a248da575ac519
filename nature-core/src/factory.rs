//! Entity variants built from caller-supplied behavior.
//!
//! A variant is a capability set: a step behavior plus optional
//! out-of-bounds, draw and draw-setup overrides. Every entity created by
//! an `EntityFactory` shares its variant's capabilities.

use crate::entity::{Entity, StepContext};
use crate::scene::SceneInfo;
use crate::surface::Surface;
use crate::vector::Vector;
use std::fmt;
use std::rc::Rc;

/// Per-frame custom logic, also the signature of out-of-bounds handlers
pub type StepFn = dyn Fn(&mut Entity, &mut StepContext<'_>);
/// One-time setup run right after an entity is positioned
pub type InitFn = dyn Fn(&mut Entity, &SceneInfo);
/// Draw override and draw setup
pub type DrawFn = dyn Fn(&Entity, &SceneInfo, &mut dyn Surface);

/// Optional capabilities a variant may override
#[derive(Default)]
pub struct Capabilities {
    pub(crate) out_of_bounds: Option<Box<StepFn>>,
    pub(crate) draw: Option<Box<DrawFn>>,
    pub(crate) draw_setup: Option<Box<DrawFn>>,
}

impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called instead of dying when the entity leaves the scene
    pub fn out_of_bounds(
        mut self,
        handler: impl Fn(&mut Entity, &mut StepContext<'_>) + 'static,
    ) -> Self {
        self.out_of_bounds = Some(Box::new(handler));
        self
    }

    /// Replaces the default disc rendering
    pub fn draw(mut self, draw: impl Fn(&Entity, &SceneInfo, &mut dyn Surface) + 'static) -> Self {
        self.draw = Some(Box::new(draw));
        self
    }

    /// Runs at the start of every step, before integration
    pub fn draw_setup(
        mut self,
        setup: impl Fn(&Entity, &SceneInfo, &mut dyn Surface) + 'static,
    ) -> Self {
        self.draw_setup = Some(Box::new(setup));
        self
    }

    /// Take every capability `other` defines, keeping ours otherwise
    fn merge(mut self, other: Capabilities) -> Self {
        if other.out_of_bounds.is_some() {
            self.out_of_bounds = other.out_of_bounds;
        }
        if other.draw.is_some() {
            self.draw = other.draw;
        }
        if other.draw_setup.is_some() {
            self.draw_setup = other.draw_setup;
        }
        self
    }
}

/// Shared behavior table of one variant
#[derive(Default)]
pub(crate) struct Behavior {
    pub(crate) step: Option<Box<StepFn>>,
    pub(crate) capabilities: Capabilities,
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Behavior")
            .field("step", &self.step.is_some())
            .field("out_of_bounds", &self.capabilities.out_of_bounds.is_some())
            .field("draw", &self.capabilities.draw.is_some())
            .field("draw_setup", &self.capabilities.draw_setup.is_some())
            .finish()
    }
}

/// Constructor for one entity variant. Cloning is cheap; clones share
/// the same behavior.
#[derive(Clone)]
pub struct EntityFactory {
    behavior: Rc<Behavior>,
    init: Option<Rc<InitFn>>,
}

impl EntityFactory {
    pub fn builder() -> FactoryBuilder {
        FactoryBuilder::default()
    }

    /// Build an entity at `(x, y)` and run the variant's init behavior
    pub fn create(&self, scene: &SceneInfo, x: f32, y: f32) -> Entity {
        let mut entity = Entity::with_behavior(Rc::clone(&self.behavior), Vector::new(x, y));
        if let Some(init) = &self.init {
            init(&mut entity, scene);
        }
        entity
    }

    /// Whether two factories produce the same variant
    pub fn same_variant(&self, other: &EntityFactory) -> bool {
        Rc::ptr_eq(&self.behavior, &other.behavior)
    }

    /// Whether `entity` was built by this factory (or a clone of it)
    pub fn made(&self, entity: &Entity) -> bool {
        Rc::ptr_eq(&self.behavior, entity.behavior())
    }
}

impl fmt::Debug for EntityFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityFactory")
            .field("behavior", &self.behavior)
            .field("init", &self.init.is_some())
            .finish()
    }
}

/// Builder for `EntityFactory`
#[derive(Default)]
pub struct FactoryBuilder {
    step: Option<Box<StepFn>>,
    init: Option<Rc<InitFn>>,
    capabilities: Capabilities,
}

impl FactoryBuilder {
    pub fn step(mut self, step: impl Fn(&mut Entity, &mut StepContext<'_>) + 'static) -> Self {
        self.step = Some(Box::new(step));
        self
    }

    pub fn init(mut self, init: impl Fn(&mut Entity, &SceneInfo) + 'static) -> Self {
        self.init = Some(Rc::new(init));
        self
    }

    pub fn out_of_bounds(
        mut self,
        handler: impl Fn(&mut Entity, &mut StepContext<'_>) + 'static,
    ) -> Self {
        self.capabilities = self.capabilities.out_of_bounds(handler);
        self
    }

    pub fn draw(mut self, draw: impl Fn(&Entity, &SceneInfo, &mut dyn Surface) + 'static) -> Self {
        self.capabilities = self.capabilities.draw(draw);
        self
    }

    pub fn draw_setup(
        mut self,
        setup: impl Fn(&Entity, &SceneInfo, &mut dyn Surface) + 'static,
    ) -> Self {
        self.capabilities = self.capabilities.draw_setup(setup);
        self
    }

    /// Merge a capability set onto the variant
    pub fn capabilities(mut self, extra: Capabilities) -> Self {
        self.capabilities = self.capabilities.merge(extra);
        self
    }

    pub fn build(self) -> EntityFactory {
        EntityFactory {
            behavior: Rc::new(Behavior {
                step: self.step,
                capabilities: self.capabilities,
            }),
            init: self.init,
        }
    }
}

/// Create a variant from an optional step behavior, an optional init
/// behavior and extra capabilities. A missing step behavior is a no-op.
pub fn entity_factory(
    step: Option<Box<StepFn>>,
    init: Option<Box<InitFn>>,
    extra: Capabilities,
) -> EntityFactory {
    EntityFactory {
        behavior: Rc::new(Behavior {
            step,
            capabilities: extra,
        }),
        init: init.map(Rc::from),
    }
}
