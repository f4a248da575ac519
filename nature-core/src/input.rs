//! Pointer and native input routed to scene listeners.
//!
//! Hosts push raw events with page coordinates into `Scene::dispatch`.
//! Events are queued and handed to listeners at the next frame boundary,
//! so handlers never run in the middle of a step pass.

use crate::scene::Scene;
use crate::vector::Vector;
use std::collections::BTreeMap;
use std::fmt;

/// An event that is not translated, passed to its listener as-is
#[derive(Debug, Clone, PartialEq)]
pub struct NativeEvent {
    pub name: String,
    /// Page coordinates, for pointer-like events
    pub page: Option<Vector>,
    /// Key name, for keyboard events
    pub key: Option<String>,
}

impl NativeEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            page: None,
            key: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_page(mut self, page: Vector) -> Self {
        self.page = Some(page);
        self
    }
}

/// Raw input as delivered by the host
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer moved; routed to the `mouse` listener
    PointerMove { page: Vector },
    /// Pointer clicked; routed to the `click` listener
    Click { page: Vector },
    /// Anything else, routed by name
    Native(NativeEvent),
}

/// One element in the chain from the surface up to the page root
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offset {
    pub offset: Vector,
    pub scroll: Vector,
}

/// Where the surface sits on the page, used to turn page coordinates
/// into surface coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Viewport {
    chain: Vec<Offset>,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface placed at `offset` with no scrolled ancestors
    pub fn at(offset: Vector) -> Self {
        Self::new().push(offset, Vector::ZERO)
    }

    /// Append the next ancestor (surface first, page root last)
    pub fn push(mut self, offset: Vector, scroll: Vector) -> Self {
        self.chain.push(Offset { offset, scroll });
        self
    }

    pub fn to_local(&self, page: Vector) -> Vector {
        let total = self
            .chain
            .iter()
            .fold(Vector::ZERO, |acc, o| acc.plus(o.offset.minus(o.scroll)));
        page.minus(total)
    }
}

pub type PointerHandler = Box<dyn FnMut(&mut Scene, f32, f32)>;
pub type NativeHandler = Box<dyn FnMut(&mut Scene, &NativeEvent)>;

/// Input handlers registered on a scene
#[derive(Default)]
pub struct Listeners {
    pub(crate) mouse: Option<PointerHandler>,
    pub(crate) click: Option<PointerHandler>,
    pub(crate) native: BTreeMap<String, NativeHandler>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer movement, in surface coordinates
    pub fn on_mouse(mut self, handler: impl FnMut(&mut Scene, f32, f32) + 'static) -> Self {
        self.mouse = Some(Box::new(handler));
        self
    }

    /// Pointer clicks, in surface coordinates
    pub fn on_click(mut self, handler: impl FnMut(&mut Scene, f32, f32) + 'static) -> Self {
        self.click = Some(Box::new(handler));
        self
    }

    /// A native event, matched by its literal name
    pub fn on(
        mut self,
        name: impl Into<String>,
        handler: impl FnMut(&mut Scene, &NativeEvent) + 'static,
    ) -> Self {
        self.native.insert(name.into(), Box::new(handler));
        self
    }

    pub fn has_mouse(&self) -> bool {
        self.mouse.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.mouse.is_none() && self.click.is_none() && self.native.is_empty()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("mouse", &self.mouse.is_some())
            .field("click", &self.click.is_some())
            .field("native", &self.native.keys().collect::<Vec<_>>())
            .finish()
    }
}
