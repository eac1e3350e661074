//! Component trait and per-call context

use super::{EngineContext, GameObjectId};
use crate::foundation::math::Transform;

/// Behaviour attached to a game object
///
/// All hooks default to no-ops. A component receives:
/// - `on_start` once, when it is attached at a frame boundary, before its
///   first update
/// - `on_update` once per update of its game object while enabled, plus one
///   final call when it is disabled through a recursive state change
/// - `on_destroy` once, when it is removed or its scene is torn down
pub trait Component: 'static {
    /// Called once before the first update
    fn on_start(&mut self, _ctx: &mut ComponentContext<'_>) {}

    /// Called every frame the owning game object is updated
    fn on_update(&mut self, _ctx: &mut ComponentContext<'_>) {}

    /// Called once before the component is released
    fn on_destroy(&mut self, _ctx: &mut ComponentContext<'_>) {}
}

/// A named component as stored by its game object
pub(crate) struct ComponentSlot {
    pub(crate) name: String,
    pub(crate) enabled: bool,
    pub(crate) component: Box<dyn Component>,
}

impl ComponentSlot {
    pub(crate) fn new(name: String, component: Box<dyn Component>) -> Self {
        Self { name, enabled: true, component }
    }
}

/// What a component can see and touch while one of its hooks runs
pub struct ComponentContext<'a> {
    object: GameObjectId,
    enabled: bool,
    delta_time: f32,
    transform: &'a mut Transform,
    engine: &'a EngineContext,
    attachments: &'a mut Vec<ComponentSlot>,
}

impl<'a> ComponentContext<'a> {
    pub(crate) fn new(
        object: GameObjectId,
        enabled: bool,
        delta_time: f32,
        transform: &'a mut Transform,
        engine: &'a EngineContext,
        attachments: &'a mut Vec<ComponentSlot>,
    ) -> Self {
        Self { object, enabled, delta_time, transform, engine, attachments }
    }

    /// Handle of the owning game object
    pub fn object(&self) -> GameObjectId {
        self.object
    }

    /// This component's own enabled flag
    ///
    /// `false` during the final update that follows a disable.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Seconds since the previous frame; zero outside regular updates
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Local transform of the owning game object
    pub fn transform(&self) -> &Transform {
        &*self.transform
    }

    /// Mutable local transform of the owning game object
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut *self.transform
    }

    /// Engine handle for queuing hierarchy requests
    pub fn engine(&self) -> &EngineContext {
        self.engine
    }

    /// Attach another component to the owning game object
    ///
    /// The component joins at the object's next update, where it receives
    /// `on_start`. A name clash with an attached sibling is logged and the
    /// component dropped at that point.
    pub fn add_component(&mut self, name: impl Into<String>, component: impl Component) {
        self.attachments.push(ComponentSlot::new(name.into(), Box::new(component)));
    }
}
