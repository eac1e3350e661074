//! Frame listeners: callbacks run around the scene update

use std::fmt;

use super::Scene;

/// When a frame listener runs relative to the scene update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExecutionOrder {
    /// Not a valid registration order
    #[default]
    Unspecified,
    /// After request draining, before the component update walk
    BeforeUpdate,
    /// After the component update walk
    AfterUpdate,
}

/// Handle returned by a successful listener registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// Per-frame hook with access to the active scene
pub trait FrameListener: 'static {
    /// Called once per frame at the listener's execution order
    fn on_frame(&mut self, scene: &mut Scene, delta_time: f32);
}

impl<F> FrameListener for F
where
    F: FnMut(&mut Scene, f32) + 'static,
{
    fn on_frame(&mut self, scene: &mut Scene, delta_time: f32) {
        self(scene, delta_time)
    }
}

struct Registration {
    id: ListenerId,
    order: ExecutionOrder,
    listener: Box<dyn FrameListener>,
}

/// Registered listeners, run in registration order within each slot
#[derive(Default)]
pub(crate) struct ListenerSet {
    registrations: Vec<Registration>,
    next_id: u64,
}

impl ListenerSet {
    pub(crate) fn add(&mut self, order: ExecutionOrder, listener: Box<dyn FrameListener>) -> Option<ListenerId> {
        if order == ExecutionOrder::Unspecified {
            log::error!("Frame listener registered without an execution order; ignoring it");
            return None;
        }

        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.registrations.push(Registration { id, order, listener });
        log::debug!("Registered {} ({:?})", id, order);
        Some(id)
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        match self.registrations.iter().position(|registration| registration.id == id) {
            Some(index) => {
                self.registrations.remove(index);
                true
            }
            None => {
                log::warn!("Cannot remove {}: not registered", id);
                false
            }
        }
    }

    pub(crate) fn run(&mut self, order: ExecutionOrder, scene: &mut Scene, delta_time: f32) {
        for registration in self.registrations.iter_mut().filter(|registration| registration.order == order) {
            registration.listener.on_frame(scene, delta_time);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.registrations.len()
    }
}

impl fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSet").field("registered", &self.registrations.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::scene::EngineContext;

    #[test]
    fn test_unspecified_order_is_rejected() {
        let mut listeners = ListenerSet::default();
        let id = listeners.add(ExecutionOrder::Unspecified, Box::new(|_: &mut Scene, _: f32| {}));
        assert_eq!(id, None);
        assert_eq!(listeners.len(), 0);
    }

    #[test]
    fn test_run_filters_by_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = ListenerSet::default();
        for (order, label) in [
            (ExecutionOrder::AfterUpdate, "after"),
            (ExecutionOrder::BeforeUpdate, "before"),
        ] {
            let calls = Rc::clone(&calls);
            listeners.add(order, Box::new(move |_: &mut Scene, _: f32| calls.borrow_mut().push(label)));
        }

        let mut scene = Scene::new("listeners", &EngineContext::new());
        listeners.run(ExecutionOrder::BeforeUpdate, &mut scene, 0.0);
        listeners.run(ExecutionOrder::AfterUpdate, &mut scene, 0.0);
        assert_eq!(*calls.borrow(), vec!["before", "after"]);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut listeners = ListenerSet::default();
        let id = listeners.add(ExecutionOrder::AfterUpdate, Box::new(|_: &mut Scene, _: f32| {})).unwrap();

        assert!(listeners.remove(id));
        assert!(!listeners.remove(id));
        assert_eq!(listeners.len(), 0);
    }
}
