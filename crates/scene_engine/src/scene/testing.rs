//! Recording component shared by the scene unit tests

use std::cell::RefCell;
use std::rc::Rc;

use super::{Component, ComponentContext};

/// Ordered log of lifecycle calls, shared between tracers
#[derive(Debug, Clone, Default)]
pub(crate) struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    pub(crate) fn record(&self, entry: String) {
        self.0.borrow_mut().push(entry);
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub(crate) fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Component that writes every hook call to a [`Journal`]
pub(crate) struct Tracer {
    label: String,
    journal: Journal,
    spawn: Option<String>,
}

impl Tracer {
    pub(crate) fn new(label: &str, journal: &Journal) -> Self {
        Self { label: label.to_string(), journal: journal.clone(), spawn: None }
    }

    /// Attach a sibling tracer called `child` during the first update
    pub(crate) fn spawning(mut self, child: &str) -> Self {
        self.spawn = Some(child.to_string());
        self
    }
}

impl Component for Tracer {
    fn on_start(&mut self, _ctx: &mut ComponentContext<'_>) {
        self.journal.record(format!("{}:start", self.label));
    }

    fn on_update(&mut self, ctx: &mut ComponentContext<'_>) {
        if ctx.is_enabled() {
            self.journal.record(format!("{}:update", self.label));
        } else {
            self.journal.record(format!("{}:update(disabled)", self.label));
        }
        if let Some(child) = self.spawn.take() {
            let tracer = Tracer::new(&child, &self.journal);
            ctx.add_component(child, tracer);
        }
    }

    fn on_destroy(&mut self, _ctx: &mut ComponentContext<'_>) {
        self.journal.record(format!("{}:destroy", self.label));
    }
}
