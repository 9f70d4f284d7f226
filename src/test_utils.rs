//! Scripted platform objects for exercising sessions.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::entry::DropEntry;
use crate::event::{
    DataTransfer, DragEvent, DragEventKind, DropEffect, ItemKind, NativeFile,
    Position,
};
use crate::memory::{entries, MemoryNode};
use crate::session::{DropSurface, DropTask, Listener, SurfaceResolver};

#[derive(Default)]
pub struct MockTransfer {
    items: Vec<ItemKind>,
    types: Vec<String>,
    entries: Vec<MemoryNode>,
    files: Vec<NativeFile>,
    text: Option<String>,
    drop_effect: Cell<DropEffect>,
}

impl MockTransfer {
    pub fn with_items(mut self, items: Vec<ItemKind>) -> Self {
        self.items = items;
        self
    }

    pub fn with_types(mut self, types: Vec<&str>) -> Self {
        self.types = types.into_iter().map(str::to_string).collect();
        self
    }

    pub fn with_entries(mut self, nodes: Vec<MemoryNode>) -> Self {
        self.entries = nodes;
        self
    }

    pub fn with_files(mut self, files: Vec<NativeFile>) -> Self {
        self.files = files;
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }
}

impl DataTransfer for MockTransfer {
    fn items(&self) -> Vec<ItemKind> {
        self.items.clone()
    }

    fn types(&self) -> Vec<String> {
        self.types.clone()
    }

    fn entries(&self) -> Vec<DropEntry> {
        entries(self.entries.clone())
    }

    fn files(&self) -> Vec<NativeFile> {
        self.files.clone()
    }

    fn text(&self) -> Option<String> {
        self.text.clone()
    }

    fn set_drop_effect(&self, effect: DropEffect) {
        self.drop_effect.set(effect);
    }
}

pub struct MockEvent {
    transfer: Option<MockTransfer>,
    position: Position,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl MockEvent {
    pub fn new(transfer: MockTransfer) -> Self {
        MockEvent {
            transfer: Some(transfer),
            position: Position::default(),
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
        }
    }

    pub fn without_transfer() -> Self {
        MockEvent {
            transfer: None,
            ..MockEvent::new(MockTransfer::default())
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn drop_effect(&self) -> DropEffect {
        self.transfer
            .as_ref()
            .map(|t| t.drop_effect.get())
            .unwrap_or_default()
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}

impl DragEvent for MockEvent {
    fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    fn data_transfer(&self) -> Option<&dyn DataTransfer> {
        self.transfer
            .as_ref()
            .map(|t| t as &dyn DataTransfer)
    }

    fn position(&self) -> Position {
        self.position
    }
}

#[derive(Default)]
pub struct MockSurface {
    listeners: RefCell<HashMap<DragEventKind, Vec<Listener>>>,
    active: Cell<bool>,
}

impl MockSurface {
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn listener_count(&self, kind: DragEventKind) -> usize {
        self.listeners(kind).len()
    }

    pub fn listeners(&self, kind: DragEventKind) -> Vec<Listener> {
        self.listeners
            .borrow()
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }

    /// Deliver a notification to every listener of its kind, returning the
    /// drop tasks they produced
    pub fn fire(
        &self,
        kind: DragEventKind,
        event: &dyn DragEvent,
    ) -> Vec<DropTask> {
        self.listeners(kind)
            .iter()
            .filter_map(|listener| {
                listener(event).expect("Listener should not fail")
            })
            .collect()
    }
}

impl DropSurface for MockSurface {
    fn add_listener(&self, kind: DragEventKind, listener: Listener) {
        self.listeners
            .borrow_mut()
            .entry(kind)
            .or_default()
            .push(listener);
    }

    fn remove_listener(&self, kind: DragEventKind, listener: &Listener) {
        if let Some(listeners) = self.listeners.borrow_mut().get_mut(&kind) {
            listeners.retain(|l| !Rc::ptr_eq(l, listener));
        }
    }

    fn mark_active(&self) {
        self.active.set(true);
    }

    fn clear_active(&self) {
        self.active.set(false);
    }
}

#[derive(Default)]
pub struct MockResolver {
    surfaces: HashMap<String, Rc<dyn DropSurface>>,
}

impl MockResolver {
    pub fn with(mut self, selector: &str, surface: &Rc<MockSurface>) -> Self {
        self.surfaces
            .insert(selector.to_string(), surface.clone());
        self
    }
}

impl SurfaceResolver for MockResolver {
    fn query_selector(&self, selector: &str) -> Option<Rc<dyn DropSurface>> {
        self.surfaces.get(selector).cloned()
    }
}
