use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};

use crate::callbacks::{Callbacks, DropInfo};
use crate::config::Options;
use crate::entry::DropEntry;
use crate::event::{DragEvent, DragEventKind, DropEffect, PayloadKinds};
use crate::expand::expand;
use crate::{DragDropError, Result};

/// Asynchronous part of a drop: expanding the entries and dispatching the
/// result. The host schedules it on its own single-threaded executor.
pub type DropTask = LocalBoxFuture<'static, Result<()>>;

/// Listener registered on a surface for one kind of notification
///
/// Only the drop listener ever returns a task.
pub type Listener = Rc<dyn Fn(&dyn DragEvent) -> Result<Option<DropTask>>>;

/// The element a session listens on
pub trait DropSurface {
    fn add_listener(&self, kind: DragEventKind, listener: Listener);

    /// Remove a listener previously added with [`Self::add_listener`]
    ///
    /// Listeners are identified with [`Rc::ptr_eq`].
    fn remove_listener(&self, kind: DragEventKind, listener: &Listener);

    /// Show that a handleable drag is over the surface
    fn mark_active(&self);

    /// Remove the marker set by [`Self::mark_active`]
    fn clear_active(&self);
}

/// Lookup of a surface by selector
pub trait SurfaceResolver {
    fn query_selector(&self, selector: &str) -> Option<Rc<dyn DropSurface>>;
}

/// Where to attach a session
pub enum Target {
    Surface(Rc<dyn DropSurface>),
    Selector {
        resolver: Rc<dyn SurfaceResolver>,
        selector: String,
    },
}

impl Target {
    pub fn selector<S: Into<String>>(
        resolver: Rc<dyn SurfaceResolver>,
        selector: S,
    ) -> Self {
        Target::Selector {
            resolver,
            selector: selector.into(),
        }
    }

    /// Resolve the target into a surface
    ///
    /// Fails when a selector matches nothing.
    pub fn resolve(self) -> Result<Rc<dyn DropSurface>> {
        match self {
            Target::Surface(surface) => Ok(surface),
            Target::Selector { resolver, selector } => resolver
                .query_selector(&selector)
                .ok_or(DragDropError::Selector(selector)),
        }
    }
}

impl<S: DropSurface + 'static> From<Rc<S>> for Target {
    fn from(surface: Rc<S>) -> Self {
        Target::Surface(surface)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SessionState {
    pub(crate) is_entered: bool,
    pub(crate) ignored_enters: u32,
}

struct SessionInner {
    surface: Rc<dyn DropSurface>,
    callbacks: Callbacks,
    options: Options,
    state: Cell<SessionState>,
    detached: Cell<bool>,
}

/// Drag-and-drop state machine of one surface
///
/// The platform delivers enter notifications for every child element the
/// pointer crosses, each followed by a leave. The session counts the
/// extra enters so that the enter hook and the active marker fire once
/// per gesture.
///
/// Notifications are only acted upon when the payload is handleable:
/// a text-drop handler must be registered and the drag must offer files
/// or text. Drops are always handled.
#[derive(Clone)]
pub struct DragSession {
    inner: Rc<SessionInner>,
}

impl DragSession {
    pub fn new(
        surface: Rc<dyn DropSurface>,
        callbacks: Callbacks,
        options: Options,
    ) -> Self {
        DragSession {
            inner: Rc::new(SessionInner {
                surface,
                callbacks,
                options,
                state: Cell::new(SessionState::default()),
                detached: Cell::new(false),
            }),
        }
    }

    /// Whether the registered callbacks can consume the payload of an
    /// event
    pub fn is_handleable(&self, event: &dyn DragEvent) -> bool {
        let Some(transfer) = event.data_transfer() else {
            return false;
        };
        let Some(kinds) = PayloadKinds::classify(transfer) else {
            return false;
        };

        self.inner.callbacks.handles_text() && !kinds.is_empty()
    }

    /// Route a notification to its handler
    ///
    /// Only a drop yields a task. Does nothing once the session has been
    /// torn down.
    pub fn dispatch(
        &self,
        kind: DragEventKind,
        event: &dyn DragEvent,
    ) -> Result<Option<DropTask>> {
        if self.inner.detached.get() {
            log::trace!("Ignoring {:?} on a detached session", kind);
            return Ok(None);
        }

        match kind {
            DragEventKind::Enter => self.handle_enter(event),
            DragEventKind::Over => self.handle_over(event),
            DragEventKind::Leave => self.handle_leave(event),
            DragEventKind::Drop => return self.handle_drop(event).map(Some),
        }
        Ok(None)
    }

    fn handle_enter(&self, event: &dyn DragEvent) {
        suppress(event);
        if !self.is_handleable(event) {
            return;
        }

        let mut state = self.inner.state.get();
        if state.is_entered {
            state.ignored_enters += 1;
            log::trace!("Ignoring nested enter ({})", state.ignored_enters);
            self.inner.state.set(state);
            return;
        }

        log::debug!("Drag entered surface");
        self.inner.state.set(SessionState {
            is_entered: true,
            ignored_enters: 0,
        });
        if let Some(hook) = &self.inner.callbacks.on_drag_enter {
            hook(event);
        }
        self.inner.surface.mark_active();
    }

    fn handle_over(&self, event: &dyn DragEvent) {
        suppress(event);
        if !self.is_handleable(event) {
            return;
        }

        if let Some(hook) = &self.inner.callbacks.on_drag_over {
            hook(event);
        }
        if let Some(transfer) = event.data_transfer() {
            transfer.set_drop_effect(DropEffect::Copy);
        }
    }

    fn handle_leave(&self, event: &dyn DragEvent) {
        suppress(event);
        if !self.is_handleable(event) {
            return;
        }

        let mut state = self.inner.state.get();
        if state.ignored_enters > 0 {
            state.ignored_enters -= 1;
            log::trace!(
                "Balanced nested enter ({} left)",
                state.ignored_enters
            );
            self.inner.state.set(state);
            return;
        }

        log::debug!("Drag left surface");
        self.inner.state.set(SessionState::default());
        if let Some(hook) = &self.inner.callbacks.on_drag_leave {
            hook(event);
        }
        self.inner.surface.clear_active();
    }

    /// Handle a drop
    ///
    /// The synchronous part runs immediately: the leave hook fires, the
    /// active marker is cleared and the state is reset. A drop without
    /// a data transfer fails here. The returned task expands the dropped
    /// entries and calls the handlers.
    fn handle_drop(&self, event: &dyn DragEvent) -> Result<DropTask> {
        suppress(event);

        if let Some(hook) = &self.inner.callbacks.on_drag_leave {
            hook(event);
        }
        self.inner.surface.clear_active();
        self.inner.state.set(SessionState::default());

        let transfer = event
            .data_transfer()
            .ok_or(DragDropError::MissingPayload)?;
        let position = event.position();
        let entries = transfer.entries();
        let text = transfer.text();
        let info = DropInfo {
            position,
            native_files: transfer.files(),
        };
        log::debug!("Dropped {} entries at {:?}", entries.len(), position);

        let session = self.clone();
        Ok(async move { session.complete_drop(entries, text, info).await }
            .boxed_local())
    }

    async fn complete_drop(
        self,
        entries: Vec<DropEntry>,
        text: Option<String>,
        info: DropInfo,
    ) -> Result<()> {
        let callbacks = &self.inner.callbacks;
        let position = info.position;
        let offered_files = !entries.is_empty();

        let expanded =
            expand(entries, self.inner.options.include_hidden_files).await;
        let result = match expanded {
            Ok(record) if offered_files => {
                (callbacks.on_drop)(record, info);
                Ok(())
            }
            Ok(_) => Ok(()),
            Err(err) => Err(err),
        };

        if let (Some(text), Some(handler)) = (text, &callbacks.on_drop_text) {
            if !text.is_empty() {
                handler(&text, position);
            }
        }

        if let Err(err) = &result {
            match &callbacks.on_error {
                Some(handler) => handler(err),
                None => log::error!("Failed to handle drop: {}", err),
            }
        }
        result
    }

    pub(crate) fn listener(&self, kind: DragEventKind) -> Listener {
        let session = self.clone();
        Rc::new(move |event: &dyn DragEvent| session.dispatch(kind, event))
    }

    pub(crate) fn detach(&self) {
        self.inner.detached.set(true);
    }

    pub fn is_detached(&self) -> bool {
        self.inner.detached.get()
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> SessionState {
        self.inner.state.get()
    }
}

/// Keep the platform from acting on the notification and from passing it
/// to enclosing elements
fn suppress(event: &dyn DragEvent) {
    event.stop_propagation();
    event.prevent_default();
}

/// Handle to remove the listeners added by [`attach`]
pub struct Teardown {
    session: DragSession,
    listeners: RefCell<Vec<(DragEventKind, Listener)>>,
}

impl Teardown {
    /// Remove all listeners from the surface
    ///
    /// Calling it more than once has no further effect.
    pub fn detach(&self) {
        let listeners = self.listeners.take();
        if listeners.is_empty() {
            return;
        }

        let surface = &self.session.inner.surface;
        for (kind, listener) in listeners {
            surface.remove_listener(kind, &listener);
        }
        self.session.detach();
        log::debug!("Drag session detached");
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }
}

/// Listen for drags on a surface
///
/// `callbacks` is either a single file-drop closure or a [`Callbacks`]
/// value. Fails when the target is a selector matching nothing.
pub fn attach<C: Into<Callbacks>>(
    target: impl Into<Target>,
    callbacks: C,
    options: Options,
) -> Result<Teardown> {
    let surface = target.into().resolve()?;
    let session =
        DragSession::new(Rc::clone(&surface), callbacks.into(), options);

    let listeners: Vec<_> = DragEventKind::ALL
        .iter()
        .map(|kind| (*kind, session.listener(*kind)))
        .collect();
    for (kind, listener) in &listeners {
        surface.add_listener(*kind, Rc::clone(listener));
    }
    log::debug!("Drag session attached");

    Ok(Teardown {
        session,
        listeners: RefCell::new(listeners),
    })
}
