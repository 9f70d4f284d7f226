use crate::event::{DragEvent, NativeFile, Position};
use crate::record::DropRecord;
use crate::DragDropError;

/// Details accompanying a file drop
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DropInfo {
    /// Pointer position at the time of the drop
    pub position: Position,
    /// The platform's flat list of dropped files
    pub native_files: Vec<NativeFile>,
}

type DropHandler = Box<dyn Fn(DropRecord, DropInfo)>;
type TextHandler = Box<dyn Fn(&str, Position)>;
type EventHook = Box<dyn Fn(&dyn DragEvent)>;
type ErrorHandler = Box<dyn Fn(&DragDropError)>;

/// The handlers a session dispatches to
///
/// Only the file-drop handler is required. Which of the optional ones are
/// present decides what the session reacts to, see
/// [`crate::DragSession`].
///
/// ```
/// use drag_drop::Callbacks;
///
/// let callbacks = Callbacks::new(|record, info| {
///     println!("{} files at {:?}", record.len(), info.position);
/// })
/// .on_drop_text(|text, _position| println!("text: {}", text));
/// assert!(callbacks.handles_text());
/// ```
pub struct Callbacks {
    pub(crate) on_drop: DropHandler,
    pub(crate) on_drop_text: Option<TextHandler>,
    pub(crate) on_drag_enter: Option<EventHook>,
    pub(crate) on_drag_over: Option<EventHook>,
    pub(crate) on_drag_leave: Option<EventHook>,
    pub(crate) on_error: Option<ErrorHandler>,
}

impl Callbacks {
    pub fn new<F>(on_drop: F) -> Self
    where
        F: Fn(DropRecord, DropInfo) + 'static,
    {
        Callbacks {
            on_drop: Box::new(on_drop),
            on_drop_text: None,
            on_drag_enter: None,
            on_drag_over: None,
            on_drag_leave: None,
            on_error: None,
        }
    }

    pub fn on_drop_text<F>(mut self, handler: F) -> Self
    where
        F: Fn(&str, Position) + 'static,
    {
        self.on_drop_text = Some(Box::new(handler));
        self
    }

    pub fn on_drag_enter<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn DragEvent) + 'static,
    {
        self.on_drag_enter = Some(Box::new(hook));
        self
    }

    pub fn on_drag_over<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn DragEvent) + 'static,
    {
        self.on_drag_over = Some(Box::new(hook));
        self
    }

    pub fn on_drag_leave<F>(mut self, hook: F) -> Self
    where
        F: Fn(&dyn DragEvent) + 'static,
    {
        self.on_drag_leave = Some(Box::new(hook));
        self
    }

    /// Receive failures of the drop handling instead of the file-drop
    /// handler
    pub fn on_error<F>(mut self, handler: F) -> Self
    where
        F: Fn(&DragDropError) + 'static,
    {
        self.on_error = Some(Box::new(handler));
        self
    }

    /// Whether a text-drop handler is registered
    pub fn handles_text(&self) -> bool {
        self.on_drop_text.is_some()
    }
}

impl<F> From<F> for Callbacks
where
    F: Fn(DropRecord, DropInfo) + 'static,
{
    fn from(on_drop: F) -> Self {
        Callbacks::new(on_drop)
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_drop_text", &self.on_drop_text.is_some())
            .field("on_drag_enter", &self.on_drag_enter.is_some())
            .field("on_drag_over", &self.on_drag_over.is_some())
            .field("on_drag_leave", &self.on_drag_leave.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}
