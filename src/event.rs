use serde::{Deserialize, Serialize};

use crate::entry::DropEntry;

/// Type name the platform uses to announce files when the detailed item
/// list is not available
pub const FILES_TYPE: &str = "Files";

/// Prefix of the type names announcing text payloads
pub const TEXT_TYPE_PREFIX: &str = "text/";

/// The four notifications a drop surface delivers
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DragEventKind {
    Enter,
    Over,
    Leave,
    Drop,
}

impl DragEventKind {
    pub const ALL: [DragEventKind; 4] = [
        DragEventKind::Enter,
        DragEventKind::Over,
        DragEventKind::Leave,
        DragEventKind::Drop,
    ];
}

/// Kind of a single item offered by a drag
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    File,
    String,
}

/// Feedback given to the platform about what a drop would do
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DropEffect {
    #[default]
    None,
    Copy,
    Move,
    Link,
}

/// Pointer position at the time of a drop
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize,
)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }
}

/// A file from the platform's flat file list, without its content
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeFile {
    pub name: String,
    pub size: u64,
    pub mime_type: Option<String>,
}

/// Payload container carried by a drag event
pub trait DataTransfer {
    /// Kinds of the items offered, in platform order
    ///
    /// Some platforms leave this empty while the pointer moves over the
    /// surface.
    fn items(&self) -> Vec<ItemKind>;

    /// Type names of the payload
    fn types(&self) -> Vec<String>;

    /// Ordered top-level entries; only populated on drop
    fn entries(&self) -> Vec<DropEntry>;

    /// Flat list of the dropped files; only populated on drop
    fn files(&self) -> Vec<NativeFile>;

    /// Plain text payload; only populated on drop
    fn text(&self) -> Option<String>;

    fn set_drop_effect(&self, effect: DropEffect);
}

/// A drag notification delivered by the platform
pub trait DragEvent {
    fn prevent_default(&self);

    fn stop_propagation(&self);

    fn data_transfer(&self) -> Option<&dyn DataTransfer>;

    fn position(&self) -> Position;
}

/// What a drag offers, split into file-bearing and text-bearing items
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PayloadKinds {
    pub files: usize,
    pub texts: usize,
}

impl PayloadKinds {
    /// Classify the payload of a transfer
    ///
    /// Uses the detailed item list when it is populated and the coarser
    /// type names otherwise. Returns `None` when neither is available.
    pub fn classify(transfer: &dyn DataTransfer) -> Option<Self> {
        let items = transfer.items();
        if !items.is_empty() {
            return Some(PayloadKinds {
                files: items
                    .iter()
                    .filter(|kind| **kind == ItemKind::File)
                    .count(),
                texts: items
                    .iter()
                    .filter(|kind| **kind == ItemKind::String)
                    .count(),
            });
        }

        let types = transfer.types();
        if !types.is_empty() {
            return Some(PayloadKinds {
                files: types.iter().filter(|t| *t == FILES_TYPE).count(),
                texts: types
                    .iter()
                    .filter(|t| t.starts_with(TEXT_TYPE_PREFIX))
                    .count(),
            });
        }

        None
    }

    pub fn is_empty(&self) -> bool {
        self.files == 0 && self.texts == 0
    }
}
