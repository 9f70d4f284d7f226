//! Drag-and-drop sessions for drop surfaces.
//!
//! A [`DragSession`] follows the enter/over/leave/drop notifications of one
//! surface, decides which of them the registered [`Callbacks`] can consume
//! and, on drop, expands the dropped entries (recursing into directories)
//! into a flat [`DropRecord`] keyed by path.
//!
//! The platform is reached through traits: [`DropSurface`] and
//! [`SurfaceResolver`] for the element, [`DragEvent`] and [`DataTransfer`]
//! for notifications, and the entry traits in [`entry`] for dropped files
//! and directories. [`memory`] and [`local`] provide ready-made entries.

pub mod callbacks;
pub mod config;
pub mod entry;
mod errors;
pub mod event;
pub mod expand;
pub mod local;
pub mod memory;
pub mod record;
pub mod session;

#[cfg(test)]
mod test_utils;

pub use callbacks::{Callbacks, DropInfo};
pub use config::Options;
pub use entry::{DropEntry, EntryKind, FileContent};
pub use errors::{DragDropError, Result};
pub use event::{
    DataTransfer, DragEvent, DragEventKind, DropEffect, ItemKind, NativeFile,
    Position,
};
pub use expand::expand;
pub use record::DropRecord;
pub use session::{
    attach, DragSession, DropSurface, DropTask, Listener, SurfaceResolver,
    Target, Teardown,
};
