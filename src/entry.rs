use std::time::SystemTime;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Contents of a dropped file, together with the metadata the platform
/// reported for it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContent {
    /// The file name, without any directory part
    pub name: String,
    /// The MIME type, when the platform knows it
    pub mime_type: Option<String>,
    /// The last modified time, when the platform knows it
    pub last_modified: Option<SystemTime>,
    /// The raw bytes of the file
    pub bytes: Vec<u8>,
}

impl FileContent {
    pub fn new<S: Into<String>, B: Into<Vec<u8>>>(name: S, bytes: B) -> Self {
        FileContent {
            name: name.into(),
            mime_type: None,
            last_modified: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_mime_type<S: Into<String>>(mut self, mime_type: S) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_last_modified(mut self, last_modified: SystemTime) -> Self {
        self.last_modified = Some(last_modified);
        self
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Interpret the content as UTF-8 text
    pub fn text(&self) -> Result<&str> {
        Ok(std::str::from_utf8(&self.bytes)?)
    }
}

/// Metadata shared by every entry offered by the platform
pub trait Entry {
    /// Name of the entry (the final path segment)
    fn name(&self) -> &str;

    /// Slash-delimited path of the entry from the drop root
    fn full_path(&self) -> &str;
}

/// A file offered at drop time
#[async_trait(?Send)]
pub trait FileEntry: Entry {
    /// Resolve the content of the file
    async fn file(&self) -> Result<FileContent>;
}

/// A directory offered at drop time
pub trait DirectoryEntry: Entry {
    /// Create a fresh reader over the children of the directory
    fn create_reader(&self) -> Box<dyn DirectoryReader>;
}

/// Paginated listing of a directory
///
/// Each call returns the next page of children. An empty page means the
/// listing is complete; a non-empty page says nothing about whether more
/// pages follow.
#[async_trait(?Send)]
pub trait DirectoryReader {
    async fn read_entries(&mut self) -> Result<Vec<DropEntry>>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// Handle for one item offered by the platform at drop time
pub enum DropEntry {
    File(Box<dyn FileEntry>),
    Directory(Box<dyn DirectoryEntry>),
}

impl DropEntry {
    pub fn kind(&self) -> EntryKind {
        match self {
            DropEntry::File(_) => EntryKind::File,
            DropEntry::Directory(_) => EntryKind::Directory,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DropEntry::File(file) => file.name(),
            DropEntry::Directory(dir) => dir.name(),
        }
    }

    pub fn full_path(&self) -> &str {
        match self {
            DropEntry::File(file) => file.full_path(),
            DropEntry::Directory(dir) => dir.full_path(),
        }
    }

    /// Whether the final segment of the full path starts with a dot
    pub fn is_hidden(&self) -> bool {
        is_hidden(self.full_path())
    }
}

impl std::fmt::Debug for DropEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropEntry")
            .field("kind", &self.kind())
            .field("full_path", &self.full_path())
            .finish()
    }
}

/// Check whether the final segment of a slash-delimited path is hidden
pub fn is_hidden(path: &str) -> bool {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .map(|segment| segment.starts_with('.'))
        .unwrap_or(false)
}

/// Join a parent path and a child name with a single slash
pub(crate) fn join_path(parent: &str, name: &str) -> String {
    let parent = parent.trim_end_matches('/');
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}
