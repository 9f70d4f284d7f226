use std::collections::{hash_map, HashMap};

use serde::{Deserialize, Serialize};

use crate::entry::FileContent;

/// Flat mapping from the full path of every dropped file to its content
///
/// Keys are slash-delimited paths relative to the drop root. Directories
/// never appear as keys, only the leaf files reachable beneath them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DropRecord {
    files: HashMap<String, FileContent>,
}

impl DropRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files in the record
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get<P: AsRef<str>>(&self, path: P) -> Option<&FileContent> {
        self.files.get(path.as_ref())
    }

    pub fn contains<P: AsRef<str>>(&self, path: P) -> bool {
        self.files.contains_key(path.as_ref())
    }

    /// Paths of all files in the record, in no particular order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, FileContent> {
        self.files.iter()
    }

    /// Insert a file, returning the content previously stored under the
    /// same path
    pub(crate) fn insert(
        &mut self,
        path: String,
        content: FileContent,
    ) -> Option<FileContent> {
        self.files.insert(path, content)
    }
}

impl IntoIterator for DropRecord {
    type Item = (String, FileContent);
    type IntoIter = hash_map::IntoIter<String, FileContent>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

impl<'a> IntoIterator for &'a DropRecord {
    type Item = (&'a String, &'a FileContent);
    type IntoIter = hash_map::Iter<'a, String, FileContent>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

impl From<DropRecord> for HashMap<String, FileContent> {
    fn from(record: DropRecord) -> Self {
        record.files
    }
}
