//! In-memory drop entries.
//!
//! Useful for hosts without a real platform behind them (headless runs,
//! replaying recorded drops) and for exercising the expander. A tree of
//! [`MemoryNode`]s is turned into [`DropEntry`] handles whose full paths
//! are derived from the position of each node in the tree.

use std::rc::Rc;

use async_trait::async_trait;

use crate::entry::{
    join_path, DirectoryEntry, DirectoryReader, DropEntry, Entry, FileContent,
    FileEntry,
};
use crate::{DragDropError, Result};

/// Number of children returned per page when none is configured
pub const DEFAULT_PAGE_SIZE: usize = 100;

#[derive(Clone, Debug)]
pub enum MemoryNode {
    File {
        name: String,
        content: Option<FileContent>,
    },
    Directory {
        name: String,
        children: Vec<MemoryNode>,
        page_size: usize,
    },
}

impl MemoryNode {
    pub fn file<S: Into<String>, B: Into<Vec<u8>>>(name: S, bytes: B) -> Self {
        let name = name.into();
        MemoryNode::File {
            content: Some(FileContent::new(name.clone(), bytes)),
            name,
        }
    }

    /// A file the platform refuses to read
    pub fn unreadable_file<S: Into<String>>(name: S) -> Self {
        MemoryNode::File {
            name: name.into(),
            content: None,
        }
    }

    pub fn dir<S: Into<String>>(name: S, children: Vec<MemoryNode>) -> Self {
        MemoryNode::Directory {
            name: name.into(),
            children,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set how many children a directory hands out per page
    ///
    /// Has no effect on files.
    pub fn paged(mut self, size: usize) -> Self {
        if let MemoryNode::Directory { page_size, .. } = &mut self {
            *page_size = size.max(1);
        }
        self
    }

    pub fn name(&self) -> &str {
        match self {
            MemoryNode::File { name, .. } => name,
            MemoryNode::Directory { name, .. } => name,
        }
    }

    /// Turn the node into a drop entry located under `parent`
    ///
    /// Top-level entries use an empty parent.
    pub fn into_entry(self, parent: &str) -> DropEntry {
        let full_path = join_path(parent, self.name());
        match self {
            MemoryNode::File { name, content } => {
                DropEntry::File(Box::new(MemoryFile {
                    name,
                    full_path,
                    content,
                }))
            }
            MemoryNode::Directory {
                name,
                children,
                page_size,
            } => DropEntry::Directory(Box::new(MemoryDirectory {
                name,
                full_path,
                children: Rc::new(children),
                // An empty first page would end the listing early
                page_size: page_size.max(1),
            })),
        }
    }
}

/// Turn a list of top-level nodes into drop entries
pub fn entries(nodes: Vec<MemoryNode>) -> Vec<DropEntry> {
    nodes
        .into_iter()
        .map(|node| node.into_entry(""))
        .collect()
}

struct MemoryFile {
    name: String,
    full_path: String,
    content: Option<FileContent>,
}

impl Entry for MemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn full_path(&self) -> &str {
        &self.full_path
    }
}

#[async_trait(?Send)]
impl FileEntry for MemoryFile {
    async fn file(&self) -> Result<FileContent> {
        self.content
            .clone()
            .ok_or_else(|| DragDropError::Access(self.full_path.clone()))
    }
}

struct MemoryDirectory {
    name: String,
    full_path: String,
    children: Rc<Vec<MemoryNode>>,
    page_size: usize,
}

impl Entry for MemoryDirectory {
    fn name(&self) -> &str {
        &self.name
    }

    fn full_path(&self) -> &str {
        &self.full_path
    }
}

impl DirectoryEntry for MemoryDirectory {
    fn create_reader(&self) -> Box<dyn DirectoryReader> {
        Box::new(MemoryReader {
            parent: self.full_path.clone(),
            children: Rc::clone(&self.children),
            page_size: self.page_size,
            offset: 0,
        })
    }
}

struct MemoryReader {
    parent: String,
    children: Rc<Vec<MemoryNode>>,
    page_size: usize,
    offset: usize,
}

#[async_trait(?Send)]
impl DirectoryReader for MemoryReader {
    async fn read_entries(&mut self) -> Result<Vec<DropEntry>> {
        let end = (self.offset + self.page_size).min(self.children.len());
        let page = self.children[self.offset..end]
            .iter()
            .cloned()
            .map(|node| node.into_entry(&self.parent))
            .collect();
        self.offset = end;
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reader_hands_out_pages_until_empty() {
        let dir = MemoryNode::dir(
            "docs",
            vec![
                MemoryNode::file("a.txt", "a"),
                MemoryNode::file("b.txt", "b"),
                MemoryNode::file("c.txt", "c"),
            ],
        )
        .paged(2)
        .into_entry("");

        let DropEntry::Directory(dir) = dir else {
            panic!("Expected a directory entry");
        };
        let mut reader = dir.create_reader();

        let first = reader.read_entries().await.unwrap();
        let paths: Vec<_> = first.iter().map(|e| e.full_path()).collect();
        assert_eq!(paths, vec!["docs/a.txt", "docs/b.txt"]);

        let second = reader.read_entries().await.unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].full_path(), "docs/c.txt");

        assert!(reader.read_entries().await.unwrap().is_empty());
        assert!(reader.read_entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn zero_page_size_still_lists_every_child() {
        let node = MemoryNode::Directory {
            name: "d".to_string(),
            children: vec![
                MemoryNode::file("a.txt", "a"),
                MemoryNode::file("b.txt", "b"),
            ],
            page_size: 0,
        };

        let record = crate::expand::expand(entries(vec![node]), false)
            .await
            .unwrap();

        let mut paths: Vec<_> = record.paths().collect();
        paths.sort();
        assert_eq!(paths, vec!["d/a.txt", "d/b.txt"]);
    }

    #[tokio::test]
    async fn unreadable_file_reports_access_error() {
        let entry = MemoryNode::unreadable_file("secret.txt").into_entry("");
        let DropEntry::File(file) = entry else {
            panic!("Expected a file entry");
        };

        let err = file.file().await.unwrap_err();
        match err {
            DragDropError::Access(path) => assert_eq!(path, "secret.txt"),
            other => panic!("Unexpected error: {:?}", other),
        }
    }
}
