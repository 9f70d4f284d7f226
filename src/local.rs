//! Drop entries backed by the local filesystem.
//!
//! Native hosts usually learn about a drop as a list of absolute paths.
//! [`entries_from_paths`] turns those into [`DropEntry`] handles whose full
//! paths start at the dropped item itself, the way a browser reports them.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::entry::{
    join_path, DirectoryEntry, DirectoryReader, DropEntry, Entry, FileContent,
    FileEntry,
};
use crate::memory::DEFAULT_PAGE_SIZE;
use crate::{DragDropError, Result};

/// Create drop entries for paths dropped onto a native window
pub async fn entries_from_paths<P: AsRef<Path>>(
    paths: &[P],
) -> Result<Vec<DropEntry>> {
    entries_from_paths_paged(paths, DEFAULT_PAGE_SIZE).await
}

/// Same as [`entries_from_paths`], listing directories `page_size`
/// children at a time
pub async fn entries_from_paths_paged<P: AsRef<Path>>(
    paths: &[P],
    page_size: usize,
) -> Result<Vec<DropEntry>> {
    let mut entries = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let name = file_name(path)?;
        let is_dir = fs::metadata(path).await?.is_dir();
        log::trace!("Dropped path {} (directory: {})", path.display(), is_dir);
        entries.push(local_entry(
            path.to_path_buf(),
            name.clone(),
            name,
            is_dir,
            page_size.max(1),
        ));
    }
    Ok(entries)
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            DragDropError::Access(format!(
                "{} has no file name",
                path.display()
            ))
        })
}

fn local_entry(
    path: PathBuf,
    name: String,
    full_path: String,
    is_dir: bool,
    page_size: usize,
) -> DropEntry {
    if is_dir {
        DropEntry::Directory(Box::new(LocalDirectory {
            path,
            name,
            full_path,
            page_size,
        }))
    } else {
        DropEntry::File(Box::new(LocalFile {
            path,
            name,
            full_path,
        }))
    }
}

struct LocalFile {
    path: PathBuf,
    name: String,
    full_path: String,
}

impl Entry for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn full_path(&self) -> &str {
        &self.full_path
    }
}

#[async_trait(?Send)]
impl FileEntry for LocalFile {
    async fn file(&self) -> Result<FileContent> {
        let bytes = fs::read(&self.path).await?;
        let mut content = FileContent::new(self.name.clone(), bytes);
        if let Ok(modified) = fs::metadata(&self.path)
            .await
            .and_then(|meta| meta.modified())
        {
            content = content.with_last_modified(modified);
        }
        Ok(content)
    }
}

struct LocalDirectory {
    path: PathBuf,
    name: String,
    full_path: String,
    page_size: usize,
}

impl Entry for LocalDirectory {
    fn name(&self) -> &str {
        &self.name
    }

    fn full_path(&self) -> &str {
        &self.full_path
    }
}

impl DirectoryEntry for LocalDirectory {
    fn create_reader(&self) -> Box<dyn DirectoryReader> {
        Box::new(LocalReader {
            path: self.path.clone(),
            full_path: self.full_path.clone(),
            page_size: self.page_size,
            read_dir: None,
            done: false,
        })
    }
}

struct LocalReader {
    path: PathBuf,
    full_path: String,
    page_size: usize,
    read_dir: Option<fs::ReadDir>,
    done: bool,
}

#[async_trait(?Send)]
impl DirectoryReader for LocalReader {
    async fn read_entries(&mut self) -> Result<Vec<DropEntry>> {
        if self.done {
            return Ok(Vec::new());
        }
        if self.read_dir.is_none() {
            self.read_dir = Some(fs::read_dir(&self.path).await?);
        }

        let mut page = Vec::new();
        while page.len() < self.page_size {
            let next = match self.read_dir.as_mut() {
                Some(read_dir) => read_dir.next_entry().await?,
                None => None,
            };
            let Some(child) = next else {
                self.done = true;
                self.read_dir = None;
                break;
            };

            let name = child.file_name().to_string_lossy().into_owned();
            // Follows symlinks, same as top-level paths
            let is_dir = fs::metadata(child.path()).await?.is_dir();
            page.push(local_entry(
                child.path(),
                name.clone(),
                join_path(&self.full_path, &name),
                is_dir,
                self.page_size,
            ));
        }
        Ok(page)
    }
}
