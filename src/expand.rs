use futures::future::{FutureExt, LocalBoxFuture};

use crate::entry::{DirectoryEntry, DropEntry};
use crate::record::DropRecord;
use crate::{DragDropError, Result};

/// Expand the entries offered by a drop into a flat [`DropRecord`]
///
/// Top-level entries are resolved one after another, each with its whole
/// subtree, in the order the platform offered them. Hidden entries (and
/// everything beneath a hidden directory) are skipped unless
/// `include_hidden` is set.
///
/// Any failure while listing a directory or reading a file fails the
/// whole expansion; files resolved before the failure are discarded.
pub async fn expand(
    entries: Vec<DropEntry>,
    include_hidden: bool,
) -> Result<DropRecord> {
    log::debug!("Expanding {} dropped entries", entries.len());

    let mut record = DropRecord::new();
    for entry in entries {
        expand_entry(entry, include_hidden, &mut record).await?;
    }

    log::debug!("Drop expanded into {} files", record.len());
    Ok(record)
}

/// Read every page of a directory listing
///
/// The reader is polled until it hands out an empty page, since a single
/// page is not guaranteed to hold all children.
pub async fn read_all_entries(
    dir: &dyn DirectoryEntry,
) -> Result<Vec<DropEntry>> {
    let mut reader = dir.create_reader();
    let mut entries = Vec::new();
    loop {
        let page = reader
            .read_entries()
            .await
            .map_err(|e| DragDropError::resolving(dir.full_path(), e))?;
        if page.is_empty() {
            break;
        }
        log::trace!(
            "Read a page of {} entries from {}",
            page.len(),
            dir.full_path()
        );
        entries.extend(page);
    }
    Ok(entries)
}

fn expand_entry(
    entry: DropEntry,
    include_hidden: bool,
    record: &mut DropRecord,
) -> LocalBoxFuture<'_, Result<()>> {
    async move {
        if !include_hidden && entry.is_hidden() {
            log::trace!("Ignoring hidden entry: {}", entry.full_path());
            return Ok(());
        }

        match entry {
            DropEntry::File(file) => {
                let path = file.full_path().to_string();
                let content = file
                    .file()
                    .await
                    .map_err(|e| DragDropError::resolving(path.as_str(), e))?;

                log::trace!("Resolved {} ({} bytes)", path, content.size());
                if record.insert(path.clone(), content).is_some() {
                    log::warn!("Path collision, keeping last entry: {}", path);
                }
            }
            DropEntry::Directory(dir) => {
                let children = read_all_entries(dir.as_ref()).await?;
                for child in children {
                    expand_entry(child, include_hidden, record).await?;
                }
            }
        }
        Ok(())
    }
    .boxed_local()
}
