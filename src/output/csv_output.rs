//! CSV serialization of harvested threads
//!
//! Layout: the first record is the thread title, then one record per entry.
//! Every field is quoted.

use crate::thread::EntryCollection;
use crate::HarvestError;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Path of the CSV file for a thread label
pub fn output_path(directory: &Path, label: &str) -> PathBuf {
    directory.join(format!("{}.csv", label))
}

/// Writes a collection as CSV records to any writer
pub fn write_entries<W: Write>(writer: W, collection: &EntryCollection) -> Result<(), HarvestError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    writer.write_record([collection.title.as_str()])?;
    for entry in &collection.entries {
        writer.write_record([entry.as_str()])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes a collection to a CSV file, replacing any existing file
///
/// The file only appears at `path` once every record is written; a failed
/// write leaves neither a partial CSV nor a stray temporary file.
pub fn write_thread_csv(path: &Path, collection: &EntryCollection) -> Result<(), HarvestError> {
    persist_with(path, |file| write_entries(file, collection))
}

/// Writes through a sibling temporary file, then renames it over `path`
fn persist_with<F>(path: &Path, write: F) -> Result<(), HarvestError>
where
    F: FnOnce(&mut File) -> Result<(), HarvestError>,
{
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(directory)?;
    write(temp.as_file_mut())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| HarvestError::Io(e.error))?;
    Ok(())
}
