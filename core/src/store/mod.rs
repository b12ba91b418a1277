//! Flat-file persistence layer: one CSV file per collection.
//!
//! RULE: Only the store touches the data directory.
//! Every mutation is a full read followed by a full rewrite of one file.
//! Each write lands in its own uniquely named temp file that is renamed over
//! the target, so a crash mid-write leaves the previous contents in place and
//! overlapping writers never share a half-written file. Between overlapping
//! appends the last rename wins.

mod summary;

use crate::{
    error::DeskResult,
    record::{Collection, DeskRecord},
    table::Table,
};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub use summary::ChannelTotal;

#[derive(Debug, Clone)]
pub struct DeskStore {
    data_dir: PathBuf,
}

impl DeskStore {
    /// Open the store rooted at `data_dir`, creating the directory if needed.
    pub fn open(data_dir: impl Into<PathBuf>) -> DeskResult<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_of(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.file_name())
    }

    // ── Load / save ─────────────────────────────────────────────

    /// Read a whole collection. An absent file is an empty table.
    pub fn load(&self, collection: Collection) -> DeskResult<Table> {
        let path = self.path_of(collection);
        if !path.exists() {
            log::debug!("load {}: no file yet", collection.name());
            return Ok(Table::default());
        }
        let table = read_table(&path).inspect_err(|e| {
            log::warn!("load {}: {} is malformed: {e}", collection.name(), path.display());
        })?;
        log::debug!("load {}: {} rows", collection.name(), table.len());
        Ok(table)
    }

    /// Overwrite a collection with `table`.
    pub fn save(&self, collection: Collection, table: &Table) -> DeskResult<()> {
        // Same directory as the target so the rename never crosses filesystems.
        let mut tmp = NamedTempFile::new_in(&self.data_dir)?;
        write_table(tmp.as_file_mut(), table)?;
        tmp.persist(self.path_of(collection)).map_err(|e| e.error)?;
        log::debug!("save {}: {} rows", collection.name(), table.len());
        Ok(())
    }

    // ── Append ──────────────────────────────────────────────────

    /// Append one record to its collection and return the new contents.
    pub fn append(&self, record: &DeskRecord) -> DeskResult<Table> {
        let collection = record.collection();
        let mut table = self.load(collection)?;
        table.append(&record.cells());
        self.save(collection, &table)?;
        log::info!(
            "append {}: {} (now {} rows)",
            collection.name(),
            serde_json::to_string(record)?,
            table.len()
        );
        Ok(table)
    }
}

fn read_table(path: &Path) -> DeskResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    let columns = reader.headers()?.iter().map(str::to_string).collect();
    let rows = reader
        .records()
        .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
        .collect::<Result<Vec<Vec<String>>, _>>()?;
    Ok(Table::new(columns, rows))
}

fn write_table(file: &mut File, table: &Table) -> DeskResult<()> {
    let mut writer = csv::Writer::from_writer(file);
    if !table.columns.is_empty() {
        writer.write_record(&table.columns)?;
        for row in &table.rows {
            writer.write_record(row)?;
        }
    }
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    Ok(())
}
