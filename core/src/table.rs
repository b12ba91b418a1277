//! In-memory form of one collection file: ordered columns plus string rows.
//!
//! A table keeps every column the file carries, including ones no record
//! type knows about, so saving a loaded table reproduces it unchanged.

use crate::{
    error::{DeskError, DeskResult},
    record::Collection,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell values of one column, top to bottom.
    pub fn column<'a>(
        &'a self,
        collection: Collection,
        name: &str,
    ) -> DeskResult<impl Iterator<Item = &'a str> + 'a> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| DeskError::MissingColumn {
                collection: collection.name().to_string(),
                column: name.to_string(),
            })?;
        Ok(self
            .rows
            .iter()
            .map(move |row| row.get(idx).map(String::as_str).unwrap_or("")))
    }

    /// Numeric cell values of one column. Empty cells count as zero.
    /// A bad cell is reported by its 1-based data row, header excluded.
    pub fn amounts(&self, collection: Collection, name: &str) -> DeskResult<Vec<f64>> {
        self.column(collection, name)?
            .enumerate()
            .map(|(row, value)| {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Ok(0.0);
                }
                trimmed.parse::<f64>().map_err(|_| DeskError::BadCell {
                    collection: collection.name().to_string(),
                    row: row + 1,
                    value: value.to_string(),
                })
            })
            .collect()
    }

    /// Append one row given as (column, value) pairs.
    ///
    /// Columns the table lacks are added at the end and existing rows get
    /// an empty cell for them. Table columns the row does not mention get
    /// an empty cell in the new row.
    pub fn append(&mut self, cells: &[(&str, String)]) {
        for (name, _) in cells {
            if self.column_index(name).is_none() {
                self.columns.push((*name).to_string());
                for row in &mut self.rows {
                    row.push(String::new());
                }
            }
        }
        let row = self
            .columns
            .iter()
            .map(|col| {
                cells
                    .iter()
                    .find(|(name, _)| *name == col.as_str())
                    .map(|(_, value)| value.clone())
                    .unwrap_or_default()
            })
            .collect();
        self.rows.push(row);
    }
}
