//! Row normalization - reduce raw table rows to answer/questions pairs

use serde_json::Value;

use crate::error::{Result, WorkspaceError};
use crate::types::{NormalizedRow, RawRow};

/// Normalize a single row
///
/// Cell 0 is the answer; an absent or empty answer becomes `""`. Every
/// later non-empty cell is a question, kept in order and never deduplicated.
/// Only zero-length cells count as empty, whitespace is kept verbatim.
pub fn normalize_row<C: AsRef<str>>(cells: &[Option<C>]) -> NormalizedRow {
    let mut cells = cells.iter().map(|cell| {
        cell.as_ref()
            .map(<C as AsRef<str>>::as_ref)
            .filter(|text| !text.is_empty())
    });

    let answer = cells.next().flatten().unwrap_or_default().to_string();
    let questions = cells.flatten().map(str::to_string).collect();

    NormalizedRow { answer, questions }
}

/// Normalize a whole table, one output per input row in the same order
pub fn normalize_rows<C: AsRef<str>>(rows: &[Vec<Option<C>>]) -> Vec<NormalizedRow> {
    rows.iter().map(|row| normalize_row(row)).collect()
}

/// Read raw rows out of an untyped table
///
/// The value must be an array of arrays whose cells are strings or `null`.
pub fn rows_from_json(table: &Value) -> Result<Vec<RawRow>> {
    let rows = table
        .as_array()
        .ok_or_else(|| WorkspaceError::input_shape(None, "expected an array of rows"))?;

    rows.iter()
        .enumerate()
        .map(|(index, row)| -> Result<RawRow> {
            let cells = row.as_array().ok_or_else(|| {
                WorkspaceError::input_shape(Some(index), "expected an array of cells")
            })?;

            cells
                .iter()
                .enumerate()
                .map(|(column, cell)| match cell {
                    Value::String(text) => Ok(Some(text.clone())),
                    Value::Null => Ok(None),
                    other => Err(WorkspaceError::input_shape(
                        Some(index),
                        format!("cell {column} is not a string: {other}"),
                    )),
                })
                .collect()
        })
        .collect()
}
