//! CSV row source
//!
//! Reads a comma-delimited corpus without a header row. Rows may have any
//! number of cells; every cell is passed on verbatim and empty cells are
//! left for the normalizer to drop.

use std::path::Path;

use csv_async::{AsyncReaderBuilder, StringRecord};
use futures_util::StreamExt;
use tokio::io::AsyncRead;
use tracing::debug;

use crate::error::{Result, WorkspaceError};
use crate::types::RawRow;

/// Read every row from CSV text
pub async fn read_rows<R>(reader: R) -> Result<Vec<RawRow>>
where
    R: AsyncRead + Unpin + Send,
{
    let mut reader = AsyncReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .create_reader(reader);

    let mut rows = Vec::new();
    let mut records = reader.records();
    while let Some(record) = records.next().await {
        let record =
            record.map_err(|err| WorkspaceError::input_shape(Some(rows.len()), err.to_string()))?;
        rows.push(record_to_row(&record));
    }

    debug!(rows = rows.len(), "Read CSV corpus");
    Ok(rows)
}

/// Read every row from a CSV file
pub async fn read_rows_from_path(path: impl AsRef<Path>) -> Result<Vec<RawRow>> {
    let file = tokio::fs::File::open(path.as_ref()).await?;
    read_rows(file).await
}

fn record_to_row(record: &StringRecord) -> RawRow {
    record.iter().map(|cell| Some(cell.to_string())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cells(row: &RawRow) -> Vec<&str> {
        row.iter().map(|cell| cell.as_deref().unwrap_or("")).collect()
    }

    #[tokio::test]
    async fn test_ragged_rows() {
        let csv = "Yes it is raining,Is it raining?,Is it wet outside?\nThe time is noon,What time is it?\n";
        let rows = read_rows(csv.as_bytes()).await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(cells(&rows[0]), vec!["Yes it is raining", "Is it raining?", "Is it wet outside?"]);
        assert_eq!(cells(&rows[1]), vec!["The time is noon", "What time is it?"]);
    }

    #[tokio::test]
    async fn test_quoted_cells() {
        let csv = "\"Say \"\"hi\"\", then go\",\"a, b\",\n";
        let rows = read_rows(csv.as_bytes()).await.unwrap();

        assert_eq!(cells(&rows[0]), vec!["Say \"hi\", then go", "a, b", ""]);
    }

    #[tokio::test]
    async fn test_invalid_utf8_names_row() {
        let mut csv = b"ok,fine\n".to_vec();
        csv.extend_from_slice(&[0xff, 0xfe, b',', b'x', b'\n']);

        let err = read_rows(csv.as_slice()).await.unwrap_err();
        assert_eq!(err.row(), Some(1));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_rows_from_path(dir.path().join("absent.csv")).await.unwrap_err();
        assert!(matches!(err, WorkspaceError::Io(_)));
    }
}
