//! Document persistence

use std::path::Path;

use tracing::info;

use crate::document::WorkspaceDocument;
use crate::error::Result;

/// Serialize `document` and write it to `path`, replacing any existing file
pub async fn write_document(
    path: impl AsRef<Path>,
    document: &WorkspaceDocument,
    pretty: bool,
) -> Result<()> {
    let path = path.as_ref();
    let json = if pretty {
        document.to_json_pretty()?
    } else {
        document.to_json()?
    };

    tokio::fs::write(path, json).await?;
    info!(path = %path.display(), "Workspace JSON file saved");
    Ok(())
}
