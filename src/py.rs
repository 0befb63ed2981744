//! Python bindings for the workspace builder using PyO3

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use serde_json::Value;

use crate::builder::WorkspaceBuilder;
use crate::config::WorkspaceConfig;
use crate::document::WorkspaceDocument;
use crate::error::WorkspaceError;
use crate::types::RawRow;

fn to_py_err(err: WorkspaceError) -> PyErr {
    PyErr::new::<PyValueError, _>(err.to_string())
}

fn config_from_args(
    workspace_id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    language: Option<String>,
    fallback: Option<String>,
    intent_prefix: Option<String>,
) -> WorkspaceConfig {
    let mut config = WorkspaceConfig::default();
    if let Some(workspace_id) = workspace_id {
        config = config.with_workspace_id(workspace_id);
    }
    if let Some(name) = name {
        config = config.with_name(name);
    }
    if let Some(description) = description {
        config = config.with_description(description);
    }
    if let Some(language) = language {
        config = config.with_language(language);
    }
    if let Some(fallback) = fallback {
        config = config.with_fallback(fallback);
    }
    if let Some(intent_prefix) = intent_prefix {
        config = config.with_intent_prefix(intent_prefix);
    }
    config
}

fn render(document: &WorkspaceDocument, pretty: bool) -> PyResult<String> {
    let json = if pretty {
        document.to_json_pretty()
    } else {
        document.to_json()
    };
    json.map_err(to_py_err)
}

/// Build a workspace document from rows of cells (Python function)
///
/// Returns the document as JSON text.
#[pyfunction]
#[pyo3(name = "build_workspace")]
#[pyo3(signature = (rows, workspace_id=None, name=None, description=None, language=None, fallback=None, intent_prefix=None, pretty=false))]
#[allow(clippy::too_many_arguments)]
pub fn py_build_workspace(
    rows: Vec<RawRow>,
    workspace_id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    language: Option<String>,
    fallback: Option<String>,
    intent_prefix: Option<String>,
    pretty: bool,
) -> PyResult<String> {
    let config = config_from_args(workspace_id, name, description, language, fallback, intent_prefix);
    let document = WorkspaceBuilder::new(&config)
        .build_raw(&rows)
        .map_err(to_py_err)?;
    render(&document, pretty)
}

/// Python wrapper holding one workspace configuration
#[pyclass]
pub struct PyWorkspaceBuilder {
    config: WorkspaceConfig,
}

#[pymethods]
impl PyWorkspaceBuilder {
    #[new]
    #[pyo3(signature = (workspace_id=None, name=None, description=None, language=None, fallback=None, intent_prefix=None))]
    fn new(
        workspace_id: Option<String>,
        name: Option<String>,
        description: Option<String>,
        language: Option<String>,
        fallback: Option<String>,
        intent_prefix: Option<String>,
    ) -> PyResult<Self> {
        let config = config_from_args(workspace_id, name, description, language, fallback, intent_prefix);
        config.validate().map_err(to_py_err)?;
        Ok(Self { config })
    }

    /// Build from a list of rows, each a list of cells (str or None)
    #[pyo3(signature = (rows, pretty=false))]
    fn build(&self, rows: Vec<RawRow>, pretty: bool) -> PyResult<String> {
        let document = WorkspaceBuilder::new(&self.config)
            .build_raw(&rows)
            .map_err(to_py_err)?;
        render(&document, pretty)
    }

    /// Build from a JSON array of rows
    #[pyo3(signature = (table, pretty=false))]
    fn build_from_json(&self, table: &str, pretty: bool) -> PyResult<String> {
        let table: Value = serde_json::from_str(table)
            .map_err(|e| PyErr::new::<PyValueError, _>(format!("Failed to parse table: {}", e)))?;
        let document = WorkspaceBuilder::new(&self.config)
            .build_json(&table)
            .map_err(to_py_err)?;
        render(&document, pretty)
    }

    /// Name given to the intent of row `index`
    fn intent_name(&self, index: usize) -> String {
        WorkspaceBuilder::new(&self.config).intent_name(index)
    }

    /// Generation timestamp in milliseconds since the epoch
    fn generated_millis(&self) -> i64 {
        self.config.generated().millis()
    }
}
