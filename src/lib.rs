//! Workspace core - build conversational workspaces from training corpora
//!
//! A corpus is a table with one row per intent: the answer first, then any
//! number of paraphrase questions. Each row becomes an intent and a dialog
//! node; the nodes are chained in row order and closed by a fallback node.

pub mod error;
pub mod timestamp;
pub mod types;
pub mod config;
pub mod normalizer;
pub mod chain;
pub mod document;
pub mod builder;
pub mod source;
pub mod sink;
pub mod cli;

pub use error::*;
pub use timestamp::*;
pub use types::*;
pub use config::*;
pub use normalizer::*;
pub use chain::*;
pub use document::*;
pub use builder::*;
pub use cli::Cli;

// Python bindings
#[cfg(feature = "extension-module")]
pub mod py;

#[cfg(feature = "extension-module")]
use pyo3::prelude::*;

#[cfg(feature = "extension-module")]
#[pymodule]
fn workspace_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use py::*;
    m.add_class::<PyWorkspaceBuilder>()?;
    m.add_function(wrap_pyfunction!(py_build_workspace, m)?)?;
    Ok(())
}
