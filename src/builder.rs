//! Workspace builder - turn normalized rows into a workspace document

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::chain::SiblingChain;
use crate::config::WorkspaceConfig;
use crate::document::WorkspaceDocument;
use crate::error::Result;
use crate::normalizer::{normalize_rows, rows_from_json};
use crate::types::{Example, Intent, NormalizedRow};

/// Builds workspace documents from one configuration
#[derive(Debug, Clone, Copy)]
pub struct WorkspaceBuilder<'a> {
    config: &'a WorkspaceConfig,
}

impl<'a> WorkspaceBuilder<'a> {
    pub fn new(config: &'a WorkspaceConfig) -> Self {
        Self { config }
    }

    /// Name of the intent built from row `index`
    pub fn intent_name(&self, index: usize) -> String {
        format!("{}_{}", self.config.intent_prefix(), index)
    }

    /// Build the document in a single pass over `rows`
    ///
    /// Row `i` yields intent `{prefix}_{i}` and dialog node `i`; one fallback
    /// node closes the chain. Rows are never skipped or reordered. The
    /// document is checked before it is returned, so on error nothing is
    /// produced.
    pub fn build(&self, rows: &[NormalizedRow]) -> Result<WorkspaceDocument> {
        let generated = self.config.generated();
        debug!(rows = rows.len(), generated = %generated, "Building workspace");

        let mut intents = Vec::with_capacity(rows.len());
        let mut chain = SiblingChain::with_capacity(generated, rows.len() + 1);

        for (index, row) in rows.iter().enumerate() {
            if row.answer.is_empty() {
                warn!(row = index, "Row has no answer, keeping an empty response");
            }
            if row.questions.is_empty() {
                warn!(row = index, "Row has no questions, intent will have no examples");
            }

            let examples = row
                .questions
                .iter()
                .map(|question| Example::new(question.clone(), generated))
                .collect();
            let intent = Intent::new(self.intent_name(index), generated, examples);

            chain.push_intent(&intent, &row.answer);
            intents.push(intent);
        }

        chain.push_fallback(self.config.fallback());

        let document = WorkspaceDocument {
            name: self.config.name().to_string(),
            created: generated,
            intents,
            entities: Vec::new(),
            language: self.config.language().to_string(),
            metadata: None,
            modified: generated,
            created_by: None,
            description: self.config.description().to_string(),
            modified_by: None,
            dialog_nodes: chain.into_nodes(),
            workspace_id: self.config.workspace_id().to_string(),
        };
        document.verify()?;

        info!(
            workspace_id = %document.workspace_id,
            intents = document.intents.len(),
            dialog_nodes = document.dialog_nodes.len(),
            "Workspace built"
        );
        Ok(document)
    }

    /// Normalize raw table rows, then build
    pub fn build_raw<C: AsRef<str>>(&self, rows: &[Vec<Option<C>>]) -> Result<WorkspaceDocument> {
        self.build(&normalize_rows(rows))
    }

    /// Shape-check an untyped table, normalize it, then build
    pub fn build_json(&self, table: &Value) -> Result<WorkspaceDocument> {
        let rows = rows_from_json(table)?;
        self.build_raw(&rows)
    }
}

/// Build a workspace document from normalized rows
pub fn build_workspace(config: &WorkspaceConfig, rows: &[NormalizedRow]) -> Result<WorkspaceDocument> {
    WorkspaceBuilder::new(config).build(rows)
}
