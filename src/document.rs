//! Workspace document - the root aggregate handed to persistence

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chain::verify_chain;
use crate::error::{Result, WorkspaceError};
use crate::timestamp::GenerationTimestamp;
use crate::types::{DialogNode, Intent};

/// A complete conversational workspace
///
/// Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceDocument {
    pub name: String,
    pub created: GenerationTimestamp,
    pub intents: Vec<Intent>,
    pub entities: Vec<Value>,
    pub language: String,
    pub metadata: Option<Value>,
    pub modified: GenerationTimestamp,
    pub created_by: Option<String>,
    pub description: String,
    pub modified_by: Option<String>,
    pub dialog_nodes: Vec<DialogNode>,
    pub workspace_id: String,
}

impl WorkspaceDocument {
    /// The trailing catch-all node
    pub fn fallback(&self) -> Option<&DialogNode> {
        self.dialog_nodes.last()
    }

    /// Check the structural invariants of the document
    ///
    /// - one dialog node per intent plus the trailing fallback
    /// - node `i` answers intent `i`
    /// - the nodes form one sibling chain in order
    pub fn verify(&self) -> Result<()> {
        if self.dialog_nodes.len() != self.intents.len() + 1 {
            return Err(WorkspaceError::build(
                None,
                format!(
                    "{} dialog nodes for {} intents",
                    self.dialog_nodes.len(),
                    self.intents.len()
                ),
            ));
        }

        for (index, (intent, node)) in self.intents.iter().zip(&self.dialog_nodes).enumerate() {
            if node.conditions != intent.condition() {
                return Err(WorkspaceError::build(
                    Some(index),
                    format!(
                        "dialog node {} matches '{}' instead of intent {}",
                        node.dialog_node, node.conditions, intent.intent
                    ),
                ));
            }
        }

        match self.fallback() {
            Some(node) if node.is_fallback() => {}
            _ => {
                return Err(WorkspaceError::build(
                    None,
                    "last dialog node is not the fallback",
                ))
            }
        }

        verify_chain(&self.dialog_nodes)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::WorkspaceBuilder;
    use crate::config::WorkspaceConfig;
    use crate::types::NormalizedRow;
    use pretty_assertions::assert_eq;

    fn document(rows: &[NormalizedRow]) -> WorkspaceDocument {
        let ts = GenerationTimestamp::from_millis(1_488_363_330_123).unwrap();
        let config = WorkspaceConfig::with_timestamp(ts).with_intent_prefix("p");
        WorkspaceBuilder::new(&config).build(rows).unwrap()
    }

    #[test]
    fn test_empty_document_json() {
        let json = document(&[]).to_json().unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"name":"Workspace Test Name","created":"2017-03-01T10:15:30.123Z","intents":[],"entities":[],"#,
                r#""language":"en","metadata":null,"modified":"2017-03-01T10:15:30.123Z","created_by":null,"#,
                r#""description":"Workspace Test Description","modified_by":null,"dialog_nodes":[{"go_to":null,"#,
                r#""output":{"text":"I do not understand what you are asking."},"parent":null,"context":null,"#,
                r#""created":"2017-03-01T10:15:30.123Z","metadata":null,"conditions":"anything_else","description":null,"#,
                r#""dialog_node":"node_1_1488363330123","previous_sibling":null}],"#,
                r#""workspace_id":"fede7b10-f035-44d8-9fcd-80cddbcf08db"}"#
            )
        );
    }

    #[test]
    fn test_special_characters_round_trip() {
        let answer = "She said \"hi\"\\ then\nleft\t\u{1}";
        let question = "What's \"that\" \\ path?";
        let doc = document(&[NormalizedRow::new(answer, vec![question.to_string()])]);

        let parsed = WorkspaceDocument::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(parsed, doc);
        assert_eq!(parsed.dialog_nodes[0].output.text, answer);
        assert_eq!(parsed.intents[0].examples[0].text, question);

        let generic: Value = serde_json::from_str(&doc.to_json_pretty().unwrap()).unwrap();
        assert_eq!(generic["dialog_nodes"][0]["output"]["text"], answer);
    }

    #[test]
    fn test_verify_rejects_missing_fallback() {
        let mut doc = document(&[NormalizedRow::new("a", Vec::new())]);
        doc.dialog_nodes.pop();
        assert!(doc.verify().is_err());
    }

    #[test]
    fn test_verify_rejects_mismatched_condition() {
        let mut doc = document(&[
            NormalizedRow::new("a", Vec::new()),
            NormalizedRow::new("b", Vec::new()),
        ]);
        doc.dialog_nodes[1].conditions = "#p_0".to_string();

        let err = doc.verify().unwrap_err();
        assert_eq!(err.row(), Some(1));
    }
}
