//! Core data types for workspace documents

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::timestamp::GenerationTimestamp;

/// Conditions of the trailing node that answers unmatched input
pub const FALLBACK_CONDITION: &str = "anything_else";

/// One line of the source table; `None` marks an absent cell
pub type RawRow = Vec<Option<String>>;

/// A table row reduced to its answer and non-empty questions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRow {
    pub answer: String,
    pub questions: Vec<String>,
}

/// A training paraphrase of an intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub text: String,
    pub created: GenerationTimestamp,
}

/// A named category of user input with its training examples
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub intent: String,
    pub created: GenerationTimestamp,
    pub description: Option<String>,
    pub examples: Vec<Example>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogOutput {
    pub text: String,
}

/// One step of the response graph, linked to the node before it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogNode {
    pub go_to: Option<Value>,
    pub output: DialogOutput,
    pub parent: Option<String>,
    pub context: Option<Value>,
    pub created: GenerationTimestamp,
    pub metadata: Option<Value>,
    pub conditions: String,
    pub description: Option<String>,
    pub dialog_node: String,
    pub previous_sibling: Option<String>,
}

impl NormalizedRow {
    pub fn new(answer: impl Into<String>, questions: Vec<String>) -> Self {
        Self {
            answer: answer.into(),
            questions,
        }
    }
}

impl Example {
    pub fn new(text: String, created: GenerationTimestamp) -> Self {
        Self { text, created }
    }
}

impl Intent {
    pub fn new(intent: String, created: GenerationTimestamp, examples: Vec<Example>) -> Self {
        Self {
            intent,
            created,
            description: None,
            examples,
        }
    }

    /// Dialog node conditions that match this intent
    pub fn condition(&self) -> String {
        intent_condition(&self.intent)
    }
}

impl DialogNode {
    pub fn new(
        dialog_node: String,
        conditions: String,
        text: String,
        previous_sibling: Option<String>,
        created: GenerationTimestamp,
    ) -> Self {
        Self {
            go_to: None,
            output: DialogOutput { text },
            parent: None,
            context: None,
            created,
            metadata: None,
            conditions,
            description: None,
            dialog_node,
            previous_sibling,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.conditions == FALLBACK_CONDITION
    }
}

pub fn intent_condition(intent_name: &str) -> String {
    format!("#{intent_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts() -> GenerationTimestamp {
        GenerationTimestamp::from_millis(1_488_363_330_123).unwrap()
    }

    #[test]
    fn test_dialog_node_field_order() {
        let node = DialogNode::new(
            "node_2_1488363330123".to_string(),
            "#my_intent_1".to_string(),
            "Noon".to_string(),
            Some("node_1_1488363330123".to_string()),
            ts(),
        );

        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(
            json,
            r##"{"go_to":null,"output":{"text":"Noon"},"parent":null,"context":null,"created":"2017-03-01T10:15:30.123Z","metadata":null,"conditions":"#my_intent_1","description":null,"dialog_node":"node_2_1488363330123","previous_sibling":"node_1_1488363330123"}"##
        );
    }

    #[test]
    fn test_intent_serializes_null_description() {
        let intent = Intent::new(
            "my_intent_0".to_string(),
            ts(),
            vec![Example::new("Is it raining?".to_string(), ts())],
        );

        let json = serde_json::to_string(&intent).unwrap();
        assert_eq!(
            json,
            r#"{"intent":"my_intent_0","created":"2017-03-01T10:15:30.123Z","description":null,"examples":[{"text":"Is it raining?","created":"2017-03-01T10:15:30.123Z"}]}"#
        );
        assert_eq!(intent.condition(), "#my_intent_0");
    }
}
