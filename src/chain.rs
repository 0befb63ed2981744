//! Sibling chain - the ordered, back-linked sequence of dialog nodes

use ahash::{AHashMap, AHashSet};

use crate::error::{Result, WorkspaceError};
use crate::timestamp::GenerationTimestamp;
use crate::types::{DialogNode, Intent, FALLBACK_CONDITION};

/// Id of the dialog node at a 1-based position
pub fn node_id(position: usize, generated: GenerationTimestamp) -> String {
    format!("node_{}_{}", position, generated.millis())
}

/// Dialog nodes in build order, each pointing back at its predecessor
#[derive(Debug, Clone)]
pub struct SiblingChain {
    generated: GenerationTimestamp,
    nodes: Vec<DialogNode>,
}

impl SiblingChain {
    pub fn new(generated: GenerationTimestamp) -> Self {
        Self {
            generated,
            nodes: Vec::new(),
        }
    }

    pub fn with_capacity(generated: GenerationTimestamp, capacity: usize) -> Self {
        Self {
            generated,
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Append a node answering `intent` with `answer`
    pub fn push_intent(&mut self, intent: &Intent, answer: &str) -> &DialogNode {
        self.push(intent.condition(), answer.to_string())
    }

    /// Append the catch-all node
    pub fn push_fallback(&mut self, response: &str) -> &DialogNode {
        self.push(FALLBACK_CONDITION.to_string(), response.to_string())
    }

    fn push(&mut self, conditions: String, text: String) -> &DialogNode {
        let id = node_id(self.nodes.len() + 1, self.generated);
        let previous = self.last().map(|node| node.dialog_node.clone());

        self.nodes
            .push(DialogNode::new(id, conditions, text, previous, self.generated));
        &self.nodes[self.nodes.len() - 1]
    }

    pub fn last(&self) -> Option<&DialogNode> {
        self.nodes.last()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[DialogNode] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<DialogNode> {
        self.nodes
    }
}

/// Follow `previous_sibling` from the last node back to the first
///
/// Returns the visited ids, tail first. Fails on a dangling reference or a
/// cycle.
pub fn walk_back(nodes: &[DialogNode]) -> Result<Vec<&str>> {
    let by_id: AHashMap<&str, &DialogNode> = nodes
        .iter()
        .map(|node| (node.dialog_node.as_str(), node))
        .collect();

    let mut visited: Vec<&str> = Vec::with_capacity(nodes.len());
    let mut seen: AHashSet<&str> = AHashSet::with_capacity(nodes.len());
    let mut current = nodes.last();

    while let Some(node) = current {
        let id = node.dialog_node.as_str();
        if !seen.insert(id) {
            return Err(WorkspaceError::build(
                None,
                format!("sibling chain loops back to {id}"),
            ));
        }
        visited.push(id);

        current = match node.previous_sibling.as_deref() {
            Some(previous) => Some(*by_id.get(previous).ok_or_else(|| {
                WorkspaceError::build(None, format!("{id} points at unknown sibling {previous}"))
            })?),
            None => None,
        };
    }

    Ok(visited)
}

/// Check that `nodes` form one unbroken chain in slice order
pub fn verify_chain(nodes: &[DialogNode]) -> Result<()> {
    let mut ids: AHashSet<&str> = AHashSet::with_capacity(nodes.len());

    for (index, node) in nodes.iter().enumerate() {
        if !ids.insert(node.dialog_node.as_str()) {
            return Err(WorkspaceError::build(
                Some(index),
                format!("duplicate dialog node id {}", node.dialog_node),
            ));
        }

        let expected = index
            .checked_sub(1)
            .map(|previous| nodes[previous].dialog_node.as_str());
        if node.previous_sibling.as_deref() != expected {
            return Err(WorkspaceError::build(
                Some(index),
                format!(
                    "{} has previous sibling {:?}, expected {:?}",
                    node.dialog_node, node.previous_sibling, expected
                ),
            ));
        }
    }

    let visited = walk_back(nodes)?;
    if visited.len() != nodes.len() {
        return Err(WorkspaceError::build(
            None,
            format!("sibling chain reaches {} of {} nodes", visited.len(), nodes.len()),
        ));
    }

    Ok(())
}
