//! Tree node data model.

use serde::{Deserialize, Serialize};

/// Suffix appended to a parent key to form its placeholder child's key.
const PLACEHOLDER_SUFFIX: &str = "_lazy_load_placeholder";

/// A node in a tree forest.
///
/// The `children` field encodes three shapes: `None` is a plain leaf,
/// `Some` but empty marks a lazy node whose children are fetched on first
/// activation, and `Some` with entries is an already-materialized subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Identity for expansion, selection and child patching.
    /// Must be unique across the whole tree.
    pub key: String,
    /// Display label.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
    /// Greyed out and non-interactive when set.
    #[serde(default)]
    pub disabled: bool,
}

impl TreeNode {
    /// Leaf node: no children, never lazily loadable.
    pub fn leaf(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            children: None,
            disabled: false,
        }
    }

    /// Lazy node: children unknown until first activation.
    pub fn lazy(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            children: Some(Vec::new()),
            ..Self::leaf(key, title)
        }
    }

    /// Node with an already-materialized subtree.
    pub fn branch(
        key: impl Into<String>,
        title: impl Into<String>,
        children: Vec<TreeNode>,
    ) -> Self {
        Self {
            children: Some(children),
            ..Self::leaf(key, title)
        }
    }

    /// True when children are declared but not yet known (present and empty).
    pub fn is_lazy(&self) -> bool {
        matches!(&self.children, Some(children) if children.is_empty())
    }
}

/// Synthetic key for the inert child shown under a lazy node held open.
pub fn placeholder_key(parent_key: &str) -> String {
    format!("{}{}", parent_key, PLACEHOLDER_SUFFIX)
}

/// Depth-first search of a forest for the node with `key`.
pub fn find_node<'a>(nodes: &'a [TreeNode], key: &str) -> Option<&'a TreeNode> {
    for node in nodes {
        if node.key == key {
            return Some(node);
        }
        if let Some(children) = node.children.as_deref() {
            if let Some(found) = find_node(children, key) {
                return Some(found);
            }
        }
    }
    None
}

/// Mutable variant of [`find_node`], used to patch fetched children in.
pub fn find_node_mut<'a>(nodes: &'a mut [TreeNode], key: &str) -> Option<&'a mut TreeNode> {
    for node in nodes {
        if node.key == key {
            return Some(node);
        }
        if let Some(children) = node.children.as_deref_mut() {
            if let Some(found) = find_node_mut(children, key) {
                return Some(found);
            }
        }
    }
    None
}
