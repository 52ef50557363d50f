//! Sidebar navigation tree

use serde::Serialize;

/// Path used for pages that exist in the menu but are not built yet
pub const PLACEHOLDER_PATH: &str = "#";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavNode {
    Leaf { title: String, path: String },
    Group { title: String, children: Vec<NavNode> },
}

impl NavNode {
    pub fn leaf(title: &str, path: &str) -> Self {
        NavNode::Leaf {
            title: title.to_string(),
            path: path.to_string(),
        }
    }

    pub fn group(title: &str, children: Vec<NavNode>) -> Self {
        NavNode::Group {
            title: title.to_string(),
            children,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            NavNode::Leaf { title, .. } | NavNode::Group { title, .. } => title,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, NavNode::Leaf { path, .. } if path == PLACEHOLDER_PATH)
    }

    /// True if this node is, or contains, the leaf for `path`
    pub fn contains_path(&self, path: &str) -> bool {
        match self {
            NavNode::Leaf { path: p, .. } => p != PLACEHOLDER_PATH && p == path,
            NavNode::Group { children, .. } => children.iter().any(|c| c.contains_path(path)),
        }
    }
}
