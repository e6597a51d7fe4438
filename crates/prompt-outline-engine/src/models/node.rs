use std::rc::Rc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title of the synthetic level-0 root. Never emitted to markdown.
pub const ROOT_TITLE: &str = "Root";

/// One node of a heading-nested document tree.
///
/// A tree has exactly one level-0 root; every other node corresponds to a
/// markdown heading (`#`..`######`, levels 1-6). `content` holds the raw body
/// lines belonging to this node only, not its descendants. `None` means no
/// content was ever assigned, which is distinct from `Some("")` — the codec's
/// flush logic relies on that difference when appending, and the persistence
/// layer must keep `null` as `null`.
///
/// Trees are persistent values: editors never mutate a node in place, they
/// rebuild the path from the edited node up to the root and share every
/// untouched subtree via `Rc`. Callers can therefore detect a no-op edit with
/// `Rc::ptr_eq` on the returned root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// Opaque unique id, stable across edits that keep the node alive.
    pub id: String,
    /// Heading depth, 0 for the synthetic root.
    pub level: u8,
    /// Heading title.
    pub text: String,
    /// Raw body lines of this node only, newline-joined.
    pub content: Option<String>,
    /// Child sections in document order.
    pub children: Vec<Rc<TreeNode>>,
    /// UI expand/collapse flag; irrelevant to codec and editor correctness.
    #[serde(default = "default_open")]
    pub is_open: bool,
}

fn default_open() -> bool {
    true
}

impl TreeNode {
    /// Create a node with a fresh id, no content and no children.
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        Self::with_content(level, text, None)
    }

    /// Create a node with a fresh id and the given body content.
    pub fn with_content(level: u8, text: impl Into<String>, content: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            level,
            text: text.into(),
            content,
            children: Vec::new(),
            is_open: true,
        }
    }

    /// Create a fresh synthetic document root.
    pub fn root() -> Self {
        Self::new(0, ROOT_TITLE)
    }

    /// Whether this is the synthetic document root.
    pub fn is_root(&self) -> bool {
        self.level == 0
    }

    /// Depth-first pre-order lookup by id.
    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Find the node whose direct children contain `child_id`.
    ///
    /// Returns `None` when `child_id` is this node itself or is not in the
    /// tree.
    pub fn find_parent(&self, child_id: &str) -> Option<&TreeNode> {
        for child in &self.children {
            if child.id == child_id {
                return Some(self);
            }
            if let Some(found) = child.find_parent(child_id) {
                return Some(found);
            }
        }
        None
    }

    /// Heading titles from just below this node down to and including the
    /// target, for breadcrumb display.
    ///
    /// The target itself yields `Some(vec![])`. Labels are recomputed from the
    /// live tree on every call; caching them would go stale on rename.
    pub fn path_to(&self, target_id: &str) -> Option<Vec<String>> {
        if self.id == target_id {
            return Some(Vec::new());
        }
        for child in &self.children {
            if let Some(mut path) = child.path_to(target_id) {
                path.insert(0, child.text.clone());
                return Some(path);
            }
        }
        None
    }
}
