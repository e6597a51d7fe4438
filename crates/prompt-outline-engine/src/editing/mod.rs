//! Structural editors over document trees.
//!
//! Every editor is a pure function from tree value(s) to a new tree value.
//! Edits rebuild only the path from the changed node up to the root and share
//! all untouched subtrees, so holding an old root across an edit never
//! observes partial mutation. A target id that is not in the tree is absorbed
//! as a no-op: the input root comes back pointer-identical rather than as an
//! error, which keeps a stale focused-node id from crashing a UI. Callers
//! that need to detect "nothing happened" compare roots with `Rc::ptr_eq`.

pub mod focus;
pub mod identity;
pub mod rename;
pub mod splice;

pub use focus::{FocusedEdit, apply_focused_edit, clamp_fragment_levels, replace_in_document};
pub use identity::ensure_unique_ids;
pub use rename::{toggle_node_open, update_node_title};
pub use splice::{replace_node_in_tree, update_tree_with_fragment};

use std::rc::Rc;

use crate::models::TreeNode;

/// Rebuild a node's children through `rebuild`, preserving the node itself
/// when no child changed.
///
/// Returns the input node pointer-identical when every rebuilt child is
/// pointer-identical to the original; otherwise a copy of the node carrying
/// the new children.
pub(crate) fn rebuild_children<F>(node: &Rc<TreeNode>, mut rebuild: F) -> Rc<TreeNode>
where
    F: FnMut(&Rc<TreeNode>) -> Rc<TreeNode>,
{
    let mut changed = false;
    let children: Vec<Rc<TreeNode>> = node
        .children
        .iter()
        .map(|child| {
            let next = rebuild(child);
            if !Rc::ptr_eq(&next, child) {
                changed = true;
            }
            next
        })
        .collect();

    if !changed {
        return Rc::clone(node);
    }
    let mut updated = (**node).clone();
    updated.children = children;
    Rc::new(updated)
}
