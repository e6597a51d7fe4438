//! Single-field edits that keep node identity.

use std::rc::Rc;

use crate::editing::rebuild_children;
use crate::models::TreeNode;

/// Replace the title of the node with `node_id`, keeping its id and subtree.
///
/// Copy-on-write along the path from the target to the root; every unrelated
/// subtree keeps its `Rc` identity. An unknown id returns the root
/// pointer-identical.
pub fn update_node_title(root: &Rc<TreeNode>, node_id: &str, new_title: &str) -> Rc<TreeNode> {
    edit_node(root, node_id, &|node| node.text = new_title.to_string())
}

/// Flip the expand/collapse flag of the node with `node_id`.
pub fn toggle_node_open(root: &Rc<TreeNode>, node_id: &str) -> Rc<TreeNode> {
    edit_node(root, node_id, &|node| node.is_open = !node.is_open)
}

fn edit_node(node: &Rc<TreeNode>, node_id: &str, edit: &impl Fn(&mut TreeNode)) -> Rc<TreeNode> {
    if node.id == node_id {
        let mut edited = (**node).clone();
        edit(&mut edited);
        return Rc::new(edited);
    }
    rebuild_children(node, |child| edit_node(child, node_id, edit))
}
