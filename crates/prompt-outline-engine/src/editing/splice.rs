//! Fragment splice-in and whole-subtree replacement.
//!
//! These are the primitives behind focused editing: the caller serializes one
//! subtree, lets the user edit the text, re-parses it into a fragment (a mini
//! tree with its own synthetic root) and splices the result back into the
//! full document in place of the original node.

use std::rc::Rc;

use crate::editing::rebuild_children;
use crate::models::TreeNode;

/// Splice an edited fragment back into the tree at `target_id`'s slot.
///
/// When `target_id` is the root's own id the whole document was edited and
/// the fragment simply becomes the new tree, re-stamped with the root's id.
///
/// Otherwise the target node is removed from its parent's children and the
/// fragment's top-level children (zero or more) take its place. Content on
/// the fragment root is text that appeared before any heading in the edited
/// fragment — typically the body of a heading line the user erased. That
/// orphaned content merges up: onto the previous sibling's content when one
/// exists, else onto the parent's own content, joined with `\n` only when
/// both sides are non-empty. This is what makes "delete the `#` line" behave
/// like merging a section into the one above it.
///
/// Fragment ids are not trusted: a caller that wants the edited node to keep
/// its identity re-stamps `fragment.children[0]` before calling (see
/// [`apply_focused_edit`](crate::editing::apply_focused_edit)).
///
/// An unknown `target_id` returns the root pointer-identical.
pub fn update_tree_with_fragment(
    root: &Rc<TreeNode>,
    target_id: &str,
    fragment: &Rc<TreeNode>,
) -> Rc<TreeNode> {
    if root.id == target_id {
        let mut replacement = (**fragment).clone();
        replacement.id = root.id.clone();
        return Rc::new(replacement);
    }
    splice_fragment(root, target_id, fragment)
}

fn splice_fragment(node: &Rc<TreeNode>, target_id: &str, fragment: &Rc<TreeNode>) -> Rc<TreeNode> {
    let Some(index) = node.children.iter().position(|c| c.id == target_id) else {
        return rebuild_children(node, |child| splice_fragment(child, target_id, fragment));
    };

    let mut updated = (**node).clone();

    let orphaned = fragment.content.as_deref().filter(|c| !c.is_empty());
    if let Some(orphan) = orphaned {
        if index > 0 {
            let mut prev = (*updated.children[index - 1]).clone();
            prev.content = Some(join_content(prev.content.take(), orphan));
            updated.children[index - 1] = Rc::new(prev);
        } else {
            updated.content = Some(join_content(updated.content.take(), orphan));
        }
    }

    updated
        .children
        .splice(index..=index, fragment.children.iter().map(Rc::clone));
    Rc::new(updated)
}

/// Replace the node at `target_id` with `new_nodes`, no content merging.
///
/// Same root special case as [`update_tree_with_fragment`]: replacing the
/// root re-stamps the first replacement node with the root's id so document
/// identity survives. An empty `new_nodes` at the root is a no-op; anywhere
/// else it simply deletes the target. An unknown `target_id` returns the
/// root pointer-identical.
pub fn replace_node_in_tree(
    root: &Rc<TreeNode>,
    target_id: &str,
    new_nodes: &[Rc<TreeNode>],
) -> Rc<TreeNode> {
    if root.id == target_id {
        return match new_nodes.first() {
            Some(first) => {
                let mut replacement = (**first).clone();
                replacement.id = root.id.clone();
                Rc::new(replacement)
            }
            None => Rc::clone(root),
        };
    }
    splice_nodes(root, target_id, new_nodes)
}

fn splice_nodes(node: &Rc<TreeNode>, target_id: &str, new_nodes: &[Rc<TreeNode>]) -> Rc<TreeNode> {
    let Some(index) = node.children.iter().position(|c| c.id == target_id) else {
        return rebuild_children(node, |child| splice_nodes(child, target_id, new_nodes));
    };
    let mut updated = (**node).clone();
    updated
        .children
        .splice(index..=index, new_nodes.iter().map(Rc::clone));
    Rc::new(updated)
}

fn join_content(existing: Option<String>, addition: &str) -> String {
    match existing {
        Some(mut text) if !text.is_empty() => {
            text.push('\n');
            text.push_str(addition);
            text
        }
        _ => addition.to_string(),
    }
}
