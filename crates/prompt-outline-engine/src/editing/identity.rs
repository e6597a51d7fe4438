//! Post-load repair of the id-uniqueness invariant.

use std::collections::HashSet;
use std::rc::Rc;

use uuid::Uuid;

use crate::editing::rebuild_children;
use crate::models::TreeNode;

/// Re-stamp any node whose id was already seen earlier in pre-order.
///
/// Persisted trees can carry duplicate ids (legacy data copied a root id onto
/// its first child); fragments built by hand can too. The first occurrence of
/// an id keeps it, later ones get a fresh uuid. Idempotent, and a tree with
/// no duplicates comes back pointer-identical.
pub fn ensure_unique_ids(root: &Rc<TreeNode>) -> Rc<TreeNode> {
    let mut seen = HashSet::new();
    restamp(root, &mut seen)
}

fn restamp(node: &Rc<TreeNode>, seen: &mut HashSet<String>) -> Rc<TreeNode> {
    let fresh_id = seen
        .contains(&node.id)
        .then(|| Uuid::new_v4().to_string());
    seen.insert(fresh_id.clone().unwrap_or_else(|| node.id.clone()));

    let rebuilt = rebuild_children(node, |child| restamp(child, seen));

    match fresh_id {
        Some(id) => {
            let mut updated = (*rebuilt).clone();
            updated.id = id;
            Rc::new(updated)
        }
        None => rebuilt,
    }
}
