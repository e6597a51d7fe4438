//! Core document model for prompt-outline.
//!
//! A prompt document is flat markdown text on one side and a heading-nested
//! tree of [`TreeNode`] values on the other. This crate owns the transform
//! between the two and the structural edits a focused-subtree editor needs:
//!
//! - [`parse_markdown`] / [`to_markdown`] — the codec. Total, line-based,
//!   round-trip stable after one cycle.
//! - queries on [`TreeNode`] — id lookup, parent lookup, breadcrumb paths.
//! - [`editing`] — id-preserving rename, fragment splice-in with merge-up on
//!   heading deletion, whole-subtree replacement, duplicate-id repair, and
//!   the focused-edit policy layer.
//!
//! Everything is a pure function over persistent tree values; edits share
//! untouched subtrees by `Rc` and a missed target id comes back as a
//! pointer-identical no-op. Rendering, clipboard and storage live in the
//! host application — this crate exchanges plain markdown strings and tree
//! values with them, nothing more.

pub mod editing;
pub mod models;
pub mod parsing;

pub use editing::{
    FocusedEdit, apply_focused_edit, clamp_fragment_levels, ensure_unique_ids,
    replace_in_document, replace_node_in_tree, toggle_node_open, update_node_title,
    update_tree_with_fragment,
};
pub use models::TreeNode;
pub use parsing::{parse_markdown, to_markdown};
