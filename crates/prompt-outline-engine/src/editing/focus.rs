//! Focused-edit orchestration.
//!
//! The splice primitive in [`splice`](crate::editing::splice) is general: it
//! trusts whatever fragment it is given. The policies that make focused
//! editing feel right — child headings may not be shallower than the edited
//! section, the edited node keeps its id when its heading survives, focus
//! moves somewhere sensible when the heading is erased — belong to the caller
//! and live here, layered on top of the primitive.

use std::rc::Rc;
use std::sync::LazyLock;

use regex::Regex;

use crate::editing::update_tree_with_fragment;
use crate::models::TreeNode;
use crate::parsing::{parse_markdown, to_markdown};

/// First line of an edited fragment: heading marker only, title ignored.
static FRAGMENT_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s").unwrap());

/// Clamp patterns by self level: `CLAMP[n - 1]` matches headings of level
/// 1..=n at line starts.
static CLAMP: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    (1..=5)
        .map(|n| Regex::new(&format!(r"(?m)^#{{1,{n}}}\s")).unwrap())
        .collect()
});

/// Outcome of applying a focused edit: the new document root and the id the
/// UI should focus next.
#[derive(Debug, Clone)]
pub struct FocusedEdit {
    pub root: Rc<TreeNode>,
    pub focus: Option<String>,
}

/// Rewrite headings in an edited fragment so children stay strictly deeper
/// than the fragment's own heading.
///
/// When the first line is a heading of level `L` and `L + 1 <= 6`, every
/// later heading of level `<= L` is rewritten to level `L + 1`. Editing the
/// root (`focus_level == 0`) is unrestricted, as is a fragment whose first
/// line is not a heading.
pub fn clamp_fragment_levels(markdown: &str, focus_level: u8) -> String {
    if focus_level == 0 {
        return markdown.to_string();
    }
    let Some((first, rest)) = markdown.split_once('\n') else {
        return markdown.to_string();
    };
    let Some(caps) = FRAGMENT_HEADING.captures(first) else {
        return markdown.to_string();
    };

    let self_level = caps[1].len();
    let min_child_level = self_level + 1;
    if min_child_level > 6 {
        return markdown.to_string();
    }

    let marker = format!("{} ", "#".repeat(min_child_level));
    let clamped = CLAMP[self_level - 1].replace_all(rest, marker.as_str());
    format!("{first}\n{clamped}")
}

/// Apply the text a user typed while focused on one subtree.
///
/// Clamps heading levels, parses the text into a fragment and splices it in
/// via [`update_tree_with_fragment`]. When the fragment still opens with a
/// heading, its first node is re-stamped with the focused id so the section
/// keeps its identity across the edit. When the user erased the heading line
/// entirely, the section is gone and focus moves to the previous sibling, or
/// to the parent when the section was first.
///
/// An unknown `focused_id` falls back to treating the root as focused.
pub fn apply_focused_edit(
    root: &Rc<TreeNode>,
    focused_id: &str,
    edited_markdown: &str,
) -> FocusedEdit {
    let focused = root.find(focused_id).unwrap_or(root);
    let focused_id = focused.id.clone();
    let focused_level = focused.level;

    let sanitized = clamp_fragment_levels(edited_markdown, focused_level);
    let mut fragment = parse_markdown(&sanitized);
    let mut focus = Some(focused_id.clone());

    if fragment.children.is_empty() && focused_level > 0 {
        // Deletion: the heading line is gone and the body merges up.
        if let Some(parent) = root.find_parent(&focused_id) {
            let index = parent.children.iter().position(|c| c.id == focused_id);
            focus = match index {
                Some(i) if i > 0 => Some(parent.children[i - 1].id.clone()),
                _ => Some(parent.id.clone()),
            };
        }
    } else if focused_level > 0 {
        fragment = restamp_first_child(&fragment, &focused_id);
    }

    let root = update_tree_with_fragment(root, &focused_id, &fragment);
    FocusedEdit { root, focus }
}

/// Literal global search/replace across the whole document text.
///
/// Operates on the serialized markdown and re-parses, so node ids are fresh
/// afterwards. No match (or an empty needle) returns the root
/// pointer-identical.
pub fn replace_in_document(root: &Rc<TreeNode>, search: &str, replace: &str) -> Rc<TreeNode> {
    if search.is_empty() {
        return Rc::clone(root);
    }
    let markdown = to_markdown(root);
    if !markdown.contains(search) {
        return Rc::clone(root);
    }
    parse_markdown(&markdown.replace(search, replace))
}

fn restamp_first_child(fragment: &Rc<TreeNode>, id: &str) -> Rc<TreeNode> {
    let mut updated = (**fragment).clone();
    if let Some(first) = updated.children.first() {
        let mut first_node = (**first).clone();
        first_node.id = id.to_string();
        updated.children[0] = Rc::new(first_node);
    }
    Rc::new(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::sibling_level_pushed_down(
        "## Section\n## Rival",
        2,
        "## Section\n### Rival"
    )]
    #[case::shallower_level_pushed_down(
        "## Section\n# Shallow",
        2,
        "## Section\n### Shallow"
    )]
    #[case::deeper_levels_untouched(
        "## Section\n### Child",
        2,
        "## Section\n### Child"
    )]
    #[case::body_lines_untouched(
        "## Section\nplain body\n## Rival",
        2,
        "## Section\nplain body\n### Rival"
    )]
    fn test_clamp_rewrites_offending_headings(
        #[case] input: &str,
        #[case] focus_level: u8,
        #[case] expected: &str,
    ) {
        assert_eq!(clamp_fragment_levels(input, focus_level), expected);
    }

    #[test]
    fn test_clamp_is_a_pass_through_for_root_edits() {
        let input = "# A\n# B";
        assert_eq!(clamp_fragment_levels(input, 0), input);
    }

    #[test]
    fn test_clamp_skips_fragment_without_leading_heading() {
        let input = "plain text\n# A";
        assert_eq!(clamp_fragment_levels(input, 2), input);
    }

    #[test]
    fn test_clamp_skips_level_six_sections() {
        // No level 7 exists to push children to.
        let input = "###### Leaf\n###### Rival";
        assert_eq!(clamp_fragment_levels(input, 6), input);
    }

    #[test]
    fn test_clamp_uses_the_fragment_level_not_the_stored_one() {
        // The user deepened the heading in the same edit; the rewrite keys
        // off what the text now says.
        let input = "### Section\n### Rival";
        assert_eq!(clamp_fragment_levels(input, 2), "### Section\n#### Rival");
    }

    #[test]
    fn test_focused_edit_preserves_section_id() {
        let root = parse_markdown("# A\na body\n# B\nb body");
        let b_id = root.children[1].id.clone();

        let edit = apply_focused_edit(&root, &b_id, "# B retitled\nnew body");

        assert_eq!(edit.focus.as_deref(), Some(b_id.as_str()));
        let b = edit.root.find(&b_id).unwrap();
        assert_eq!(b.text, "B retitled");
        assert_eq!(b.content.as_deref(), Some("new body"));
    }

    #[test]
    fn test_focused_edit_clamps_escaping_subsections() {
        let root = parse_markdown("# A\n## B\n# C");
        let b_id = root.children[0].children[0].id.clone();

        // The user tried to type a sibling-level heading inside B's editor.
        let edit = apply_focused_edit(&root, &b_id, "## B\n## Escapee");

        let b = edit.root.find(&b_id).unwrap();
        assert_eq!(b.children.len(), 1);
        assert_eq!(b.children[0].level, 3);
        assert_eq!(b.children[0].text, "Escapee");
        // C is still a child of the root, untouched.
        assert_eq!(edit.root.children[1].text, "C");
    }

    #[test]
    fn test_erasing_heading_focuses_previous_sibling() {
        let root = parse_markdown("# A\na body\n# B\nb body");
        let a_id = root.children[0].id.clone();
        let b_id = root.children[1].id.clone();

        let edit = apply_focused_edit(&root, &b_id, "orphan");

        assert_eq!(edit.focus.as_deref(), Some(a_id.as_str()));
        assert_eq!(edit.root.children.len(), 1);
        assert_eq!(
            edit.root.children[0].content.as_deref(),
            Some("a body\norphan")
        );
    }

    #[test]
    fn test_erasing_first_heading_focuses_parent() {
        let root = parse_markdown("# A\n## B\nb body");
        let a_id = root.children[0].id.clone();
        let b_id = root.children[0].children[0].id.clone();

        let edit = apply_focused_edit(&root, &b_id, "orphan");

        assert_eq!(edit.focus.as_deref(), Some(a_id.as_str()));
        assert_eq!(edit.root.children[0].content.as_deref(), Some("orphan"));
    }

    #[test]
    fn test_root_edit_rewrites_whole_document() {
        let root = parse_markdown("# Old");
        let root_id = root.id.clone();

        let edit = apply_focused_edit(&root, &root_id, "fresh intro\n# New");

        assert_eq!(edit.root.id, root_id);
        assert_eq!(edit.focus.as_deref(), Some(root_id.as_str()));
        assert_eq!(to_markdown(&edit.root), "fresh intro\n# New");
    }

    #[test]
    fn test_unknown_focus_falls_back_to_root() {
        let root = parse_markdown("# Old");
        let edit = apply_focused_edit(&root, "no-such-id", "# New");
        assert_eq!(to_markdown(&edit.root), "# New");
        assert_eq!(edit.root.id, root.id);
    }

    #[test]
    fn test_replace_in_document_rewrites_titles_and_bodies() {
        let root = parse_markdown("# Widget\nthe widget is here\n# Other");
        let updated = replace_in_document(&root, "widget", "gadget");
        assert_eq!(
            to_markdown(&updated),
            "# Widget\nthe gadget is here\n# Other"
        );
    }

    #[test]
    fn test_replace_in_document_without_match_is_a_no_op() {
        let root = parse_markdown("# A\nbody");
        let same = replace_in_document(&root, "missing", "x");
        assert!(Rc::ptr_eq(&same, &root));
    }

    #[test]
    fn test_replace_in_document_treats_needle_literally() {
        let root = parse_markdown("# A\ncost is $5.00 (net)");
        let updated = replace_in_document(&root, "$5.00 (net)", "$6.00 (gross)");
        assert_eq!(
            to_markdown(&updated),
            "# A\ncost is $6.00 (gross)"
        );
    }
}
