//! Markdown <-> tree codec.
//!
//! `parse_markdown` turns flat markdown into a heading-nested [`TreeNode`]
//! tree; `to_markdown` flattens a tree back out. The parser is total: any
//! input, including the empty string, yields a valid tree. Parsing is purely
//! line-based — a line matching the heading pattern inside a fenced code
//! block is still treated as a heading. That is a documented limitation of
//! the format, not something this module tries to repair.

use std::rc::Rc;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::TreeNode;

/// 1-6 `#` characters, at least one whitespace character, then the title.
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*)").unwrap());

/// Parse markdown into a tree rooted at a synthetic level-0 node.
///
/// Headings open nodes; stack discipline pops every open node of equal or
/// deeper level first, so a heading at the same depth becomes a sibling, not
/// a descendant. Non-heading lines (blank lines included) buffer up and
/// attach to the innermost open node when the next heading or the end of
/// input is reached.
pub fn parse_markdown(markdown: &str) -> Rc<TreeNode> {
    if markdown.is_empty() {
        return Rc::new(TreeNode::root());
    }

    // The stack holds the chain of still-open nodes, root at the bottom.
    let mut stack: Vec<TreeNode> = vec![TreeNode::root()];
    let mut pending: Vec<&str> = Vec::new();

    for raw in markdown.split('\n') {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if let Some(caps) = HEADING.captures(line) {
            flush_pending(&mut stack, &mut pending);
            let level = caps[1].len() as u8;
            while stack.len() > 1 && stack.last().is_some_and(|open| open.level >= level) {
                close_top(&mut stack);
            }
            stack.push(TreeNode::new(level, &caps[2]));
        } else {
            pending.push(line);
        }
    }
    flush_pending(&mut stack, &mut pending);

    while stack.len() > 1 {
        close_top(&mut stack);
    }
    Rc::new(stack.pop().expect("root never leaves the stack"))
}

/// Serialize a (sub)tree back to markdown.
///
/// The root's heading line is never emitted (level 0). Exactly one trailing
/// newline is stripped from the final output, which keeps repeated
/// parse/serialize cycles from accumulating blank lines: the text is a fixed
/// point after one round trip.
pub fn to_markdown(node: &TreeNode) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    if out.ends_with('\n') {
        out.pop();
    }
    out
}

fn write_node(node: &TreeNode, out: &mut String) {
    if node.level > 0 {
        for _ in 0..node.level {
            out.push('#');
        }
        out.push(' ');
        out.push_str(&node.text);
        out.push('\n');
    }
    if let Some(content) = &node.content {
        out.push_str(content);
        out.push('\n');
    }
    for child in &node.children {
        write_node(child, out);
    }
}

/// Attach buffered body lines to the innermost open node.
fn flush_pending(stack: &mut Vec<TreeNode>, pending: &mut Vec<&str>) {
    if pending.is_empty() {
        return;
    }
    let text = pending.join("\n");
    pending.clear();
    if let Some(open) = stack.last_mut() {
        match &mut open.content {
            Some(existing) => {
                existing.push('\n');
                existing.push_str(&text);
            }
            None => open.content = Some(text),
        }
    }
}

/// Pop the innermost open node and attach it to its parent.
fn close_top(stack: &mut Vec<TreeNode>) {
    if let Some(closed) = stack.pop()
        && let Some(parent) = stack.last_mut()
    {
        parent.children.push(Rc::new(closed));
    }
}

#[cfg(test)]
mod roundtrip_tests;
