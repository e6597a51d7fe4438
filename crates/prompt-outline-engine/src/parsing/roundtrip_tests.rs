//! Round-trip stability tests for the codec.
//!
//! The guarantee is not that `to_markdown` reproduces the authored string —
//! trailing-newline counts may differ after the first parse — but that the
//! text form is a fixed point after one parse/serialize cycle.

use pretty_assertions::assert_eq;
use rstest::rstest;

use super::{parse_markdown, to_markdown};

#[rstest]
#[case::empty("")]
#[case::plain_text("just a paragraph\nwith two lines")]
#[case::single_heading("# Title")]
#[case::heading_with_body("# Title\nbody line")]
#[case::intro_before_heading("intro text\n# Title\nbody line")]
#[case::nested_sections("# A\n## B\nb body\n## C\nc body\n# D")]
#[case::blank_lines("# A\n\nparagraph one\n\nparagraph two\n\n## B")]
#[case::deep_jump("### C\ndeep first\n# A\nshallow after")]
#[case::trailing_newline("# Title\nbody\n")]
#[case::fenced_block("# A\n```\ncode line\n```\n# B")]
fn test_serialized_form_is_a_fixed_point(#[case] input: &str) {
    let first = to_markdown(&parse_markdown(input));
    let second = to_markdown(&parse_markdown(&first));
    assert_eq!(second, first);
}

#[test]
fn test_round_trip_preserves_structure() {
    let input = "# A\n## B\nb body\n## C\nc body\n# D\nd body";
    let tree = parse_markdown(input);
    let reparsed = parse_markdown(&to_markdown(&tree));

    assert_eq!(reparsed.children.len(), tree.children.len());
    let (a, a2) = (&tree.children[0], &reparsed.children[0]);
    assert_eq!(a2.text, a.text);
    assert_eq!(a2.children.len(), a.children.len());
    assert_eq!(a2.children[0].content, a.children[0].content);
    assert_eq!(a2.children[1].content, a.children[1].content);
}

#[test]
fn test_round_trip_does_not_accumulate_newlines() {
    // Trailing blank lines settle after the first cycle instead of growing.
    let mut text = to_markdown(&parse_markdown("# Title\nbody\n\n\n"));
    let settled = text.clone();
    for _ in 0..5 {
        text = to_markdown(&parse_markdown(&text));
        assert_eq!(text, settled);
    }
}

#[test]
fn test_round_trip_assigns_fresh_ids() {
    let tree = parse_markdown("# A\n## B");
    let reparsed = parse_markdown(&to_markdown(&tree));
    assert_ne!(reparsed.children[0].id, tree.children[0].id);
}
