//! Property tests for rendering invariants.

use proptest::prelude::*;

use potion::model::{BlockType, Modifier, Node, NodeMap, RichText, Run};
use potion::render::{DelimitedTex, RichTextOptions, escape_html, render_rich_text};
use potion::Renderer;

fn list_kind() -> impl Strategy<Value = BlockType> {
    prop_oneof![
        Just(BlockType::BulletedList),
        Just(BlockType::NumberedList),
        Just(BlockType::ToDo),
        Just(BlockType::Divider),
    ]
}

proptest! {
    #[test]
    fn prop_escaped_text_has_no_markup(s in ".*") {
        let escaped = escape_html(&s);
        prop_assert!(!escaped.contains('<'));
        prop_assert!(!escaped.contains('>'));
        prop_assert!(!escaped.contains('"'));
    }

    #[test]
    fn prop_plain_run_renders_escaped(s in "[^\n]*") {
        let text = RichText::plain(s.clone());
        let html = render_rich_text(&text, RichTextOptions::default(), &DelimitedTex);
        prop_assert_eq!(html, escape_html(&s).into_owned());
    }

    #[test]
    fn prop_unescaped_run_is_verbatim(s in "[^\n]*") {
        let text = RichText::plain(s.clone());
        let options = RichTextOptions { escape: false, line_breaks: true };
        prop_assert_eq!(render_rich_text(&text, options, &DelimitedTex), s);
    }

    #[test]
    fn prop_line_breaks_become_br(lines in prop::collection::vec("[a-z ]{0,8}", 1..6)) {
        let text = RichText::plain(lines.join("\n"));
        let html = render_rich_text(&text, RichTextOptions::default(), &DelimitedTex);
        prop_assert_eq!(html, lines.join("<br>"));
    }

    #[test]
    fn prop_modifiers_wrap_in_order(modifiers in prop::collection::vec(
        prop_oneof![Just(Modifier::Bold), Just(Modifier::Italic), Just(Modifier::Code)],
        0..4,
    )) {
        let mut run = Run::new("t");
        run.modifiers = modifiers.clone();
        let html = render_rich_text(&RichText::new(vec![run]), RichTextOptions::default(), &DelimitedTex);

        // The last modifier is the outermost tag.
        let expected = modifiers.iter().fold("t".to_string(), |inner, m| match m {
            Modifier::Bold => format!("<strong>{inner}</strong>"),
            Modifier::Italic => format!("<em>{inner}</em>"),
            _ => format!("<code>{inner}</code>"),
        });
        prop_assert_eq!(html, expected);
    }

    #[test]
    fn prop_adjacent_list_items_share_one_container(kinds in prop::collection::vec(list_kind(), 1..20)) {
        let ids: Vec<String> = (0..kinds.len()).map(|i| format!("n{i}")).collect();
        let mut nodes: NodeMap = kinds
            .iter()
            .zip(&ids)
            .map(|(kind, id)| Node::new(id.clone(), kind.clone()).with_title("x"))
            .collect();
        nodes.insert(Node::new("root", BlockType::Page).with_content(ids.clone()));

        let html = potion::assemble("root", &nodes, &Renderer::default()).unwrap();

        // One container per run of equal list kinds.
        let runs = kinds
            .iter()
            .enumerate()
            .filter(|&(i, kind)| *kind != BlockType::Divider && (i == 0 || kinds[i - 1] != *kind))
            .count();
        let containers = html.matches("<ul>").count()
            + html.matches("<ol>").count()
            + html.matches("<div class=\"checklist\">").count();
        prop_assert_eq!(containers, runs);
    }
}

#[test]
fn test_empty_rich_text_renders_empty() {
    let html = render_rich_text(&RichText::default(), RichTextOptions::default(), &DelimitedTex);
    assert_eq!(html, "");
}
