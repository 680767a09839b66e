//! End-to-end page rendering against a record map fixture.

use potion::render::{AssetProxy, DelimitedTex, NoHighlight};
use potion::source::{NodeSource, load_page};
use potion::{Error, RecordDump, Renderer};

const FIXTURE: &str = "tests/fixtures/workspace.json";
const PAGE: &str = "4a1f0c2e93b74d518e6a0b2c7d9f1e30";

fn dump() -> RecordDump {
    RecordDump::from_path(FIXTURE).expect("fixture should parse")
}

fn renderer() -> Renderer {
    Renderer::new()
        .with_assets(AssetProxy::new("https://assets.test"))
        .with_highlighter(NoHighlight)
        .with_math(DelimitedTex)
}

fn page() -> String {
    potion::api::page_html(&dump(), PAGE, &renderer()).expect("page should render")
}

#[test]
fn test_full_page() {
    let expected = concat!(
        "<h1>Version 2.0</h1>",
        "<p>Read the <strong><a href=\"https://example.com/docs\">docs</a></strong>",
        " &amp; &lt;enjoy&gt;.<br>Thanks</p>",
        "<ul><li>Faster</li><li>Smaller</li><li><em>Uses </em><code>x</code></li></ul>",
        "<div class=\"checklist\">",
        "<input type=\"checkbox\" disabled checked>Ship it</input>",
        "<input type=\"checkbox\" disabled>Celebrate</input>",
        "</div>",
        "<hr>",
        "<pre><code class=\"language-plaintext\">a &lt; b</code></pre>",
        "<marquee>hi</marquee>",
        "<div class=\"callout background-yellow\">",
        "<img src=\"https://emojicdn.elk.sh/%F0%9F%92%A1\"><p>Heads up</p></div>",
        "<img src=\"https://assets.test/api/asset?url=https%3A%2F%2Fs3.test%2Fshot.png&amp;blockId=b-image\">",
        "<div class=\"equation\">\\[e^{i\\pi} = -1\\]</div>",
    );
    assert_eq!(page(), expected);
}

#[test]
fn test_dashed_and_undashed_ids_agree() {
    let dashed = potion::api::page_html(
        &dump(),
        "4a1f0c2e-93b7-4d51-8e6a-0b2c7d9f1e30",
        &renderer(),
    )
    .unwrap();
    assert_eq!(dashed, page());
}

#[test]
fn test_nested_pages_are_not_inlined() {
    assert!(!page().contains("Archive"));
}

#[test]
fn test_rendering_is_deterministic() {
    assert_eq!(page(), page());
}

#[test]
fn test_load_page_then_assemble() {
    let dump = dump();
    let id = "4a1f0c2e-93b7-4d51-8e6a-0b2c7d9f1e30";
    let nodes = load_page(&dump, id).unwrap();

    assert!(nodes.contains(id));
    assert!(!nodes.contains("r-1"));
    assert_eq!(potion::assemble(id, &nodes, &renderer()).unwrap(), page());
}

#[test]
fn test_missing_page() {
    let err = potion::api::page_html(&dump(), "ffffffffffffffffffffffffffffffff", &renderer())
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert!(err.to_string().contains("public access"));
}

#[test]
fn test_fetch_node_values_keeps_positions() {
    let values = dump()
        .fetch_node_values(&["b-divider".to_string(), "nope".to_string(), "b-code".to_string()])
        .unwrap();
    assert_eq!(values.len(), 3);
    assert!(values[0].is_some());
    assert!(values[1].is_none());
    assert!(values[2].is_some());
}
