//! Benchmarks for page assembly and table coercion.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::json;

use potion::model::{BlockType, ColumnDef, ColumnType, Node, NodeMap, Schema};
use potion::render::escape_html;
use potion::{RecordDump, Renderer};

const FIXTURE: &str = include_str!("../tests/fixtures/workspace.json");
const PAGE: &str = "4a1f0c2e-93b7-4d51-8e6a-0b2c7d9f1e30";

/// A long page alternating paragraphs with runs of list items.
fn synthetic_page(blocks: usize) -> NodeMap {
    let mut nodes = NodeMap::new();
    let mut content = Vec::with_capacity(blocks);

    for i in 0..blocks {
        let id = format!("b{i}");
        let node = match i % 4 {
            0 => Node::new(&id, BlockType::Text).with_property(
                "title",
                json!([["Paragraph with "], ["bold", [["b"]]], [" & a <tag>\n"]]),
            ),
            1 | 2 => Node::new(&id, BlockType::BulletedList).with_title("item"),
            _ => Node::new(&id, BlockType::ToDo).with_title("task"),
        };
        nodes.insert(node);
        content.push(id);
    }

    nodes.insert(Node::new("root", BlockType::Page).with_content(content));
    nodes
}

// ============================================================================
// Page Benchmarks
// ============================================================================

fn bench_assemble(c: &mut Criterion) {
    let nodes = synthetic_page(1_000);
    let renderer = Renderer::default();

    c.bench_function("assemble_1000_blocks", |b| {
        b.iter(|| potion::assemble("root", &nodes, &renderer).unwrap());
    });
}

fn bench_page_from_dump(c: &mut Criterion) {
    let renderer = Renderer::default();

    c.bench_function("page_html_from_dump", |b| {
        b.iter(|| {
            let dump: RecordDump = FIXTURE.parse().unwrap();
            potion::api::page_html(&dump, PAGE, &renderer).unwrap()
        });
    });
}

fn bench_escape(c: &mut Criterion) {
    let clean = "plain text without any markup ".repeat(64);
    let dirty = "a <b> & \"c\" ".repeat(64);

    c.bench_function("escape_clean", |b| b.iter(|| escape_html(&clean).len()));
    c.bench_function("escape_dirty", |b| b.iter(|| escape_html(&dirty).len()));
}

// ============================================================================
// Table Benchmarks
// ============================================================================

fn bench_coerce_rows(c: &mut Criterion) {
    let schema = Schema::new()
        .with_column("title", ColumnDef::new("Name", ColumnType::Other("title".to_string())))
        .with_column("done", ColumnDef::new("Done", ColumnType::Checkbox))
        .with_column("tags", ColumnDef::new("Tags", ColumnType::MultiSelect))
        .with_column("notes", ColumnDef::new("Notes", ColumnType::Text));
    let rows: Vec<Node> = (0..500)
        .map(|i| {
            Node::new(format!("r{i}"), BlockType::Page)
                .with_title("Row")
                .with_property("done", json!([["Yes"]]))
                .with_property("tags", json!([["a,b,c"]]))
                .with_property("notes", json!([["Some ", [["i"]]], ["notes"]]))
        })
        .collect();
    let renderer = Renderer::default();

    c.bench_function("coerce_500_rows", |b| {
        b.iter(|| {
            rows.iter()
                .map(|row| potion::table::coerce_row(row, &schema, &renderer).len())
                .sum::<usize>()
        });
    });
}

criterion_group!(
    benches,
    bench_assemble,
    bench_page_from_dump,
    bench_escape,
    bench_coerce_rows
);
criterion_main!(benches);
