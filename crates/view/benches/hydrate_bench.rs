use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use host_dom::{HostDocument, HostNodeId};
use view::{ANode, ComponentDefinition, ViewNode, hydrate, mount};

const ROWS: usize = 512;

fn list_definition(rows: usize) -> ComponentDefinition {
    let row = || {
        ANode::new("template").with_child(
            ANode::new("li")
                .with_prop("class", "row")
                .with_child(ANode::new("span")),
        )
    };
    ComponentDefinition::new("list", ANode::new("ul").with_children((0..rows).map(|_| row())))
}

/// Server markup matching `list_definition`, with whitespace between rows.
fn server_markup(rows: usize) -> (HostDocument, HostNodeId) {
    let mut doc = HostDocument::default();
    let root = doc.root();
    let ul = doc.create_element("ul");
    doc.append_child(root, ul).unwrap();
    for i in 0..rows {
        let label = i.to_string();
        let start = doc.create_comment(&label);
        let li = doc.create_element("li");
        let span = doc.create_element("span");
        let end = doc.create_comment(&label);
        let gap = doc.create_text("\n");
        doc.append_child(li, span).unwrap();
        for node in [start, li, end, gap] {
            doc.append_child(ul, node).unwrap();
        }
    }
    (doc, root)
}

fn bench_hydrate_matching(c: &mut Criterion) {
    let definition = list_definition(ROWS);
    c.bench_function("bench_hydrate_matching", |b| {
        b.iter_batched(
            || server_markup(ROWS),
            |(mut doc, root)| {
                let app = hydrate(&mut doc, black_box(root), &definition).unwrap();
                black_box(app.el_as_root_node());
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_hydrate_empty(c: &mut Criterion) {
    let definition = list_definition(ROWS);
    c.bench_function("bench_hydrate_empty", |b| {
        b.iter_batched(
            HostDocument::default,
            |mut doc| {
                let root = doc.root();
                let app = hydrate(&mut doc, black_box(root), &definition).unwrap();
                black_box(doc.len());
                black_box(app);
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_mount_then_dispose(c: &mut Criterion) {
    let definition = list_definition(ROWS);
    c.bench_function("bench_mount_then_dispose", |b| {
        b.iter_batched(
            HostDocument::default,
            |mut doc| {
                let root = doc.root();
                let mut app = mount(&mut doc, &definition, root, None).unwrap();
                app.dispose(&mut doc, false, true).unwrap();
                black_box(doc.children(root).len());
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_hydrate_matching,
    bench_hydrate_empty,
    bench_mount_then_dispose
);
criterion_main!(benches);
