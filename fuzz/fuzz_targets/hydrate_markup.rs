#![no_main]

use host_dom::{HostDocument, HostNodeId};
use libfuzzer_sys::fuzz_target;
use view::{ANode, ComponentDefinition, DirectiveValue, ViewNode, hydrate};

const TAGS: [&str; 4] = ["div", "p", "span", "li"];

/// Markup half: each byte appends one node under the current parent.
fn build_markup(doc: &mut HostDocument, bytes: &[u8]) {
    let mut stack: Vec<HostNodeId> = vec![doc.root()];
    for &byte in bytes {
        let Some(&parent) = stack.last() else {
            return;
        };
        let node = match byte % 8 {
            0..=3 => doc.create_element(TAGS[usize::from(byte % 4)]),
            4 => doc.create_comment("m"),
            5 => doc.create_text(" "),
            6 => doc.create_text("t"),
            _ => {
                if stack.len() > 1 {
                    stack.pop();
                }
                continue;
            }
        };
        if doc.append_child(parent, node).is_err() {
            return;
        }
        if byte & 0x80 != 0 && doc.element_name(node).is_some() {
            stack.push(node);
        }
    }
}

/// Template half: a byte stream decoded into a bounded tree.
fn build_template(bytes: &mut std::slice::Iter<'_, u8>, depth: usize) -> ANode {
    let Some(&byte) = bytes.next() else {
        return ANode::new("div");
    };
    let mut node = match byte % 6 {
        0..=3 => ANode::new(TAGS[usize::from(byte % 4)]),
        4 => ANode::new("template"),
        _ => ANode::new("div").with_is(DirectiveValue::Literal(
            if byte & 0x40 != 0 { "fragment" } else { "p" }.into(),
        )),
    };
    if depth < 4 {
        for _ in 0..(byte >> 6) {
            node = node.with_child(build_template(bytes, depth + 1));
        }
    }
    node
}

fuzz_target!(|data: &[u8]| {
    let split = data.first().map_or(0, |b| usize::from(*b)).min(data.len().saturating_sub(1));
    let (markup, template) = data.get(1..).unwrap_or_default().split_at(split);

    let mut doc = HostDocument::default();
    build_markup(&mut doc, markup);
    let definition = ComponentDefinition::new("fuzz", build_template(&mut template.iter(), 0));

    let root = doc.root();
    let mut app = hydrate(&mut doc, root, &definition).expect("hydration heals any markup");
    assert!(app.life_cycle().is_attached());
    app.update(&mut doc, &[]).expect("update");
    app.dispose(&mut doc, false, true).expect("dispose");
    assert!(app.life_cycle().is_disposed());
});
