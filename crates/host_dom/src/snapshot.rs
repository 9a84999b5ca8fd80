use crate::Node;
use std::fmt::{self, Write};

/// Deterministic document serialization for tests.
/// Not a public stable format.
///
/// Rules:
/// - One line per node, two spaces of indent per depth.
/// - Elements render as `<name attr="value">`, attributes in insertion order.
/// - Comments render as `<!-- text -->`, text as `"text"`.
/// - Node ids are omitted unless requested.
#[derive(Clone, Copy, Debug, Default)]
pub struct DomSnapshotOptions {
    pub include_ids: bool,
}

#[derive(Debug)]
pub struct DomSnapshot {
    lines: Vec<String>,
}

impl DomSnapshot {
    pub fn new(root: &Node, options: DomSnapshotOptions) -> Self {
        let mut lines = Vec::new();
        walk_snapshot(root, &options, 0, &mut lines);
        Self { lines }
    }

    /// Snapshot of `root`'s children only, without the root line itself.
    pub fn of_children(root: &Node, options: DomSnapshotOptions) -> Self {
        let mut lines = Vec::new();
        for child in root.children() {
            walk_snapshot(child, &options, 0, &mut lines);
        }
        Self { lines }
    }

    pub fn as_lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for DomSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i != 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

fn walk_snapshot(node: &Node, options: &DomSnapshotOptions, depth: usize, out: &mut Vec<String>) {
    let mut line = "  ".repeat(depth);
    match node {
        Node::Document { .. } => line.push_str("#document"),
        Node::Element {
            name, attributes, ..
        } => {
            let _ = write!(&mut line, "<{name}");
            for (attr, value) in attributes {
                let _ = write!(&mut line, " {attr}=\"{value}\"");
            }
            line.push('>');
        }
        Node::Text { text, .. } => {
            let _ = write!(&mut line, "\"{}\"", escape_text(text));
        }
        Node::Comment { text, .. } => {
            let _ = write!(&mut line, "<!-- {text} -->");
        }
    }
    if options.include_ids {
        let _ = write!(&mut line, " {}", node.id());
    }
    out.push(line);
    for child in node.children() {
        walk_snapshot(child, options, depth + 1, out);
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out
}
