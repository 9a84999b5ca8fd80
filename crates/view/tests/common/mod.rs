#![allow(dead_code, unused_imports)]

use host_dom::snapshot::{DomSnapshot, DomSnapshotOptions};
use host_dom::{HostDocument, HostDocumentConfig, HostNodeId};

pub use view::test_support::{CallLog, RecordingClass};

pub fn recording_doc() -> HostDocument {
    HostDocument::new(HostDocumentConfig {
        record_mutations: true,
        ..HostDocumentConfig::default()
    })
}

/// Children of `parent` as snapshot lines, with numeric comment labels
/// (synthesized markers) normalized to `*`.
pub fn snapshot_children(doc: &HostDocument, parent: HostNodeId) -> Vec<String> {
    let node = doc.materialize(parent).expect("materialize");
    DomSnapshot::of_children(&node, DomSnapshotOptions::default())
        .as_lines()
        .iter()
        .map(|line| normalize_marker(line))
        .collect()
}

fn normalize_marker(line: &str) -> String {
    let trimmed = line.trim_start();
    let indent = &line[..line.len() - trimmed.len()];
    match trimmed
        .strip_prefix("<!-- ")
        .and_then(|rest| rest.strip_suffix(" -->"))
    {
        Some(label) if !label.is_empty() && label.bytes().all(|b| b.is_ascii_digit()) => {
            format!("{indent}<!-- * -->")
        }
        _ => line.to_string(),
    }
}
