use serde::Serialize;
use similar::{ChangeTag, TextDiff};

use crate::core::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
    Context,
    Removed,
    Added,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    pub kind: DiffKind,
    pub old_no: Option<usize>,
    pub new_no: Option<usize>,
    pub text: String,
}

/// Line diff of the pretty-printed documents, with `context` unchanged lines
/// around each hunk. Empty when nothing changed.
pub fn pending_changes(old: &Value, new: &Value, context: usize) -> Vec<DiffLine> {
    let old_text = pretty(old);
    let new_text = pretty(new);
    let diff = TextDiff::from_lines(&old_text, &new_text);

    let mut out = Vec::new();
    for group in diff.grouped_ops(context) {
        for op in &group {
            for change in diff.iter_changes(op) {
                let kind = match change.tag() {
                    ChangeTag::Equal => DiffKind::Context,
                    ChangeTag::Delete => DiffKind::Removed,
                    ChangeTag::Insert => DiffKind::Added,
                };
                out.push(DiffLine {
                    kind,
                    old_no: change.old_index().map(|idx| idx + 1),
                    new_no: change.new_index().map(|idx| idx + 1),
                    text: change.value().trim_end_matches('\n').to_string(),
                });
            }
        }
    }
    out
}

fn pretty(value: &Value) -> String {
    let mut text = format!("{:#}", serde_json::Value::from(value));
    text.push('\n');
    text
}
