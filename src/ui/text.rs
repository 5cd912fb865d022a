use unicode_width::UnicodeWidthStr;

use crate::ui::view::{ButtonView, Control, GroupLayout, GroupView, ViewNode, ViewTree};

const INDENT: &str = "  ";

/// Plain-text rendering of a view, one entry per line. Labels inside a grid
/// are padded to a common display width.
pub fn render_lines(view: &ViewTree) -> Vec<String> {
    let mut lines = Vec::new();

    let shell: Vec<String> = [&view.back, &view.save, &view.delete]
        .into_iter()
        .flatten()
        .map(button)
        .collect();
    if !shell.is_empty() {
        lines.push(shell.join(" "));
    }

    push_grid(&mut lines, &view.root_scalars, 0);
    push_grid(&mut lines, &view.root_booleans, 0);
    for group in &view.groups {
        push_group(&mut lines, group, 0);
    }
    lines
}

fn button(button: &ButtonView) -> String {
    if button.disabled {
        format!("[{} (locked)]", button.title)
    } else {
        format!("[{}]", button.title)
    }
}

fn push_grid(lines: &mut Vec<String>, controls: &[Control], level: usize) {
    let width = label_width(controls.iter());
    for control in controls {
        lines.push(control_line(control, level, width));
    }
}

fn label_width<'a>(controls: impl Iterator<Item = &'a Control>) -> usize {
    controls
        .filter_map(|control| control.label.as_deref())
        .map(UnicodeWidthStr::width)
        .max()
        .unwrap_or(0)
}

fn control_line(control: &Control, level: usize, width: usize) -> String {
    let mut line = INDENT.repeat(level);
    let value = control
        .input
        .as_ref()
        .map(|input| input.display())
        .unwrap_or_else(|| "-".to_string());
    match &control.label {
        Some(label) => {
            let pad = width.saturating_sub(UnicodeWidthStr::width(label.as_str()));
            line.push_str(label);
            line.push_str(&" ".repeat(pad));
            line.push_str(" : ");
            line.push_str(&value);
        }
        None => {
            line.push_str("- ");
            line.push_str(&value);
        }
    }
    if control.disabled {
        line.push_str(" (locked)");
    }
    if let Some(remove) = &control.remove {
        line.push(' ');
        line.push_str(&button(remove));
    }
    line
}

fn push_group(lines: &mut Vec<String>, group: &GroupView, level: usize) {
    let mut head = INDENT.repeat(level);
    head.push_str(match group.layout {
        GroupLayout::Nested => "▼",
        GroupLayout::Flat => "•",
    });
    if let Some(header) = &group.header {
        if !header.title.is_empty() {
            head.push(' ');
            head.push_str(&header.title);
        }
        if let Some(add) = &header.add {
            head.push(' ');
            head.push_str(&button(add));
        }
    }
    if let Some(delete) = &group.delete {
        head.push(' ');
        head.push_str(&button(delete));
    }
    lines.push(head);

    if let Some(placeholder) = group.placeholder() {
        lines.push(format!("{}({placeholder})", INDENT.repeat(level + 1)));
        return;
    }
    let width = label_width(group.items().iter().filter_map(|item| match item {
        ViewNode::Control(control) => Some(control),
        ViewNode::Group(_) => None,
    }));
    for item in group.items() {
        match item {
            ViewNode::Control(control) => lines.push(control_line(control, level + 1, width)),
            ViewNode::Group(child) => push_group(lines, child, level + 1),
        }
    }
}
