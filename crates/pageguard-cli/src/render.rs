//! Table rendering for CLI output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use pageguard_core::{Dispatch, Effect, Listener, ReplayLog, SessionStats};
use pageguard_model::{EventOutcome, Gesture, Messages, PageHost};

/// Listeners in registration order.
pub fn wiring_table<H: PageHost>(host: &H, listeners: &[Listener<H::Element>]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Element"),
        header_cell("Event"),
        header_cell("Guard"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, listener) in listeners.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(host.describe(&listener.target)),
            Cell::new(listener.event().as_str()),
            Cell::new(listener.handler.label()),
        ]);
    }
    table
}

/// One row per replayed gesture.
pub fn replay_table(log: &ReplayLog) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Gesture"),
        header_cell("Target"),
        header_cell("Guards"),
        header_cell("Effect"),
        header_cell("Messages"),
        header_cell("Lock"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Center);
    for (index, step) in log.steps.iter().enumerate() {
        let messages: Vec<&str> = step
            .alerts
            .iter()
            .chain(&step.prompts)
            .map(String::as_str)
            .collect();
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(gesture_label(&step.gesture)),
            Cell::new(step.gesture.target()),
            guards_cell(step.dispatch.as_ref()),
            effect_cell(&step.effect),
            if messages.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(messages.join("\n"))
            },
            lock_cell(step.edit_lock_held),
        ]);
    }
    table
}

/// Final border color per field.
pub fn borders_table(log: &ReplayLog) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Border")]);
    apply_table_style(&mut table);
    for (field, color) in &log.borders {
        table.add_row(vec![Cell::new(field), Cell::new(color)]);
    }
    table
}

pub fn stats_table(stats: &SessionStats) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Counter"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows = [
        ("edits opened", stats.edits_opened),
        ("edits blocked", stats.edits_blocked),
        ("lock releases", stats.releases),
        ("submissions suppressed", stats.submissions_suppressed),
        ("destructive actions declined", stats.destructive_declined),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table
}

/// Resolved wording, one sentence per row.
pub fn messages_table(messages: &Messages) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Message"), header_cell("Text")]);
    apply_table_style(&mut table);
    let rows = [
        ("concurrent_edit", &messages.concurrent_edit),
        ("confirm_destructive", &messages.confirm_destructive),
        ("cancel_label", &messages.cancel_label),
        ("range_violation", &messages.range_violation),
        ("unbounded_above", &messages.unbounded_above),
        ("unbounded_below", &messages.unbounded_below),
    ];
    for (key, text) in rows {
        table.add_row(vec![Cell::new(key), Cell::new(text)]);
    }
    table
}

pub fn gesture_label(gesture: &Gesture) -> String {
    match gesture {
        Gesture::Click { .. } => "click".to_string(),
        Gesture::Submit { confirm: None, .. } => "submit".to_string(),
        Gesture::Submit {
            confirm: Some(true),
            ..
        } => "submit (accept)".to_string(),
        Gesture::Submit {
            confirm: Some(false),
            ..
        } => "submit (decline)".to_string(),
        Gesture::SetValue { value, .. } => format!("set value {value:?}"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn guards_cell(dispatch: Option<&Dispatch>) -> Cell {
    let Some(dispatch) = dispatch else {
        return dim_cell("-");
    };
    if dispatch.ran.is_empty() {
        return dim_cell("none");
    }
    let mut lines: Vec<String> = dispatch
        .ran
        .iter()
        .map(|(handler, outcome)| format!("{}: {}", handler.label(), outcome_label(*outcome)))
        .collect();
    if let Some(validation) = &dispatch.validation {
        lines.extend(
            validation
                .issues
                .iter()
                .map(|issue| format!("  {} {}", issue.code(), issue.field())),
        );
    }
    Cell::new(lines.join("\n"))
}

fn outcome_label(outcome: EventOutcome) -> &'static str {
    match outcome {
        EventOutcome::Proceed => "proceed",
        EventOutcome::PreventDefault => "prevent",
        EventOutcome::Halt => "halt",
    }
}

fn effect_cell(effect: &Effect) -> Cell {
    match effect {
        Effect::Navigated(href) => Cell::new(format!("navigate {href}")).fg(Color::Green),
        Effect::Submitted(action) => Cell::new(format!("submit {action}")).fg(Color::Green),
        Effect::Activated(element) => Cell::new(format!("activate {element}")),
        Effect::Suppressed => Cell::new("suppressed")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Effect::ValueChanged => dim_cell("value changed"),
    }
}

fn lock_cell(held: bool) -> Cell {
    if held {
        Cell::new("held").fg(Color::Yellow)
    } else {
        dim_cell("free")
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
