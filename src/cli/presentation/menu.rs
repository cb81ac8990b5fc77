//! Menu and trail presentation: aggregated menu table, trail listing.

use crate::menu::{to_json, MenuOption, SharedOption};
use comfy_table::Table;
use serde_json::json;

pub fn format_menu_text(active: &str, options: &[SharedOption]) -> String {
    if options.is_empty() {
        return format!("No menu options for context '{}'.", active);
    }
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Name", "Label", "Icon", "Group", "State"]);
    for option in options {
        let option = option.read();
        table.add_row(vec![
            option.name.clone(),
            option.label.clone().unwrap_or_default(),
            option.icon.clone().unwrap_or_default(),
            group_cell(&option),
            state_cell(&option),
        ]);
    }
    format!(
        "Menu for '{}' ({} option(s)):\n{}",
        active,
        options.len(),
        table
    )
}

pub fn format_menu_json(active: &str, options: &[SharedOption]) -> String {
    let out = json!({
        "active": active,
        "options": to_json(options),
        "total": options.len(),
    });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}

pub fn format_trail_text(active: &str, trail: &[String]) -> String {
    if trail.is_empty() {
        return format!("'{}' is a root context; the trail is empty.", active);
    }
    let mut lines: Vec<String> = trail
        .iter()
        .enumerate()
        .map(|(i, id)| format!("  {}. {}", i + 1, id))
        .collect();
    lines.insert(0, format!("Trail from '{}':", active));
    lines.join("\n")
}

pub fn format_trail_json(active: &str, trail: &[String]) -> String {
    let out = json!({ "active": active, "trail": trail });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}

fn group_cell(option: &MenuOption) -> String {
    match (&option.group, &option.group_label) {
        (Some(group), Some(label)) => format!("{} ({})", group, label),
        (Some(group), None) => group.clone(),
        (None, _) => String::new(),
    }
}

fn state_cell(option: &MenuOption) -> String {
    let mut state = Vec::new();
    if option.is_active.as_ref().map(|f| f.evaluate()).unwrap_or(false) {
        state.push("active");
    }
    if option.is_disabled.as_ref().map(|f| f.evaluate()).unwrap_or(false) {
        state.push("disabled");
    }
    if option.is_hidden.as_ref().map(|f| f.evaluate()).unwrap_or(false) {
        state.push("hidden");
    }
    state.join(", ")
}
