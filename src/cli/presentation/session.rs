//! Session flag presentation.

use serde_json::json;
use std::path::Path;

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

pub fn format_flags_text(is_edit: bool, is_position_toggled: bool, session_path: &Path) -> String {
    format!(
        "Editor flags ({}):\n  Edit mode:        {}\n  Position toggled: {}",
        session_path.display(),
        on_off(is_edit),
        on_off(is_position_toggled)
    )
}

pub fn format_flags_json(is_edit: bool, is_position_toggled: bool, session_path: &Path) -> String {
    let out = json!({
        "isEdit": is_edit,
        "isPositionToggled": is_position_toggled,
        "sessionPath": session_path.display().to_string(),
    });
    serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string())
}
