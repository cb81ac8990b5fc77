//! CLI presentation: text and json formatters per command family.

mod menu;
mod session;

pub use menu::{format_menu_json, format_menu_text, format_trail_json, format_trail_text};
pub use session::{format_flags_json, format_flags_text};
