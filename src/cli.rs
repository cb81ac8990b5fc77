//! CLI domain: parse, route, output, and presentation only.
//! No store logic lives here; the route table drives `PageEditStore`.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, OutputFormat, Switch};
pub use presentation::{
    format_flags_json, format_flags_text, format_menu_json, format_menu_text, format_trail_json,
    format_trail_text,
};
pub use route::RunContext;
