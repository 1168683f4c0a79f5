//! Terminal output helpers.

pub mod preview;
pub mod progress;
pub mod tables;

pub use preview::{PREVIEW_LINES, head_lines, print_previews};
pub use progress::CliProgress;
pub use tables::{format_size, print_descriptor_table, print_separator, truncate_string};
