//! CLI command handlers, one per file.

mod completions;
mod locate;
mod save;
mod today;

pub use completions::run_completions;
pub use locate::{run_locate, LocateTarget};
pub use save::run_save;
pub use today::run_today;
