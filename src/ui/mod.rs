//! Terminal output: status lines, progress bars and prompts
//!
//! Uses `cliclack` and `indicatif` when attached to a terminal and falls back
//! to plain, greppable lines in CI or when output is piped.

mod context;
mod output;
pub mod progress;
mod prompts;

pub use context::UiContext;
pub use output::{intro, key_value, outro, remark, step, version_list, Status};
pub use progress::ScanProgress;
pub use prompts::confirm;
