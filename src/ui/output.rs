//! Output helpers for consistent CLI formatting

use super::context::UiContext;
use crate::version::Version;
use console::style;

/// Severity of a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Info,
    Warn,
    Fail,
}

impl Status {
    fn tag(self) -> console::StyledObject<&'static str> {
        match self {
            Self::Ok => style("[OK]").green(),
            Self::Info => style("[INFO]").cyan(),
            Self::Warn => style("[WARN]").yellow(),
            Self::Fail => style("[FAIL]").red(),
        }
    }
}

/// Opening banner for a command
pub fn intro(ctx: &UiContext, title: &str) {
    if ctx.use_fancy_output() {
        cliclack::intro(style(title).cyan().bold()).ok();
    } else {
        println!("{}", style(title).cyan().bold());
    }
}

/// Closing line for a command
pub fn outro(ctx: &UiContext, status: Status, message: &str) {
    if ctx.use_fancy_output() {
        let message = match status {
            Status::Ok | Status::Info => style(message).green().bold(),
            Status::Warn => style(message).yellow().bold(),
            Status::Fail => style(message).red().bold(),
        };
        cliclack::outro(message).ok();
    } else {
        println!();
        println!("{} {}", status.tag(), message);
    }
}

/// One status line
pub fn step(ctx: &UiContext, status: Status, message: &str) {
    if ctx.use_fancy_output() {
        let _ = match status {
            Status::Ok => cliclack::log::success(message),
            Status::Info => cliclack::log::info(message),
            Status::Warn => cliclack::log::warning(message),
            Status::Fail => cliclack::log::error(message),
        };
    } else {
        println!("  {} {}", status.tag(), message);
    }
}

/// Dimmed follow-up line
pub fn remark(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::remark(message).ok();
    } else {
        println!("  {}", style(message).dim());
    }
}

/// `key: value` line
pub fn key_value(key: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Numbered list of versions, oldest first
pub fn version_list(versions: &[Version]) {
    for (i, version) in versions.iter().enumerate() {
        println!("  {:>3}. {}", i + 1, version);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_non_interactive() {
        let ctx = UiContext::non_interactive();
        intro(&ctx, "Test");
        step(&ctx, Status::Ok, "Step completed");
        step(&ctx, Status::Warn, "Warning");
        remark(&ctx, "hint");
        key_value("Checked", 3);
        version_list(&[Version::parse("0.1.0").unwrap()]);
        outro(&ctx, Status::Fail, "Done");
    }
}
