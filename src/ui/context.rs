//! UI context for detecting interactive vs CI environments

use std::io::IsTerminal;

/// Decides whether output may use spinners, bars and prompts
#[derive(Debug, Clone)]
pub struct UiContext {
    interactive: bool,
    auto_yes: bool,
}

impl UiContext {
    /// Interactive when both stdin and stdout are terminals and no CI marker is set
    pub fn detect() -> Self {
        let tty = std::io::stdout().is_terminal() && std::io::stdin().is_terminal();
        let ci = ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "BUILDKITE"]
            .iter()
            .any(|var| std::env::var_os(var).is_some());

        Self {
            interactive: tty && !ci,
            auto_yes: false,
        }
    }

    /// Plain output, no prompts
    pub fn non_interactive() -> Self {
        Self {
            interactive: false,
            auto_yes: false,
        }
    }

    /// Answer yes to every confirmation
    pub fn with_auto_yes(mut self, yes: bool) -> Self {
        self.auto_yes = yes;
        self
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn auto_yes(&self) -> bool {
        self.auto_yes
    }

    /// Whether to draw progress bars and styled blocks
    pub fn use_fancy_output(&self) -> bool {
        self.interactive
    }
}
