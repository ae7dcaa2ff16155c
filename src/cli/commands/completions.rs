//! Completions command - print a shell completion script

use crate::cli::args::Cli;
use clap::CommandFactory;
use clap_complete::Shell;
use std::io;

/// Execute the completions command
pub fn execute(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
}
