//! Completions command - shell completion scripts for `advisor`

use crate::cli::{output, Cli};
use clap::{Args, CommandFactory};
use clap_complete::Shell;
use std::io::Write;
use std::path::PathBuf;

/// Name the scripts complete, independent of how the binary was invoked
const BIN_NAME: &str = "advisor";

/// Arguments for the completions command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script to this file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Write the completion script for `shell` to `out`.
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, out);
}

/// Execute the completions command
pub fn execute(args: CompletionsArgs) -> Result<(), Box<dyn std::error::Error>> {
    match args.output {
        Some(path) => {
            let mut file = std::fs::File::create(&path)?;
            write_completions(args.shell, &mut file);
            output::print_success(&format!(
                "Wrote {} completions to {}",
                args.shell,
                path.display()
            ));
        }
        None => write_completions(args.shell, &mut std::io::stdout()),
    }
    Ok(())
}
