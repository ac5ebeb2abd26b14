// ABOUTME: Shell completion generation using clap_complete for all supported shells
// ABOUTME: Provides static completions for bash, zsh, fish, and powershell

use anyhow::{Context, Result};
use clap::{Command, CommandFactory, ValueEnum};
use clap_complete::{generate, shells};
use std::fmt;
use std::io::Write;

use crate::cli::Cli;

pub const BIN_NAME: &str = "easy8";

pub const INSTALL_HELP: &str = r#"Installation:
  Bash:       easy8 completions bash > ~/.local/share/bash-completion/completions/easy8
  Zsh:        easy8 completions zsh > ~/.zfunc/_easy8
              (add ~/.zfunc to $fpath in your ~/.zshrc)
  Fish:       easy8 completions fish > ~/.config/fish/completions/easy8.fish
  PowerShell: easy8 completions powershell > easy8_completions.ps1
              (then source it in your PowerShell profile)

You may need to restart your shell afterwards."#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[allow(clippy::enum_variant_names)]
    #[value(name = "powershell", alias = "pwsh")]
    PowerShell,
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shell_str = match self {
            Shell::Bash => "bash",
            Shell::Zsh => "zsh",
            Shell::Fish => "fish",
            Shell::PowerShell => "powershell",
        };
        write!(f, "{}", shell_str)
    }
}

/// Write the completion script for `shell` to `writer`.
pub fn generate_to<W: Write>(shell: Shell, cmd: &mut Command, writer: &mut W) {
    match shell {
        Shell::Bash => generate(shells::Bash, cmd, BIN_NAME, writer),
        Shell::Zsh => generate(shells::Zsh, cmd, BIN_NAME, writer),
        Shell::Fish => generate(shells::Fish, cmd, BIN_NAME, writer),
        Shell::PowerShell => generate(shells::PowerShell, cmd, BIN_NAME, writer),
    }
}

/// Completion script for the easy8 command line.
pub fn render(shell: Shell) -> Result<String> {
    let mut buffer = Vec::new();
    generate_to(shell, &mut Cli::command(), &mut buffer);
    String::from_utf8(buffer).with_context(|| format!("{shell} completions are not valid UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_display() {
        assert_eq!(Shell::Bash.to_string(), "bash");
        assert_eq!(Shell::Zsh.to_string(), "zsh");
        assert_eq!(Shell::Fish.to_string(), "fish");
        assert_eq!(Shell::PowerShell.to_string(), "powershell");
    }

    #[test]
    fn test_render_every_shell() {
        for shell in Shell::value_variants() {
            let script = render(*shell).expect("Should generate completions");
            assert!(!script.is_empty());
            assert!(script.contains(BIN_NAME));
        }
    }

    #[test]
    fn test_install_help_mentions_shells() {
        for shell in ["bash", "zsh", "fish", "powershell"] {
            assert!(INSTALL_HELP.contains(shell));
        }
    }
}
