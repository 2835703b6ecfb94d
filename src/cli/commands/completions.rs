//! Shell completions generation.
//!
//! Generates shell completion scripts for bash, zsh, fish, `PowerShell` and elvish.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::SereneError;

/// Execute the completions command.
///
/// # Errors
///
/// Returns `SereneError::InvalidInput` for an unsupported shell.
pub fn completions(shell: &str, install: bool) -> Result<String, SereneError> {
    let shell_type = shell_from_str(shell).ok_or_else(|| {
        SereneError::InvalidInput(format!(
            "Unknown shell: {shell}. Supported: bash, zsh, fish, powershell, elvish"
        ))
    })?;

    if install {
        Ok(completion_install_instructions(shell_type))
    } else {
        generate_completions(shell_type)
    }
}

/// Generate the completion script for `shell`.
///
/// # Errors
///
/// Returns `SereneError::Parse` if the generated script is not UTF-8.
pub fn generate_completions(shell: Shell) -> Result<String, SereneError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "serene", &mut buf);
    String::from_utf8(buf).map_err(|e| SereneError::Parse(format!("UTF-8 error: {e}")))
}

/// Get shell from string name.
#[must_use]
pub fn shell_from_str(s: &str) -> Option<Shell> {
    match s.to_lowercase().as_str() {
        "bash" => Some(Shell::Bash),
        "zsh" => Some(Shell::Zsh),
        "fish" => Some(Shell::Fish),
        "powershell" | "ps" | "pwsh" => Some(Shell::PowerShell),
        "elvish" => Some(Shell::Elvish),
        _ => None,
    }
}

/// Get installation instructions for shell completions.
#[must_use]
pub fn completion_install_instructions(shell: Shell) -> String {
    match shell {
        Shell::Bash => r"# Add to ~/.bashrc or ~/.bash_profile:
source <(serene completions bash)

# Or save to a file:
serene completions bash > /usr/local/etc/bash_completion.d/serene
"
        .to_string(),

        Shell::Zsh => r"# Add to ~/.zshrc (before compinit):
source <(serene completions zsh)

# Or save to your fpath:
serene completions zsh > ~/.zsh/completions/_serene
"
        .to_string(),

        Shell::Fish => r"# Save to fish completions directory:
serene completions fish > ~/.config/fish/completions/serene.fish
"
        .to_string(),

        Shell::PowerShell => r"# Add to your PowerShell profile ($PROFILE):
serene completions powershell | Out-String | Invoke-Expression
"
        .to_string(),

        Shell::Elvish => r"# Add to ~/.config/elvish/rc.elv:
eval (serene completions elvish | slurp)
"
        .to_string(),

        _ => "Redirect the output of 'serene completions <shell>' to your shell's completion directory.\n"
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_from_str() {
        assert_eq!(shell_from_str("bash"), Some(Shell::Bash));
        assert_eq!(shell_from_str("ZSH"), Some(Shell::Zsh));
        assert_eq!(shell_from_str("pwsh"), Some(Shell::PowerShell));
        assert_eq!(shell_from_str("tcsh"), None);
    }

    #[test]
    fn test_generate_bash_completions() {
        let script = generate_completions(Shell::Bash).unwrap();
        assert!(script.contains("serene"));
        assert!(script.contains("breathe"));
    }

    #[test]
    fn test_install_instructions_mention_binary() {
        let text = completion_install_instructions(Shell::Fish);
        assert!(text.contains("serene completions fish"));
    }

    #[test]
    fn test_unknown_shell_is_error() {
        assert!(matches!(
            completions("tcsh", false),
            Err(SereneError::InvalidInput(_))
        ));
    }
}
