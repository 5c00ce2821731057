//! Host environment side effects: browser, clipboard, and editor.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::Mutex;

use anyhow::{Context, bail};

use crate::config::Config;

/// Clipboard programs probed in order when none is configured.
const CLIPBOARD_TOOLS: &[&[&str]] = &[
    &["pbcopy"],
    &["wl-copy"],
    &["xclip", "-selection", "clipboard"],
    &["xsel", "--clipboard", "--input"],
    &["clip"],
];

/// Editor used when nothing else is configured.
pub const DEFAULT_EDITOR: &str = "vi";

/// Side effects on the user's machine that commands may trigger.
pub trait Environment: Send + Sync + std::fmt::Debug {
    /// Open a URL in the user's browser.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser cannot be launched.
    fn open_url(&self, url: &str) -> anyhow::Result<()>;

    /// Put text on the system clipboard.
    ///
    /// # Errors
    ///
    /// Returns an error if no clipboard tool is available or it fails.
    fn copy_to_clipboard(&self, text: &str) -> anyhow::Result<()>;

    /// Open files in the user's editor and wait for it to exit.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor cannot be started or exits unsuccessfully.
    fn open_editor(&self, paths: &[PathBuf]) -> anyhow::Result<()>;
}

/// Resolve the editor command.
///
/// Order: `GISTMATE_EDITOR` or config `editor`, then `VISUAL`, then `EDITOR`,
/// then [`DEFAULT_EDITOR`].
pub fn determine_editor<C: Config + ?Sized>(config: &C) -> String {
    if let Some(editor) = config.editor() {
        return editor;
    }
    ["VISUAL", "EDITOR"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
}

/// Real environment backed by the `open` crate and external programs.
#[derive(Debug, Clone, Default)]
pub struct SystemEnvironment {
    browser: Option<String>,
    clipboard: Option<String>,
    editor: String,
}

impl SystemEnvironment {
    /// Build from configuration.
    pub fn from_config<C: Config + ?Sized>(config: &C) -> Self {
        Self {
            browser: config.browser(),
            clipboard: config.clipboard(),
            editor: determine_editor(config),
        }
    }

    /// The clipboard command line that would be used, if any.
    pub fn clipboard_command(&self) -> Option<Vec<String>> {
        if let Some(cmd) = &self.clipboard {
            return split_command(cmd);
        }
        CLIPBOARD_TOOLS.iter().find_map(|tool| {
            which::which(tool[0])
                .ok()
                .map(|_| tool.iter().map(ToString::to_string).collect())
        })
    }
}

impl Environment for SystemEnvironment {
    fn open_url(&self, url: &str) -> anyhow::Result<()> {
        let Some(launcher) = self.browser.as_deref().and_then(split_command) else {
            open::that(url).with_context(|| format!("failed to open {url}"))?;
            return Ok(());
        };
        Command::new(&launcher[0])
            .args(&launcher[1..])
            .arg(url)
            .spawn()
            .with_context(|| format!("failed to run browser {}", launcher[0]))?;
        Ok(())
    }

    fn copy_to_clipboard(&self, text: &str) -> anyhow::Result<()> {
        let Some(cmd) = self.clipboard_command() else {
            bail!("no clipboard tool found; set one with `gistmate config set clipboard <cmd>`");
        };
        tracing::debug!(tool = %cmd[0], "copying to clipboard");

        let mut child = Command::new(&cmd[0])
            .args(&cmd[1..])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to run {}", cmd[0]))?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes())?;
        }
        let status = child.wait()?;
        if !status.success() {
            bail!("{} exited with {status}", cmd[0]);
        }
        Ok(())
    }

    fn open_editor(&self, paths: &[PathBuf]) -> anyhow::Result<()> {
        let Some(cmd) = split_command(&self.editor) else {
            bail!("invalid editor command: {}", self.editor);
        };
        let status = Command::new(&cmd[0])
            .args(&cmd[1..])
            .args(paths)
            .status()
            .with_context(|| format!("failed to run editor {}", cmd[0]))?;
        if !status.success() {
            bail!("editor {} exited with {status}", cmd[0]);
        }
        Ok(())
    }
}

fn split_command(cmd: &str) -> Option<Vec<String>> {
    let parts = shlex::split(cmd).unwrap_or_else(|| vec![cmd.to_string()]);
    if parts.is_empty() { None } else { Some(parts) }
}

/// Stub environment for testing that records calls instead of acting.
#[derive(Debug, Default)]
pub struct StubEnvironment {
    /// URLs that were "opened".
    pub urls: Mutex<Vec<String>>,
    /// Text that was "copied".
    pub clipboard: Mutex<Vec<String>>,
    /// Files that were "edited".
    pub edited: Mutex<Vec<PathBuf>>,
    /// Make clipboard copies fail.
    pub fail_clipboard: bool,
}

impl StubEnvironment {
    /// Stub whose clipboard always fails.
    pub fn without_clipboard() -> Self {
        Self {
            fail_clipboard: true,
            ..Self::default()
        }
    }
}

fn record<T>(list: &Mutex<Vec<T>>, item: T) {
    list.lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .push(item);
}

impl Environment for StubEnvironment {
    fn open_url(&self, url: &str) -> anyhow::Result<()> {
        record(&self.urls, url.to_string());
        Ok(())
    }

    fn copy_to_clipboard(&self, text: &str) -> anyhow::Result<()> {
        if self.fail_clipboard {
            bail!("no clipboard tool found");
        }
        record(&self.clipboard, text.to_string());
        Ok(())
    }

    fn open_editor(&self, paths: &[PathBuf]) -> anyhow::Result<()> {
        for path in paths {
            record(&self.edited, path.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryConfig;
    use crate::test_utils::EnvVarGuard;

    #[test]
    fn test_should_record_calls_in_stub() {
        let env = StubEnvironment::default();
        env.open_url("https://gist.github.com/abc123").unwrap();
        env.copy_to_clipboard("https://gist.github.com/abc123")
            .unwrap();
        env.open_editor(&[PathBuf::from("notes.md")]).unwrap();

        assert_eq!(
            *env.urls.lock().unwrap(),
            vec!["https://gist.github.com/abc123"]
        );
        assert_eq!(env.clipboard.lock().unwrap().len(), 1);
        assert_eq!(*env.edited.lock().unwrap(), vec![PathBuf::from("notes.md")]);
    }

    #[test]
    fn test_should_fail_clipboard_when_configured() {
        let env = StubEnvironment::without_clipboard();
        assert!(env.copy_to_clipboard("x").is_err());
        assert!(env.clipboard.lock().unwrap().is_empty());
    }

    #[test]
    fn test_should_determine_editor_from_config() {
        let _guard = EnvVarGuard::set("VISUAL", "nano");
        let cfg = MemoryConfig::new().with("editor", "code -w");
        assert_eq!(determine_editor(&cfg), "code -w");
    }

    #[test]
    fn test_should_fall_back_through_visual_and_editor() {
        let _guards = [EnvVarGuard::unset("VISUAL"), EnvVarGuard::set("EDITOR", "ed")];
        let cfg = MemoryConfig::new();
        assert_eq!(determine_editor(&cfg), "ed");

        let _visual = EnvVarGuard::set("VISUAL", "emacs");
        assert_eq!(determine_editor(&cfg), "emacs");
    }

    #[test]
    fn test_should_fall_back_to_vi() {
        let _guards = [EnvVarGuard::unset("VISUAL"), EnvVarGuard::unset("EDITOR")];
        let cfg = MemoryConfig::new();
        assert_eq!(determine_editor(&cfg), DEFAULT_EDITOR);
    }

    #[test]
    fn test_should_use_configured_clipboard_command() {
        let cfg = MemoryConfig::new().with("clipboard", "xclip -selection primary");
        let env = SystemEnvironment::from_config(&cfg);
        assert_eq!(
            env.clipboard_command(),
            Some(vec![
                "xclip".to_string(),
                "-selection".to_string(),
                "primary".to_string()
            ])
        );
    }

    #[test]
    fn test_should_reject_empty_commands() {
        assert!(split_command("").is_none());
        assert_eq!(
            split_command("code --wait"),
            Some(vec!["code".to_string(), "--wait".to_string()])
        );
    }
}
