//! Terminal I/O abstraction layer.
//!
//! Handles TTY detection, color support, reading piped stdin, and output
//! capture for testing.

use std::io::{self, IsTerminal, Read, Write};
use std::sync::{Arc, Mutex};

/// Writer wrapper that supports both real I/O and buffered capture.
///
/// In system mode, writes go to real stdout/stderr.
/// In test mode, writes are captured to an in-memory buffer.
struct OutputWriter(Box<dyn Write + Send>);

impl std::fmt::Debug for OutputWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("OutputWriter")
    }
}

impl Write for OutputWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

/// Writer that shares a buffer with test code via `Arc<Mutex<Vec<u8>>>`.
struct SharedWriter(Arc<Mutex<Vec<u8>>>);

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self
            .0
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Captured test output that can be inspected after command execution.
#[derive(Debug, Clone)]
pub struct TestOutput {
    out_buf: Arc<Mutex<Vec<u8>>>,
    err_buf: Arc<Mutex<Vec<u8>>>,
}

impl TestOutput {
    /// Get the captured stdout content as a string.
    pub fn stdout(&self) -> String {
        let buf = self
            .out_buf
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Get the captured stderr content as a string.
    pub fn stderr(&self) -> String {
        let buf = self
            .err_buf
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        String::from_utf8_lossy(&buf).to_string()
    }
}

/// I/O streams for terminal interaction.
///
/// Commands should use [`ios_println!`](crate::ios_println) and friends
/// instead of `println!()` so output can be captured in tests.
pub struct IOStreams {
    stdin_is_tty: bool,
    stdout_is_tty: bool,
    color_forced: Option<bool>,
    never_prompt: bool,

    // Injected stdin content (test mode)
    stdin: Mutex<Option<String>>,

    out: Arc<Mutex<OutputWriter>>,
    err: Arc<Mutex<OutputWriter>>,
}

impl std::fmt::Debug for IOStreams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IOStreams")
            .field("stdin_is_tty", &self.stdin_is_tty)
            .field("stdout_is_tty", &self.stdout_is_tty)
            .field("color_forced", &self.color_forced)
            .field("never_prompt", &self.never_prompt)
            .finish_non_exhaustive()
    }
}

impl IOStreams {
    /// Create `IOStreams` for the real terminal.
    pub fn system() -> Self {
        Self {
            stdin_is_tty: io::stdin().is_terminal(),
            stdout_is_tty: io::stdout().is_terminal(),
            color_forced: std::env::var("NO_COLOR").ok().map(|_| false),
            never_prompt: false,
            stdin: Mutex::new(None),
            out: Arc::new(Mutex::new(OutputWriter(Box::new(io::stdout())))),
            err: Arc::new(Mutex::new(OutputWriter(Box::new(io::stderr())))),
        }
    }

    /// Create `IOStreams` for testing with output captured to buffers.
    ///
    /// Returns the IOStreams and a `TestOutput` handle for reading captured
    /// stdout/stderr after command execution.
    ///
    /// # Example
    ///
    /// ```
    /// use gistmate_core::IOStreams;
    ///
    /// let (ios, output) = IOStreams::test_with_output();
    /// ios.println_out("hello");
    /// assert_eq!(output.stdout(), "hello\n");
    /// ```
    pub fn test_with_output() -> (Self, TestOutput) {
        let out_buf = Arc::new(Mutex::new(Vec::<u8>::new()));
        let err_buf = Arc::new(Mutex::new(Vec::<u8>::new()));

        let ios = Self {
            stdin_is_tty: false,
            stdout_is_tty: false,
            color_forced: Some(false),
            never_prompt: true,
            stdin: Mutex::new(Some(String::new())),
            out: Arc::new(Mutex::new(OutputWriter(Box::new(SharedWriter(
                out_buf.clone(),
            ))))),
            err: Arc::new(Mutex::new(OutputWriter(Box::new(SharedWriter(
                err_buf.clone(),
            ))))),
        };

        (ios, TestOutput { out_buf, err_buf })
    }

    /// Set the stdout TTY state (for test configuration).
    pub fn set_stdout_tty(&mut self, is_tty: bool) {
        self.stdout_is_tty = is_tty;
    }

    /// Set the stdin TTY state (for test configuration).
    pub fn set_stdin_tty(&mut self, is_tty: bool) {
        self.stdin_is_tty = is_tty;
    }

    /// Replace stdin with fixed content (for test configuration).
    pub fn set_stdin(&self, content: impl Into<String>) {
        let mut guard = self
            .stdin
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some(content.into());
    }

    /// Read all of stdin.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin cannot be read or is not UTF-8.
    pub fn read_stdin(&self) -> io::Result<String> {
        let mut guard = self
            .stdin
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(content) = guard.take() {
            return Ok(content);
        }
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    }

    // --- Output methods ---

    /// Write a string to stdout followed by a newline.
    pub fn println_out(&self, s: &str) {
        let mut w = self
            .out
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let _ = writeln!(w, "{s}");
    }

    /// Write a string to stdout without a trailing newline.
    pub fn print_out(&self, s: &str) {
        let mut w = self
            .out
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let _ = w.write_all(s.as_bytes());
    }

    /// Write a string to stderr followed by a newline.
    pub fn println_err(&self, s: &str) {
        let mut w = self
            .err
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let _ = writeln!(w, "{s}");
    }

    /// Write formatted output to stdout with trailing newline.
    pub fn writeln_out(&self, args: std::fmt::Arguments<'_>) {
        let mut w = self
            .out
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let _ = w.write_fmt(args);
        let _ = w.write_all(b"\n");
    }

    /// Write formatted output to stderr with trailing newline.
    pub fn writeln_err(&self, args: std::fmt::Arguments<'_>) {
        let mut w = self
            .err
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let _ = w.write_fmt(args);
        let _ = w.write_all(b"\n");
    }

    // --- Query methods ---

    /// Whether stdin is connected to a terminal.
    pub fn is_stdin_tty(&self) -> bool {
        self.stdin_is_tty
    }

    /// Whether stdout is connected to a terminal.
    pub fn is_stdout_tty(&self) -> bool {
        self.stdout_is_tty
    }

    /// Whether color output is enabled.
    pub fn color_enabled(&self) -> bool {
        if let Some(forced) = self.color_forced {
            return forced;
        }
        self.stdout_is_tty
    }

    /// Whether prompts should never be shown.
    pub fn never_prompt(&self) -> bool {
        self.never_prompt
    }

    /// Set never-prompt mode.
    pub fn set_never_prompt(&mut self, never: bool) {
        self.never_prompt = never;
    }

    /// Check if interactive mode is available (stdin and stdout are TTY, prompts not disabled).
    pub fn can_prompt(&self) -> bool {
        self.stdin_is_tty && self.stdout_is_tty && !self.never_prompt
    }

    /// Create a `ColorScheme` based on the current color settings.
    pub fn color_scheme(&self) -> ColorScheme {
        ColorScheme {
            enabled: self.color_enabled(),
        }
    }
}

/// Terminal color scheme for themed output.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    enabled: bool,
}

impl ColorScheme {
    /// Apply bold styling.
    pub fn bold(&self, text: &str) -> String {
        if self.enabled {
            console::style(text).bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Apply warning (yellow) styling.
    pub fn warning(&self, text: &str) -> String {
        if self.enabled {
            console::style(text).yellow().to_string()
        } else {
            text.to_string()
        }
    }

    /// Apply error (red) styling.
    pub fn error(&self, text: &str) -> String {
        if self.enabled {
            console::style(text).red().to_string()
        } else {
            text.to_string()
        }
    }

    /// Apply cyan styling (for links, emphasis).
    pub fn cyan(&self, text: &str) -> String {
        if self.enabled {
            console::style(text).cyan().to_string()
        } else {
            text.to_string()
        }
    }

    /// Whether colors are enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Style for warning icon.
    pub fn warning_icon(&self) -> String {
        self.warning("!")
    }
}

/// Write to IOStreams stdout with newline, similar to `println!()`.
#[macro_export]
macro_rules! ios_println {
    ($ios:expr) => {
        $ios.println_out("")
    };
    ($ios:expr, $($arg:tt)*) => {
        $ios.writeln_out(format_args!($($arg)*))
    };
}

/// Write to IOStreams stderr with newline, similar to `eprintln!()`.
#[macro_export]
macro_rules! ios_eprintln {
    ($ios:expr) => {
        $ios.println_err("")
    };
    ($ios:expr, $($arg:tt)*) => {
        $ios.writeln_err(format_args!($($arg)*))
    };
}
