//! Colored terminal output for the command line tool.

use std::io::{self, Write};
use termcolor::{Buffer, BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for consistent colored terminal output
#[derive(Debug)]
pub struct OutputManager {
    bufwtr: BufferWriter,
    quiet: bool,
}

impl Clone for OutputManager {
    fn clone(&self) -> Self {
        Self::new(self.quiet)
    }
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(quiet: bool) -> Self {
        Self {
            bufwtr: BufferWriter::stdout(ColorChoice::Auto),
            quiet,
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) -> io::Result<()> {
        self.marked("ℹ", ColorSpec::new().set_fg(Some(Color::Cyan)), message)
    }

    /// Print a success message
    pub fn success(&self, message: &str) -> io::Result<()> {
        self.marked(
            "✓",
            ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true),
            message,
        )
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) -> io::Result<()> {
        self.marked(
            "⚠",
            ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true),
            message,
        )
    }

    /// Print an error message to stderr (shown even in quiet mode)
    pub fn error(&self, message: &str) {
        let bufwtr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = bufwtr.buffer();
        let spec = ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true).clone();
        if write_marked(&mut buffer, "✗", &spec, message)
            .and_then(|()| bufwtr.print(&buffer))
            .is_err()
        {
            println!("✗ {message}");
        }
    }

    /// Print a labelled value, e.g. `Bundle ID: com.example.demo`
    pub fn field(&self, label: &str, value: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut buffer = self.bufwtr.buffer();
        buffer.set_color(ColorSpec::new().set_bold(true))?;
        write!(buffer, "    {label}:")?;
        buffer.reset()?;
        writeln!(buffer, " {value}")?;
        self.bufwtr.print(&buffer)
    }

    /// Print indented text (for sub-items)
    pub fn indent(&self, message: &str) -> io::Result<()> {
        self.println(&format!("    {message}"))
    }

    /// Print a plain message
    pub fn println(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut buffer = self.bufwtr.buffer();
        writeln!(buffer, "{message}")?;
        self.bufwtr.print(&buffer)
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    fn marked(&self, mark: &str, spec: &ColorSpec, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut buffer = self.bufwtr.buffer();
        write_marked(&mut buffer, mark, spec, message)?;
        self.bufwtr.print(&buffer)
    }
}

fn write_marked(buffer: &mut Buffer, mark: &str, spec: &ColorSpec, message: &str) -> io::Result<()> {
    buffer.set_color(spec)?;
    write!(buffer, "{mark}")?;
    buffer.reset()?;
    writeln!(buffer, " {message}")
}
