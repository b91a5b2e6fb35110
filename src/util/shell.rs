//! Terminal output settings.
//!
//! The report goes to stdout, so color detection looks at stdout. Error
//! messages go to stderr and are colored only when stderr is a terminal.

use std::fmt::Display;
use std::io::{self, IsTerminal};

/// Shell output mode - Human and Json are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellMode {
    /// Human-readable lines with optional colors.
    Human { color: ColorChoice },
    /// One JSON object per line.
    Json,
}

impl Default for ShellMode {
    fn default() -> Self {
        ShellMode::Human {
            color: ColorChoice::Auto,
        }
    }
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Detect TTY and use colors if available.
    #[default]
    Auto,
    /// Always use ANSI colors.
    Always,
    /// Never use ANSI colors.
    Never,
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "invalid color choice '{}'; expected 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}

impl ColorChoice {
    fn resolve(self, is_terminal: bool) -> bool {
        match self {
            ColorChoice::Auto => is_terminal,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

/// Colors used in output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Bold red
    Red,
    /// Bold green
    Green,
}

impl Color {
    fn code(&self) -> &'static str {
        match self {
            Color::Red => "\x1b[1;31m",
            Color::Green => "\x1b[1;32m",
        }
    }
}

const RESET: &str = "\x1b[0m";

/// Output settings for one run.
#[derive(Debug, Clone)]
pub struct Shell {
    mode: ShellMode,
    use_color: bool,
    stderr_color: bool,
}

impl Shell {
    /// Create a shell, detecting terminals for [`ColorChoice::Auto`].
    pub fn new(mode: ShellMode) -> Self {
        let (use_color, stderr_color) = match &mode {
            ShellMode::Json => (false, false),
            ShellMode::Human { color } => (
                color.resolve(io::stdout().is_terminal()),
                color.resolve(io::stderr().is_terminal()),
            ),
        };

        Shell {
            mode,
            use_color,
            stderr_color,
        }
    }

    /// Create a shell from CLI flags. JSON takes precedence over color.
    pub fn from_flags(color: ColorChoice, json: bool) -> Self {
        if json {
            Shell::new(ShellMode::Json)
        } else {
            Shell::new(ShellMode::Human { color })
        }
    }

    /// A plain shell that never colors. Used where output is captured.
    pub fn plain() -> Self {
        Shell::new(ShellMode::Human {
            color: ColorChoice::Never,
        })
    }

    /// Check if shell is in JSON mode.
    pub fn is_json(&self) -> bool {
        matches!(self.mode, ShellMode::Json)
    }

    /// Check if colors are enabled for stdout.
    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// Wrap `text` in a color when colors are enabled.
    pub fn paint(&self, text: impl Display, color: Color) -> String {
        if self.use_color {
            format!("{}{}{}", color.code(), text, RESET)
        } else {
            text.to_string()
        }
    }

    /// Print an error message to stderr.
    pub fn error(&self, msg: impl Display) {
        if self.stderr_color {
            eprintln!("{}error:{} {}", Color::Red.code(), RESET, msg);
        } else {
            eprintln!("error: {}", msg);
        }
    }
}
