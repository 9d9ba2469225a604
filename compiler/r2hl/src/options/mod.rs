//! Command-line options.

use std::path::PathBuf;

use crate::CliError;

/// How the token stream is written out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// The input text with SGR colour sequences around each token.
    #[default]
    Ansi,
    /// One token per line: category, byte offset, quoted text.
    Tokens,
    /// A JSON array of `{category, text, offset}` objects.
    Json,
}

impl OutputFormat {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "ansi" => Some(OutputFormat::Ansi),
            "tokens" => Some(OutputFormat::Tokens),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Whether ANSI output carries colour sequences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Colour when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }

    /// Resolve to a boolean. `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Everything `r2hl` needs to highlight one input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighlightOptions {
    pub format: OutputFormat,
    pub color: ColorMode,
    /// Lexer name or alias, looked up case-insensitively.
    pub lexer: String,
    /// Start state pushed above the root (`--state=pdoutput`).
    pub state: Option<String>,
    /// Merge adjacent tokens of the same category before rendering.
    pub coalesce: bool,
    /// Input file; stdin when `None` or `-`.
    pub input: Option<PathBuf>,
    pub help: bool,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        HighlightOptions {
            format: OutputFormat::default(),
            color: ColorMode::default(),
            lexer: String::from("r2"),
            state: None,
            coalesce: false,
            input: None,
            help: false,
        }
    }
}

/// Parse arguments (without the program name) into options.
pub fn parse_options(args: &[String]) -> Result<HighlightOptions, CliError> {
    let mut options = HighlightOptions::default();

    for arg in args {
        if arg == "-h" || arg == "--help" {
            options.help = true;
        } else if arg == "--coalesce" {
            options.coalesce = true;
        } else if let Some(format) = arg.strip_prefix("--format=") {
            options.format =
                OutputFormat::from_str(format).ok_or_else(|| CliError::InvalidValue {
                    option: "--format",
                    value: format.to_string(),
                    expected: "ansi, tokens, json",
                })?;
        } else if let Some(color) = arg.strip_prefix("--color=") {
            options.color = ColorMode::from_str(color).ok_or_else(|| CliError::InvalidValue {
                option: "--color",
                value: color.to_string(),
                expected: "auto, always, never",
            })?;
        } else if let Some(lexer) = arg.strip_prefix("--lexer=") {
            options.lexer = lexer.to_string();
        } else if let Some(state) = arg.strip_prefix("--state=") {
            options.state = Some(state.to_string());
        } else if arg.starts_with('-') && arg != "-" {
            return Err(CliError::UnknownOption(arg.clone()));
        } else if options.input.is_none() {
            if arg != "-" {
                options.input = Some(PathBuf::from(arg));
            }
        } else {
            return Err(CliError::UnexpectedArgument(arg.clone()));
        }
    }

    Ok(options)
}

/// Usage text printed for `--help` and after option errors.
pub const USAGE: &str = "\
r2hl: highlight radare2 console output

Usage: r2hl [options] [FILE]

Reads FILE, or stdin when FILE is absent or `-`.

Options:
  --format=<fmt>    Output: ansi (default), tokens, json
  --color=<when>    ANSI colours: auto (default), always, never
  --lexer=<name>    Lexer name or alias (default: r2)
  --state=<name>    Start in the named state, e.g. pdoutput
  --coalesce        Merge adjacent tokens of the same category
  -h, --help        Show this help message

Set RUST_LOG=r2hl_lexer=trace to log state transitions.";
