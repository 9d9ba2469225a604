//! Token stream renderers.
//!
//! Every renderer writes to an `impl Write` so the CLI can hand it a
//! locked, buffered stdout and tests can hand it a `Vec<u8>`.

use std::io::{self, Write};

use r2hl_lexer::{Category, Token};

use crate::CliError;

const RESET: &str = "\x1b[0m";

/// SGR parameters per category. An empty entry leaves the text unstyled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    styles: [&'static str; Category::ALL.len()],
}

impl Default for Theme {
    fn default() -> Self {
        let mut theme = Theme {
            styles: [""; Category::ALL.len()],
        };
        theme
            .set(Category::String, "32") // green
            .set(Category::Number, "36") // cyan
            .set(Category::NumberHex, "33") // yellow
            .set(Category::Keyword, "1;34") // bold blue
            .set(Category::Operator, "35") // magenta
            .set(Category::Comment, "2") // dim
            .set(Category::Function, "1;32"); // bold green
        theme
    }
}

impl Theme {
    /// A theme that styles nothing.
    pub fn plain() -> Self {
        Theme {
            styles: [""; Category::ALL.len()],
        }
    }

    /// SGR parameters for `category`, e.g. `"1;34"`.
    pub fn style(&self, category: Category) -> &'static str {
        self.styles[category as usize]
    }

    pub fn set(&mut self, category: Category, sgr: &'static str) -> &mut Self {
        self.styles[category as usize] = sgr;
        self
    }
}

/// Write the token texts back out, wrapping styled categories in SGR
/// sequences.
///
/// Styles are closed before every `\n` and reopened after it, so each
/// output line is self-contained for pagers such as `less -R`.
pub fn write_ansi<'a, W, I>(out: &mut W, tokens: I, theme: &Theme) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = Token<'a>>,
{
    for token in tokens {
        let style = theme.style(token.category);
        if style.is_empty() {
            out.write_all(token.text.as_bytes())?;
            continue;
        }
        for line in token.text.split_inclusive('\n') {
            let (body, newline) = match line.strip_suffix('\n') {
                Some(body) => (body, "\n"),
                None => (line, ""),
            };
            if !body.is_empty() {
                write!(out, "\x1b[{style}m{body}{RESET}")?;
            }
            out.write_all(newline.as_bytes())?;
        }
    }
    Ok(())
}

/// One token per line: category, byte offset, and the quoted text.
pub fn write_dump<'a, W, I>(out: &mut W, tokens: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = Token<'a>>,
{
    for token in tokens {
        writeln!(out, "{:<10} {:>6} {:?}", token.category, token.offset, token.text)?;
    }
    Ok(())
}

/// A pretty-printed JSON array of tokens followed by a newline.
pub fn write_json<W: Write>(out: &mut W, tokens: &[Token<'_>]) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, tokens)?;
    out.write_all(b"\n")?;
    Ok(())
}
