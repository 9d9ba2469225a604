//! The `highlight` command.

use std::fs;
use std::io::{self, BufWriter, IsTerminal, Read, Write};
use std::path::Path;

use r2hl_lexer::registry::Registry;
use r2hl_lexer::Token;
use tracing::debug;

use crate::options::{HighlightOptions, OutputFormat};
use crate::render::{write_ansi, write_dump, write_json, Theme};
use crate::CliError;

/// Highlight `text` according to `options`, writing to `out`.
///
/// `is_tty` only matters for `--color=auto`.
pub fn highlight<W: Write>(
    options: &HighlightOptions,
    text: &str,
    out: &mut W,
    is_tty: bool,
) -> Result<(), CliError> {
    let registry = Registry::with_builtins();
    let lexer = registry
        .get(&options.lexer)
        .ok_or_else(|| CliError::UnknownLexer(options.lexer.clone()))?;

    debug!(
        lexer = %options.lexer,
        state = ?options.state,
        format = ?options.format,
        bytes = text.len(),
        "highlighting"
    );

    let tokens = match &options.state {
        Some(state) => lexer.tokenize_in(text, state)?,
        None => lexer.tokenize(text),
    };
    let tokens: Box<dyn Iterator<Item = Token<'_>> + '_> = if options.coalesce {
        Box::new(tokens.coalesced())
    } else {
        Box::new(tokens)
    };

    match options.format {
        OutputFormat::Ansi => {
            let theme = if options.color.should_use_colors(is_tty) {
                Theme::default()
            } else {
                Theme::plain()
            };
            write_ansi(out, tokens, &theme)?;
        }
        OutputFormat::Tokens => write_dump(out, tokens)?,
        OutputFormat::Json => write_json(out, &tokens.collect::<Vec<_>>())?,
    }
    Ok(())
}

/// Read the input named by `options` and highlight it to stdout.
pub fn run(options: &HighlightOptions) -> Result<(), CliError> {
    let text = read_input(options.input.as_deref())?;

    let stdout = io::stdout();
    let is_tty = stdout.is_terminal();
    let mut out = BufWriter::new(stdout.lock());
    highlight(options, &text, &mut out, is_tty)?;
    out.flush()?;
    Ok(())
}

/// Invalid UTF-8 is replaced rather than rejected; console captures
/// occasionally contain stray bytes.
fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    let bytes = match path {
        Some(path) => fs::read(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?,
        None => {
            let mut bytes = Vec::new();
            io::stdin().lock().read_to_end(&mut bytes)?;
            bytes
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
