//! Errors surfaced by the command-line front end.

use std::io;
use std::path::PathBuf;

use r2hl_lexer::UnknownState;
use thiserror::Error;

/// Anything that makes `r2hl` exit non-zero.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("unknown option `{0}`")]
    UnknownOption(String),

    #[error("invalid value `{value}` for `{option}` (expected one of: {expected})")]
    InvalidValue {
        option: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("unexpected argument `{0}`: only one input file may be given")]
    UnexpectedArgument(String),

    #[error("no lexer named `{0}`")]
    UnknownLexer(String),

    #[error(transparent)]
    UnknownState(#[from] UnknownState),

    #[error("cannot read `{}`: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}
