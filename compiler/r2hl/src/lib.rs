//! radare2 console highlighter.
//!
//! Library half of the `r2hl` binary: option parsing, renderers for the
//! token stream, and the `highlight` command. The tokenizer itself lives
//! in `r2hl_lexer`.

pub mod commands;
mod error;
pub mod options;
pub mod render;

pub use commands::{highlight, run};
pub use error::CliError;
pub use options::{parse_options, ColorMode, HighlightOptions, OutputFormat};
pub use render::Theme;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Respects the `RUST_LOG` environment variable; does nothing when it is
/// unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
