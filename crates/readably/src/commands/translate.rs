//! Translate command: build a translation request body.

use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use readably_core::assist::{Language, TranslateRequest};
use readably_core::document;

/// Arguments for the `translate` subcommand.
#[derive(Args, Debug)]
pub struct TranslateArgs {
    /// File whose text should be translated.
    pub file: Utf8PathBuf,

    /// Target language code (defaults to the configured language, else es).
    #[arg(long, value_enum)]
    pub to: Option<Language>,
}

/// Print the translation request for a file as JSON.
#[instrument(name = "cmd_translate", skip_all, fields(file = %args.file))]
pub fn cmd_translate(
    args: TranslateArgs,
    config_language: Option<Language>,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let language = args.to.or(config_language).unwrap_or_default();
    debug!(language = language.code(), "executing translate command");

    let content = document::read_text(&args.file, max_input_bytes)?;
    let request = TranslateRequest::new(content, language)?;

    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}
