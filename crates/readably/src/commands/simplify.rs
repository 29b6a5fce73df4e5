//! Simplify command: build a text simplification request.

use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use readably_core::assist::{ChatRequest, SimplificationLevel, SimplifyRequest};
use readably_core::document;

/// Arguments for the `simplify` subcommand.
#[derive(Args, Debug)]
pub struct SimplifyArgs {
    /// File whose text should be simplified.
    pub file: Utf8PathBuf,

    /// Target reading level (defaults to the configured level, else intermediate).
    #[arg(long, value_enum)]
    pub level: Option<SimplificationLevel>,

    /// Print the gateway request body instead of the chat completion request.
    #[arg(long)]
    pub gateway: bool,
}

/// Print the simplification request for a file as JSON.
#[instrument(name = "cmd_simplify", skip_all, fields(file = %args.file))]
pub fn cmd_simplify(
    args: SimplifyArgs,
    config_level: SimplificationLevel,
    model: &str,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let level = args.level.unwrap_or(config_level);
    debug!(level = %level, model, gateway = args.gateway, "executing simplify command");

    let content = document::read_text(&args.file, max_input_bytes)?;
    let request = SimplifyRequest::new(content, level)?;

    let json = if args.gateway {
        serde_json::to_string_pretty(&request)?
    } else {
        serde_json::to_string_pretty(&ChatRequest::simplify(&request, model))?
    };
    println!("{json}");
    Ok(())
}
