//! Extract command: build an image text extraction request.

use camino::Utf8PathBuf;
use clap::Args;
use tracing::{debug, instrument};

use readably_core::assist::{ChatRequest, ImageRequest};
use readably_core::document;

/// Arguments for the `extract` subcommand.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Image to extract text from (png, jpg, jpeg, gif, webp, bmp, svg).
    pub image: Utf8PathBuf,

    /// Print the gateway request body instead of the chat completion request.
    #[arg(long)]
    pub gateway: bool,
}

/// Print the extraction request for an image as JSON.
#[instrument(name = "cmd_extract", skip_all, fields(image = %args.image))]
pub fn cmd_extract(
    args: ExtractArgs,
    model: &str,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(model, gateway = args.gateway, "executing extract command");

    let data_url = document::read_data_url(&args.image, max_input_bytes)?;
    let request = ImageRequest::new(data_url)?;

    let json = if args.gateway {
        serde_json::to_string_pretty(&request)?
    } else {
        serde_json::to_string_pretty(&ChatRequest::extract_text(&request, model))?
    };
    println!("{json}");
    Ok(())
}
