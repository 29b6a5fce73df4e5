//! Input documents: plain text, markdown, and images for text extraction.
//!
//! Every reader checks file size against a limit before loading the file,
//! so an oversized upload is rejected without being read into memory.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use camino::Utf8Path;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::error::{DocumentError, DocumentResult};

/// Default input limit (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// Image extensions accepted by [`read_data_url`] and their MIME types.
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("svg", "image/svg+xml"),
];

/// Whether a path names a markdown file.
pub fn is_markdown(path: &Utf8Path) -> bool {
    matches!(path.extension(), Some("md" | "markdown"))
}

/// Read a text file, reducing markdown to prose.
///
/// `max_bytes` of `None` disables the size check.
#[tracing::instrument(skip_all, fields(path = %path))]
pub fn read_text(path: &Utf8Path, max_bytes: Option<usize>) -> DocumentResult<String> {
    preflight(path, max_bytes)?;
    let content = std::fs::read_to_string(path.as_std_path()).map_err(|source| {
        DocumentError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;

    if is_markdown(path) {
        tracing::debug!("stripping markdown");
        Ok(strip_markdown(&content))
    } else {
        Ok(content)
    }
}

/// Read an image file and encode it as a base64 `data:` URL.
#[tracing::instrument(skip_all, fields(path = %path))]
pub fn read_data_url(path: &Utf8Path, max_bytes: Option<usize>) -> DocumentResult<String> {
    let mime = image_mime_type(path).ok_or_else(|| DocumentError::UnsupportedMediaType {
        path: path.to_path_buf(),
        available: IMAGE_TYPES
            .iter()
            .map(|(ext, _)| *ext)
            .collect::<Vec<_>>()
            .join(", "),
    })?;

    preflight(path, max_bytes)?;
    let bytes = std::fs::read(path.as_std_path()).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(bytes = bytes.len(), mime, "encoding image");
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

/// MIME type for a supported image extension (case-insensitive).
pub fn image_mime_type(path: &Utf8Path) -> Option<&'static str> {
    let ext = path.extension()?.to_ascii_lowercase();
    IMAGE_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
}

fn preflight(path: &Utf8Path, max_bytes: Option<usize>) -> DocumentResult<()> {
    let metadata = std::fs::metadata(path.as_std_path()).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if let Some(limit) = max_bytes
        && metadata.len() > limit as u64
    {
        return Err(DocumentError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit,
        });
    }
    Ok(())
}

/// Strip markdown formatting, returning plain prose.
///
/// Code blocks, inline code, headings and YAML front matter are dropped.
/// Link text, list items, block quotes and emphasized text are kept without
/// their markers.
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn strip_markdown(text: &str) -> String {
    let text = skip_front_matter(text);
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;

    let mut prose = String::with_capacity(text.len());
    let mut hidden: usize = 0;

    for event in Parser::new_ext(text, options) {
        match event {
            Event::Start(Tag::CodeBlock(_) | Tag::Heading { .. }) => hidden += 1,
            Event::End(TagEnd::CodeBlock | TagEnd::Heading(_)) => {
                hidden = hidden.saturating_sub(1);
            }
            Event::Text(t) if hidden == 0 => prose.push_str(&t),
            Event::SoftBreak | Event::HardBreak | Event::End(TagEnd::Paragraph)
                if hidden == 0 =>
            {
                prose.push(' ');
            }
            _ => {}
        }
    }

    prose
}

/// Drop a leading `---` delimited front matter block.
fn skip_front_matter(text: &str) -> &str {
    let Some(body) = text.trim_start().strip_prefix("---") else {
        return text;
    };
    match body.find("\n---") {
        Some(end) => {
            let rest = &body[end + 4..];
            rest.strip_prefix('\n').unwrap_or(rest)
        }
        None => text,
    }
}
